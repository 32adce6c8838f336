//! Storage contract for operators and the booking ledger.
//!
//! Each submodule holds the PostgreSQL queries as free functions over a
//! pool plus a `Pg*Repository` adapter implementing the trait below. The
//! service layer only sees the traits, so tests can swap in
//! [`crate::mock`] doubles.

pub mod booking;
pub mod operator;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use eyre::Result;
use slotbook_core::models::{
    booking::{Booking, NewBooking},
    ids::{BookingId, OperatorId},
    operator::Operator,
};

pub use booking::PgBookingRepository;
pub use operator::PgOperatorRepository;

/// Outcome of moving a booking to a new window.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerWrite {
    /// The row was updated; carries the new state.
    Applied(Booking),
    /// Another live booking already holds the target window.
    SlotTaken,
    /// No live booking with that id exists any more.
    NotBooked,
}

#[async_trait]
pub trait OperatorRepository: Send + Sync {
    /// Persists a new operator. Returns `None` when the name is already taken.
    async fn insert_operator(&self, id: &OperatorId, name: &str) -> Result<Option<Operator>>;

    async fn operator_exists(&self, id: &OperatorId) -> Result<bool>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts a live booking unless one already holds the same operator,
    /// date and window, in which case `None` is returned and nothing is
    /// written.
    async fn insert_booking(&self, booking: &NewBooking) -> Result<Option<Booking>>;

    async fn get_booking(&self, id: &BookingId) -> Result<Option<Booking>>;

    /// The live booking holding exactly this window, if any.
    async fn find_booked(
        &self,
        operator_id: &OperatorId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Option<Booking>>;

    /// Moves a live booking and marks it rescheduled.
    async fn reschedule_booking(
        &self,
        id: &BookingId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<LedgerWrite>;

    /// Cancels a live booking. Returns `None` when it is missing or already
    /// cancelled.
    async fn cancel_booking(&self, id: &BookingId) -> Result<Option<Booking>>;

    /// Live bookings of an operator on a date, ordered by start time.
    async fn booked_for_date(&self, operator_id: &OperatorId, date: NaiveDate)
    -> Result<Vec<Booking>>;
}
