use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::{Result, eyre};
use slotbook_core::models::{
    booking::{Booking, BookingStatus, NewBooking},
    ids::{BookingId, OperatorId},
    operator::Operator,
};
use tokio::sync::RwLock;

use crate::repositories::{BookingRepository, LedgerWrite, OperatorRepository};

#[derive(Default)]
struct Tables {
    operators: HashMap<OperatorId, Operator>,
    bookings: Vec<Booking>,
}

impl Tables {
    fn holds_window(
        &self,
        operator_id: &OperatorId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Option<&Booking> {
        self.bookings.iter().find(|b| {
            b.is_active()
                && &b.operator_id == operator_id
                && b.booking_date == date
                && b.start_time == start
                && b.end_time == end
        })
    }
}

/// Ledger and registry kept in process memory.
///
/// Every write takes the table lock for its whole check-and-mutate step,
/// which gives the same guarantees as the unique constraints in
/// [`crate::schema`]: operator names are unique and each window holds at
/// most one live booking per operator and date.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of booking rows, cancelled ones included.
    pub async fn booking_count(&self) -> usize {
        self.tables.read().await.bookings.len()
    }
}

#[async_trait]
impl OperatorRepository for InMemoryStore {
    async fn insert_operator(&self, id: &OperatorId, name: &str) -> Result<Option<Operator>> {
        let mut tables = self.tables.write().await;
        if tables.operators.values().any(|op| op.name == name) {
            return Ok(None);
        }
        if tables.operators.contains_key(id) {
            return Err(eyre!("duplicate operator id {}", id));
        }

        let operator = Operator {
            id: id.clone(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        tables.operators.insert(id.clone(), operator.clone());
        Ok(Some(operator))
    }

    async fn operator_exists(&self, id: &OperatorId) -> Result<bool> {
        Ok(self.tables.read().await.operators.contains_key(id))
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn insert_booking(&self, booking: &NewBooking) -> Result<Option<Booking>> {
        let mut tables = self.tables.write().await;
        if tables
            .holds_window(
                &booking.operator_id,
                booking.booking_date,
                booking.start_time,
                booking.end_time,
            )
            .is_some()
        {
            return Ok(None);
        }
        if tables.bookings.iter().any(|b| b.booking_id == booking.booking_id) {
            return Err(eyre!("duplicate booking id {}", booking.booking_id));
        }

        let row = Booking {
            booking_id: booking.booking_id.clone(),
            operator_id: booking.operator_id.clone(),
            status: BookingStatus::Booked,
            booking_date: booking.booking_date,
            start_time: booking.start_time,
            end_time: booking.end_time,
            is_rescheduled: false,
            is_cancelled: false,
            created_at: Utc::now(),
        };
        tables.bookings.push(row.clone());
        Ok(Some(row))
    }

    async fn get_booking(&self, id: &BookingId) -> Result<Option<Booking>> {
        let tables = self.tables.read().await;
        Ok(tables.bookings.iter().find(|b| &b.booking_id == id).cloned())
    }

    async fn find_booked(
        &self,
        operator_id: &OperatorId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Option<Booking>> {
        let tables = self.tables.read().await;
        Ok(tables.holds_window(operator_id, date, start, end).cloned())
    }

    async fn reschedule_booking(
        &self,
        id: &BookingId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<LedgerWrite> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .bookings
            .iter()
            .position(|b| &b.booking_id == id && b.is_active())
        else {
            return Ok(LedgerWrite::NotBooked);
        };

        let operator_id = tables.bookings[index].operator_id.clone();
        if tables
            .holds_window(&operator_id, date, start, end)
            .is_some_and(|holder| &holder.booking_id != id)
        {
            return Ok(LedgerWrite::SlotTaken);
        }

        let booking = &mut tables.bookings[index];
        booking.booking_date = date;
        booking.start_time = start;
        booking.end_time = end;
        booking.is_rescheduled = true;
        Ok(LedgerWrite::Applied(booking.clone()))
    }

    async fn cancel_booking(&self, id: &BookingId) -> Result<Option<Booking>> {
        let mut tables = self.tables.write().await;
        let Some(booking) = tables
            .bookings
            .iter_mut()
            .find(|b| &b.booking_id == id && b.is_active())
        else {
            return Ok(None);
        };

        booking.status = BookingStatus::Cancelled;
        booking.is_cancelled = true;
        Ok(Some(booking.clone()))
    }

    async fn booked_for_date(
        &self,
        operator_id: &OperatorId,
        date: NaiveDate,
    ) -> Result<Vec<Booking>> {
        let tables = self.tables.read().await;
        let mut booked: Vec<Booking> = tables
            .bookings
            .iter()
            .filter(|b| b.is_active() && &b.operator_id == operator_id && b.booking_date == date)
            .cloned()
            .collect();
        booked.sort_by_key(|b| (b.start_time, b.created_at));
        Ok(booked)
    }
}
