//! # Booking Service
//!
//! Orchestrates operator registration and the booking lifecycle on top of
//! the repository traits from `slotbook-db`:
//!
//! ```text
//! booked --reschedule--> booked (is_rescheduled)
//! booked --cancel------> cancelled (terminal)
//! ```
//!
//! Each operation checks its preconditions in a fixed order (existence,
//! window rules, conflicts) so clients get a stable error for a given
//! request. Conflict checks read first for a clear message, but the write
//! itself is guarded by the store's unique constraints, so two racing
//! requests can never both succeed.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use slotbook_core::{
    errors::{SlotError, SlotResult},
    models::{
        booking::{Booking, BookingStatus, NewBooking, ViewSlotsResponse},
        ids::{BookingId, OperatorId},
        operator::normalize_operator_name,
    },
    slots::{free_ranges, validate_window, Slot},
};
use slotbook_db::repositories::{BookingRepository, LedgerWrite, OperatorRepository};
use tracing::info;

const OPERATOR_NOT_REGISTERED: &str = "Operator not registered";
const BOOKING_NOT_FOUND: &str = "Booking does not exist";

#[derive(Clone)]
pub struct BookingService {
    operators: Arc<dyn OperatorRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(
        operators: Arc<dyn OperatorRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            operators,
            bookings,
        }
    }

    /// Registers an operator under a unique name and returns its new id.
    ///
    /// # Errors
    ///
    /// * `SlotError::Validation` - blank or oversized name
    /// * `SlotError::Conflict` - the name is already registered
    pub async fn register_operator(&self, name: &str) -> SlotResult<OperatorId> {
        let name = normalize_operator_name(name)?;
        let id = OperatorId::generate();

        let operator = self
            .operators
            .insert_operator(&id, &name)
            .await?
            .ok_or_else(|| SlotError::Conflict("Operator already exists".to_string()))?;

        info!("Registered operator {} ({})", operator.id, operator.name);
        Ok(operator.id)
    }

    pub async fn operator_exists(&self, id: &OperatorId) -> SlotResult<bool> {
        Ok(self.operators.operator_exists(id).await?)
    }

    async fn require_operator(&self, id: &OperatorId) -> SlotResult<()> {
        if self.operator_exists(id).await? {
            Ok(())
        } else {
            Err(SlotError::NotFound(OPERATOR_NOT_REGISTERED.to_string()))
        }
    }

    /// Books a one-hour window for an operator.
    ///
    /// # Errors
    ///
    /// * `SlotError::NotFound` - unknown operator
    /// * `SlotError::PreconditionFailed` - start is not before end
    /// * `SlotError::UnprocessableDuration` - window is not one hour
    /// * `SlotError::Conflict` - the window is already booked
    pub async fn create_booking(
        &self,
        operator_id: &OperatorId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> SlotResult<BookingId> {
        self.require_operator(operator_id).await?;
        let window = validate_window(start, end)?;

        let slot_taken = || {
            SlotError::Conflict(
                "Booking already exists, please select some other slot or date".to_string(),
            )
        };

        if self
            .bookings
            .find_booked(operator_id, date, start, end)
            .await?
            .is_some()
        {
            return Err(slot_taken());
        }

        let new_booking = NewBooking {
            booking_id: BookingId::generate(),
            operator_id: operator_id.clone(),
            booking_date: date,
            start_time: start,
            end_time: end,
        };

        let booking = self
            .bookings
            .insert_booking(&new_booking)
            .await?
            .ok_or_else(slot_taken)?;

        info!(
            "Booked {} for operator {} on {} ({})",
            booking.booking_id, operator_id, date, window
        );
        Ok(booking.booking_id)
    }

    /// Moves a live booking to another date and window.
    ///
    /// The target counts as occupied when any live booking of the same
    /// operator holds it, the booking being moved included.
    ///
    /// # Errors
    ///
    /// * `SlotError::NotFound` - unknown or cancelled booking
    /// * `SlotError::PreconditionFailed` / `SlotError::UnprocessableDuration` - bad window
    /// * `SlotError::Conflict` - the target window is taken
    pub async fn reschedule_booking(
        &self,
        booking_id: &BookingId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> SlotResult<Booking> {
        let current = self
            .bookings
            .get_booking(booking_id)
            .await?
            .filter(Booking::is_active)
            .ok_or_else(|| SlotError::NotFound(BOOKING_NOT_FOUND.to_string()))?;

        let window = validate_window(start, end)?;

        let slot_taken =
            || SlotError::Conflict("Please select some other slot or date".to_string());

        if self
            .bookings
            .find_booked(&current.operator_id, date, start, end)
            .await?
            .is_some()
        {
            return Err(slot_taken());
        }

        match self
            .bookings
            .reschedule_booking(booking_id, date, start, end)
            .await?
        {
            LedgerWrite::Applied(booking) => {
                info!("Rescheduled {} to {} ({})", booking_id, date, window);
                Ok(booking)
            }
            LedgerWrite::SlotTaken => Err(slot_taken()),
            LedgerWrite::NotBooked => Err(SlotError::NotFound(BOOKING_NOT_FOUND.to_string())),
        }
    }

    /// Cancels a live booking.
    ///
    /// # Errors
    ///
    /// * `SlotError::NotFound` - unknown booking
    /// * `SlotError::PreconditionFailed` - already cancelled
    pub async fn cancel_booking(&self, booking_id: &BookingId) -> SlotResult<Booking> {
        let booking = self
            .bookings
            .get_booking(booking_id)
            .await?
            .ok_or_else(|| SlotError::NotFound(BOOKING_NOT_FOUND.to_string()))?;

        let already_cancelled =
            || SlotError::PreconditionFailed("Booking already cancelled".to_string());

        if booking.status == BookingStatus::Cancelled {
            return Err(already_cancelled());
        }

        let cancelled = self
            .bookings
            .cancel_booking(booking_id)
            .await?
            .ok_or_else(already_cancelled)?;

        info!("Cancelled booking {}", booking_id);
        Ok(cancelled)
    }

    /// Slots of an operator on `date` (today when omitted).
    ///
    /// With `view_booked_slots` the labels of live bookings are returned in
    /// start-time order; otherwise the free catalog slots merged into
    /// contiguous ranges.
    ///
    /// # Errors
    ///
    /// * `SlotError::PreconditionFailed` - date is after today
    /// * `SlotError::NotFound` - unknown operator
    pub async fn view_slots(
        &self,
        operator_id: &OperatorId,
        date: Option<NaiveDate>,
        view_booked_slots: bool,
    ) -> SlotResult<ViewSlotsResponse> {
        let today = Utc::now().date_naive();
        self.view_slots_as_of(operator_id, date, view_booked_slots, today)
            .await
    }

    /// [`Self::view_slots`] with an explicit notion of "today".
    pub async fn view_slots_as_of(
        &self,
        operator_id: &OperatorId,
        date: Option<NaiveDate>,
        view_booked_slots: bool,
        today: NaiveDate,
    ) -> SlotResult<ViewSlotsResponse> {
        let booking_date = date.unwrap_or(today);
        if booking_date > today {
            return Err(SlotError::PreconditionFailed(
                "Future date not allowed".to_string(),
            ));
        }

        self.require_operator(operator_id).await?;

        let booked: Vec<Slot> = self
            .bookings
            .booked_for_date(operator_id, booking_date)
            .await?
            .iter()
            .map(Booking::slot)
            .collect();

        let slots = if view_booked_slots {
            booked.iter().map(Slot::label).collect()
        } else {
            free_ranges(&booked).iter().map(|range| range.label()).collect()
        };

        Ok(ViewSlotsResponse {
            booking_date,
            slots,
        })
    }
}
