use crate::models::DbBooking;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use slotbook_core::models::{
    booking::{Booking, NewBooking},
    ids::{BookingId, OperatorId},
};
use sqlx::{Pool, Postgres};

use super::{BookingRepository, LedgerWrite};

const BOOKING_COLUMNS: &str = "booking_id, operator_id, status, booking_date, start_time, \
                               end_time, is_rescheduled, is_cancelled, created_at";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

pub async fn insert_booking(
    pool: &Pool<Postgres>,
    booking: &NewBooking,
) -> Result<Option<DbBooking>> {
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, operator_id={}, date={}, window={}-{}",
        booking.booking_id,
        booking.operator_id,
        booking.booking_date,
        booking.start_time,
        booking.end_time
    );

    // The conflict target names the partial unique index on live bookings, so
    // a concurrent insert for the same window returns no row instead of a
    // second booking.
    let sql = format!(
        r#"
        INSERT INTO booking (booking_id, operator_id, status, booking_date, start_time, end_time,
                             is_rescheduled, is_cancelled, created_at)
        VALUES ($1, $2, 'booked', $3, $4, $5, FALSE, FALSE, $6)
        ON CONFLICT (operator_id, booking_date, start_time, end_time) WHERE status = 'booked'
        DO NOTHING
        RETURNING {BOOKING_COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, DbBooking>(&sql)
        .bind(booking.booking_id.as_str())
        .bind(booking.operator_id.as_str())
        .bind(booking.booking_date)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(now)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: &str) -> Result<Option<DbBooking>> {
    let sql = format!("SELECT {BOOKING_COLUMNS} FROM booking WHERE booking_id = $1");

    let row = sqlx::query_as::<_, DbBooking>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn find_booked(
    pool: &Pool<Postgres>,
    operator_id: &str,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> Result<Option<DbBooking>> {
    let sql = format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM booking
        WHERE operator_id = $1
          AND booking_date = $2
          AND start_time = $3
          AND end_time = $4
          AND status = 'booked'
        "#
    );

    let row = sqlx::query_as::<_, DbBooking>(&sql)
        .bind(operator_id)
        .bind(date)
        .bind(start)
        .bind(end)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Moves a live booking. `Ok(None)` means no live row matched; a unique
/// index violation is reported as `Err` and classified by the caller.
pub async fn reschedule_booking(
    pool: &Pool<Postgres>,
    id: &str,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> std::result::Result<Option<DbBooking>, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE booking
        SET booking_date = $2, start_time = $3, end_time = $4, is_rescheduled = TRUE
        WHERE booking_id = $1 AND status = 'booked'
        RETURNING {BOOKING_COLUMNS}
        "#
    );

    sqlx::query_as::<_, DbBooking>(&sql)
        .bind(id)
        .bind(date)
        .bind(start)
        .bind(end)
        .fetch_optional(pool)
        .await
}

pub async fn cancel_booking(pool: &Pool<Postgres>, id: &str) -> Result<Option<DbBooking>> {
    let sql = format!(
        r#"
        UPDATE booking
        SET status = 'cancelled', is_cancelled = TRUE
        WHERE booking_id = $1 AND status = 'booked'
        RETURNING {BOOKING_COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, DbBooking>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn get_booked_for_date(
    pool: &Pool<Postgres>,
    operator_id: &str,
    date: NaiveDate,
) -> Result<Vec<DbBooking>> {
    let sql = format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM booking
        WHERE operator_id = $1 AND booking_date = $2 AND status = 'booked'
        ORDER BY start_time ASC, created_at ASC
        "#
    );

    let rows = sqlx::query_as::<_, DbBooking>(&sql)
        .bind(operator_id)
        .bind(date)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// [`BookingRepository`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgBookingRepository {
    pool: Pool<Postgres>,
}

impl PgBookingRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn insert_booking(&self, booking: &NewBooking) -> Result<Option<Booking>> {
        insert_booking(&self.pool, booking)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn get_booking(&self, id: &BookingId) -> Result<Option<Booking>> {
        get_booking_by_id(&self.pool, id.as_str())
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn find_booked(
        &self,
        operator_id: &OperatorId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Option<Booking>> {
        find_booked(&self.pool, operator_id.as_str(), date, start, end)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn reschedule_booking(
        &self,
        id: &BookingId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<LedgerWrite> {
        match reschedule_booking(&self.pool, id.as_str(), date, start, end).await {
            Ok(Some(row)) => Ok(LedgerWrite::Applied(Booking::try_from(row)?)),
            Ok(None) => Ok(LedgerWrite::NotBooked),
            Err(err) if is_unique_violation(&err) => {
                tracing::debug!("Reschedule of {} hit the active slot index", id);
                Ok(LedgerWrite::SlotTaken)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn cancel_booking(&self, id: &BookingId) -> Result<Option<Booking>> {
        cancel_booking(&self.pool, id.as_str())
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn booked_for_date(
        &self,
        operator_id: &OperatorId,
        date: NaiveDate,
    ) -> Result<Vec<Booking>> {
        get_booked_for_date(&self.pool, operator_id.as_str(), date)
            .await?
            .into_iter()
            .map(Booking::try_from)
            .collect()
    }
}
