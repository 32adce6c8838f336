use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use slotbook_core::models::{
    booking::{Booking, BookingStatus},
    ids::{BookingId, OperatorId},
    operator::Operator,
};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOperator {
    pub id: String,
    pub operator_name: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbOperator> for Operator {
    type Error = eyre::Report;

    fn try_from(row: DbOperator) -> Result<Self> {
        Ok(Operator {
            id: OperatorId::parse(row.id).wrap_err("Invalid operator id in storage")?,
            name: row.operator_name,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub booking_id: String,
    pub operator_id: String,
    pub status: String,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_rescheduled: bool,
    pub is_cancelled: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbBooking> for Booking {
    type Error = eyre::Report;

    fn try_from(row: DbBooking) -> Result<Self> {
        Ok(Booking {
            booking_id: BookingId::parse(row.booking_id)
                .wrap_err("Invalid booking id in storage")?,
            operator_id: OperatorId::parse(row.operator_id)
                .wrap_err("Invalid operator id in storage")?,
            status: row
                .status
                .parse::<BookingStatus>()
                .wrap_err("Invalid booking status in storage")?,
            booking_date: row.booking_date,
            start_time: row.start_time,
            end_time: row.end_time,
            is_rescheduled: row.is_rescheduled,
            is_cancelled: row.is_cancelled,
            created_at: row.created_at,
        })
    }
}
