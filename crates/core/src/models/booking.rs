use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::errors::SlotError;
use crate::models::ids::{BookingId, OperatorId};
use crate::slots::Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Booked,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Booked => "booked",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booked" => Ok(BookingStatus::Booked),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(SlotError::Validation(format!(
                "unknown booking status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking record as held in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: BookingId,
    pub operator_id: OperatorId,
    pub status: BookingStatus,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_rescheduled: bool,
    pub is_cancelled: bool,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn slot(&self) -> Slot {
        Slot::new(self.start_time, self.end_time)
    }

    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Booked
    }
}

/// Fields of a booking about to be written to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub booking_id: BookingId,
    pub operator_id: OperatorId,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub operator_id: OperatorId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub booking_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub booking_id: BookingId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleBookingRequest {
    pub booking_id: BookingId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub booking_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleBookingResponse {
    pub booking: Booking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSlotsQuery {
    pub operator_id: OperatorId,
    pub booking_date: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub view_booked_slots: bool,
}

/// Parses a query flag. Besides `true`/`false` this accepts `1`/`0`,
/// `yes`/`no`, `on`/`off`, `t`/`f` and `y`/`n`, in any letter case.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl de::Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean flag such as true, false, 1 or 0")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(de::Unexpected::Unsigned(value), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
            parse_flag(value).ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSlotsResponse {
    pub booking_date: NaiveDate,
    pub slots: Vec<String>,
}
