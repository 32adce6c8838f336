//! # Slot Catalog
//!
//! The day is divided into 24 fixed one-hour slots, from `00:00:00-01:00:00`
//! through the wraparound slot `23:00:00-00:00:00`. This module owns that
//! catalog, the rules a requested booking window must satisfy, and the
//! merging of free catalog slots into contiguous ranges for display.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Duration, NaiveTime, Timelike};

use crate::errors::{SlotError, SlotResult};

/// Number of slots in the daily catalog.
pub const SLOT_COUNT: usize = 24;

/// Required length of every booking, in minutes.
pub const SLOT_MINUTES: i64 = 60;

const SECONDS_PER_DAY: u32 = 86_400;

/// Wire and label format for times of day.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// The 24 canonical one-hour windows of a day, in chronological order.
pub static ALL_SLOTS: LazyLock<[Slot; SLOT_COUNT]> = LazyLock::new(|| {
    std::array::from_fn(|hour| Slot::new(hour_of_day(hour), hour_of_day((hour + 1) % SLOT_COUNT)))
});

fn hour_of_day(hour: usize) -> NaiveTime {
    NaiveTime::from_hms_opt(hour as u32, 0, 0).unwrap_or_default()
}

fn format_seconds(seconds: u32) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        seconds % 3600 / 60,
        seconds % 60
    )
}

/// A time-of-day window such as `09:00:00-10:00:00`.
///
/// An end of `00:00:00` after a later start is read as the following
/// midnight, which is how the wraparound slot spans the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    start: NaiveTime,
    end: NaiveTime,
}

impl Slot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// True for the `23:00:00-00:00:00` slot.
    pub fn is_wraparound(&self) -> bool {
        self.start == hour_of_day(23) && self.end == NaiveTime::default()
    }

    fn start_second(&self) -> u32 {
        self.start.num_seconds_from_midnight()
    }

    fn end_second(&self) -> u32 {
        let end = self.end.num_seconds_from_midnight();
        if end == 0 && self.start_second() > 0 {
            SECONDS_PER_DAY
        } else {
            end
        }
    }

    /// Half-open overlap test.
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start_second() < other.end_second() && other.start_second() < self.end_second()
    }

    /// Catalog label, e.g. `23:00:00-00:00:00`.
    pub fn label(&self) -> String {
        format!(
            "{}-{}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Returns the full daily catalog.
pub fn all_slots() -> &'static [Slot] {
    ALL_SLOTS.as_slice()
}

/// Checks that `start..end` is a bookable one-hour window.
///
/// The wraparound slot `23:00:00-00:00:00` is accepted even though its end
/// sorts before its start.
///
/// # Errors
///
/// * `SlotError::Validation` - start or end carries fractional seconds
/// * `SlotError::PreconditionFailed` - start is not before end
/// * `SlotError::UnprocessableDuration` - the window is not exactly one hour
pub fn validate_window(start: NaiveTime, end: NaiveTime) -> SlotResult<Slot> {
    // Labels and overlap checks work in whole seconds.
    if start.nanosecond() != 0 || end.nanosecond() != 0 {
        return Err(SlotError::Validation(
            "Times must be given in whole seconds".to_string(),
        ));
    }

    let window = Slot::new(start, end);
    if window.is_wraparound() {
        return Ok(window);
    }

    if start >= end {
        return Err(SlotError::PreconditionFailed(
            "Start time must be earlier than end time".to_string(),
        ));
    }

    if end.signed_duration_since(start) != Duration::minutes(SLOT_MINUTES) {
        return Err(SlotError::UnprocessableDuration(
            "Booking should be for exactly 1 hour".to_string(),
        ));
    }

    Ok(window)
}

/// A maximal run of contiguous free catalog slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeRange {
    start_second: u32,
    end_second: u32,
}

impl FreeRange {
    /// Display label. A range that runs to the end of the day ends at
    /// `24:00:00` rather than `00:00:00`.
    pub fn label(&self) -> String {
        format!(
            "{}-{}",
            format_seconds(self.start_second),
            format_seconds(self.end_second)
        )
    }
}

impl fmt::Display for FreeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Catalog slots not overlapping any of `booked`, merged into contiguous
/// ranges in chronological order.
///
/// A slot is merged into the previous range when the range ends exactly
/// where the slot starts. When every slot is taken the result is empty.
pub fn free_ranges(booked: &[Slot]) -> Vec<FreeRange> {
    let mut ranges: Vec<FreeRange> = Vec::new();

    for slot in all_slots()
        .iter()
        .filter(|slot| !booked.iter().any(|taken| taken.overlaps(slot)))
    {
        match ranges.last_mut() {
            Some(last) if last.end_second == slot.start_second() => {
                last.end_second = slot.end_second();
            }
            _ => ranges.push(FreeRange {
                start_second: slot.start_second(),
                end_second: slot.end_second(),
            }),
        }
    }

    ranges
}
