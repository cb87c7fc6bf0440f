//! Schedule error types.
//!
//! None of these abort a synchronization run. They are collected in
//! [`SyncOutcome::issues`](super::SyncOutcome) so the caller can surface them,
//! while the affected rule, day or match simply contributes no slot.

use super::models::SlotSource;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Non-fatal synchronization problems
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleError {
    /// Window end precedes its start
    #[error("Invalid date window for {origin}: {end} is before {start}")]
    InvalidWindow {
        origin: SlotSource,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Time string that is not `HH:MM` or `HH:MM:SS`
    #[error("Unparseable time {value:?} in {origin}")]
    UnparseableTime { origin: SlotSource, value: String },

    /// Open-ended window whose horizon runs past the last representable date
    #[error("Expansion horizon of {months} months from {start} overflows for {origin}")]
    HorizonOverflow {
        origin: SlotSource,
        start: NaiveDate,
        months: u32,
    },

    /// Weekly rule day outside 0..=6
    #[error("Invalid day of week {day} in {origin}")]
    InvalidDayOfWeek { origin: SlotSource, day: u8 },
}

impl ScheduleError {
    /// Definition the problem belongs to
    pub fn origin(&self) -> &SlotSource {
        match self {
            ScheduleError::InvalidWindow { origin, .. }
            | ScheduleError::HorizonOverflow { origin, .. }
            | ScheduleError::UnparseableTime { origin, .. }
            | ScheduleError::InvalidDayOfWeek { origin, .. } => origin,
        }
    }
}
