//! Time-of-day parsing for the `HH:MM` strings entered by staff.

use super::errors::ScheduleError;
use super::models::SlotSource;
use chrono::NaiveTime;

/// Parse `HH:MM` or `HH:MM:SS`
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Parse a time belonging to `origin`, reporting failures as a schedule issue
pub(crate) fn parse_for(origin: &SlotSource, value: &str) -> Result<NaiveTime, ScheduleError> {
    parse_time(value).ok_or_else(|| ScheduleError::UnparseableTime {
        origin: origin.clone(),
        value: value.to_string(),
    })
}

/// Treat blank strings as unset
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
