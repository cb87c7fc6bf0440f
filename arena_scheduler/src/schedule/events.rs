//! Private event slots.

use super::SyncOutcome;
use super::errors::ScheduleError;
use super::models::{PrivateEventScheduleSource, ReservationSlot, SlotSource};
use super::time::{non_blank, parse_for};
use chrono::NaiveTime;
use log::{debug, warn};

/// Generate one slot per day per assigned court
///
/// Only confirmed and completed events occupy the calendar. A court's own
/// window wins over the event's general window; a court whose window cannot
/// be parsed is reported and left out.
pub fn event_slots(source: &PrivateEventScheduleSource) -> SyncOutcome {
    let origin = SlotSource::event(&source.id);
    let mut outcome = SyncOutcome::default();

    if !source.status.materializes_slots() {
        debug!(
            "Event {} is {:?}, nothing to reserve",
            source.id, source.status
        );
        return outcome;
    }

    let start_date = source.start_date;
    let end_date = source.end_date.unwrap_or(start_date);
    if end_date < start_date {
        warn!(
            "Event {} ends on {} before it starts on {}",
            source.id, end_date, start_date
        );
        outcome.issues.push(ScheduleError::InvalidWindow {
            origin,
            start: start_date,
            end: end_date,
        });
        return outcome;
    }

    let mut windows: Vec<(&str, NaiveTime, NaiveTime)> =
        Vec::with_capacity(source.courts.len());
    for court in &source.courts {
        let start_raw =
            non_blank(court.start_time.as_deref()).unwrap_or(source.start_time.as_str());
        let end_raw = non_blank(court.end_time.as_deref()).unwrap_or(source.end_time.as_str());

        match (parse_for(&origin, start_raw), parse_for(&origin, end_raw)) {
            (Ok(start), Ok(end)) => windows.push((court.court_id.as_str(), start, end)),
            (Err(err), _) | (_, Err(err)) => {
                warn!(
                    "Skipping court {} of event {}: {err}",
                    court.court_id, source.id
                );
                outcome.issues.push(err);
            }
        }
    }

    for day in start_date.iter_days().take_while(|day| *day <= end_date) {
        for &(court_id, start, end) in &windows {
            outcome.slots.push(ReservationSlot {
                id: origin.slot_id(&format!("{court_id}:{day}")),
                court_id: court_id.to_string(),
                date: day,
                start_time: start,
                end_time: end,
                source: origin.clone(),
                label: source.name.clone(),
            });
        }
    }

    debug!(
        "Event {} reserves {} court-days",
        source.id,
        outcome.slots.len()
    );

    outcome
}
