//! Tournament match slots.

use super::SyncOutcome;
use super::catalog::CourtCatalog;
use super::config::SchedulerConfig;
use super::models::{ReservationSlot, SlotSource, TournamentScheduleSource};
use super::time::{non_blank, parse_for};
use crate::bracket::{Match, SlotIndex};
use chrono::TimeDelta;
use log::{debug, warn};

/// Slot label: `"<tournament>: <home> vs <away>"`
fn match_label(
    source: &TournamentScheduleSource,
    m: &Match,
    config: &SchedulerConfig,
) -> String {
    let name = |slot: SlotIndex| {
        m.participant(slot)
            .map_or(config.placeholder_label.as_str(), |id| {
                source.participant_name(id)
            })
    };
    format!(
        "{}: {} vs {}",
        source.name,
        name(SlotIndex::Home),
        name(SlotIndex::Away)
    )
}

/// Generate one slot per fully scheduled match
///
/// Matches without a court, date or start time are skipped: that is the
/// normal state of a bracket still being scheduled. Nothing is generated while
/// the tournament is planned or cancelled.
pub fn tournament_slots<C: CourtCatalog + ?Sized>(
    source: &TournamentScheduleSource,
    config: &SchedulerConfig,
    catalog: &C,
) -> SyncOutcome {
    let origin = SlotSource::tournament(&source.id);
    let mut outcome = SyncOutcome::default();

    if !source.status.materializes_slots() {
        debug!(
            "Tournament {} is {:?}, matches stay off the calendar",
            source.id, source.status
        );
        return outcome;
    }

    for m in &source.matches {
        let (Some(court_id), Some(date), Some(start_raw)) = (
            m.court_id.as_deref(),
            m.date,
            non_blank(m.start_time.as_deref()),
        ) else {
            continue;
        };

        let start = match parse_for(&origin, start_raw) {
            Ok(start) => start,
            Err(err) => {
                warn!("Skipping match {} of {}: {err}", m.id, m.category_id);
                outcome.issues.push(err);
                continue;
            }
        };

        let minutes = catalog
            .slot_minutes(court_id)
            .filter(|&minutes| minutes > 0)
            .unwrap_or(config.default_match_minutes);
        let (end, _) = start.overflowing_add_signed(TimeDelta::minutes(i64::from(minutes)));

        outcome.slots.push(ReservationSlot {
            id: origin.slot_id(&format!("{}:{}", m.category_id, m.id.0)),
            court_id: court_id.to_string(),
            date,
            start_time: start,
            end_time: end,
            source: origin.clone(),
            label: match_label(source, m, config),
        });
    }

    debug!(
        "Tournament {} has {} scheduled matches on the calendar",
        source.id,
        outcome.slots.len()
    );

    outcome
}
