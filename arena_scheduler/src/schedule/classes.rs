//! Recurring class expansion.
//!
//! A class is a set of weekly rules valid over a date window. Every day of the
//! window that matches a rule's weekday produces one block, and each block is
//! cut into fixed-length sub-slots. Blocks whose end time is not after their
//! start time run into the next day.

use super::SyncOutcome;
use super::config::SchedulerConfig;
use super::errors::ScheduleError;
use super::models::{
    RecurringScheduleDefinition, ReservationSlot, SlotSource, WeeklyRule, wrapped_duration,
};
use super::time::parse_for;
use chrono::{Datelike, Months, NaiveDate, NaiveTime, TimeDelta};
use log::{debug, warn};

/// A weekly rule with its times parsed
struct WeeklyBlock {
    day: u32,
    start: NaiveTime,
    length: TimeDelta,
}

fn parse_rule(origin: &SlotSource, rule: &WeeklyRule) -> Result<WeeklyBlock, ScheduleError> {
    if rule.day_of_week > 6 {
        return Err(ScheduleError::InvalidDayOfWeek {
            origin: origin.clone(),
            day: rule.day_of_week,
        });
    }

    let start = parse_for(origin, &rule.start_time)?;
    let end = parse_for(origin, &rule.end_time)?;

    Ok(WeeklyBlock {
        day: u32::from(rule.day_of_week),
        start,
        length: wrapped_duration(start, end),
    })
}

/// Last day to expand: the end date, or the configured horizon after start
fn window_end(
    definition: &RecurringScheduleDefinition,
    config: &SchedulerConfig,
    origin: &SlotSource,
) -> Result<NaiveDate, ScheduleError> {
    match definition.end_date {
        Some(end) => Ok(end),
        None => definition
            .start_date
            .checked_add_months(Months::new(config.horizon_months))
            .ok_or_else(|| ScheduleError::HorizonOverflow {
                origin: origin.clone(),
                start: definition.start_date,
                months: config.horizon_months,
            }),
    }
}

/// Generate the slots of one class definition
///
/// Returns fresh slots only; [`reconcile`](super::reconcile) merges them into
/// the calendar.
pub fn class_slots(
    definition: &RecurringScheduleDefinition,
    config: &SchedulerConfig,
) -> SyncOutcome {
    let origin = SlotSource::class(&definition.id);
    let mut outcome = SyncOutcome::default();

    if definition.rules.is_empty() {
        return outcome;
    }

    let start_date = definition.start_date;
    let end_date = match window_end(definition, config, &origin) {
        Ok(end_date) => end_date,
        Err(err) => {
            warn!("Class {} not expanded: {err}", definition.id);
            outcome.issues.push(err);
            return outcome;
        }
    };
    if end_date < start_date {
        warn!(
            "Class {} has end date {} before start date {}, no slots generated",
            definition.id, end_date, start_date
        );
        outcome.issues.push(ScheduleError::InvalidWindow {
            origin,
            start: start_date,
            end: end_date,
        });
        return outcome;
    }

    let mut blocks = Vec::with_capacity(definition.rules.len());
    for rule in &definition.rules {
        match parse_rule(&origin, rule) {
            Ok(block) => blocks.push(block),
            Err(err) => {
                warn!("Skipping weekly rule: {err}");
                outcome.issues.push(err);
            }
        }
    }

    let step = TimeDelta::minutes(i64::from(config.sub_slot_minutes.max(1)));

    for day in start_date.iter_days().take_while(|day| *day <= end_date) {
        let weekday = day.weekday().num_days_from_sunday();

        for block in blocks.iter().filter(|block| block.day == weekday) {
            let pieces = block.length.num_minutes() / step.num_minutes();
            let mut piece_start = day.and_time(block.start);

            for _ in 0..pieces {
                // Pieces past the last representable instant are dropped
                let Some(piece_end) = piece_start.checked_add_signed(step) else {
                    break;
                };
                let key = piece_start.format("%Y-%m-%dT%H:%M").to_string();

                outcome.slots.push(ReservationSlot {
                    id: origin.slot_id(&key),
                    court_id: definition.court_id.clone(),
                    date: piece_start.date(),
                    start_time: piece_start.time(),
                    end_time: piece_end.time(),
                    source: origin.clone(),
                    label: definition.name.clone(),
                });

                piece_start = piece_end;
            }
        }
    }

    debug!(
        "Class {} expanded to {} slots between {} and {}",
        definition.id,
        outcome.slots.len(),
        start_date,
        end_date
    );

    outcome
}
