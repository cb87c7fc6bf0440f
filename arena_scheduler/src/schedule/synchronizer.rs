//! Schedule synchronizer: producers plus the replace-by-source step.

use super::catalog::CourtCatalog;
use super::classes::class_slots;
use super::config::SchedulerConfig;
use super::errors::ScheduleError;
use super::events::event_slots;
use super::models::{
    PrivateEventScheduleSource, RecurringScheduleDefinition, ReservationSlot, SlotSource,
    TournamentScheduleSource,
};
use super::reconcile::reconcile;
use super::tournaments::tournament_slots;
use serde::Serialize;

/// Result of a synchronization run
///
/// `slots` is the complete list to persist. `issues` lists the rules, days or
/// matches that were skipped; they never prevent the rest from syncing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub slots: Vec<ReservationSlot>,
    pub issues: Vec<ScheduleError>,
}

impl SyncOutcome {
    pub fn into_slots(self) -> Vec<ReservationSlot> {
        self.slots
    }

    /// True when nothing was skipped
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Merge freshly generated slots for `origin` into `all_slots`
    fn reconciled(self, origin: &SlotSource, all_slots: Vec<ReservationSlot>) -> Self {
        Self {
            slots: reconcile(origin, all_slots, self.slots),
            issues: self.issues,
        }
    }
}

/// Synchronizes recurring definitions into reservation slots
///
/// Every method removes the slots previously generated for the given
/// definition and inserts freshly computed ones, so calling it again with the
/// same inputs returns the same list. Callers must serialize runs against the
/// same stored list.
#[derive(Debug, Clone)]
pub struct ScheduleSynchronizer<C = ()> {
    config: SchedulerConfig,
    catalog: C,
}

impl ScheduleSynchronizer<()> {
    /// Create a synchronizer without a court catalog
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            catalog: (),
        }
    }
}

impl Default for ScheduleSynchronizer<()> {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl<C: CourtCatalog> ScheduleSynchronizer<C> {
    /// Create a synchronizer consulting `catalog` for match durations
    pub fn with_catalog(config: SchedulerConfig, catalog: C) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Replace the slots of a recurring class
    pub fn sync_class_slots(
        &self,
        definition: &RecurringScheduleDefinition,
        all_slots: Vec<ReservationSlot>,
    ) -> SyncOutcome {
        class_slots(definition, &self.config)
            .reconciled(&SlotSource::class(&definition.id), all_slots)
    }

    /// Replace the slots of a tournament's scheduled matches
    pub fn sync_tournament_slots(
        &self,
        tournament: &TournamentScheduleSource,
        all_slots: Vec<ReservationSlot>,
    ) -> SyncOutcome {
        tournament_slots(tournament, &self.config, &self.catalog)
            .reconciled(&SlotSource::tournament(&tournament.id), all_slots)
    }

    /// Replace the slots of a private event
    pub fn sync_event_slots(
        &self,
        event: &PrivateEventScheduleSource,
        all_slots: Vec<ReservationSlot>,
    ) -> SyncOutcome {
        event_slots(event).reconciled(&SlotSource::event(&event.id), all_slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::models::{EventCourt, EventStatus, WeeklyRule};
    use chrono::{NaiveDate, NaiveTime};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn class() -> RecurringScheduleDefinition {
        RecurringScheduleDefinition {
            id: "c-1".into(),
            name: "Volley".into(),
            court_id: "sand-1".into(),
            rules: vec![WeeklyRule::new(1, "18:00", "20:00")],
            start_date: date(1, 1),
            end_date: Some(date(1, 15)),
        }
    }

    fn booking() -> ReservationSlot {
        ReservationSlot {
            id: "booking-1".into(),
            court_id: "sand-1".into(),
            date: date(1, 2),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            source: SlotSource::ad_hoc("booking-1"),
            label: "Walk-in".into(),
        }
    }

    #[test]
    fn test_class_sync_keeps_other_slots() {
        let sync = ScheduleSynchronizer::default();
        let outcome = sync.sync_class_slots(&class(), vec![booking()]);
        assert_eq!(outcome.slots.len(), 7);
        assert_eq!(outcome.slots[0].id, "booking-1");
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_class_sync_is_idempotent() {
        let sync = ScheduleSynchronizer::default();
        let once = sync.sync_class_slots(&class(), vec![booking()]).into_slots();
        let twice = sync.sync_class_slots(&class(), once.clone()).into_slots();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_shrinking_class_removes_old_slots() {
        let sync = ScheduleSynchronizer::default();
        let mut def = class();
        let before = sync.sync_class_slots(&def, Vec::new()).into_slots();

        def.end_date = Some(date(1, 1));
        let after = sync.sync_class_slots(&def, before).into_slots();
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_cancelling_event_clears_its_slots() {
        let sync = ScheduleSynchronizer::default();
        let mut event = PrivateEventScheduleSource {
            id: "e-1".into(),
            name: "Birthday".into(),
            status: EventStatus::Confirmed,
            start_date: date(3, 2),
            end_date: None,
            start_time: "14:00".into(),
            end_time: "17:00".into(),
            courts: vec![EventCourt::new("sand-1")],
        };
        let slots = sync.sync_event_slots(&event, vec![booking()]).into_slots();
        assert_eq!(slots.len(), 2);

        event.status = EventStatus::Cancelled;
        let slots = sync.sync_event_slots(&event, slots).into_slots();
        assert_eq!(slots, vec![booking()]);
    }
}
