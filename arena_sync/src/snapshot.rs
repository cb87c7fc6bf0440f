//! Calendar snapshots read from disk.
//!
//! A snapshot carries the stored reservation slots together with every
//! definition that should be synchronized into them.

use anyhow::{Context, Error};
use arena_scheduler::schedule::{
    Court, PrivateEventScheduleSource, RecurringScheduleDefinition, ReservationSlot,
    ScheduleError, ScheduleSynchronizer, SchedulerConfig, SlotConflict, TournamentScheduleSource,
    find_conflicts,
};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Stored calendar plus the definitions to synchronize
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub slots: Vec<ReservationSlot>,
    pub courts: Vec<Court>,
    pub classes: Vec<RecurringScheduleDefinition>,
    pub tournaments: Vec<TournamentScheduleSource>,
    pub events: Vec<PrivateEventScheduleSource>,
}

/// Result of synchronizing a snapshot
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub slots: Vec<ReservationSlot>,
    pub issues: Vec<ScheduleError>,
    pub conflicts: Vec<SlotConflict>,
}

/// Read a JSON document from `path`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self, Error> {
        read_json(path)
    }

    /// Run every synchronizer in turn over one slot list
    ///
    /// Classes go first, then tournaments, then events. Each run only replaces
    /// the slots of its own definition, so the order does not change the
    /// resulting set.
    pub fn synchronize(self, config: SchedulerConfig) -> SyncReport {
        let Snapshot {
            slots,
            courts,
            classes,
            tournaments,
            events,
        } = self;

        let sync = ScheduleSynchronizer::with_catalog(config, courts);
        let mut report = SyncReport {
            slots,
            ..Default::default()
        };

        for class in &classes {
            let outcome = sync.sync_class_slots(class, std::mem::take(&mut report.slots));
            report.absorb(outcome.slots, outcome.issues);
        }
        for tournament in &tournaments {
            let outcome = sync.sync_tournament_slots(tournament, std::mem::take(&mut report.slots));
            report.absorb(outcome.slots, outcome.issues);
        }
        for event in &events {
            let outcome = sync.sync_event_slots(event, std::mem::take(&mut report.slots));
            report.absorb(outcome.slots, outcome.issues);
        }

        report.conflicts = find_conflicts(&report.slots);
        for conflict in &report.conflicts {
            warn!(
                "Court {} double-booked {}..{}: slots {} and {}",
                conflict.court_id,
                conflict.overlap_start,
                conflict.overlap_end,
                conflict.first,
                conflict.second
            );
        }

        info!(
            "Synchronized {} classes, {} tournaments and {} events into {} slots ({} issues, {} conflicts)",
            classes.len(),
            tournaments.len(),
            events.len(),
            report.slots.len(),
            report.issues.len(),
            report.conflicts.len()
        );

        report
    }
}

impl SyncReport {
    fn absorb(&mut self, slots: Vec<ReservationSlot>, issues: Vec<ScheduleError>) {
        self.slots = slots;
        self.issues.extend(issues);
    }
}
