//! Schedule synchronization module.
//!
//! This module turns source-of-truth definitions into concrete reservation
//! slots:
//! - Recurring classes, expanded day by day into fixed-length sub-slots
//! - Tournament matches that have a court, a date and a start time
//! - Multi-day private events, one slot per court per day
//!
//! Each run removes the slots previously generated for one definition and
//! inserts fresh ones with deterministic ids, so re-running is idempotent.
//!
//! ## Example
//!
//! ```
//! use arena_scheduler::schedule::{
//!     RecurringScheduleDefinition, ScheduleSynchronizer, WeeklyRule,
//! };
//! use chrono::NaiveDate;
//!
//! let class = RecurringScheduleDefinition {
//!     id: "turma-7".to_string(),
//!     name: "Footvolley beginners".to_string(),
//!     court_id: "court-2".to_string(),
//!     rules: vec![WeeklyRule::new(1, "18:00", "20:00")],
//!     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     end_date: NaiveDate::from_ymd_opt(2024, 1, 15),
//! };
//!
//! let sync = ScheduleSynchronizer::default();
//! let outcome = sync.sync_class_slots(&class, Vec::new());
//! assert_eq!(outcome.slots.len(), 6);
//!
//! let again = sync.sync_class_slots(&class, outcome.slots.clone());
//! assert_eq!(again.slots, outcome.slots);
//! ```

pub mod catalog;
pub mod classes;
pub mod config;
pub mod conflicts;
pub mod errors;
pub mod events;
pub mod models;
pub mod reconcile;
pub mod synchronizer;
pub mod time;
pub mod tournaments;

pub use catalog::{Court, CourtCatalog};
pub use config::SchedulerConfig;
pub use conflicts::{SlotConflict, find_conflicts};
pub use errors::ScheduleError;
pub use models::{
    EventCourt, EventStatus, PrivateEventScheduleSource, RecurringScheduleDefinition,
    ReservationSlot, SlotKind, SlotSource, SourceId, TournamentScheduleSource, TournamentStatus,
    WeeklyRule,
};
pub use reconcile::reconcile;
pub use synchronizer::{ScheduleSynchronizer, SyncOutcome};
pub use time::parse_time;
