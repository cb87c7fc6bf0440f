//! # Arena Scheduler
//!
//! The scheduling engine of a sports-arena management application.
//!
//! Two independent, pure components make up the crate:
//!
//! - [`bracket`]: builds single-elimination brackets from registered
//!   participants (seeding, byes, round linking) and advances winners one hop
//!   at a time.
//! - [`schedule`]: turns recurring definitions (classes, tournament matches,
//!   private events) into a flat list of concrete [`ReservationSlot`]s, and
//!   replaces a source's slots idempotently on every run.
//!
//! Neither component owns storage. Callers load the current records, call the
//! engine and persist what comes back.
//!
//! ## Example
//!
//! ```
//! use arena_scheduler::bracket::{BracketBuilder, Participant};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let participants: Vec<Participant> = (1..=5)
//!     .map(|i| Participant::new(format!("p{i}"), format!("Player {i}")))
//!     .collect();
//!
//! let mut builder = BracketBuilder::with_rng(StdRng::seed_from_u64(7));
//! let bracket = builder.build_bracket(&participants, "open-singles").unwrap();
//!
//! assert_eq!(bracket.len(), 4);
//! assert_eq!(bracket.rounds(), 3);
//! ```

/// Single-elimination bracket construction and winner advancement.
pub mod bracket;
pub use bracket::{
    Bracket, BracketBuilder, BracketError, BracketLayout, BracketResult, Match, MatchId,
    Participant, ParticipantId, SlotIndex, advance_target,
};

/// Reservation-slot synchronization for classes, tournaments and events.
pub mod schedule;
pub use schedule::{
    CourtCatalog, ReservationSlot, ScheduleError, ScheduleSynchronizer, SchedulerConfig,
    SlotConflict, SlotKind, SlotSource, SyncOutcome, find_conflicts, reconcile,
};

/// Court (resource) identifier shared by brackets and reservation slots.
pub type CourtId = String;
