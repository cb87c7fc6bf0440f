//! Single-elimination bracket module.
//!
//! This module provides:
//! - Participant and match models, stored in an indexed [`Bracket`] arena
//! - Seeded bracket construction with byes for the top seeds
//! - One-hop winner advancement and link validation
//!
//! ## Example
//!
//! ```
//! use arena_scheduler::bracket::{BracketBuilder, Participant};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let participants = vec![
//!     Participant::new("ana", "Ana").with_ranking(900),
//!     Participant::new("bia", "Bia").with_ranking(700),
//!     Participant::new("caio", "Caio"),
//! ];
//!
//! let mut builder = BracketBuilder::with_rng(StdRng::seed_from_u64(1));
//! let mut bracket = builder.build_bracket(&participants, "mixed").unwrap();
//!
//! // The top seed skips round one.
//! let first = bracket.round(1).next().unwrap().clone();
//! assert!(!first.has_participant("ana"));
//!
//! let winner = first.participants[0].clone().unwrap();
//! let (final_id, _) = bracket.record_winner(first.id, &winner).unwrap().unwrap();
//! assert!(bracket.get(final_id).unwrap().has_participant(&winner));
//! ```

pub mod advance;
pub mod builder;
pub mod errors;
pub mod models;

pub use advance::advance_target;
pub use builder::{BracketBuilder, BracketLayout};
pub use errors::{BracketError, BracketResult};
pub use models::{
    Bracket, CategoryId, Match, MatchId, Participant, ParticipantId, PlayerEntry, Score,
    SlotIndex,
};
