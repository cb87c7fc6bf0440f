//! Bracket error types.

use super::models::{MatchId, ParticipantId, SlotIndex};
use thiserror::Error;

/// Bracket errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    /// The same participant id was registered twice
    #[error("Duplicate participant id: {0}")]
    DuplicateParticipant(ParticipantId),

    /// Match id does not exist in the bracket
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// Winner or substitute does not belong to the match
    #[error("Participant {participant} is not playing match {match_id}")]
    NotInMatch {
        match_id: MatchId,
        participant: ParticipantId,
    },

    /// Score points at a slot nobody holds yet
    #[error("Slot {slot} of match {match_id} is still unresolved")]
    UnresolvedSlot { match_id: MatchId, slot: SlotIndex },

    /// Match (or its successor) is already decided
    #[error("Match {0} already has a winner")]
    AlreadyDecided(MatchId),

    /// Successor slot holds somebody else
    #[error("Slot {slot} of match {match_id} is already held by {holder}")]
    SlotOccupied {
        match_id: MatchId,
        slot: SlotIndex,
        holder: ParticipantId,
    },

    /// The next-match link does not respect round/position structure
    #[error("Broken bracket link at match {from}: {reason}")]
    BrokenLink { from: MatchId, reason: String },
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;
