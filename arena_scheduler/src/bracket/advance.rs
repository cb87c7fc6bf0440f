//! Winner advancement and bracket link validation.
//!
//! Advancement is always a single hop: the winner of a match is written into
//! its successor and nothing further. Auto-advancing a whole bracket is left to
//! callers, which can chain [`Bracket::record_winner`] themselves.

use super::errors::{BracketError, BracketResult};
use super::models::{Bracket, Match, MatchId, ParticipantId, Score, SlotIndex};
use log::{debug, info};
use std::collections::HashMap;

/// Successor match and slot the winner of `completed` moves into
///
/// Even positions feed the home slot, odd positions the away slot. Returns
/// `None` for the final.
pub fn advance_target(completed: &Match) -> Option<(MatchId, SlotIndex)> {
    completed
        .next_match
        .map(|next| (next, SlotIndex::from_position(completed.position)))
}

impl Bracket {
    /// Check the link from `from` to its successor
    ///
    /// The successor must exist, sit one round later and hold position
    /// `from.position / 2`; otherwise the parity rule would route the winner
    /// into the wrong slot.
    pub fn check_link(&self, from: &Match) -> BracketResult<()> {
        let Some(next) = from.next_match else {
            return Ok(());
        };

        let broken = |reason: String| BracketError::BrokenLink {
            from: from.id,
            reason,
        };

        let successor = self
            .get(next)
            .ok_or_else(|| broken(format!("successor {next} does not exist")))?;

        if successor.round != from.round + 1 {
            return Err(broken(format!(
                "successor {next} is in round {}, expected {}",
                successor.round,
                from.round + 1
            )));
        }

        if successor.position != from.position / 2 {
            return Err(broken(format!(
                "successor {next} has position {}, expected {}",
                successor.position,
                from.position / 2
            )));
        }

        Ok(())
    }

    /// Validate every link of the bracket
    ///
    /// Intended for brackets loaded from storage or edited by hand.
    pub fn validate(&self) -> BracketResult<()> {
        if self.matches.is_empty() {
            return Ok(());
        }

        let mut feeders: HashMap<(MatchId, SlotIndex), MatchId> = HashMap::new();
        let mut finals = 0;

        for (index, m) in self.matches.iter().enumerate() {
            if m.id != MatchId(index) {
                return Err(BracketError::BrokenLink {
                    from: m.id,
                    reason: format!("stored at index {index}"),
                });
            }

            self.check_link(m)?;

            match advance_target(m) {
                Some(target) => {
                    if let Some(other) = feeders.insert(target, m.id) {
                        return Err(BracketError::BrokenLink {
                            from: m.id,
                            reason: format!(
                                "shares slot {} of {} with {other}",
                                target.1, target.0
                            ),
                        });
                    }
                }
                None => finals += 1,
            }
        }

        if finals != 1 {
            return Err(BracketError::BrokenLink {
                from: MatchId(self.matches.len() - 1),
                reason: format!("bracket has {finals} finals"),
            });
        }

        Ok(())
    }

    /// Check that `winner` can be recorded for `match_id` without writing
    ///
    /// Returns the successor slot the winner would move into.
    fn winner_target(
        &self,
        match_id: MatchId,
        winner: &str,
    ) -> BracketResult<Option<(MatchId, SlotIndex)>> {
        let completed = self
            .get(match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;

        if !completed.has_participant(winner) {
            return Err(BracketError::NotInMatch {
                match_id,
                participant: winner.to_string(),
            });
        }

        self.check_link(completed)?;
        let target = advance_target(completed);

        if let Some((next, slot)) = target {
            let successor = self.get(next).ok_or(BracketError::MatchNotFound(next))?;

            if let Some(holder) = successor.participant(slot) {
                let replaceable = holder == winner || completed.winner.as_ref() == Some(holder);
                if !replaceable {
                    return Err(BracketError::SlotOccupied {
                        match_id: next,
                        slot,
                        holder: holder.clone(),
                    });
                }
                if holder != winner && successor.winner.is_some() {
                    return Err(BracketError::AlreadyDecided(next));
                }
            }
        }

        Ok(target)
    }

    /// Write an already checked winner into the match and its successor
    fn apply_winner(
        &mut self,
        match_id: MatchId,
        winner: &str,
        target: Option<(MatchId, SlotIndex)>,
    ) {
        if let Some(m) = self.get_mut(match_id) {
            m.winner = Some(winner.to_string());
        }

        match target {
            Some((next, slot)) => {
                if let Some(successor) = self.get_mut(next) {
                    successor.participants[slot.index()] = Some(winner.to_string());
                }
                debug!("Match {match_id}: {winner} advances to {next} ({slot})");
            }
            None => info!(
                "Category {} decided: {} wins the final",
                self.category_id, winner
            ),
        }
    }

    /// Record the winner of a match and move them into the successor
    ///
    /// Re-recording a different winner is allowed while the successor is
    /// undecided: the previous winner is replaced in the successor slot.
    ///
    /// # Returns
    ///
    /// * `Option<(MatchId, SlotIndex)>` - Slot that received the winner, `None` for the final
    ///
    /// # Errors
    ///
    /// Fails if the match does not exist, the winner is not playing it, the
    /// link is broken, or the successor slot is held by someone else. Nothing
    /// is written on failure.
    pub fn record_winner(
        &mut self,
        match_id: MatchId,
        winner: &str,
    ) -> BracketResult<Option<(MatchId, SlotIndex)>> {
        let target = self.winner_target(match_id, winner)?;
        self.apply_winner(match_id, winner, target);
        Ok(target)
    }

    /// Store a score and, unless it is a draw, advance the winning side
    ///
    /// The score is only stored when the winner can be advanced as well.
    pub fn record_score(
        &mut self,
        match_id: MatchId,
        score: Score,
    ) -> BracketResult<Option<(MatchId, SlotIndex)>> {
        let m = self
            .get(match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;

        let winner: Option<ParticipantId> = match score.winner_slot() {
            Some(slot) => Some(
                m.participant(slot)
                    .cloned()
                    .ok_or(BracketError::UnresolvedSlot { match_id, slot })?,
            ),
            None => None,
        };

        let target = match &winner {
            Some(winner) => self.winner_target(match_id, winner)?,
            None => None,
        };

        if let Some(m) = self.get_mut(match_id) {
            m.score = Some(score);
        }

        if let Some(winner) = winner {
            self.apply_winner(match_id, &winner, target);
        }

        Ok(target)
    }

    /// Replace the participant in one slot of an undecided match
    ///
    /// The substitute must not already be placed anywhere else in the
    /// bracket.
    pub fn substitute_participant(
        &mut self,
        match_id: MatchId,
        slot: SlotIndex,
        participant: ParticipantId,
    ) -> BracketResult<()> {
        let m = self
            .get(match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;

        if m.winner.is_some() {
            return Err(BracketError::AlreadyDecided(match_id));
        }

        let placed_elsewhere = self.matches.iter().any(|other| {
            if other.id == match_id {
                other.participant(slot.other()) == Some(&participant)
            } else {
                other.has_participant(&participant)
            }
        });
        if placed_elsewhere {
            return Err(BracketError::DuplicateParticipant(participant));
        }

        if let Some(m) = self.get_mut(match_id) {
            m.participants[slot.index()] = Some(participant);
        }
        Ok(())
    }
}
