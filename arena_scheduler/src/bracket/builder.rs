//! Single-elimination bracket construction.

use super::errors::{BracketError, BracketResult};
use super::models::{Bracket, MatchId, Participant, ParticipantId};
use log::debug;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Shape of a bracket for a given number of entrants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketLayout {
    /// Number of entrants
    pub entrants: usize,
    /// Smallest power of two >= entrants
    pub bracket_size: usize,
    /// Entrants that skip round one
    pub bye_count: usize,
    /// Matches played in round one
    pub first_round_matches: usize,
    /// Total number of rounds, `log2(bracket_size)`
    pub rounds: u32,
}

impl BracketLayout {
    /// Layout for `entrants` participants, `None` below two
    pub fn for_entrants(entrants: usize) -> Option<Self> {
        if entrants < 2 {
            return None;
        }

        let bracket_size = entrants.next_power_of_two();
        let bye_count = bracket_size - entrants;

        Some(Self {
            entrants,
            bracket_size,
            bye_count,
            first_round_matches: (entrants - bye_count) / 2,
            rounds: bracket_size.trailing_zeros(),
        })
    }

    /// Total matches in the bracket
    pub fn total_matches(&self) -> usize {
        self.entrants - 1
    }
}

/// Round-two entry before round one is materialized
enum Source {
    Bye(ParticipantId),
    Pairing(ParticipantId, ParticipantId),
}

/// What feeds a slot of the next round
enum Feeder {
    Entrant(ParticipantId),
    Winner(MatchId),
}

/// Bracket builder with an injectable random source
///
/// Seeding ties and unseeded draws use the builder's RNG, so a seeded
/// `StdRng` gives reproducible brackets.
pub struct BracketBuilder<R: Rng = ThreadRng> {
    rng: R,
}

impl BracketBuilder<ThreadRng> {
    /// Create a builder backed by the thread-local RNG
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for BracketBuilder<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> BracketBuilder<R> {
    /// Create a builder with a caller-supplied RNG
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Build a single-elimination bracket for one category
    ///
    /// Waitlisted participants are left out. With fewer than two entrants the
    /// bracket is empty; callers are expected to block that case earlier.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::DuplicateParticipant`] if an id appears twice.
    pub fn build_bracket(
        &mut self,
        participants: &[Participant],
        category_id: &str,
    ) -> BracketResult<Bracket> {
        ensure_unique(participants)?;

        let entrants: Vec<&Participant> = participants.iter().filter(|p| !p.waitlisted).collect();
        let mut bracket = Bracket::new(category_id);

        let Some(layout) = BracketLayout::for_entrants(entrants.len()) else {
            debug!(
                "Category {} has {} entrants, no bracket generated",
                category_id,
                entrants.len()
            );
            return Ok(bracket);
        };

        let seeded = self.seed(entrants);
        let (byes, rest) = seeded.split_at(layout.bye_count);

        let mut sources: Vec<Source> = byes
            .iter()
            .cloned()
            .map(Source::Bye)
            .chain(
                rest.chunks_exact(2)
                    .map(|pair| Source::Pairing(pair[0].clone(), pair[1].clone())),
            )
            .collect();
        sources.shuffle(&mut self.rng);

        // A source's index is its bracket position in round one, so each
        // round-one match feeds slot `position % 2` of match `position / 2`.
        let mut feeders = Vec::with_capacity(sources.len());
        for (position, source) in sources.into_iter().enumerate() {
            match source {
                Source::Bye(id) => feeders.push(Feeder::Entrant(id)),
                Source::Pairing(home, away) => {
                    let id = bracket.push(1, position, [Some(home), Some(away)]);
                    feeders.push(Feeder::Winner(id));
                }
            }
        }

        let mut round = 1;
        while feeders.len() > 1 {
            round += 1;
            let mut next_feeders = Vec::with_capacity(feeders.len() / 2);

            for (position, pair) in feeders.chunks_exact(2).enumerate() {
                let id = bracket.next_id();
                let mut slots = [None, None];

                for (slot, feeder) in pair.iter().enumerate() {
                    match feeder {
                        Feeder::Entrant(participant) => slots[slot] = Some(participant.clone()),
                        Feeder::Winner(previous) => {
                            if let Some(m) = bracket.get_mut(*previous) {
                                m.next_match = Some(id);
                            }
                        }
                    }
                }

                bracket.push(round, position, slots);
                next_feeders.push(Feeder::Winner(id));
            }

            feeders = next_feeders;
        }

        debug!(
            "Built bracket for {}: {} entrants, {} byes, {} matches over {} rounds",
            category_id,
            layout.entrants,
            layout.bye_count,
            bracket.len(),
            layout.rounds
        );

        Ok(bracket)
    }

    /// Order entrants: ranking descending with random tie-breaks, or a full
    /// shuffle when nobody is ranked
    fn seed(&mut self, mut entrants: Vec<&Participant>) -> Vec<ParticipantId> {
        entrants.shuffle(&mut self.rng);

        if entrants.iter().any(|p| p.seed_score().is_some()) {
            entrants.sort_by(|a, b| b.seed_score().cmp(&a.seed_score()));
        }

        entrants.into_iter().map(|p| p.id.clone()).collect()
    }
}

fn ensure_unique(participants: &[Participant]) -> BracketResult<()> {
    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen.insert(participant.id.as_str()) {
            return Err(BracketError::DuplicateParticipant(participant.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn field(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| Participant::new(format!("p{i}"), format!("Player {i}")))
            .collect()
    }

    fn builder(seed: u64) -> BracketBuilder<StdRng> {
        BracketBuilder::with_rng(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_layout_for_five() {
        let layout = BracketLayout::for_entrants(5).unwrap();
        assert_eq!(layout.bracket_size, 8);
        assert_eq!(layout.bye_count, 3);
        assert_eq!(layout.first_round_matches, 1);
        assert_eq!(layout.rounds, 3);
        assert_eq!(layout.total_matches(), 4);
    }

    #[test]
    fn test_layout_below_two() {
        assert!(BracketLayout::for_entrants(0).is_none());
        assert!(BracketLayout::for_entrants(1).is_none());
    }

    #[test]
    fn test_fewer_than_two_is_empty() {
        let bracket = builder(1).build_bracket(&field(1), "cat").unwrap();
        assert!(bracket.is_empty());
        let bracket = builder(1).build_bracket(&[], "cat").unwrap();
        assert!(bracket.is_empty());
    }

    #[test]
    fn test_two_entrants_single_final() {
        let bracket = builder(3).build_bracket(&field(2), "cat").unwrap();
        assert_eq!(bracket.len(), 1);
        let only = &bracket.matches()[0];
        assert_eq!(only.round, 1);
        assert!(only.is_final());
        assert!(only.participants.iter().all(Option::is_some));
    }

    #[test]
    fn test_five_entrants_scenario() {
        let bracket = builder(42).build_bracket(&field(5), "cat").unwrap();
        assert_eq!(bracket.len(), 4);
        assert_eq!(bracket.round(1).count(), 1);
        assert_eq!(bracket.round(2).count(), 2);
        assert_eq!(bracket.round(3).count(), 1);
        assert_eq!(bracket.rounds(), 3);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut participants = field(3);
        participants.push(Participant::new("p1", "Impostor"));
        let err = builder(0).build_bracket(&participants, "cat").unwrap_err();
        assert_eq!(err, BracketError::DuplicateParticipant("p1".to_string()));
    }

    #[test]
    fn test_top_seeds_get_byes() {
        let participants = vec![
            Participant::new("low", "Low").with_ranking(10),
            Participant::new("top", "Top").with_ranking(100),
            Participant::new("mid", "Mid").with_ranking(50),
            Participant::new("none", "None"),
            Participant::new("second", "Second").with_ranking(90),
        ];

        for seed in 0..20 {
            let bracket = builder(seed).build_bracket(&participants, "cat").unwrap();
            let first: Vec<_> = bracket.round(1).collect();
            assert_eq!(first.len(), 1);
            // 3 byes go to top, second and mid; low and the unranked entry play
            assert!(first[0].has_participant("low"));
            assert!(first[0].has_participant("none"));
        }
    }

    #[test]
    fn test_waitlisted_are_excluded() {
        let mut participants = field(4);
        participants.push(Participant::new("late", "Late").on_waitlist());
        let bracket = builder(5).build_bracket(&participants, "cat").unwrap();
        assert_eq!(bracket.len(), 3);
        assert!(bracket.matches().iter().all(|m| !m.has_participant("late")));
    }

    #[test]
    fn test_same_seed_same_bracket() {
        let a = builder(99).build_bracket(&field(11), "cat").unwrap();
        let b = builder(99).build_bracket(&field(11), "cat").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_first_round_positions_are_bracket_positions() {
        for seed in 0..10 {
            let bracket = builder(seed).build_bracket(&field(5), "cat").unwrap();
            let only = bracket.round(1).next().unwrap();
            assert!(only.position < 4);
            let successor = bracket.get(only.next_match.unwrap()).unwrap();
            assert_eq!(successor.position, only.position / 2);
        }
    }

    #[test]
    fn test_links_follow_positions() {
        let bracket = builder(8).build_bracket(&field(13), "cat").unwrap();
        for m in bracket.matches() {
            if let Some(next) = m.next_match {
                let successor = bracket.get(next).unwrap();
                assert_eq!(successor.round, m.round + 1);
                assert_eq!(successor.position, m.position / 2);
            }
        }
        assert!(bracket.validate().is_ok());
    }
}
