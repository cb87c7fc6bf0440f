//! Bracket data models: participants, matches and the match arena.

use crate::CourtId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Participant ID type
pub type ParticipantId = String;

/// Tournament category ID type
pub type CategoryId = String;

/// Index of a match inside its [`Bracket`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub usize);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two participant slots of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotIndex {
    /// Slot 0
    Home,
    /// Slot 1
    Away,
}

impl SlotIndex {
    /// Slot a match at `position` feeds in its successor: even -> home, odd -> away
    pub fn from_position(position: usize) -> Self {
        if position % 2 == 0 {
            SlotIndex::Home
        } else {
            SlotIndex::Away
        }
    }

    /// Array index of the slot
    pub fn index(self) -> usize {
        match self {
            SlotIndex::Home => 0,
            SlotIndex::Away => 1,
        }
    }

    /// The opposite slot
    pub fn other(self) -> Self {
        match self {
            SlotIndex::Home => SlotIndex::Away,
            SlotIndex::Away => SlotIndex::Home,
        }
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotIndex::Home => write!(f, "home"),
            SlotIndex::Away => write!(f, "away"),
        }
    }
}

/// A player inside a participant entry (single, doubles pair or team)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// Player display name
    pub name: String,
    /// Linked student/member record, if any
    #[serde(default)]
    pub member_id: Option<String>,
}

impl PlayerEntry {
    /// Create a player entry without a member link
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            member_id: None,
        }
    }
}

/// Tournament entrant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Participant ID
    pub id: ParticipantId,
    /// Display name (player name, pair name or team name)
    pub name: String,
    /// Players making up the entry
    #[serde(default)]
    pub players: Vec<PlayerEntry>,
    /// Ranking score used for seeding
    #[serde(default)]
    pub ranking: Option<u32>,
    /// Waitlisted entries do not enter the bracket
    #[serde(default)]
    pub waitlisted: bool,
}

impl Participant {
    /// Create an individual entry whose single player shares the display name
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            players: vec![PlayerEntry::new(name.clone())],
            name,
            ranking: None,
            waitlisted: false,
        }
    }

    /// Set the ranking score
    pub fn with_ranking(mut self, ranking: u32) -> Self {
        self.ranking = Some(ranking);
        self
    }

    /// Replace the player list (doubles, teams)
    pub fn with_players(mut self, players: Vec<PlayerEntry>) -> Self {
        self.players = players;
        self
    }

    /// Mark the entry as waitlisted
    pub fn on_waitlist(mut self) -> Self {
        self.waitlisted = true;
        self
    }

    /// Ranking if it counts for seeding (zero does not)
    pub fn seed_score(&self) -> Option<u32> {
        self.ranking.filter(|&score| score > 0)
    }
}

/// Final score of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Slot that won, or `None` on a draw
    pub fn winner_slot(&self) -> Option<SlotIndex> {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Some(SlotIndex::Home),
            std::cmp::Ordering::Less => Some(SlotIndex::Away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// A single bracket node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Match ID (index in the bracket arena)
    pub id: MatchId,
    /// Category the match belongs to
    pub category_id: CategoryId,
    /// Round number (1 = first round)
    pub round: u32,
    /// Bracket position within the round; successor position is `position / 2`.
    /// Round one may be sparse when byes are present, so it is not a dense index.
    pub position: usize,
    /// Home and away participants, `None` until seeded or advanced into
    pub participants: [Option<ParticipantId>; 2],
    /// Final score
    #[serde(default)]
    pub score: Option<Score>,
    /// Winner
    #[serde(default)]
    pub winner: Option<ParticipantId>,
    /// Successor match (`None` only for the final)
    pub next_match: Option<MatchId>,
    /// Assigned court
    #[serde(default)]
    pub court_id: Option<CourtId>,
    /// Scheduled date
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Scheduled start time (`HH:MM`)
    #[serde(default)]
    pub start_time: Option<String>,
}

impl Match {
    /// Create an unscheduled match with no successor yet
    pub fn new(
        id: MatchId,
        category_id: impl Into<CategoryId>,
        round: u32,
        position: usize,
        participants: [Option<ParticipantId>; 2],
    ) -> Self {
        Self {
            id,
            category_id: category_id.into(),
            round,
            position,
            participants,
            score: None,
            winner: None,
            next_match: None,
            court_id: None,
            date: None,
            start_time: None,
        }
    }

    /// Participant in the given slot
    pub fn participant(&self, slot: SlotIndex) -> Option<&ParticipantId> {
        self.participants[slot.index()].as_ref()
    }

    /// Slot held by `participant`, if any
    pub fn slot_of(&self, participant: &str) -> Option<SlotIndex> {
        [SlotIndex::Home, SlotIndex::Away]
            .into_iter()
            .find(|&slot| self.participant(slot).is_some_and(|id| id == participant))
    }

    pub fn has_participant(&self, participant: &str) -> bool {
        self.slot_of(participant).is_some()
    }

    pub fn is_final(&self) -> bool {
        self.next_match.is_none()
    }

    /// Assign court, date and start time
    pub fn schedule(
        &mut self,
        court_id: impl Into<CourtId>,
        date: NaiveDate,
        start_time: impl Into<String>,
    ) {
        self.court_id = Some(court_id.into());
        self.date = Some(date);
        self.start_time = Some(start_time.into());
    }
}

/// Arena of matches for one category
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bracket {
    pub category_id: CategoryId,
    pub(crate) matches: Vec<Match>,
}

impl Bracket {
    /// Create an empty bracket
    pub fn new(category_id: impl Into<CategoryId>) -> Self {
        Self {
            category_id: category_id.into(),
            matches: Vec::new(),
        }
    }

    /// Rebuild a bracket from stored matches
    ///
    /// Matches are re-ordered by id; call [`Bracket::validate`] before
    /// trusting links that were edited outside the engine.
    pub fn from_matches(category_id: impl Into<CategoryId>, mut matches: Vec<Match>) -> Self {
        matches.sort_by_key(|m| m.id);
        Self {
            category_id: category_id.into(),
            matches,
        }
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<Match> {
        self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.matches.get(id.0)
    }

    pub fn get_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.get_mut(id.0)
    }

    /// Number of rounds (0 for an empty bracket)
    pub fn rounds(&self) -> u32 {
        self.matches.iter().map(|m| m.round).max().unwrap_or(0)
    }

    /// Matches of one round, in creation order
    pub fn round(&self, round: u32) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    /// The match without a successor
    pub fn final_match(&self) -> Option<&Match> {
        self.matches.iter().find(|m| m.is_final())
    }

    /// Winner of the final, once decided
    pub fn champion(&self) -> Option<&ParticipantId> {
        self.final_match().and_then(|m| m.winner.as_ref())
    }

    /// Append a match and return its id
    pub(crate) fn push(
        &mut self,
        round: u32,
        position: usize,
        participants: [Option<ParticipantId>; 2],
    ) -> MatchId {
        let id = self.next_id();
        self.matches.push(Match::new(
            id,
            self.category_id.clone(),
            round,
            position,
            participants,
        ));
        id
    }

    pub(crate) fn next_id(&self) -> MatchId {
        MatchId(self.matches.len())
    }
}
