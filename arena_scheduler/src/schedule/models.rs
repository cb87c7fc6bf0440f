//! Schedule data models: recurring definitions and reservation slots.

use crate::CourtId;
use crate::bracket::{Match, Participant};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// ID of the definition a slot was generated from
pub type SourceId = String;

/// Namespace for deterministic slot ids
const SLOT_NAMESPACE: Uuid = Uuid::from_u128(0x6a1f_3c52_9e0b_4d7a_b8c4_21f0_5e93_d6a7);

/// Kind of definition that produced a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Recurring class
    Class,
    /// Scheduled tournament match
    TournamentMatch,
    /// Private event booking
    PrivateEvent,
    /// One-off booking made directly on the calendar
    AdHoc,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Class => write!(f, "class"),
            SlotKind::TournamentMatch => write!(f, "tournament_match"),
            SlotKind::PrivateEvent => write!(f, "private_event"),
            SlotKind::AdHoc => write!(f, "ad_hoc"),
        }
    }
}

/// Back-reference from a slot to the definition it came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotSource {
    pub kind: SlotKind,
    pub id: SourceId,
}

impl SlotSource {
    pub fn new(kind: SlotKind, id: impl Into<SourceId>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn class(id: impl Into<SourceId>) -> Self {
        Self::new(SlotKind::Class, id)
    }

    pub fn tournament(id: impl Into<SourceId>) -> Self {
        Self::new(SlotKind::TournamentMatch, id)
    }

    pub fn event(id: impl Into<SourceId>) -> Self {
        Self::new(SlotKind::PrivateEvent, id)
    }

    pub fn ad_hoc(id: impl Into<SourceId>) -> Self {
        Self::new(SlotKind::AdHoc, id)
    }

    /// Deterministic slot id for the logical slot `key` of this source
    pub fn slot_id(&self, key: &str) -> String {
        let name = format!("{}:{}:{}", self.kind, self.id, key);
        Uuid::new_v5(&SLOT_NAMESPACE, name.as_bytes()).to_string()
    }
}

impl fmt::Display for SlotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// Concrete calendar reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSlot {
    /// Deterministic slot ID
    pub id: String,
    /// Reserved court
    pub court_id: CourtId,
    /// Calendar date the slot starts on
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    /// End time; not after `start_time` means the slot ends the next day
    pub end_time: NaiveTime,
    /// Originating definition
    pub source: SlotSource,
    /// Human-readable label
    pub label: String,
}

impl ReservationSlot {
    pub fn crosses_midnight(&self) -> bool {
        self.end_time <= self.start_time
    }

    pub fn duration(&self) -> TimeDelta {
        wrapped_duration(self.start_time, self.end_time)
    }

    /// Start and end as date-times
    pub fn interval(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.date.and_time(self.start_time);
        (start, start + self.duration())
    }
}

/// Duration from `start` to `end`, wrapping past midnight when `end <= start`
pub fn wrapped_duration(start: NaiveTime, end: NaiveTime) -> TimeDelta {
    let delta = end.signed_duration_since(start);
    if delta <= TimeDelta::zero() {
        delta + TimeDelta::days(1)
    } else {
        delta
    }
}

/// Weekly rule of a recurring class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRule {
    /// Day of week, 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    /// Start time (`HH:MM`)
    pub start_time: String,
    /// End time (`HH:MM`); not after start means the block crosses midnight
    pub end_time: String,
}

impl WeeklyRule {
    pub fn new(day_of_week: u8, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            day_of_week,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// Recurring class definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringScheduleDefinition {
    pub id: SourceId,
    pub name: String,
    /// Court the class occupies
    pub court_id: CourtId,
    /// Weekly rules
    #[serde(default)]
    pub rules: Vec<WeeklyRule>,
    /// First day of the validity window
    pub start_date: NaiveDate,
    /// Last day of the validity window; open-ended when absent
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Tournament status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Being set up, not open yet
    Planned,
    /// Registrations open
    Open,
    /// Matches being played
    InProgress,
    /// Finished
    Completed,
    /// Cancelled
    Cancelled,
}

impl TournamentStatus {
    /// Whether scheduled matches occupy the calendar
    pub fn materializes_slots(self) -> bool {
        !matches!(self, TournamentStatus::Planned | TournamentStatus::Cancelled)
    }
}

/// A tournament's matches as seen by the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentScheduleSource {
    pub id: SourceId,
    pub name: String,
    pub status: TournamentStatus,
    /// Entrants, used for slot labels
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Matches of every category
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl TournamentScheduleSource {
    /// Display name of a participant, falling back to the id
    pub fn participant_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .map_or(id, |p| p.name.as_str())
    }
}

/// Private event status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Quote sent, awaiting confirmation
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl EventStatus {
    /// Whether the event occupies the calendar
    pub fn materializes_slots(self) -> bool {
        matches!(self, EventStatus::Confirmed | EventStatus::Completed)
    }
}

/// Court booked by a private event, optionally with its own daily window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCourt {
    pub court_id: CourtId,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl EventCourt {
    /// Court using the event's general window
    pub fn new(court_id: impl Into<CourtId>) -> Self {
        Self {
            court_id: court_id.into(),
            start_time: None,
            end_time: None,
        }
    }

    /// Court with its own daily window
    pub fn with_window(mut self, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self.end_time = Some(end_time.into());
        self
    }
}

/// Multi-day private event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateEventScheduleSource {
    pub id: SourceId,
    pub name: String,
    pub status: EventStatus,
    pub start_date: NaiveDate,
    /// Last day; single-day event when absent
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// General daily start time (`HH:MM`)
    pub start_time: String,
    /// General daily end time (`HH:MM`)
    pub end_time: String,
    #[serde(default)]
    pub courts: Vec<EventCourt>,
}
