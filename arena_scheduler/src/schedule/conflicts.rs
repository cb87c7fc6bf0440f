//! Overlap detection across the flat slot list.

use super::models::ReservationSlot;
use crate::CourtId;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

/// Two slots that reserve the same court at overlapping times
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotConflict {
    pub court_id: CourtId,
    /// Slot that starts first
    pub first: String,
    pub second: String,
    /// Overlap start
    pub overlap_start: NaiveDateTime,
    /// Overlap end
    pub overlap_end: NaiveDateTime,
}

/// Find every pair of overlapping slots on the same court
///
/// Midnight-crossing slots are compared against the following day as well.
/// Slots that merely touch (one ends when the next starts) do not conflict.
pub fn find_conflicts(slots: &[ReservationSlot]) -> Vec<SlotConflict> {
    let mut by_court: BTreeMap<&str, Vec<(NaiveDateTime, NaiveDateTime, &ReservationSlot)>> =
        BTreeMap::new();

    for slot in slots {
        let (start, end) = slot.interval();
        by_court
            .entry(slot.court_id.as_str())
            .or_default()
            .push((start, end, slot));
    }

    let mut conflicts = Vec::new();
    for (court_id, mut intervals) in by_court {
        intervals.sort_by(|a, b| (a.0, a.1, &a.2.id).cmp(&(b.0, b.1, &b.2.id)));

        for (i, &(start, end, slot)) in intervals.iter().enumerate() {
            for &(other_start, other_end, other) in &intervals[i + 1..] {
                if other_start >= end {
                    break;
                }
                if other.id == slot.id {
                    continue;
                }
                conflicts.push(SlotConflict {
                    court_id: court_id.to_string(),
                    first: slot.id.clone(),
                    second: other.id.clone(),
                    overlap_start: other_start.max(start),
                    overlap_end: other_end.min(end),
                });
            }
        }
    }

    conflicts
}
