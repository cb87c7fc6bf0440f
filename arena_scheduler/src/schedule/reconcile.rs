//! Replace-by-source primitive shared by every synchronizer.

use super::models::{ReservationSlot, SlotSource};
use log::debug;
use std::collections::HashSet;

/// Replace all slots of `origin` with `fresh`
///
/// Slots belonging to other sources pass through untouched and keep their
/// order; fresh slots are appended, keeping the first of any repeated id.
/// Running it twice with the same inputs yields the same list.
pub fn reconcile(
    origin: &SlotSource,
    all_slots: Vec<ReservationSlot>,
    fresh: Vec<ReservationSlot>,
) -> Vec<ReservationSlot> {
    let before = all_slots.len();
    let mut merged: Vec<ReservationSlot> = all_slots
        .into_iter()
        .filter(|slot| &slot.source != origin)
        .collect();
    let kept = merged.len();

    let mut seen = HashSet::with_capacity(fresh.len());
    merged.extend(fresh.into_iter().filter(|slot| seen.insert(slot.id.clone())));

    debug!(
        "Reconciled {}: removed {}, inserted {}",
        origin,
        before - kept,
        merged.len() - kept
    );

    merged
}
