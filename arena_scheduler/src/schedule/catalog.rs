//! Court catalog collaborator.
//!
//! Tournament slots last as long as the court's configured booking slot. The
//! catalog is whatever the application keeps its courts in; the synchronizer
//! only asks it for that duration.

use crate::CourtId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Source of per-court booking durations
pub trait CourtCatalog {
    /// Configured booking-slot length of a court, in minutes
    fn slot_minutes(&self, court_id: &str) -> Option<u32>;
}

/// Court record as stored by the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    pub name: String,
    #[serde(default)]
    pub slot_minutes: Option<u32>,
}

impl CourtCatalog for () {
    fn slot_minutes(&self, _court_id: &str) -> Option<u32> {
        None
    }
}

impl CourtCatalog for HashMap<CourtId, u32> {
    fn slot_minutes(&self, court_id: &str) -> Option<u32> {
        self.get(court_id).copied()
    }
}

impl CourtCatalog for [Court] {
    fn slot_minutes(&self, court_id: &str) -> Option<u32> {
        self.iter()
            .find(|court| court.id == court_id)
            .and_then(|court| court.slot_minutes)
    }
}

impl CourtCatalog for Vec<Court> {
    fn slot_minutes(&self, court_id: &str) -> Option<u32> {
        self.as_slice().slot_minutes(court_id)
    }
}

impl<C: CourtCatalog + ?Sized> CourtCatalog for &C {
    fn slot_minutes(&self, court_id: &str) -> Option<u32> {
        (**self).slot_minutes(court_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_catalog() {
        let catalog: HashMap<CourtId, u32> = [("c1".to_string(), 90)].into_iter().collect();
        assert_eq!(catalog.slot_minutes("c1"), Some(90));
        assert_eq!(catalog.slot_minutes("c2"), None);
    }

    #[test]
    fn test_court_list_catalog() {
        let courts = vec![
            Court {
                id: "beach-1".into(),
                name: "Beach 1".into(),
                slot_minutes: Some(45),
            },
            Court {
                id: "beach-2".into(),
                name: "Beach 2".into(),
                slot_minutes: None,
            },
        ];
        assert_eq!(courts.slot_minutes("beach-1"), Some(45));
        assert_eq!(courts.slot_minutes("beach-2"), None);
        assert_eq!(().slot_minutes("beach-1"), None);
    }
}
