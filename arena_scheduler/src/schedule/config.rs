//! Synchronizer configuration.

use serde::{Deserialize, Serialize};

/// Default sub-slot granularity for class expansion, in minutes
pub const DEFAULT_SUB_SLOT_MINUTES: u32 = 60;

/// Default match length when the court has no configured slot duration
pub const DEFAULT_MATCH_MINUTES: u32 = 60;

/// Expansion cap for classes without an end date
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// Synchronizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Length of each generated class slot (default: 60)
    pub sub_slot_minutes: u32,

    /// Match length fallback (default: 60)
    pub default_match_minutes: u32,

    /// Months to expand open-ended classes (default: 12)
    pub horizon_months: u32,

    /// Label for a match slot whose participant is not known yet
    pub placeholder_label: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            sub_slot_minutes: DEFAULT_SUB_SLOT_MINUTES,
            default_match_minutes: DEFAULT_MATCH_MINUTES,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            placeholder_label: "TBD".to_string(),
        }
    }
}

impl SchedulerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.sub_slot_minutes == 0 || self.sub_slot_minutes > 24 * 60 {
            return Err("Sub-slot length must be between 1 and 1440 minutes".to_string());
        }

        if self.default_match_minutes == 0 || self.default_match_minutes > 24 * 60 {
            return Err("Default match length must be between 1 and 1440 minutes".to_string());
        }

        if self.horizon_months == 0 || self.horizon_months > 120 {
            return Err("Horizon must be between 1 and 120 months".to_string());
        }

        Ok(())
    }
}
