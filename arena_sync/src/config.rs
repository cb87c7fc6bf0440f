//! Command-line configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use arena_scheduler::SchedulerConfig;
use std::str::FromStr;

/// Complete configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Synchronizer settings
    pub scheduler: SchedulerConfig,
}

/// Values given on the command line, taking precedence over the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub sub_slot_minutes: Option<u32>,
}

impl SyncConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env(overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F, overrides: &Overrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SchedulerConfig::default();

        let sub_slot_minutes = match overrides.sub_slot_minutes {
            Some(minutes) => minutes,
            None => parse_var_or(&lookup, "ARENA_SUB_SLOT_MINUTES", defaults.sub_slot_minutes)?,
        };

        let scheduler = SchedulerConfig {
            sub_slot_minutes,
            default_match_minutes: parse_var_or(
                &lookup,
                "ARENA_DEFAULT_MATCH_MINUTES",
                defaults.default_match_minutes,
            )?,
            horizon_months: parse_var_or(&lookup, "ARENA_HORIZON_MONTHS", defaults.horizon_months)?,
            placeholder_label: lookup("ARENA_PLACEHOLDER_LABEL")
                .filter(|label| !label.trim().is_empty())
                .unwrap_or(defaults.placeholder_label),
        };

        Ok(SyncConfig { scheduler })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheduler
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "ARENA_*".to_string(),
                reason,
            })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse a variable with default fallback when it is unset
fn parse_var_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("Cannot parse {raw:?}"),
        }),
    }
}
