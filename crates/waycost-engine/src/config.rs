//! Engine configuration, validation, and error types.

use std::error::Error;
use std::fmt;

use waycost_core::CostSettings;

// ── EngineConfig ───────────────────────────────────────────────────

/// Construction input for [`CostOverlays`](crate::CostOverlays).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Cost knobs; decide which sources exist and what they charge.
    pub settings: CostSettings,
    /// Change batches each source retains for lagging aggregators.
    /// Default: 64.
    pub journal_capacity: usize,
    /// Capacity of the cross-thread notification inbox. Default: 1024.
    pub notification_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settings: CostSettings::default(),
            journal_capacity: 64,
            notification_capacity: 1024,
        }
    }
}

impl EngineConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.journal_capacity == 0 {
            return Err(ConfigError::JournalCapacityZero);
        }
        if self.notification_capacity == 0 {
            return Err(ConfigError::NotificationCapacityZero);
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `journal_capacity` is zero.
    JournalCapacityZero,
    /// `notification_capacity` is zero.
    NotificationCapacityZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JournalCapacityZero => write!(f, "journal_capacity must be at least 1"),
            Self::NotificationCapacityZero => {
                write!(f, "notification_capacity must be at least 1")
            }
        }
    }
}

impl Error for ConfigError {}
