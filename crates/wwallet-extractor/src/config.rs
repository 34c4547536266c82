//! Configuration for the extraction pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;
use wwallet_domain::{
    PolicyDefaults, DEFAULT_RETURN_DAYS, DEFAULT_WARRANTY_MONTHS, RETURN_EXPIRING_SOON_DAYS,
    WARRANTY_EXPIRING_SOON_DAYS,
};

/// Configuration for the extraction pipeline.
///
/// Constructed once at process start and passed by reference into the
/// pipeline; nothing here is mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Jurisdiction the policy prompts and search queries are constrained
    /// to.
    pub jurisdiction: String,

    /// Maximum time for a single completion call (seconds).
    pub completion_timeout_secs: u64,

    /// Warranty length applied when a lookup leaves the period unknown
    /// (months).
    pub default_warranty_months: u32,

    /// Return window applied when a lookup leaves the window unknown
    /// (days).
    pub default_return_days: u32,

    /// Days below which an active warranty counts as expiring soon.
    pub warranty_expiring_soon_days: i64,

    /// Days below which an active return window counts as expiring soon.
    pub return_expiring_soon_days: i64,
}

impl ExtractionConfig {
    /// Get the completion timeout as a Duration.
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }

    /// Fallback durations for record drafts.
    pub fn policy_defaults(&self) -> PolicyDefaults {
        PolicyDefaults {
            warranty_months: self.default_warranty_months,
            return_days: self.default_return_days,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.jurisdiction.trim().is_empty() {
            return Err("jurisdiction must not be empty".to_string());
        }
        if self.completion_timeout_secs == 0 {
            return Err("completion_timeout_secs must be greater than 0".to_string());
        }
        if self.warranty_expiring_soon_days < 0 || self.return_expiring_soon_days < 0 {
            return Err("expiring-soon thresholds must not be negative".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            jurisdiction: "Australia".to_string(),
            completion_timeout_secs: 120,
            default_warranty_months: DEFAULT_WARRANTY_MONTHS,
            default_return_days: DEFAULT_RETURN_DAYS,
            warranty_expiring_soon_days: WARRANTY_EXPIRING_SOON_DAYS,
            return_expiring_soon_days: RETURN_EXPIRING_SOON_DAYS,
        }
    }
}
