//! Status classification for warranty and return windows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days below which an active warranty is reported as expiring soon.
pub const WARRANTY_EXPIRING_SOON_DAYS: i64 = 30;

/// Days below which an active return window is reported as expiring soon.
pub const RETURN_EXPIRING_SOON_DAYS: i64 = 7;

/// Lifecycle state of a warranty or return window.
///
/// One enum serves both classifications; only the expiring-soon threshold
/// differs between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolicyStatus {
    /// The end date is comfortably in the future.
    Active,

    /// The end date is within the expiring-soon threshold.
    ExpiringSoon,

    /// The end date has passed.
    Expired,

    /// No end date is known.
    Unknown,
}

impl PolicyStatus {
    /// Classify an end date against `today`.
    ///
    /// Total for every input combination: `None` end date is `Unknown`,
    /// a past end date is `Expired`, a remaining whole-day count at or
    /// below the threshold is `ExpiringSoon`, anything else is `Active`.
    pub fn classify(
        today: NaiveDate,
        end_date: Option<NaiveDate>,
        expiring_soon_threshold_days: i64,
    ) -> Self {
        let Some(end) = end_date else {
            return PolicyStatus::Unknown;
        };

        if today > end {
            return PolicyStatus::Expired;
        }

        let days_remaining = (end - today).num_days();
        if days_remaining <= expiring_soon_threshold_days {
            PolicyStatus::ExpiringSoon
        } else {
            PolicyStatus::Active
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "Active",
            PolicyStatus::ExpiringSoon => "Expiring Soon",
            PolicyStatus::Expired => "Expired",
            PolicyStatus::Unknown => "Unknown",
        }
    }

    /// Display color used by front ends.
    pub fn color(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "green",
            PolicyStatus::ExpiringSoon => "orange",
            PolicyStatus::Expired => "red",
            PolicyStatus::Unknown => "gray",
        }
    }
}
