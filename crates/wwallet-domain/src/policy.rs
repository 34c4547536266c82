//! Policy lookup results

use serde::{Deserialize, Serialize};

/// Warranty terms recovered by a policy lookup.
///
/// Unknown fields are `None` (JSON `null`), never the sentinel string
/// `"Unknown"` — the extraction prompt makes the same demand of the model,
/// and the decoder enforces the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyInfo {
    /// Warranty period in months; `None` if it could not be determined.
    pub warranty_months: Option<u32>,

    /// Key warranty conditions and exclusions.
    pub conditions: String,

    /// Source link substantiating the extracted terms.
    pub evidence_url: Option<String>,
}

/// Return-policy terms recovered by a policy lookup.
///
/// Symmetric to [`WarrantyInfo`]; the window is counted in days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnPolicyInfo {
    /// Return window in days; `None` if it could not be determined.
    pub return_days: Option<u32>,

    /// Key return conditions and requirements.
    pub conditions: String,

    /// Source link substantiating the extracted terms.
    pub evidence_url: Option<String>,
}
