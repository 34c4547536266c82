//! The persisted warranty record and its assembly rules

use crate::dates;
use crate::status::PolicyStatus;
use crate::{ReceiptData, ReturnPolicyInfo, WarrantyInfo};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// Warranty length applied when a lookup leaves the period unknown (months).
pub const DEFAULT_WARRANTY_MONTHS: u32 = 12;

/// Return window applied when a lookup leaves the window unknown (days).
pub const DEFAULT_RETURN_DAYS: u32 = 30;

/// Unique identifier for a warranty record, based on UUIDv7.
///
/// UUIDv7 provides:
/// - Chronological sortability, so listings follow insertion order
/// - 128-bit uniqueness without coordination
/// - RFC 9562-standard format with broad ecosystem support
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u128);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId.
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RecordId from a raw u128 value.
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RecordId from its UUID string form.
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid record id: {}", e))
    }

    /// Get the raw u128 value.
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Default durations applied when a policy lookup comes back unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyDefaults {
    /// Fallback warranty length in months.
    pub warranty_months: u32,

    /// Fallback return window in days.
    pub return_days: u32,
}

impl Default for PolicyDefaults {
    fn default() -> Self {
        Self {
            warranty_months: DEFAULT_WARRANTY_MONTHS,
            return_days: DEFAULT_RETURN_DAYS,
        }
    }
}

/// User-confirmed fields for a record, prior to assembly.
///
/// Extraction output only ever pre-fills a draft; the persisted record
/// reflects whatever the user confirmed or edited, never raw model output.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    /// Name of the purchased item.
    pub item_name: String,

    /// Store the item was purchased from.
    pub store_name: Option<String>,

    /// Purchase price.
    pub price: f64,

    /// Date of purchase.
    pub purchase_date: NaiveDate,

    /// Warranty length in calendar months.
    pub warranty_length_months: u32,

    /// Return window in calendar days.
    pub return_window_days: u32,

    /// Key warranty conditions, when a lookup supplied them.
    pub warranty_conditions: Option<String>,

    /// Source link for the warranty terms.
    pub warranty_evidence_url: Option<String>,

    /// Key return conditions, when a lookup supplied them.
    pub return_conditions: Option<String>,

    /// Source link for the return terms.
    pub return_evidence_url: Option<String>,

    /// Raw receipt image bytes, when one was captured.
    pub receipt_image: Option<Vec<u8>>,

    /// OCR text recovered from the receipt image.
    pub extracted_text: Option<String>,
}

impl RecordDraft {
    /// Pre-fill a draft from extraction and lookup suggestions.
    ///
    /// Absent suggestions fall back to `defaults` and to `today` for the
    /// purchase date. The caller confirms or edits the draft before it is
    /// assembled into a record.
    pub fn from_extraction(
        receipt: &ReceiptData,
        warranty: Option<&WarrantyInfo>,
        return_policy: Option<&ReturnPolicyInfo>,
        defaults: PolicyDefaults,
        today: NaiveDate,
    ) -> Self {
        Self {
            item_name: receipt.item_name.clone().unwrap_or_default(),
            store_name: receipt.store_name.clone(),
            price: receipt.price.unwrap_or(0.0),
            purchase_date: receipt.parsed_date().unwrap_or(today),
            warranty_length_months: warranty
                .and_then(|w| w.warranty_months)
                .unwrap_or(defaults.warranty_months),
            return_window_days: return_policy
                .and_then(|r| r.return_days)
                .unwrap_or(defaults.return_days),
            warranty_conditions: warranty.map(|w| w.conditions.clone()),
            warranty_evidence_url: warranty.and_then(|w| w.evidence_url.clone()),
            return_conditions: return_policy.map(|r| r.conditions.clone()),
            return_evidence_url: return_policy.and_then(|r| r.evidence_url.clone()),
            receipt_image: None,
            extracted_text: None,
        }
    }
}

/// A persisted warranty record.
///
/// The two end dates are derived: `warranty_end_date` is the purchase date
/// plus the warranty length in calendar months, `return_end_date` the
/// purchase date plus the return window in calendar days. Both are
/// recomputed on every mutation of the purchase date or the respective
/// length; [`WarrantyRecord::assemble`] and [`WarrantyRecord::apply`] are
/// the only constructors, so the invariant cannot drift.
#[derive(Debug, Clone, PartialEq)]
pub struct WarrantyRecord {
    /// Unique identifier.
    pub id: RecordId,

    /// Name of the purchased item.
    pub item_name: String,

    /// Store the item was purchased from.
    pub store_name: Option<String>,

    /// Purchase price.
    pub price: f64,

    /// Date of purchase.
    pub purchase_date: NaiveDate,

    /// Warranty length in calendar months.
    pub warranty_length_months: u32,

    /// Return window in calendar days.
    pub return_window_days: u32,

    /// Derived: purchase date plus the warranty length.
    pub warranty_end_date: NaiveDate,

    /// Derived: purchase date plus the return window.
    pub return_end_date: NaiveDate,

    /// Key warranty conditions.
    pub warranty_conditions: Option<String>,

    /// Source link for the warranty terms.
    pub warranty_evidence_url: Option<String>,

    /// Key return conditions.
    pub return_conditions: Option<String>,

    /// Source link for the return terms.
    pub return_evidence_url: Option<String>,

    /// Raw receipt image bytes.
    pub receipt_image: Option<Vec<u8>>,

    /// OCR text recovered from the receipt image.
    pub extracted_text: Option<String>,

    /// When this record was created.
    pub created_at: DateTime<Utc>,

    /// When this record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl WarrantyRecord {
    /// Assemble a new record from a confirmed draft.
    ///
    /// Computes both end dates and stamps `created_at`/`updated_at` with
    /// `now`.
    pub fn assemble(draft: RecordDraft, now: DateTime<Utc>) -> Self {
        let warranty_end_date =
            dates::warranty_end_date(draft.purchase_date, draft.warranty_length_months);
        let return_end_date = dates::return_end_date(draft.purchase_date, draft.return_window_days);

        Self {
            id: RecordId::new(),
            item_name: draft.item_name,
            store_name: draft.store_name,
            price: draft.price,
            purchase_date: draft.purchase_date,
            warranty_length_months: draft.warranty_length_months,
            return_window_days: draft.return_window_days,
            warranty_end_date,
            return_end_date,
            warranty_conditions: draft.warranty_conditions,
            warranty_evidence_url: draft.warranty_evidence_url,
            return_conditions: draft.return_conditions,
            return_evidence_url: draft.return_evidence_url,
            receipt_image: draft.receipt_image,
            extracted_text: draft.extracted_text,
            created_at: now,
            updated_at: now,
        }
    }

    /// Re-assemble this record from an edited draft.
    ///
    /// End dates are recomputed from the draft's purchase date and lengths;
    /// `id` and `created_at` are preserved and `updated_at` advances to
    /// `now`.
    pub fn apply(&mut self, draft: RecordDraft, now: DateTime<Utc>) {
        self.warranty_end_date =
            dates::warranty_end_date(draft.purchase_date, draft.warranty_length_months);
        self.return_end_date = dates::return_end_date(draft.purchase_date, draft.return_window_days);

        self.item_name = draft.item_name;
        self.store_name = draft.store_name;
        self.price = draft.price;
        self.purchase_date = draft.purchase_date;
        self.warranty_length_months = draft.warranty_length_months;
        self.return_window_days = draft.return_window_days;
        self.warranty_conditions = draft.warranty_conditions;
        self.warranty_evidence_url = draft.warranty_evidence_url;
        self.return_conditions = draft.return_conditions;
        self.return_evidence_url = draft.return_evidence_url;
        self.receipt_image = draft.receipt_image;
        self.extracted_text = draft.extracted_text;
        self.updated_at = now;
    }

    /// A draft carrying this record's current field values.
    ///
    /// Convenient starting point for partial edits.
    pub fn to_draft(&self) -> RecordDraft {
        RecordDraft {
            item_name: self.item_name.clone(),
            store_name: self.store_name.clone(),
            price: self.price,
            purchase_date: self.purchase_date,
            warranty_length_months: self.warranty_length_months,
            return_window_days: self.return_window_days,
            warranty_conditions: self.warranty_conditions.clone(),
            warranty_evidence_url: self.warranty_evidence_url.clone(),
            return_conditions: self.return_conditions.clone(),
            return_evidence_url: self.return_evidence_url.clone(),
            receipt_image: self.receipt_image.clone(),
            extracted_text: self.extracted_text.clone(),
        }
    }

    /// Warranty status against `today` with the given expiring-soon
    /// threshold.
    pub fn warranty_status(&self, today: NaiveDate, threshold_days: i64) -> PolicyStatus {
        PolicyStatus::classify(today, Some(self.warranty_end_date), threshold_days)
    }

    /// Return-window status against `today` with the given expiring-soon
    /// threshold.
    pub fn return_status(&self, today: NaiveDate, threshold_days: i64) -> PolicyStatus {
        PolicyStatus::classify(today, Some(self.return_end_date), threshold_days)
    }
}
