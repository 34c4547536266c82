//! Strict decoders for model output
//!
//! Strict-JSON mode guarantees a bare JSON object, so each decoder is a
//! single serde pass against the target shape. A mismatch is surfaced to
//! the caller as [`ExtractionError::Decode`] — never papered over with
//! defaults.

use crate::error::ExtractionError;
use serde::Deserialize;
use wwallet_domain::{ReceiptData, ReturnPolicyInfo, WarrantyInfo};

/// Payload shape of the text-cleanup task.
#[derive(Debug, Deserialize)]
struct CleanedText {
    text: String,
}

/// Decode receipt-extraction output.
pub(crate) fn decode_receipt(text: &str) -> Result<ReceiptData, ExtractionError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode warranty-extraction output.
pub(crate) fn decode_warranty(text: &str) -> Result<WarrantyInfo, ExtractionError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode return-policy-extraction output.
pub(crate) fn decode_return_policy(text: &str) -> Result<ReturnPolicyInfo, ExtractionError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode text-cleanup output down to the cleaned text itself.
pub(crate) fn decode_cleaned_text(text: &str) -> Result<String, ExtractionError> {
    let payload: CleanedText = serde_json::from_str(text)?;
    Ok(payload.text)
}
