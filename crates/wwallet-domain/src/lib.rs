//! Warranty Wallet Domain Layer
//!
//! Core types and business rules for the receipt-to-record pipeline. This
//! crate owns the data shapes exchanged with the language model, the
//! persisted record entity, and the pure calendar/status logic, and it
//! defines the trait seams that the infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **ReceiptData**: transient, model-extracted purchase facts
//! - **WarrantyInfo / ReturnPolicyInfo**: structured policy-lookup results
//! - **WarrantyRecord**: the persisted entity with derived end dates
//! - **PolicyStatus**: 4-state classification of an end date against today
//!
//! ## Architecture
//!
//! - Pure domain logic only; no I/O
//! - Infrastructure implementations live in sibling crates
//! - Trait definitions for every external capability (OCR, completion API,
//!   web search, record store)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dates;
pub mod policy;
pub mod receipt;
pub mod record;
pub mod status;
pub mod traits;

// Re-exports for convenience
pub use policy::{ReturnPolicyInfo, WarrantyInfo};
pub use receipt::ReceiptData;
pub use record::{
    PolicyDefaults, RecordDraft, RecordId, WarrantyRecord, DEFAULT_RETURN_DAYS,
    DEFAULT_WARRANTY_MONTHS,
};
pub use status::{PolicyStatus, RETURN_EXPIRING_SOON_DAYS, WARRANTY_EXPIRING_SOON_DAYS};
