//! Trait definitions for external capabilities
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in the sibling crates; tests use
//! the mock implementations those crates ship.

use crate::{RecordId, WarrantyRecord};
use async_trait::async_trait;

/// Optical text recognition over raw image bytes.
///
/// Implementations are expected to be blocking (on-device or subprocess
/// recognition); async callers bridge with `spawn_blocking`.
pub trait TextRecognizer {
    /// Error type for recognition failures.
    type Error: std::fmt::Display;

    /// Recognized text observations, top to bottom.
    ///
    /// An empty list means the image decoded but carried no text.
    fn recognize(&self, image: &[u8]) -> Result<Vec<String>, Self::Error>;
}

/// Completion API with two mutually exclusive response modes.
///
/// Web-search grounding produces free text; strict-JSON mode forces a bare
/// JSON object. The two cannot be combined in one call, which is why the
/// policy-lookup flow is a two-call protocol.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Error type for completion failures.
    type Error: std::fmt::Display + Send;

    /// Free-text completion grounded by the provider's web-search tool.
    async fn complete_grounded(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Strict-JSON completion; returns the raw JSON object text.
    async fn complete_strict_json(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// A single web-search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Result title.
    pub title: String,

    /// Result URL.
    pub url: String,

    /// Short description or snippet.
    pub snippet: String,
}

/// External web-search capability.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Error type for search failures.
    type Error: std::fmt::Display + Send;

    /// Execute a query.
    ///
    /// Implementations report zero hits as an error, so a successful call
    /// always carries at least one hit.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, Self::Error>;
}

/// Persistent store for warranty records.
///
/// Implemented by the storage layer (`wwallet-store`).
pub trait RecordStore {
    /// Error type for store operations.
    type Error;

    /// Persist a new record.
    fn create_record(&mut self, record: WarrantyRecord) -> Result<RecordId, Self::Error>;

    /// Overwrite an existing record.
    fn update_record(&mut self, record: &WarrantyRecord) -> Result<(), Self::Error>;

    /// Fetch a record by id.
    fn get_record(&self, id: RecordId) -> Result<Option<WarrantyRecord>, Self::Error>;

    /// All records, in id (insertion) order.
    fn list_records(&self) -> Result<Vec<WarrantyRecord>, Self::Error>;

    /// Delete a record by id.
    fn delete_record(&mut self, id: RecordId) -> Result<(), Self::Error>;
}
