//! Core pipeline implementation

use crate::config::ExtractionConfig;
use crate::error::{ExtractionError, Phase};
use crate::parser;
use crate::prompt;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info};
use wwallet_domain::traits::{CompletionApi, TextRecognizer, WebSearch};
use wwallet_domain::{ReceiptData, ReturnPolicyInfo, WarrantyInfo};
use wwallet_ocr::TextExtractor;

/// The receipt-to-record extraction pipeline.
///
/// Sequences image → OCR text → prompt → typed model output, and runs the
/// two-call search-then-structure protocol for policy lookups. Every
/// failure along the way is surfaced to the caller unchanged; nothing is
/// retried and no malformed model output is replaced with defaults.
pub struct ReceiptPipeline<C, R>
where
    C: CompletionApi,
    R: TextRecognizer,
{
    completions: Arc<C>,
    ocr: Arc<TextExtractor<R>>,
    config: ExtractionConfig,
}

impl<C, R> ReceiptPipeline<C, R>
where
    C: CompletionApi + 'static,
    R: TextRecognizer + Send + Sync + 'static,
{
    /// Create a pipeline over a completion provider and a text recognizer.
    pub fn new(completions: C, recognizer: R, config: ExtractionConfig) -> Self {
        Self {
            completions: Arc::new(completions),
            ocr: Arc::new(TextExtractor::new(recognizer)),
            config,
        }
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract structured purchase data from a receipt image.
    ///
    /// OCR failures and decode failures propagate unchanged — malformed
    /// model output must be visible to the caller, not masked.
    pub async fn extract_receipt(&self, image: &[u8]) -> Result<ReceiptData, ExtractionError> {
        let text = self.recognize_text(image).await?;
        info!(chars = text.len(), "recognized receipt text");

        let prompt = prompt::receipt_extraction_prompt(&text);
        let raw = self.complete_structuring(&prompt).await?;
        parser::decode_receipt(&raw)
    }

    /// OCR text with small recognition errors corrected by the model.
    pub async fn extract_clean_text(&self, image: &[u8]) -> Result<String, ExtractionError> {
        let text = self.recognize_text(image).await?;

        let prompt = prompt::text_cleanup_prompt(&text);
        let raw = self.complete_structuring(&prompt).await?;
        parser::decode_cleaned_text(&raw)
    }

    /// Look up warranty terms, grounded by the completion provider's
    /// web-search tool.
    ///
    /// When `item_name` is empty the search is keyed on the store name
    /// alone; an empty item *and* store is rejected before any network
    /// call.
    pub async fn lookup_warranty(
        &self,
        item_name: &str,
        store_name: Option<&str>,
    ) -> Result<WarrantyInfo, ExtractionError> {
        require_query_terms(item_name, store_name)?;

        let search_prompt =
            prompt::warranty_search_prompt(item_name, store_name, &self.config.jurisdiction);
        let summary = self.complete_searching(&search_prompt).await?;

        self.structure_warranty(&summary).await
    }

    /// Look up return-policy terms, grounded by the completion provider's
    /// web-search tool.
    pub async fn lookup_return_policy(
        &self,
        store_name: &str,
        item_name: Option<&str>,
    ) -> Result<ReturnPolicyInfo, ExtractionError> {
        if store_name.is_empty() {
            return Err(ExtractionError::InvalidInput(
                "a store name is required for a return-policy lookup".to_string(),
            ));
        }

        let search_prompt =
            prompt::return_policy_search_prompt(store_name, item_name, &self.config.jurisdiction);
        let summary = self.complete_searching(&search_prompt).await?;

        self.structure_return_policy(&summary).await
    }

    /// Run the warranty and return-policy lookups concurrently.
    ///
    /// The sub-flows share no state; each result stands on its own and a
    /// failure in one leaves the other untouched.
    pub async fn lookup_policies(
        &self,
        item_name: &str,
        store_name: &str,
    ) -> (
        Result<WarrantyInfo, ExtractionError>,
        Result<ReturnPolicyInfo, ExtractionError>,
    ) {
        tokio::join!(
            self.lookup_warranty(item_name, Some(store_name)),
            self.lookup_return_policy(store_name, Some(item_name)),
        )
    }

    /// Warranty lookup grounded by an external search engine instead of
    /// the completion provider's tool.
    ///
    /// Zero hits is terminal for the sub-flow; phase 2 is identical to
    /// [`ReceiptPipeline::lookup_warranty`].
    pub async fn lookup_warranty_with<W: WebSearch>(
        &self,
        search: &W,
        item_name: &str,
        store_name: Option<&str>,
    ) -> Result<WarrantyInfo, ExtractionError> {
        require_query_terms(item_name, store_name)?;

        let query = prompt::warranty_search_query(item_name, store_name, &self.config.jurisdiction);
        debug!(%query, "running external warranty search");
        let hits = search
            .search(&query)
            .await
            .map_err(|e| ExtractionError::Search(e.to_string()))?;

        let summary = prompt::search_summary(&hits);
        self.structure_warranty(&summary).await
    }

    /// Return-policy lookup grounded by an external search engine.
    ///
    /// External queries target the store-level policy page, so no item name
    /// is taken here.
    pub async fn lookup_return_policy_with<W: WebSearch>(
        &self,
        search: &W,
        store_name: &str,
    ) -> Result<ReturnPolicyInfo, ExtractionError> {
        if store_name.is_empty() {
            return Err(ExtractionError::InvalidInput(
                "a store name is required for a return-policy lookup".to_string(),
            ));
        }

        let query = prompt::return_policy_search_query(store_name, &self.config.jurisdiction);
        debug!(%query, "running external return-policy search");
        let hits = search
            .search(&query)
            .await
            .map_err(|e| ExtractionError::Search(e.to_string()))?;

        let summary = prompt::search_summary(&hits);
        self.structure_return_policy(&summary).await
    }

    /// Phase 2 of the warranty sub-flow.
    async fn structure_warranty(&self, summary: &str) -> Result<WarrantyInfo, ExtractionError> {
        let prompt = prompt::warranty_extraction_prompt(summary);
        let raw = self.complete_structuring(&prompt).await?;
        parser::decode_warranty(&raw)
    }

    /// Phase 2 of the return-policy sub-flow.
    async fn structure_return_policy(
        &self,
        summary: &str,
    ) -> Result<ReturnPolicyInfo, ExtractionError> {
        let prompt = prompt::return_policy_extraction_prompt(summary);
        let raw = self.complete_structuring(&prompt).await?;
        parser::decode_return_policy(&raw)
    }

    /// Grounded (web-search mode) completion with the configured deadline.
    async fn complete_searching(&self, prompt: &str) -> Result<String, ExtractionError> {
        debug!(phase = %Phase::Searching, prompt_chars = prompt.len(), "completion call");

        match timeout(
            self.config.completion_timeout(),
            self.completions.complete_grounded(prompt),
        )
        .await
        {
            Err(_) => Err(ExtractionError::Timeout),
            Ok(result) => result.map_err(|e| ExtractionError::Completion {
                phase: Phase::Searching,
                message: e.to_string(),
            }),
        }
    }

    /// Strict-JSON completion with the configured deadline.
    async fn complete_structuring(&self, prompt: &str) -> Result<String, ExtractionError> {
        debug!(phase = %Phase::Structuring, prompt_chars = prompt.len(), "completion call");

        match timeout(
            self.config.completion_timeout(),
            self.completions.complete_strict_json(prompt),
        )
        .await
        {
            Err(_) => Err(ExtractionError::Timeout),
            Ok(result) => result.map_err(|e| ExtractionError::Completion {
                phase: Phase::Structuring,
                message: e.to_string(),
            }),
        }
    }

    /// Run the blocking recognizer off the async executor.
    async fn recognize_text(&self, image: &[u8]) -> Result<String, ExtractionError> {
        let ocr = Arc::clone(&self.ocr);
        let image = image.to_vec();

        tokio::task::spawn_blocking(move || ocr.extract_text(&image))
            .await
            .map_err(|e| {
                ExtractionError::Ocr(wwallet_ocr::OcrError::Recognizer(format!(
                    "task join error: {}",
                    e
                )))
            })?
            .map_err(ExtractionError::from)
    }
}

fn require_query_terms(item_name: &str, store_name: Option<&str>) -> Result<(), ExtractionError> {
    if item_name.is_empty() && store_name.unwrap_or("").is_empty() {
        return Err(ExtractionError::InvalidInput(
            "an item name or store name is required for a warranty lookup".to_string(),
        ));
    }
    Ok(())
}
