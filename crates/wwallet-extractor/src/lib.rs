//! Warranty Wallet Extractor
//!
//! Turns receipt images into structured purchase data and web-grounded
//! policy facts.
//!
//! # Architecture
//!
//! ```text
//! Image → OCR → Prompt → Completion (strict JSON) → ReceiptData
//!
//! (item, store) → Prompt → Completion (web search, text)   [phase 1]
//!              → Prompt(summary) → Completion (strict JSON) [phase 2]
//!              → WarrantyInfo / ReturnPolicyInfo
//! ```
//!
//! # Key Properties
//!
//! - **Two-call protocol**: the completion API cannot combine web-search
//!   grounding with forced JSON output, so policy lookups ground first and
//!   structure second; phase 2 runs only on phase-1 success.
//! - **Fail-propagation**: OCR, transport, envelope and decode failures all
//!   surface to the caller unchanged. No retries, no default substitution.
//! - **Independent sub-flows**: warranty and return-policy lookups share no
//!   state and may run concurrently.
//!
//! # Example
//!
//! ```no_run
//! use wwallet_extractor::{ExtractionConfig, ReceiptPipeline};
//! use wwallet_llm::ResponsesClient;
//! use wwallet_ocr::TesseractRecognizer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let completions = ResponsesClient::new("api-key", "gpt-4o-mini");
//! let pipeline = ReceiptPipeline::new(
//!     completions,
//!     TesseractRecognizer::new(),
//!     ExtractionConfig::default(),
//! );
//!
//! let image = std::fs::read("receipt.jpg")?;
//! let receipt = pipeline.extract_receipt(&image).await?;
//! println!("{:?} for ${}", receipt.item_name, receipt.formatted_price());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
pub mod prompt;

#[cfg(test)]
mod tests;

pub use config::ExtractionConfig;
pub use error::{ExtractionError, Phase};
pub use extractor::ReceiptPipeline;
