//! Warranty Wallet LLM Client Layer
//!
//! Client for a Responses-style completion API with two mutually exclusive
//! response modes: web-search grounding (free text) and strict JSON.
//!
//! # Architecture
//!
//! This crate implements the `CompletionApi` trait from `wwallet-domain`.
//! [`ResponsesClient`] talks to the real API; [`MockCompletions`] serves
//! tests with prompt-keyed canned responses.
//!
//! # The two-call protocol
//!
//! The completion API cannot force a JSON object while its web-search tool
//! is enabled. Callers that want structured, web-grounded data therefore
//! call twice: once in web-search mode for grounded prose, then once in
//! strict-JSON mode with a prompt that converts that prose into the target
//! shape. Requesting both modes at once is a programming error and fails
//! with [`CompletionError::IncompatibleModes`] before any network traffic.
//!
//! # Examples
//!
//! ```
//! use wwallet_llm::MockCompletions;
//! use wwallet_domain::traits::CompletionApi;
//!
//! # tokio_test::block_on(async {
//! let provider = MockCompletions::new("{\"warrantyMonths\":12}");
//! let text = provider.complete_strict_json("any prompt").await.unwrap();
//! assert_eq!(text, "{\"warrantyMonths\":12}");
//! # });
//! ```

#![warn(missing_docs)]

pub mod responses;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use wwallet_domain::traits::CompletionApi;

pub use responses::{CompletionRequest, ResponseFormat, ResponsesClient};

/// Errors that can occur while completing a prompt.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Web-search grounding and strict-JSON output were requested together.
    ///
    /// The API treats these as mutually exclusive; ground first in text
    /// mode, then structure the result with a second strict-JSON call.
    #[error("web_search is not compatible with JSON output; ground in text mode, then request JSON in a second call")]
    IncompatibleModes,

    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status; carries a preview of the response body.
    #[error("completion API request failed: {0}")]
    HttpFailure(String),

    /// The response did not match the expected envelope shape.
    #[error("malformed response container")]
    MalformedContainer,

    /// The envelope held no usable text content.
    #[error("no text content in response")]
    MissingText,

    /// Generic error (mock injection, unexpected conditions).
    #[error("completion error: {0}")]
    Other(String),
}

/// Mock completion provider for deterministic testing.
///
/// Returns pre-configured responses keyed by prompt without making any
/// network calls. Both modes share one response table; register an error
/// for a prompt with [`MockCompletions::add_error`].
#[derive(Debug, Clone)]
pub struct MockCompletions {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
}

const ERROR_SENTINEL: &str = "\u{0}ERROR";

impl MockCompletions {
    /// Create a provider with a fixed response for all prompts.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific response for a given prompt.
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Configure a prompt to fail with a mock error.
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), ERROR_SENTINEL.to_string());
    }

    /// Number of completions issued so far, both modes combined.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn lookup(&self, prompt: &str) -> Result<String, CompletionError> {
        *self.call_count.lock().unwrap() += 1;

        let responses = self.responses.lock().unwrap();
        match responses.get(prompt) {
            Some(response) if response == ERROR_SENTINEL => {
                Err(CompletionError::Other("mock error".to_string()))
            }
            Some(response) => Ok(response.clone()),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockCompletions {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl CompletionApi for MockCompletions {
    type Error = CompletionError;

    async fn complete_grounded(&self, prompt: &str) -> Result<String, CompletionError> {
        self.lookup(prompt)
    }

    async fn complete_strict_json(&self, prompt: &str) -> Result<String, CompletionError> {
        self.lookup(prompt)
    }
}
