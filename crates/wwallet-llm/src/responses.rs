//! Responses-API client implementation
//!
//! One POST per completion. The request selects exactly one response mode;
//! the response envelope is demultiplexed down to the first message entry's
//! first inline-text content part. No retries, no partial-content recovery.

use crate::CompletionError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use wwallet_domain::traits::CompletionApi;

/// Default completion API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for completion requests (60 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Longest response-body preview carried inside an HTTP failure.
const BODY_PREVIEW_CHARS: usize = 512;

/// Requested output shape for a completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Free text.
    Text,

    /// A single syntactically valid JSON object, no prose.
    JsonObject,
}

impl ResponseFormat {
    fn wire_name(self) -> &'static str {
        match self {
            ResponseFormat::Text => "text",
            ResponseFormat::JsonObject => "json_object",
        }
    }
}

/// A single completion request.
///
/// `web_search == true` with [`ResponseFormat::JsonObject`] is rejected
/// before any I/O; see [`CompletionError::IncompatibleModes`].
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    /// Prompt text, sent as the request `input`.
    pub prompt: &'a str,

    /// Enable the provider's web-search tool.
    pub web_search: bool,

    /// Requested output shape.
    pub format: ResponseFormat,
}

/// Client for a Responses-style completion API.
pub struct ResponsesClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl ResponsesClient {
    /// Create a client for the default endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create a client using the default model.
    pub fn with_default_model(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_MODEL)
    }

    /// Override the API base URL (tests, proxies, compatible gateways).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Execute a completion request.
    ///
    /// Mode compatibility is validated before any network traffic: a
    /// web-search request that also demands a JSON object fails with
    /// [`CompletionError::IncompatibleModes`] without touching the wire.
    ///
    /// # Errors
    ///
    /// - [`CompletionError::Transport`] when no HTTP response arrives
    /// - [`CompletionError::HttpFailure`] on a non-success status
    /// - [`CompletionError::MalformedContainer`] / [`CompletionError::MissingText`]
    ///   when the envelope does not carry a usable message
    pub async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, CompletionError> {
        if request.web_search && request.format == ResponseFormat::JsonObject {
            return Err(CompletionError::IncompatibleModes);
        }

        let url = format!("{}/responses", self.base_url);
        let payload = build_payload(&self.model, &request);

        debug!(
            web_search = request.web_search,
            format = request.format.wire_name(),
            prompt_chars = request.prompt.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CompletionError::HttpFailure(body_preview(&body)));
        }

        message_text(&body)
    }
}

#[async_trait]
impl CompletionApi for ResponsesClient {
    type Error = CompletionError;

    async fn complete_grounded(&self, prompt: &str) -> Result<String, CompletionError> {
        self.complete(CompletionRequest {
            prompt,
            web_search: true,
            format: ResponseFormat::Text,
        })
        .await
    }

    async fn complete_strict_json(&self, prompt: &str) -> Result<String, CompletionError> {
        self.complete(CompletionRequest {
            prompt,
            web_search: false,
            format: ResponseFormat::JsonObject,
        })
        .await
    }
}

/// Build the request payload for one completion call.
fn build_payload(model: &str, request: &CompletionRequest<'_>) -> Value {
    let mut payload = json!({
        "model": model,
        "input": request.prompt,
    });

    if request.web_search {
        payload["tools"] = json!([{ "type": "web_search" }]);
    }
    payload["text"] = json!({ "format": { "type": request.format.wire_name() } });

    payload
}

/// Extract the first message text from a Responses-API envelope.
///
/// The envelope is `{ "output": [ ... ] }`; tool-call entries ahead of the
/// message are skipped. Within the message, the first content part carrying
/// `text` or `output_text` wins — even when that text is empty, in which
/// case the call fails with `MissingText` rather than scanning further.
fn message_text(body: &str) -> Result<String, CompletionError> {
    let root: Value =
        serde_json::from_str(body).map_err(|_| CompletionError::MalformedContainer)?;

    let output = root
        .get("output")
        .and_then(Value::as_array)
        .ok_or(CompletionError::MalformedContainer)?;

    let message = output
        .iter()
        .find(|entry| entry.get("type").and_then(Value::as_str) == Some("message"))
        .ok_or(CompletionError::MissingText)?;

    let content = message
        .get("content")
        .and_then(Value::as_array)
        .ok_or(CompletionError::MissingText)?;

    let text = content
        .iter()
        .find_map(|part| {
            part.get("text")
                .and_then(Value::as_str)
                .or_else(|| part.get("output_text").and_then(Value::as_str))
        })
        .unwrap_or("");

    if text.is_empty() {
        return Err(CompletionError::MissingText);
    }

    Ok(text.to_string())
}

fn body_preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_json_payload() {
        let request = CompletionRequest {
            prompt: "extract the receipt",
            web_search: false,
            format: ResponseFormat::JsonObject,
        };
        let payload = build_payload("gpt-4o-mini", &request);

        assert_eq!(payload["model"], "gpt-4o-mini");
        assert_eq!(payload["input"], "extract the receipt");
        assert_eq!(payload["text"]["format"]["type"], "json_object");
        assert!(payload.get("tools").is_none());
    }

    #[test]
    fn test_web_search_payload() {
        let request = CompletionRequest {
            prompt: "find the warranty policy",
            web_search: true,
            format: ResponseFormat::Text,
        };
        let payload = build_payload("gpt-4o-mini", &request);

        assert_eq!(payload["tools"][0]["type"], "web_search");
        assert_eq!(payload["text"]["format"]["type"], "text");
    }

    #[test]
    fn test_message_text_happy_path() {
        let body = r#"{
            "output": [
                { "type": "web_search_call", "id": "ws_1" },
                { "type": "message", "content": [
                    { "type": "output_text", "text": "Twelve months from purchase." }
                ] }
            ]
        }"#;

        assert_eq!(
            message_text(body).unwrap(),
            "Twelve months from purchase."
        );
    }

    #[test]
    fn test_message_text_output_text_key() {
        let body = r#"{"output": [{"type": "message", "content": [{"output_text": "hello"}]}]}"#;
        assert_eq!(message_text(body).unwrap(), "hello");
    }

    #[test]
    fn test_missing_output_is_malformed_container() {
        let body = r#"{"id": "resp_123"}"#;
        assert!(matches!(
            message_text(body),
            Err(CompletionError::MalformedContainer)
        ));
    }

    #[test]
    fn test_non_json_body_is_malformed_container() {
        assert!(matches!(
            message_text("<html>gateway error</html>"),
            Err(CompletionError::MalformedContainer)
        ));
    }

    #[test]
    fn test_output_not_array_is_malformed_container() {
        let body = r#"{"output": "oops"}"#;
        assert!(matches!(
            message_text(body),
            Err(CompletionError::MalformedContainer)
        ));
    }

    #[test]
    fn test_no_message_entry_is_missing_text() {
        let body = r#"{"output": [{"type": "web_search_call", "id": "ws_1"}]}"#;
        assert!(matches!(
            message_text(body),
            Err(CompletionError::MissingText)
        ));
    }

    #[test]
    fn test_empty_content_part_is_missing_text() {
        let body = r#"{"output": [{"type": "message", "content": [{}]}]}"#;
        assert!(matches!(
            message_text(body),
            Err(CompletionError::MissingText)
        ));
    }

    #[test]
    fn test_empty_text_is_missing_text() {
        let body = r#"{"output": [{"type": "message", "content": [{"text": ""}]}]}"#;
        assert!(matches!(
            message_text(body),
            Err(CompletionError::MissingText)
        ));
    }

    #[test]
    fn test_first_message_wins() {
        let body = r#"{"output": [
            {"type": "message", "content": [{"text": "first"}]},
            {"type": "message", "content": [{"text": "second"}]}
        ]}"#;
        assert_eq!(message_text(body).unwrap(), "first");
    }

    #[tokio::test]
    async fn test_incompatible_modes_fails_without_network() {
        // Unroutable endpoint: a network attempt would surface as Transport,
        // so an IncompatibleModes result proves the request never left.
        let client =
            ResponsesClient::new("test-key", "gpt-4o-mini").with_base_url("http://127.0.0.1:9");

        let result = client
            .complete(CompletionRequest {
                prompt: "structured please",
                web_search: true,
                format: ResponseFormat::JsonObject,
            })
            .await;

        assert!(matches!(result, Err(CompletionError::IncompatibleModes)));
    }

    #[tokio::test]
    async fn test_transport_error_surfaces() {
        let client = ResponsesClient::new("test-key", "gpt-4o-mini")
            .with_base_url("http://127.0.0.1:9");

        let result = client
            .complete(CompletionRequest {
                prompt: "hello",
                web_search: false,
                format: ResponseFormat::JsonObject,
            })
            .await;

        assert!(matches!(result, Err(CompletionError::Transport(_))));
    }

    #[test]
    fn test_body_preview_truncates() {
        let long = "x".repeat(2_000);
        assert_eq!(body_preview(&long).len(), BODY_PREVIEW_CHARS);
        assert_eq!(body_preview("short"), "short");
    }
}
