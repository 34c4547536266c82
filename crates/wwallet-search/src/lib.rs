//! Warranty Wallet Web Search Layer
//!
//! Brave-style web-search client used as an alternative grounding source
//! for policy lookups: the orchestrator turns the hits into a prose summary
//! and structures it with a strict-JSON completion, exactly as it would a
//! web-search-grounded completion.
//!
//! Zero hits is a terminal [`SearchError::NoResults`]; a successful call
//! always carries at least one hit.

#![warn(missing_docs)]

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use wwallet_domain::traits::{SearchHit, WebSearch};

/// Default search API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

/// Default country code sent with every query.
pub const DEFAULT_COUNTRY: &str = "AU";

/// Default timeout for search requests (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Results requested per query.
const RESULT_COUNT: &str = "10";

/// Errors that can occur during a web search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status; carries a preview of the response body.
    #[error("search API request failed: {0}")]
    HttpFailure(String),

    /// The response body did not match the expected shape.
    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The query completed but yielded zero results.
    #[error("no search results found")]
    NoResults,
}

/// Client for a Brave-style web-search API.
pub struct BraveSearchClient {
    api_key: String,
    endpoint: String,
    country: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    web: Option<WebResults>,
}

#[derive(Debug, Deserialize)]
struct WebResults {
    results: Option<Vec<WebResult>>,
}

#[derive(Debug, Deserialize)]
struct WebResult {
    title: String,
    url: String,
    description: String,
}

impl BraveSearchClient {
    /// Create a client for the default endpoint and country.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            client,
        }
    }

    /// Override the country code sent with queries.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Override the API endpoint (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn perform(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        debug!(query, "sending web search");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("count", RESULT_COUNT),
                ("search_lang", "en"),
                ("country", &self.country),
                ("result_filter", "web"),
            ])
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SearchError::HttpFailure(body_preview(&body)));
        }

        let decoded: SearchResponse = serde_json::from_str(&body)?;
        let results = decoded.web.and_then(|w| w.results).unwrap_or_default();

        if results.is_empty() {
            return Err(SearchError::NoResults);
        }

        Ok(results
            .into_iter()
            .map(|r| SearchHit {
                title: r.title,
                url: r.url,
                snippet: r.description,
            })
            .collect())
    }
}

#[async_trait]
impl WebSearch for BraveSearchClient {
    type Error = SearchError;

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.perform(query).await
    }
}

fn body_preview(body: &str) -> String {
    body.chars().take(512).collect()
}

/// Mock search engine for deterministic testing.
#[derive(Debug, Clone, Default)]
pub struct MockSearch {
    hits: Vec<SearchHit>,
}

impl MockSearch {
    /// Engine that yields the given hits for every query.
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self { hits }
    }

    /// Engine that yields zero hits, so every query fails with
    /// [`SearchError::NoResults`].
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WebSearch for MockSearch {
    type Error = SearchError;

    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, SearchError> {
        if self.hits.is_empty() {
            return Err(SearchError::NoResults);
        }
        Ok(self.hits.clone())
    }
}
