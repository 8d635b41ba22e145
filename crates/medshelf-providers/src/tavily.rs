//! Tavily web-search client.
//!
//! Implements [`SearchProvider`] over the Tavily REST API so the reconciler
//! can score real pharmacy listings. One POST per query, no retries here.

use serde::{Deserialize, Serialize};

use medshelf_core::reconcile::{SearchError, SearchHit, SearchProvider};

/// Default Tavily API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the Tavily search API.
pub struct TavilyClient {
    api_key: String,
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl TavilyClient {
    /// Create a client against the public Tavily endpoint.
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a client against an explicit endpoint (tests point this at a
    /// local stub).
    pub fn with_base_url(api_key: &str, base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }
}

/// Request body for POST /search.
#[derive(Serialize)]
struct TavilySearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a str>,
}

/// Response body from POST /search. Fields we do not read are ignored.
#[derive(Deserialize)]
struct TavilySearchResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

/// One raw result. `url`/`title` are optional so a malformed entry drops
/// out instead of failing the whole response.
#[derive(Deserialize)]
struct TavilyResult {
    url: Option<String>,
    title: Option<String>,
}

/// Parse a Tavily response body into hits, skipping entries without both a
/// url and a title.
pub fn parse_search_response(json: &str) -> Result<Vec<SearchHit>, SearchError> {
    let parsed: TavilySearchResponse =
        serde_json::from_str(json).map_err(|e| SearchError::Parse(e.to_string()))?;

    Ok(parsed
        .results
        .into_iter()
        .filter_map(|r| match (r.url, r.title) {
            (Some(url), Some(title)) => Some(SearchHit { url, title }),
            _ => None,
        })
        .collect())
}

impl SearchProvider for TavilyClient {
    fn search(
        &self,
        query: &str,
        max_results: u32,
        region: Option<&str>,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let url = format!("{}/search", self.base_url);
        let body = TavilySearchRequest {
            api_key: &self.api_key,
            query,
            max_results,
            country: region,
        };

        tracing::debug!(query, max_results, "querying Tavily");

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                SearchError::Connect(self.base_url.clone())
            } else if e.is_timeout() {
                SearchError::Timeout(format!("after {}s", self.timeout_secs))
            } else {
                SearchError::Connect(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .map_err(|e| SearchError::Parse(e.to_string()))?;
        parse_search_response(&text)
    }
}
