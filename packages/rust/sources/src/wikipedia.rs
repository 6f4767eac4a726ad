//! MediaWiki Action API fetcher.
//!
//! Requests the plain-text extract of the page matching the search term.
//! Section headings come back as `== Heading ==` lines, which sanitization
//! drops.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use url::Url;

use scriptforge_shared::{ContentFetcher, FetchedContent, Result, ScriptForgeError};

use crate::{build_client, validate_search_term};

/// Fetches page extracts from a MediaWiki `api.php` endpoint.
#[derive(Debug, Clone)]
pub struct WikipediaFetcher {
    client: Client,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

impl WikipediaFetcher {
    /// Create a fetcher for the given `api.php` endpoint.
    pub fn new(endpoint: Url, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            endpoint,
        })
    }
}

impl ContentFetcher for WikipediaFetcher {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch(&self, search_term: &str) -> Result<FetchedContent> {
        let title = validate_search_term(search_term)?;
        info!(title, "fetching Wikipedia extract");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", title),
            ])
            .send()
            .await
            .map_err(|e| ScriptForgeError::Network(format!("{}: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScriptForgeError::Network(format!(
                "{}: HTTP {status}",
                self.endpoint
            )));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| ScriptForgeError::parse(format!("invalid MediaWiki response: {e}")))?;

        if let Some(err) = body.error {
            return Err(ScriptForgeError::Network(format!(
                "MediaWiki API error {}: {}",
                err.code, err.info
            )));
        }

        let page = body
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| ScriptForgeError::parse("MediaWiki response has no pages"))?;

        if page.missing || page.invalid {
            return Err(ScriptForgeError::validation(format!(
                "no Wikipedia page found for {:?}",
                page.title
            )));
        }

        let content = page.extract.unwrap_or_default();
        debug!(page = %page.title, len = content.len(), "extract received");

        Ok(FetchedContent { content })
    }
}
