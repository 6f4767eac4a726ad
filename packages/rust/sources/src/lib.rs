//! Content fetch clients.
//!
//! A fetcher turns a search term into long-form plain text. Two providers are
//! supported: the MediaWiki Action API (plain-text extracts, the default) and
//! the Algorithmia `web/WikipediaParser` algorithm.
//!
//! Each fetch is a single request; there is no retry or caching here.

mod algorithmia;
mod wikipedia;

use std::time::Duration;

use reqwest::Client;
use tracing::info;

use scriptforge_shared::{
    ContentConfig, ContentFetcher, ContentProvider, FetchedContent, Result, ScriptForgeError,
    read_api_key,
};

pub use algorithmia::AlgorithmiaFetcher;
pub use wikipedia::WikipediaFetcher;

/// Maximum number of redirects followed per request.
const MAX_REDIRECTS: usize = 3;

/// User-Agent string for fetch requests.
const USER_AGENT: &str = concat!("ScriptForge/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Provider selection
// ---------------------------------------------------------------------------

/// The fetcher selected by `[content] provider`.
#[derive(Debug, Clone)]
pub enum ConfiguredFetcher {
    Wikipedia(WikipediaFetcher),
    Algorithmia(AlgorithmiaFetcher),
}

impl ConfiguredFetcher {
    /// Build the configured provider. Algorithmia requires its API key env var.
    pub fn from_config(config: &ContentConfig) -> Result<Self> {
        info!(provider = ?config.provider, "configuring content fetcher");

        match config.provider {
            ContentProvider::Wikipedia => Ok(Self::Wikipedia(WikipediaFetcher::new(
                config.wikipedia_url.clone(),
                config.timeout_secs,
            )?)),
            ContentProvider::Algorithmia => {
                let api_key = read_api_key(&config.api_key_env, "Algorithmia")?;
                Ok(Self::Algorithmia(AlgorithmiaFetcher::new(
                    config.algorithmia_url.clone(),
                    api_key,
                    config.timeout_secs,
                )?))
            }
        }
    }
}

impl ContentFetcher for ConfiguredFetcher {
    async fn fetch(&self, search_term: &str) -> Result<FetchedContent> {
        match self {
            Self::Wikipedia(f) => f.fetch(search_term).await,
            Self::Algorithmia(f) => f.fetch(search_term).await,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a reqwest client with appropriate settings.
fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ScriptForgeError::Network(format!("failed to build HTTP client: {e}")))
}

/// Reject blank search terms before any request is made.
fn validate_search_term(search_term: &str) -> Result<&str> {
    let trimmed = search_term.trim();
    if trimmed.is_empty() {
        return Err(ScriptForgeError::validation("search term is empty"));
    }
    Ok(trimmed)
}
