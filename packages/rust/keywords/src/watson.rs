//! Watson Natural Language Understanding `analyze` client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use scriptforge_shared::{
    KeywordExtractor, KeywordOptions, KeywordsConfig, Result, ScriptForgeError, read_api_key,
};

/// User-Agent string for analyze requests.
const USER_AGENT: &str = concat!("ScriptForge/", env!("CARGO_PKG_VERSION"));

/// Username Watson expects alongside an IAM API key in basic auth.
const APIKEY_USER: &str = "apikey";

/// Calls `POST {url}/v1/analyze?version=...` with basic auth.
#[derive(Clone)]
pub struct WatsonKeywordExtractor {
    client: Client,
    analyze_url: String,
    version: String,
    api_key: String,
}

impl std::fmt::Debug for WatsonKeywordExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatsonKeywordExtractor")
            .field("analyze_url", &self.analyze_url)
            .field("version", &self.version)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    keywords: Vec<Keyword>,
}

#[derive(Debug, Deserialize)]
struct Keyword {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl WatsonKeywordExtractor {
    /// Create an extractor for the service at `url`.
    pub fn new(url: &str, api_key: String, version: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ScriptForgeError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            analyze_url: format!("{}/v1/analyze", url.trim_end_matches('/')),
            version,
            api_key,
        })
    }

    /// Build from `[keywords]` config, reading the key from its env var.
    pub fn from_config(config: &KeywordsConfig) -> Result<Self> {
        let api_key = read_api_key(&config.api_key_env, "Watson NLU")?;
        Self::new(
            config.url.as_str(),
            api_key,
            config.version.clone(),
            config.timeout_secs,
        )
    }
}

/// Build the `features` object: one empty object per requested analysis.
fn features_for(options: &KeywordOptions) -> Result<serde_json::Value> {
    let mut features = serde_json::Map::new();
    let requested = [
        ("keywords", options.keywords),
        ("entities", options.entities),
        ("sentiment", options.sentiment),
        ("categories", options.categories),
    ];
    for (name, enabled) in requested {
        if enabled {
            features.insert(name.to_string(), serde_json::json!({}));
        }
    }

    if features.is_empty() {
        return Err(ScriptForgeError::validation(
            "at least one analysis feature must be requested",
        ));
    }
    Ok(serde_json::Value::Object(features))
}

impl KeywordExtractor for WatsonKeywordExtractor {
    #[instrument(skip_all, fields(text_len = text.len()))]
    async fn extract_keywords(&self, text: &str, options: &KeywordOptions) -> Result<Vec<String>> {
        let body = serde_json::json!({
            "text": text,
            "features": features_for(options)?,
        });

        let response = self
            .client
            .post(&self.analyze_url)
            .query(&[("version", self.version.as_str())])
            .basic_auth(APIKEY_USER, Some(&self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ScriptForgeError::Network(format!("{}: {e}", self.analyze_url)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error)
                .unwrap_or_default();
            return Err(ScriptForgeError::Network(format!(
                "{}: HTTP {status} {detail}",
                self.analyze_url
            )));
        }

        let parsed: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| ScriptForgeError::parse(format!("invalid analyze response: {e}")))?;

        let keywords: Vec<String> = parsed.keywords.into_iter().map(|k| k.text).collect();
        debug!(count = keywords.len(), "keywords extracted");

        Ok(keywords)
    }
}
