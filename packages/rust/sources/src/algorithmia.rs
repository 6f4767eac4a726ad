//! Algorithmia `web/WikipediaParser` fetcher.

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use url::Url;

use scriptforge_shared::{ContentFetcher, FetchedContent, Result, ScriptForgeError};

use crate::{build_client, validate_search_term};

/// Algorithm path, pinned to the version the content format was built against.
const WIKIPEDIA_PARSER_ALGO: &str = "web/WikipediaParser/0.1.2";

/// Runs the WikipediaParser algorithm on the Algorithmia API.
#[derive(Clone)]
pub struct AlgorithmiaFetcher {
    client: Client,
    algo_url: String,
    api_key: String,
}

impl std::fmt::Debug for AlgorithmiaFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmiaFetcher")
            .field("algo_url", &self.algo_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct AlgoResponse {
    #[serde(default)]
    result: Option<ParserResult>,
    #[serde(default)]
    error: Option<AlgoError>,
}

#[derive(Debug, Deserialize)]
struct ParserResult {
    content: String,
}

#[derive(Debug, Deserialize)]
struct AlgoError {
    message: String,
}

impl AlgorithmiaFetcher {
    /// Create a fetcher against the API root (e.g. `https://api.algorithmia.com`).
    pub fn new(api_root: Url, api_key: String, timeout_secs: u64) -> Result<Self> {
        let algo_url = format!(
            "{}/v1/algo/{WIKIPEDIA_PARSER_ALGO}",
            api_root.as_str().trim_end_matches('/')
        );
        Ok(Self {
            client: build_client(timeout_secs)?,
            algo_url,
            api_key,
        })
    }
}

impl ContentFetcher for AlgorithmiaFetcher {
    #[instrument(skip(self), fields(algo = WIKIPEDIA_PARSER_ALGO))]
    async fn fetch(&self, search_term: &str) -> Result<FetchedContent> {
        let term = validate_search_term(search_term)?;
        info!(term, "running WikipediaParser");

        let response = self
            .client
            .post(&self.algo_url)
            .header(AUTHORIZATION, format!("Simple {}", self.api_key))
            .json(&term)
            .send()
            .await
            .map_err(|e| ScriptForgeError::Network(format!("{}: {e}", self.algo_url)))?;

        let status = response.status();
        let body: AlgoResponse = response.json().await.map_err(|e| {
            ScriptForgeError::parse(format!("invalid Algorithmia response (HTTP {status}): {e}"))
        })?;

        if let Some(err) = body.error {
            return Err(ScriptForgeError::Network(format!(
                "Algorithmia error (HTTP {status}): {}",
                err.message
            )));
        }
        if !status.is_success() {
            return Err(ScriptForgeError::Network(format!(
                "{}: HTTP {status}",
                self.algo_url
            )));
        }

        let result = body
            .result
            .ok_or_else(|| ScriptForgeError::parse("Algorithmia response has no result"))?;
        debug!(len = result.content.len(), "parser content received");

        Ok(FetchedContent {
            content: result.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher_for(server: &MockServer) -> AlgorithmiaFetcher {
        let root = Url::parse(&server.uri()).unwrap();
        AlgorithmiaFetcher::new(root, "simXYZ".into(), 5).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_posts_term_with_simple_auth() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/algo/web/WikipediaParser/0.1.2"))
            .and(header("authorization", "Simple simXYZ"))
            .and(body_json(serde_json::json!("Michael Jackson")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {
                    "content": "Michael Jackson was a singer.\n\n== Career ==",
                    "summary": "Singer.",
                    "title": "Michael Jackson"
                },
                "metadata": { "content_type": "json", "duration": 0.5 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let fetched = fetcher_for(&server).fetch("Michael Jackson").await.unwrap();
        assert_eq!(fetched.content, "Michael Jackson was a singer.\n\n== Career ==");
    }

    #[tokio::test]
    async fn test_fetch_algorithm_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/algo/web/WikipediaParser/0.1.2"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "authorization required" }
            })))
            .mount(&server)
            .await;

        let err = fetcher_for(&server).fetch("Rust").await.unwrap_err();
        assert!(err.to_string().contains("authorization required"));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_fetch_non_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = fetcher_for(&server).fetch("Rust").await.unwrap_err();
        assert!(matches!(err, ScriptForgeError::Parse { .. }));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let fetcher = AlgorithmiaFetcher::new(
            Url::parse("https://api.algorithmia.com/").unwrap(),
            "secret-key".into(),
            5,
        )
        .unwrap();
        let debug = format!("{fetcher:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("https://api.algorithmia.com/v1/algo/web/WikipediaParser/0.1.2"));
    }
}
