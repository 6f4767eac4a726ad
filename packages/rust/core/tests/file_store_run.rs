//! Runs the robot against a real JSON state file.

use scriptforge_core::pipeline::{SilentProgress, robot};
use scriptforge_shared::{
    ContentFetcher, ContentRecord, FetchedContent, KeywordExtractor, KeywordOptions, Result,
    ScriptForgeError, StateStore,
};
use scriptforge_storage::JsonFileStore;

struct Fixed(&'static str);

impl ContentFetcher for Fixed {
    async fn fetch(&self, _search_term: &str) -> Result<FetchedContent> {
        Ok(FetchedContent {
            content: self.0.to_string(),
        })
    }
}

/// Lower-cases the first word of each sentence; fails on sentences containing "boom".
struct FirstWord;

impl KeywordExtractor for FirstWord {
    async fn extract_keywords(&self, text: &str, _options: &KeywordOptions) -> Result<Vec<String>> {
        if text.contains("boom") {
            return Err(ScriptForgeError::Network("HTTP 500".into()));
        }
        Ok(text
            .split_whitespace()
            .next()
            .map(|w| vec![w.to_lowercase()])
            .unwrap_or_default())
    }
}

const TEXT: &str = "== Intro ==\n\nAda Lovelace (1815 to 1852) wrote notes. Babbage designed engines.\n";

#[tokio::test]
async fn run_updates_state_file_and_keeps_foreign_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.json");
    std::fs::write(
        &path,
        r#"{"searchTerm":"Ada Lovelace","prefix":"Who is","maximumSentences":7,"youTubeVideoId":"abc123"}"#,
    )
    .unwrap();

    let store = JsonFileStore::new(path.clone());
    let summary = robot(&store, &Fixed(TEXT), &FirstWord, &SilentProgress)
        .await
        .unwrap();
    assert_eq!(summary.sentences_kept, 2);

    let record = store.load().unwrap();
    assert_eq!(
        record.source_content_sanitized,
        "Ada Lovelace wrote notes. Babbage designed engines."
    );
    assert_eq!(record.sentences[0].keywords, vec!["ada"]);
    assert_eq!(record.sentences[1].keywords, vec!["babbage"]);
    assert!(record.updated_at.is_some());

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["youTubeVideoId"], "abc123");
    assert_eq!(raw["prefix"], "Who is");
    assert_eq!(raw["sentences"][0]["text"], "Ada Lovelace wrote notes.");
}

#[tokio::test]
async fn failed_run_leaves_state_file_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("content.json"));
    store.init(&ContentRecord::new("Explosions", 5), false).unwrap();
    let before = std::fs::read(store.path()).unwrap();

    let err = robot(
        &store,
        &Fixed("Quiet start. Then boom happens."),
        &FirstWord,
        &SilentProgress,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ScriptForgeError::ExternalService { index: 1, .. }));
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}
