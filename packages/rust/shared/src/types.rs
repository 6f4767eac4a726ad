//! Core domain types for ScriptForge content records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying one pipeline run (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SentenceRecord
// ---------------------------------------------------------------------------

/// One sentence of the prepared content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    /// Sentence text as produced by segmentation.
    pub text: String,
    /// Keyword terms in the order the extraction service returned them.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Filled by a later image stage; never touched here.
    #[serde(default)]
    pub images: Vec<String>,
}

impl SentenceRecord {
    /// A fresh sentence with no keywords and no images.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keywords: Vec::new(),
            images: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// ContentRecord
// ---------------------------------------------------------------------------

/// The persisted unit of work (`content.json`).
///
/// Field names are camelCase on disk. Top-level fields this crate does not
/// know about are kept in [`ContentRecord::extra`] and written back unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Topic used for the upstream content fetch.
    #[serde(default)]
    pub search_term: String,
    /// Title prefix chosen with the search term ("Who is", "What is", ...).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    /// Raw text returned by the content fetch.
    #[serde(default)]
    pub source_content_original: String,
    /// Single-line prose produced by sanitization.
    #[serde(default)]
    pub source_content_sanitized: String,
    /// Sentences in order of appearance.
    #[serde(default)]
    pub sentences: Vec<SentenceRecord>,
    /// Upper bound on `sentences` after truncation; `<= 0` keeps none.
    #[serde(default)]
    pub maximum_sentences: i64,
    /// When the record was last saved by a store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Fields owned by other stages, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ContentRecord {
    /// A fresh record ready for a pipeline run.
    pub fn new(search_term: impl Into<String>, maximum_sentences: i64) -> Self {
        Self {
            search_term: search_term.into(),
            maximum_sentences,
            ..Default::default()
        }
    }

    /// Number of sentences that have received keywords.
    pub fn annotated_count(&self) -> usize {
        self.sentences
            .iter()
            .filter(|s| !s.keywords.is_empty())
            .count()
    }
}
