//! Collaborator traits the pipeline is generic over.
//!
//! Concrete implementations live in `scriptforge-storage`,
//! `scriptforge-sources`, and `scriptforge-keywords`. Tests substitute
//! in-memory doubles.

use std::future::Future;

use serde::Serialize;

use crate::error::Result;
use crate::types::ContentRecord;

/// Persistence for the content record.
pub trait StateStore {
    /// Load the current record.
    fn load(&self) -> Result<ContentRecord>;
    /// Persist the record, replacing whatever was stored before.
    fn save(&self, record: &ContentRecord) -> Result<()>;
}

/// Result of a content fetch. Only `content` feeds sanitization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedContent {
    pub content: String,
}

/// Fetches long-form text about a search term.
pub trait ContentFetcher {
    fn fetch(&self, search_term: &str) -> impl Future<Output = Result<FetchedContent>> + Send;
}

/// Which analyses to request from the keyword service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeywordOptions {
    pub keywords: bool,
    pub entities: bool,
    pub sentiment: bool,
    pub categories: bool,
}

impl KeywordOptions {
    /// Keyword extraction only.
    pub const fn keywords_only() -> Self {
        Self {
            keywords: true,
            entities: false,
            sentiment: false,
            categories: false,
        }
    }
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self::keywords_only()
    }
}

/// Extracts salient terms from a span of text.
///
/// Implementations return keywords in service order, without sorting,
/// deduplication, or case changes.
pub trait KeywordExtractor {
    fn extract_keywords(
        &self,
        text: &str,
        options: &KeywordOptions,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_request_keywords_only() {
        let opts = KeywordOptions::default();
        assert!(opts.keywords);
        assert!(!opts.entities);
        assert!(!opts.sentiment);
        assert!(!opts.categories);
    }
}
