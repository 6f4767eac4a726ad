//! In-memory collaborators for pipeline tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use scriptforge_shared::{
    ContentFetcher, ContentRecord, FetchedContent, KeywordExtractor, KeywordOptions, Result,
    ScriptForgeError, StateStore,
};

/// Store holding one record in memory and counting saves.
pub(crate) struct MemoryStore {
    record: Mutex<ContentRecord>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub(crate) fn new(record: ContentRecord) -> Self {
        Self {
            record: Mutex::new(record),
            saves: Mutex::new(0),
        }
    }

    pub(crate) fn saves(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub(crate) fn record(&self) -> ContentRecord {
        self.record.lock().unwrap().clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<ContentRecord> {
        Ok(self.record.lock().unwrap().clone())
    }

    fn save(&self, record: &ContentRecord) -> Result<()> {
        *self.record.lock().unwrap() = record.clone();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

/// Fetcher returning fixed content, or failing when `content` is `None`.
pub(crate) struct StaticFetcher {
    content: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub(crate) fn returning(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            content: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ContentFetcher for StaticFetcher {
    async fn fetch(&self, search_term: &str) -> Result<FetchedContent> {
        self.calls.lock().unwrap().push(search_term.to_string());
        match &self.content {
            Some(content) => Ok(FetchedContent {
                content: content.clone(),
            }),
            None => Err(ScriptForgeError::Network("HTTP 503 Service Unavailable".into())),
        }
    }
}

/// Extractor replaying one scripted response per call, in order.
///
/// `None` entries fail that call. Once the script runs out every call fails.
pub(crate) struct ScriptedExtractor {
    responses: Mutex<VecDeque<Option<Vec<String>>>>,
    calls: Mutex<Vec<(String, KeywordOptions)>>,
}

impl ScriptedExtractor {
    pub(crate) fn new(responses: Vec<Option<Vec<&str>>>) -> Self {
        let responses = responses
            .into_iter()
            .map(|r| r.map(|words| words.into_iter().map(String::from).collect()))
            .collect();
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn texts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }

    pub(crate) fn options(&self) -> Vec<KeywordOptions> {
        self.calls.lock().unwrap().iter().map(|(_, o)| *o).collect()
    }
}

impl KeywordExtractor for ScriptedExtractor {
    async fn extract_keywords(&self, text: &str, options: &KeywordOptions) -> Result<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), *options));
        match self.responses.lock().unwrap().pop_front().flatten() {
            Some(keywords) => Ok(keywords),
            None => Err(ScriptForgeError::Network("HTTP 429 Too Many Requests".into())),
        }
    }
}
