//! End-to-end text robot: load → fetch → sanitize → segment → truncate →
//! annotate → save.

use std::time::{Duration, Instant};

use tracing::{info, instrument};

use scriptforge_shared::{
    ContentFetcher, ContentRecord, KeywordExtractor, Result, RunId, ScriptForgeError, StateStore,
};

use crate::annotate::annotate;

/// What a successful run did, for reporting. The saved record is the real output.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Identifier logged with this run's events.
    pub run_id: RunId,
    /// Search term the content was fetched for.
    pub search_term: String,
    /// Length in bytes of the fetched text.
    pub original_len: usize,
    /// Length in bytes of the sanitized text.
    pub sanitized_len: usize,
    /// Sentences found before truncation.
    pub sentences_found: usize,
    /// Sentences kept (and annotated).
    pub sentences_kept: usize,
    /// Keywords attached across all kept sentences.
    pub keyword_count: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before each keyword extraction call.
    fn task_progress(&self, current: usize, total: usize, detail: &str);
    /// Called after the record has been saved.
    fn done(&self, summary: &RunSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn task_progress(&self, _current: usize, _total: usize, _detail: &str) {}
    fn done(&self, _summary: &RunSummary) {}
}

/// Run the text robot against the record held by `store`.
///
/// The record is loaded once, mutated by [`run_stages`], and saved once.
/// If any stage fails the error is returned and `save` is never called, so
/// the previously stored state stays as it was.
pub async fn robot<S, F, K>(
    store: &S,
    fetcher: &F,
    extractor: &K,
    progress: &dyn ProgressReporter,
) -> Result<RunSummary>
where
    S: StateStore,
    F: ContentFetcher,
    K: KeywordExtractor,
{
    progress.phase("Loading content");
    let mut record = store.load()?;

    let summary = run_stages(&mut record, fetcher, extractor, progress).await?;

    progress.phase("Saving content");
    store.save(&record)?;
    progress.done(&summary);

    Ok(summary)
}

/// Run every stage over `record` in fixed order, without loading or saving.
///
/// Fails fast. On error the record holds whatever the stages before the
/// failure wrote (and any keywords already attached).
#[instrument(skip_all, fields(search_term = %record.search_term))]
pub async fn run_stages<F, K>(
    record: &mut ContentRecord,
    fetcher: &F,
    extractor: &K,
    progress: &dyn ProgressReporter,
) -> Result<RunSummary>
where
    F: ContentFetcher,
    K: KeywordExtractor,
{
    let start = Instant::now();
    let run_id = RunId::new();

    info!(%run_id, max = record.maximum_sentences, "starting text robot");

    progress.phase("Fetching content");
    fetch_content(record, fetcher).await?;

    progress.phase("Sanitizing content");
    sanitize_content(record);

    progress.phase("Breaking content into sentences");
    let sentences_found = break_into_sentences(record);

    progress.phase("Limiting sentences");
    limit_maximum_sentences(record);

    progress.phase("Fetching keywords");
    annotate(&mut record.sentences, extractor, progress).await?;

    let summary = RunSummary {
        run_id,
        search_term: record.search_term.clone(),
        original_len: record.source_content_original.len(),
        sanitized_len: record.source_content_sanitized.len(),
        sentences_found,
        sentences_kept: record.sentences.len(),
        keyword_count: record.sentences.iter().map(|s| s.keywords.len()).sum(),
        elapsed: start.elapsed(),
    };

    info!(
        sentences_found = summary.sentences_found,
        sentences_kept = summary.sentences_kept,
        keywords = summary.keyword_count,
        elapsed_ms = summary.elapsed.as_millis(),
        "text robot complete"
    );

    Ok(summary)
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Reads `search_term`, writes `source_content_original`.
async fn fetch_content<F: ContentFetcher>(record: &mut ContentRecord, fetcher: &F) -> Result<()> {
    let fetched = fetcher
        .fetch(&record.search_term)
        .await
        .map_err(|e| ScriptForgeError::fetch(record.search_term.clone(), e))?;

    info!(len = fetched.content.len(), "content fetched");
    record.source_content_original = fetched.content;
    Ok(())
}

/// Reads `source_content_original`, writes `source_content_sanitized`.
fn sanitize_content(record: &mut ContentRecord) {
    record.source_content_sanitized = scriptforge_text::sanitize(&record.source_content_original);
}

/// Reads `source_content_sanitized`, writes `sentences`. Returns the count.
fn break_into_sentences(record: &mut ContentRecord) -> usize {
    record.sentences = scriptforge_text::sentences_from(&record.source_content_sanitized);
    record.sentences.len()
}

/// Reads `maximum_sentences`, drops the tail of `sentences`.
fn limit_maximum_sentences(record: &mut ContentRecord) {
    let sentences = std::mem::take(&mut record.sentences);
    record.sentences = scriptforge_text::truncate(sentences, record.maximum_sentences);
}
