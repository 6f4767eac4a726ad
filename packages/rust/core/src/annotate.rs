//! Per-sentence keyword annotation.
//!
//! Sentences are annotated strictly one after another: each extraction call
//! is awaited before the next is issued, so calls happen in sentence order
//! and at most one is in flight.

use tracing::{debug, info, instrument, warn};

use scriptforge_shared::{
    KeywordExtractor, KeywordOptions, Result, ScriptForgeError, SentenceRecord,
};

use crate::pipeline::ProgressReporter;

/// Replace each sentence's `keywords` with the extractor's result.
///
/// On the first failure this returns [`ScriptForgeError::ExternalService`]
/// for that sentence. Earlier sentences keep their new keywords, the failed
/// one and all later ones are left as they were, and no further calls are
/// made.
#[instrument(skip_all, fields(sentences = sentences.len()))]
pub async fn annotate<K: KeywordExtractor>(
    sentences: &mut [SentenceRecord],
    extractor: &K,
    progress: &dyn ProgressReporter,
) -> Result<()> {
    let total = sentences.len();
    let options = KeywordOptions::keywords_only();

    for (index, sentence) in sentences.iter_mut().enumerate() {
        progress.task_progress(index + 1, total, &sentence.text);

        let keywords = extractor
            .extract_keywords(&sentence.text, &options)
            .await
            .map_err(|e| {
                warn!(index, error = %e, "keyword extraction failed, aborting annotation");
                ScriptForgeError::external_service(index, e)
            })?;

        debug!(index, count = keywords.len(), "sentence annotated");
        sentence.keywords = keywords;
    }

    info!(sentences = total, "annotation complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SilentProgress;
    use crate::testing::ScriptedExtractor;

    fn sentences(texts: &[&str]) -> Vec<SentenceRecord> {
        texts.iter().map(|t| SentenceRecord::new(*t)).collect()
    }

    #[tokio::test]
    async fn assigns_keywords_in_sentence_order() {
        let extractor =
            ScriptedExtractor::new(vec![Some(vec!["alpha", "beta"]), Some(vec!["gamma"])]);
        let mut list = sentences(&["First sentence.", "Second sentence."]);

        annotate(&mut list, &extractor, &SilentProgress).await.unwrap();

        assert_eq!(list[0].keywords, vec!["alpha", "beta"]);
        assert_eq!(list[1].keywords, vec!["gamma"]);
        assert_eq!(extractor.texts(), vec!["First sentence.", "Second sentence."]);
    }

    #[tokio::test]
    async fn requests_keywords_only() {
        let extractor = ScriptedExtractor::new(vec![Some(vec![])]);
        let mut list = sentences(&["Only one."]);

        annotate(&mut list, &extractor, &SilentProgress).await.unwrap();

        assert_eq!(extractor.options(), vec![KeywordOptions::keywords_only()]);
    }

    #[tokio::test]
    async fn keywords_are_taken_verbatim() {
        let extractor = ScriptedExtractor::new(vec![Some(vec!["Zeta", "alpha", "Zeta"])]);
        let mut list = sentences(&["Zeta alpha Zeta."]);

        annotate(&mut list, &extractor, &SilentProgress).await.unwrap();

        assert_eq!(list[0].keywords, vec!["Zeta", "alpha", "Zeta"]);
    }

    #[tokio::test]
    async fn failure_stops_at_the_failing_sentence() {
        let extractor = ScriptedExtractor::new(vec![Some(vec!["one"]), None, Some(vec!["three"])]);
        let mut list = sentences(&["One.", "Two.", "Three."]);

        let err = annotate(&mut list, &extractor, &SilentProgress)
            .await
            .unwrap_err();

        match err {
            ScriptForgeError::ExternalService { index, source } => {
                assert_eq!(index, 1);
                assert!(source.to_string().contains("429"));
            }
            other => panic!("expected ExternalService, got {other:?}"),
        }
        assert_eq!(list[0].keywords, vec!["one"]);
        assert!(list[1].keywords.is_empty());
        assert!(list[2].keywords.is_empty());
        assert_eq!(extractor.texts(), vec!["One.", "Two."]);
    }

    #[tokio::test]
    async fn failed_sentence_keeps_previous_keywords() {
        let extractor = ScriptedExtractor::new(vec![None]);
        let mut list = vec![SentenceRecord {
            text: "Already tagged.".into(),
            keywords: vec!["old".into()],
            images: vec!["img.png".into()],
        }];

        assert!(annotate(&mut list, &extractor, &SilentProgress).await.is_err());
        assert_eq!(list[0].keywords, vec!["old"]);
        assert_eq!(list[0].images, vec!["img.png"]);
    }

    #[tokio::test]
    async fn empty_input_makes_no_calls() {
        let extractor = ScriptedExtractor::new(vec![]);
        let mut list: Vec<SentenceRecord> = Vec::new();

        annotate(&mut list, &extractor, &SilentProgress).await.unwrap();

        assert!(extractor.texts().is_empty());
    }
}
