use std::fmt;
use std::sync::Arc;

use nb_core::{GenerativeModel, Result, SummaryResult};

use crate::metadata::ArticleMetadata;
use crate::normalize::{normalize_reply, Normalized};
use crate::prompt::build_prompt;
use crate::validate::validate_article;

/// Runs one article through validation, metadata extraction, a single model
/// call and reply normalization. Holds no per-request state.
#[derive(Clone)]
pub struct SummaryPipeline {
    model: Arc<dyn GenerativeModel>,
}

impl fmt::Debug for SummaryPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryPipeline")
            .field("model", &self.model.name())
            .finish()
    }
}

impl SummaryPipeline {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub async fn summarize(&self, text: &str) -> Result<SummaryResult> {
        self.run(text).await.map(Normalized::into_summary)
    }

    /// Like [`summarize`](Self::summarize) but reports whether the model
    /// reply had to be repaired or replaced.
    pub async fn run(&self, text: &str) -> Result<Normalized> {
        let article = match validate_article(text) {
            Ok(article) => article,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected article");
                return Err(e);
            }
        };

        let metadata = ArticleMetadata::extract(article);
        let prompt = build_prompt(article);

        let raw = match self.model.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(
                    kind = e.kind().as_str(),
                    model = self.model.name(),
                    error = %e,
                    "Model invocation failed"
                );
                return Err(e);
            }
        };

        let normalized = normalize_reply(&raw, &metadata);
        match &normalized {
            Normalized::Fallback(_) => {
                tracing::warn!(model = self.model.name(), "Model reply unusable, returned fallback summary");
            }
            Normalized::Parsed { repaired, .. } if !repaired.is_empty() => {
                tracing::warn!(model = self.model.name(), fields = ?repaired, "Repaired model reply");
            }
            Normalized::Parsed { .. } => {
                tracing::info!(
                    model = self.model.name(),
                    words = metadata.word_count,
                    "Summarized article"
                );
            }
        }
        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DummyModel;
    use crate::normalize::PARSE_FAILURE_POINTS;
    use async_trait::async_trait;
    use nb_core::{ConfigError, Error, Sentiment, ValidationError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    enum Reply {
        Text(String),
        Status(u16),
        MissingKey,
        Empty,
    }

    #[derive(Debug)]
    struct StubModel {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl StubModel {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerativeModel for StubModel {
        fn name(&self) -> &str {
            "Stub"
        }

        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Text(text) => Ok(text.clone()),
                Reply::Status(status) => Err(Error::Transport {
                    status: *status,
                    body: "upstream failure".to_string(),
                }),
                Reply::MissingKey => Err(ConfigError::MissingCredential.into()),
                Reply::Empty => Err(Error::EmptyGeneration),
            }
        }
    }

    const ARTICLE: &str = "City Council Approves Budget\nThe council voted seven to two on Monday to approve next year's budget, which adds funding for parks and transit.";

    const GOOD_REPLY: &str = r#"{
        "title": "Council passes budget",
        "summaryPoints": ["The council approved the budget.", "Parks get more money.", "Transit gets more money."],
        "sentiment": "positive",
        "keywords": ["budget", "council", "parks", "transit", "vote"]
    }"#;

    #[tokio::test]
    async fn test_summarize_merges_metadata() {
        let model = StubModel::new(Reply::Text(GOOD_REPLY.to_string()));
        let pipeline = SummaryPipeline::new(model.clone());

        let summary = pipeline.summarize(ARTICLE).await.unwrap();
        assert_eq!(summary.title, "Council passes budget");
        assert_eq!(summary.summary_points.len(), 3);
        assert_eq!(summary.sentiment, Sentiment::Positive);
        assert_eq!(summary.word_count, 24);
        assert_eq!(summary.reading_time_minutes, 1);
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_validation_failure_skips_model() {
        let model = StubModel::new(Reply::Text(GOOD_REPLY.to_string()));
        let pipeline = SummaryPipeline::new(model.clone());

        let err = pipeline.summarize("   ").await.unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyInput)));

        let err = pipeline.summarize("Too short to summarize.").await.unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::TooShort)));

        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_model_errors_propagate_without_partial_result() {
        for reply in [Reply::Status(500), Reply::MissingKey, Reply::Empty] {
            let model = StubModel::new(reply);
            let pipeline = SummaryPipeline::new(model.clone());
            let err = pipeline.summarize(ARTICLE).await.unwrap_err();
            assert_eq!(err.status_code(), 500);
            assert_eq!(model.calls(), 1);
        }
    }

    #[tokio::test]
    async fn test_unparseable_reply_uses_fallback() {
        let model = StubModel::new(Reply::Text("I think this article is about a budget.".to_string()));
        let pipeline = SummaryPipeline::new(model);

        let normalized = pipeline.run(ARTICLE).await.unwrap();
        assert!(normalized.is_fallback());
        let summary = normalized.into_summary();
        assert_eq!(summary.title, "City Council Approves Budget");
        assert_eq!(summary.summary_points, PARSE_FAILURE_POINTS);
        assert_eq!(summary.word_count, 24);
    }

    #[tokio::test]
    async fn test_pipeline_is_idempotent() {
        let model = StubModel::new(Reply::Text(GOOD_REPLY.to_string()));
        let pipeline = SummaryPipeline::new(model.clone());

        let first = pipeline.summarize(ARTICLE).await.unwrap();
        let second = pipeline.summarize(ARTICLE).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(model.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_independent() {
        let pipeline = SummaryPipeline::new(Arc::new(DummyModel::new()));
        let other = format!("{}\nA second, unrelated paragraph about harbor dredging plans.", ARTICLE);

        let (a, b) = tokio::join!(pipeline.summarize(ARTICLE), pipeline.summarize(&other));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.word_count, 24);
        assert_eq!(b.word_count, 32);
        assert_eq!(a.title, b.title);
    }
}
