//! Prediction pipeline: normalize, vectorize, score, name the label

use crate::classifier::{FeatureVectorizer, Scorer, TextNormalizer};
use crate::naive_bayes::NaiveBayesModel;
use crate::normalizer::UnicodeNormalizer;
use crate::registry::ModelRegistry;
use crate::vectorizer::BagOfWordsVectorizer;
use crate::vocabulary::VocabularyIndex;
use langsift_core::{Error, PredictionResult, Result};
use langsift_telemetry::MetricsCollector;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Language prediction over shared, read-only model components.
///
/// Cloning is cheap; clones share the vocabulary, scorer, and metrics.
pub struct PredictionPipeline<N = UnicodeNormalizer, V = BagOfWordsVectorizer, S = NaiveBayesModel> {
    normalizer: Arc<N>,
    vectorizer: V,
    vocabulary: Arc<VocabularyIndex>,
    scorer: Arc<S>,
    metrics: Option<MetricsCollector>,
}

impl PredictionPipeline {
    /// Build the default pipeline over the registry's model, loading it if needed
    pub fn from_registry(registry: &ModelRegistry) -> Result<Self> {
        let model = registry.get()?;

        Ok(Self::new(
            UnicodeNormalizer::new()?,
            BagOfWordsVectorizer::new(),
            Arc::clone(model.vocabulary()),
            Arc::clone(model.classifier()),
        ))
    }
}

impl<N, V, S> PredictionPipeline<N, V, S>
where
    N: TextNormalizer,
    V: FeatureVectorizer,
    S: Scorer,
{
    /// Assemble a pipeline from its stages
    pub fn new(normalizer: N, vectorizer: V, vocabulary: Arc<VocabularyIndex>, scorer: Arc<S>) -> Self {
        Self {
            normalizer: Arc::new(normalizer),
            vectorizer,
            vocabulary,
            scorer,
            metrics: None,
        }
    }

    /// Record predictions into a metrics collector
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Predict the language of `raw_text`.
    ///
    /// Rejects empty or whitespace-only input with [`Error::EmptyInput`]
    /// before any normalization happens.
    pub fn predict(&self, raw_text: &str) -> Result<PredictionResult> {
        if raw_text.trim().is_empty() {
            if let Some(metrics) = &self.metrics {
                metrics.record_rejected();
            }
            return Err(Error::EmptyInput);
        }

        let start = Instant::now();

        let normalized = self.normalizer.normalize(raw_text);
        let vectorized = self.vectorizer.vectorize(&normalized, &self.vocabulary);
        info!(
            "{} unique words are embedded to predict the language",
            vectorized.vector.nnz()
        );

        let scores = self.scorer.score(&vectorized.vector);
        let language = self
            .scorer
            .labels()
            .name(scores.label)
            .unwrap_or("Unknown")
            .to_string();

        let latency_us = saturating_micros(start.elapsed());
        debug!(
            label = scores.label,
            language = %language,
            recognized = vectorized.recognized,
            unknown = vectorized.unknown,
            latency_us,
            "Prediction complete"
        );

        if let Some(metrics) = &self.metrics {
            metrics.record_prediction(
                vectorized.recognized as u64,
                vectorized.unknown as u64,
                latency_us,
            );
        }

        Ok(PredictionResult {
            label: scores.label,
            language,
            scores: scores.values,
            recognized_tokens: vectorized.recognized,
            distinct_features: vectorized.vector.nnz(),
            unknown_tokens: vectorized.unknown,
        })
    }

    /// Normalization stage on its own
    pub fn normalize(&self, raw_text: &str) -> String {
        self.normalizer.normalize(raw_text)
    }

    /// Shared vocabulary
    pub fn vocabulary(&self) -> &Arc<VocabularyIndex> {
        &self.vocabulary
    }

    /// Shared scorer
    pub fn scorer(&self) -> &Arc<S> {
        &self.scorer
    }
}

fn saturating_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

impl<N, V: Clone, S> Clone for PredictionPipeline<N, V, S> {
    fn clone(&self) -> Self {
        Self {
            normalizer: Arc::clone(&self.normalizer),
            vectorizer: self.vectorizer.clone(),
            vocabulary: Arc::clone(&self.vocabulary),
            scorer: Arc::clone(&self.scorer),
            metrics: self.metrics.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ClassifierArtifact;
    use langsift_core::LabelTable;

    fn pipeline() -> PredictionPipeline {
        let vocabulary: VocabularyIndex = ["hello", "how", "ciao", "come"].into_iter().collect();
        let artifact = ClassifierArtifact::new(
            vec![(0.5f64).ln(), (0.5f64).ln()],
            vec![
                vec![(0.4f64).ln(), (0.4f64).ln(), (0.1f64).ln(), (0.1f64).ln()],
                vec![(0.1f64).ln(), (0.1f64).ln(), (0.4f64).ln(), (0.4f64).ln()],
            ],
            LabelTable::default(),
        );
        let classifier = NaiveBayesModel::from_artifact(artifact, &vocabulary).unwrap();

        PredictionPipeline::new(
            UnicodeNormalizer::new().unwrap(),
            BagOfWordsVectorizer::new(),
            Arc::new(vocabulary),
            Arc::new(classifier),
        )
    }

    #[test]
    fn test_predict_languages() {
        let pipeline = pipeline();

        let result = pipeline.predict("Ciao, come va?").unwrap();
        assert_eq!(result.label, 1);
        assert_eq!(result.language, "Italian");
        assert_eq!(result.recognized_tokens, 2);
        assert_eq!(result.unknown_tokens, 1);

        let result = pipeline.predict("Hello, how are you?").unwrap();
        assert_eq!(result.label, 0);
        assert_eq!(result.language, "English");
    }

    #[test]
    fn test_empty_input_rejected() {
        let metrics = MetricsCollector::new();
        let pipeline = pipeline().with_metrics(metrics.clone());

        assert!(matches!(pipeline.predict(""), Err(Error::EmptyInput)));
        assert!(matches!(pipeline.predict(" \n\t "), Err(Error::EmptyInput)));
        assert_eq!(metrics.snapshot().rejected, 2);
        assert_eq!(metrics.snapshot().predictions, 0);
    }

    #[test]
    fn test_input_empty_after_normalization_is_scored() {
        // passes the trim check, so it is scored on priors alone
        let result = pipeline().predict("123 !!!").unwrap();
        assert_eq!(result.recognized_tokens, 0);
        assert_eq!(result.label, 0);
    }

    #[test]
    fn test_latency_saturates() {
        assert_eq!(saturating_micros(Duration::from_micros(1500)), 1500);
        assert_eq!(saturating_micros(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_metrics_do_not_change_result() {
        let plain = pipeline();
        let metered = pipeline().with_metrics(MetricsCollector::new());

        assert_eq!(
            plain.predict("ciao hello ciao").unwrap(),
            metered.predict("ciao hello ciao").unwrap()
        );
    }
}
