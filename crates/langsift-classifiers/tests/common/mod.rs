//! Shared fixtures for integration tests
//!
//! `tests/fixtures/` holds a small English/Italian model fit offline; its
//! vocabulary and classifier artifacts are a matched pair.

#![allow(dead_code)]

use langsift_classifiers::classifier::{Scorer, Scores};
use langsift_classifiers::{
    ArtifactPaths, BagOfWordsVectorizer, ModelRegistry, ModelVariant, PredictionPipeline,
    SparseCountVector, UnicodeNormalizer, VocabularyIndex,
};
use langsift_core::LabelTable;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Directory of the fixture artifacts
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Paths of the fixture model
pub fn fixture_paths() -> ArtifactPaths {
    let dir = fixtures_dir();
    ArtifactPaths::new(
        ModelVariant::Full,
        dir.join("vocabulary_bow.json"),
        dir.join("nb_bow.json"),
    )
}

/// Default pipeline over the fixture model
pub fn fixture_pipeline() -> PredictionPipeline {
    let registry = ModelRegistry::new(fixture_paths());
    PredictionPipeline::from_registry(&registry).expect("fixture model loads")
}

/// Scorer with fixed per-class weights, independent of any artifact.
///
/// Each class score is its bias plus the summed counts of the features
/// listed for that class.
pub struct StubScorer {
    biases: Vec<f64>,
    features: Vec<Vec<usize>>,
    labels: LabelTable,
    calls: AtomicU32,
}

impl StubScorer {
    pub fn new(biases: Vec<f64>, features: Vec<Vec<usize>>) -> Self {
        Self {
            biases,
            features,
            labels: LabelTable::default(),
            calls: AtomicU32::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Scorer for StubScorer {
    fn score(&self, vector: &SparseCountVector) -> Scores {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let values = self
            .biases
            .iter()
            .zip(&self.features)
            .map(|(bias, features)| {
                bias + features
                    .iter()
                    .map(|f| f64::from(vector.get(*f)))
                    .sum::<f64>()
            })
            .collect();

        Scores::from_values(values).expect("stub has classes")
    }

    fn class_count(&self) -> usize {
        self.biases.len()
    }

    fn labels(&self) -> &LabelTable {
        &self.labels
    }
}

/// Pipeline over a tiny vocabulary and a [`StubScorer`]
pub fn stub_pipeline(
    vocabulary: VocabularyIndex,
    scorer: StubScorer,
) -> (PredictionPipeline<UnicodeNormalizer, BagOfWordsVectorizer, StubScorer>, Arc<StubScorer>) {
    let scorer = Arc::new(scorer);
    let pipeline = PredictionPipeline::new(
        UnicodeNormalizer::new().expect("normalizer"),
        BagOfWordsVectorizer::new(),
        Arc::new(vocabulary),
        Arc::clone(&scorer),
    );
    (pipeline, scorer)
}
