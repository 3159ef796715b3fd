//! Pipeline stage traits and common types

use crate::vectorizer::{SparseCountVector, Vectorized};
use crate::vocabulary::VocabularyIndex;
use langsift_core::{ClassLabel, LabelTable};

/// Maps raw text to a canonical, whitespace-separated token stream
pub trait TextNormalizer: Send + Sync {
    /// Normalize the given text. Total over any UTF-8 input.
    fn normalize(&self, text: &str) -> String;
}

/// Turns normalized text into sparse feature counts
pub trait FeatureVectorizer: Send + Sync {
    /// Count the in-vocabulary tokens of `normalized`. Unknown tokens are dropped.
    fn vectorize(&self, normalized: &str, vocabulary: &VocabularyIndex) -> Vectorized;
}

/// Scores sparse feature vectors against a fixed set of classes
pub trait Scorer: Send + Sync {
    /// Score the vector and pick the winning label
    fn score(&self, vector: &SparseCountVector) -> Scores;

    /// Number of classes
    fn class_count(&self) -> usize;

    /// Label-to-language table of the deployed model
    fn labels(&self) -> &LabelTable;
}

/// Output of a [`Scorer`]
#[derive(Debug, Clone, PartialEq)]
pub struct Scores {
    /// Winning label (argmax, ties go to the lowest label)
    pub label: ClassLabel,

    /// Per-class scores, indexed by label
    pub values: Vec<f64>,
}

impl Scores {
    /// Build scores from per-class values, choosing the argmax.
    ///
    /// Ties resolve to the lowest label index. Returns `None` for an empty slice.
    pub fn from_values(values: Vec<f64>) -> Option<Self> {
        let mut best: Option<(ClassLabel, f64)> = None;
        for (label, &value) in values.iter().enumerate() {
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((label, value)),
            }
        }

        best.map(|(label, _)| Self { label, values })
    }
}
