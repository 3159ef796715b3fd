//! Bag-of-words feature vectorization

use crate::classifier::FeatureVectorizer;
use crate::vocabulary::VocabularyIndex;
use std::collections::BTreeMap;
use tracing::debug;

/// Sparse token-count vector over the vocabulary's index space.
///
/// Entries are ordered by feature index and every count is non-zero, so
/// iteration (and therefore floating-point summation) order is fixed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseCountVector {
    entries: Vec<(usize, u32)>,
}

impl SparseCountVector {
    /// Build a vector from `(feature, count)` pairs.
    ///
    /// Repeated features are summed, zero counts are dropped.
    pub fn from_counts(counts: impl IntoIterator<Item = (usize, u32)>) -> Self {
        let mut merged: BTreeMap<usize, u32> = BTreeMap::new();
        for (feature, count) in counts {
            *merged.entry(feature).or_default() += count;
        }

        Self {
            entries: merged.into_iter().filter(|(_, count)| *count > 0).collect(),
        }
    }

    /// Non-zero `(feature, count)` entries in feature order
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Count of a single feature
    pub fn get(&self, feature: usize) -> u32 {
        self.entries
            .binary_search_by_key(&feature, |(f, _)| *f)
            .map_or(0, |pos| self.entries[pos].1)
    }

    /// Number of distinct non-zero features
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| u64::from(*count)).sum()
    }

    /// Whether no feature was recognized
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest feature index present
    pub fn max_feature(&self) -> Option<usize> {
        self.entries.last().map(|(feature, _)| *feature)
    }
}

/// Output of a [`FeatureVectorizer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vectorized {
    /// Counts of recognized tokens
    pub vector: SparseCountVector,

    /// Number of recognized tokens, repeats included (equals `vector.total()`)
    pub recognized: usize,

    /// Number of tokens absent from the vocabulary
    pub unknown: usize,
}

/// Whitespace-splitting bag-of-words vectorizer
#[derive(Debug, Clone, Copy, Default)]
pub struct BagOfWordsVectorizer;

impl BagOfWordsVectorizer {
    /// Create a new vectorizer
    pub fn new() -> Self {
        Self
    }
}

impl FeatureVectorizer for BagOfWordsVectorizer {
    fn vectorize(&self, normalized: &str, vocabulary: &VocabularyIndex) -> Vectorized {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        let mut recognized = 0;
        let mut unknown = 0;

        for token in normalized.split_whitespace() {
            match vocabulary.get(token) {
                Some(feature) => {
                    *counts.entry(feature).or_default() += 1;
                    recognized += 1;
                }
                None => unknown += 1,
            }
        }

        if unknown > 0 {
            debug!(unknown, recognized, "Ignoring tokens absent from the vocabulary");
        }

        Vectorized {
            vector: SparseCountVector {
                entries: counts.into_iter().collect(),
            },
            recognized,
            unknown,
        }
    }
}
