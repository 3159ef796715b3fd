//! Core types for langsift

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Integer class label produced by the classifier, in `[0, class_count)`
pub type ClassLabel = usize;

/// Label of the English class in the deployed model
pub const ENGLISH_LABEL: ClassLabel = 0;

/// Label of the Italian class in the deployed model
pub const ITALIAN_LABEL: ClassLabel = 1;

/// Fixed mapping from class label to language name.
///
/// The table is a constant of the deployed model version; it is read from the
/// classifier artifact and never computed at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTable(BTreeMap<ClassLabel, String>);

impl LabelTable {
    /// Create a label table from `(label, name)` pairs
    pub fn new(entries: impl IntoIterator<Item = (ClassLabel, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Get the language name for a label
    pub fn name(&self, label: ClassLabel) -> Option<&str> {
        self.0.get(&label).map(String::as_str)
    }

    /// Check that every label in `[0, class_count)` has a name
    pub fn covers(&self, class_count: usize) -> bool {
        (0..class_count).all(|label| self.0.contains_key(&label))
    }

    /// Number of named labels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(label, name)` pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (ClassLabel, &str)> {
        self.0.iter().map(|(label, name)| (*label, name.as_str()))
    }
}

impl Default for LabelTable {
    /// `{0: "English", 1: "Italian"}`
    fn default() -> Self {
        Self::new([
            (ENGLISH_LABEL, "English".to_string()),
            (ITALIAN_LABEL, "Italian".to_string()),
        ])
    }
}

/// Result of a single prediction
///
/// Serializes to the host-facing shape `{"prediction": 1, "language": "Italian"}`;
/// the diagnostic fields are kept out of the wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Predicted class label
    #[serde(rename = "prediction")]
    pub label: ClassLabel,

    /// Language name resolved through the label table
    pub language: String,

    /// Per-class log-space scores
    #[serde(skip)]
    pub scores: Vec<f64>,

    /// Number of in-vocabulary tokens (with repeats)
    #[serde(skip)]
    pub recognized_tokens: usize,

    /// Number of distinct in-vocabulary tokens
    #[serde(skip)]
    pub distinct_features: usize,

    /// Number of tokens absent from the vocabulary
    #[serde(skip)]
    pub unknown_tokens: usize,
}
