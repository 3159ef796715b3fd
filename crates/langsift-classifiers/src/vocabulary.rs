//! Fitted vocabulary: normalized token to feature index

use crate::artifact::VocabularyArtifact;
use langsift_core::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Immutable mapping from normalized token to a dense feature index in `[0, len)`.
#[derive(Debug, Clone)]
pub struct VocabularyIndex {
    index: HashMap<String, usize>,
}

impl VocabularyIndex {
    /// Build a vocabulary from `(token, index)` pairs.
    ///
    /// Indices must cover `0..len` exactly once each.
    pub fn new(tokens: HashMap<String, usize>) -> Result<Self> {
        let size = tokens.len();
        let mut seen = vec![false; size];

        for (token, &idx) in &tokens {
            if idx >= size {
                return Err(Error::artifact(format!(
                    "Vocabulary index {} for token '{}' is out of range for {} tokens",
                    idx, token, size
                )));
            }
            if std::mem::replace(&mut seen[idx], true) {
                return Err(Error::artifact(format!(
                    "Vocabulary index {} is assigned to more than one token",
                    idx
                )));
            }
        }

        Ok(Self { index: tokens })
    }

    /// Build a vocabulary from a decoded artifact
    pub fn from_artifact(artifact: VocabularyArtifact) -> Result<Self> {
        Self::new(artifact.tokens)
    }

    /// Load a vocabulary artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let vocabulary = Self::from_artifact(VocabularyArtifact::from_file(path)?)?;
        info!("Vocabulary loaded from {:?} ({} tokens)", path, vocabulary.len());
        Ok(vocabulary)
    }

    /// Feature index of a token
    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Whether the token is part of the vocabulary
    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Vocabulary size V
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl FromIterator<&'static str> for VocabularyIndex {
    /// Assign indices in iteration order, skipping repeats
    fn from_iter<I: IntoIterator<Item = &'static str>>(iter: I) -> Self {
        let mut index = HashMap::new();
        for token in iter {
            let next = index.len();
            index.entry(token.to_string()).or_insert(next);
        }
        Self { index }
    }
}
