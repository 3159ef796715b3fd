//! Multinomial Naive Bayes scoring

use crate::artifact::ClassifierArtifact;
use crate::classifier::{Scorer, Scores};
use crate::vectorizer::SparseCountVector;
use crate::vocabulary::VocabularyIndex;
use langsift_core::{Error, LabelTable, Result};
use std::path::Path;
use tracing::info;

/// Fitted multinomial Naive Bayes parameters.
///
/// `score[c] = log_prior[c] + Σ count[f] · log_likelihood[c][f]` over the
/// non-zero features of the input only; absent features contribute nothing.
#[derive(Debug, Clone)]
pub struct NaiveBayesModel {
    log_priors: Vec<f64>,
    /// Row-major C×V matrix
    log_likelihoods: Vec<f64>,
    feature_count: usize,
    labels: LabelTable,
}

impl NaiveBayesModel {
    /// Build a model from a decoded artifact, checking it against the paired vocabulary.
    pub fn from_artifact(artifact: ClassifierArtifact, vocabulary: &VocabularyIndex) -> Result<Self> {
        let ClassifierArtifact {
            class_count,
            feature_count,
            log_priors,
            log_likelihoods,
            labels,
            ..
        } = artifact;

        if class_count == 0 {
            return Err(Error::artifact("Classifier declares zero classes"));
        }

        if log_priors.len() != class_count {
            return Err(Error::artifact(format!(
                "Log-prior vector has length {}, expected {} classes",
                log_priors.len(),
                class_count
            )));
        }

        if feature_count != vocabulary.len() {
            return Err(Error::artifact(format!(
                "Classifier has {} features but the vocabulary has {} tokens",
                feature_count,
                vocabulary.len()
            )));
        }

        if log_likelihoods.len() != class_count {
            return Err(Error::artifact(format!(
                "Log-likelihood matrix has {} rows, expected {}",
                log_likelihoods.len(),
                class_count
            )));
        }

        if let Some((class, row)) = log_likelihoods
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != feature_count)
        {
            return Err(Error::artifact(format!(
                "Log-likelihood row {} has {} columns, expected {}",
                class,
                row.len(),
                feature_count
            )));
        }

        if let Some(value) = log_priors.iter().find(|v| !v.is_finite()) {
            return Err(Error::artifact(format!("Non-finite log-prior {}", value)));
        }

        let flat: Vec<f64> = log_likelihoods.into_iter().flatten().collect();
        if let Some(pos) = flat.iter().position(|v| !v.is_finite() || *v > 0.0) {
            return Err(Error::artifact(format!(
                "Invalid log-likelihood {} for class {} feature {}",
                flat[pos],
                pos / feature_count,
                pos % feature_count
            )));
        }

        let labels = match labels {
            Some(labels) => labels,
            None if class_count == 2 => LabelTable::default(),
            None => {
                return Err(Error::artifact(format!(
                    "Classifier with {} classes needs an explicit label table",
                    class_count
                )))
            }
        };

        if !labels.covers(class_count) {
            return Err(Error::artifact(format!(
                "Label table does not name every one of the {} classes",
                class_count
            )));
        }

        Ok(Self {
            log_priors,
            log_likelihoods: flat,
            feature_count,
            labels,
        })
    }

    /// Load a classifier artifact from disk and check it against the vocabulary
    pub fn load(path: impl AsRef<Path>, vocabulary: &VocabularyIndex) -> Result<Self> {
        let path = path.as_ref();
        let model = Self::from_artifact(ClassifierArtifact::from_file(path)?, vocabulary)?;
        info!(
            "Classifier loaded from {:?} ({} classes x {} features)",
            path,
            model.class_count(),
            model.feature_count
        );
        Ok(model)
    }

    /// Number of features V
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Per-class log-priors
    pub fn log_priors(&self) -> &[f64] {
        &self.log_priors
    }

    /// `log P(feature | class)`
    pub fn log_likelihood(&self, class: usize, feature: usize) -> Option<f64> {
        if class >= self.class_count() || feature >= self.feature_count {
            return None;
        }
        Some(self.log_likelihoods[class * self.feature_count + feature])
    }
}

impl Scorer for NaiveBayesModel {
    fn score(&self, vector: &SparseCountVector) -> Scores {
        let values = self
            .log_priors
            .iter()
            .enumerate()
            .map(|(class, prior)| {
                let row = &self.log_likelihoods[class * self.feature_count..(class + 1) * self.feature_count];
                vector
                    .iter()
                    .filter_map(|(feature, count)| row.get(feature).map(|ll| f64::from(count) * ll))
                    .fold(*prior, |acc, term| acc + term)
            })
            .collect();

        // class_count > 0 is checked at load time
        Scores::from_values(values).unwrap_or(Scores {
            label: 0,
            values: Vec::new(),
        })
    }

    fn class_count(&self) -> usize {
        self.log_priors.len()
    }

    fn labels(&self) -> &LabelTable {
        &self.labels
    }
}
