//! Persisted model artifacts
//!
//! Both artifacts are versioned JSON documents so any producer can write
//! them without depending on a language runtime's object format:
//!
//! ```json
//! {"format": "langsift-vocabulary", "version": 1, "tokens": {"ciao": 0, "hello": 1}}
//! ```
//!
//! ```json
//! {
//!   "format": "langsift-multinomial-nb",
//!   "version": 1,
//!   "class_count": 2,
//!   "feature_count": 2,
//!   "log_priors": [-0.69, -0.69],
//!   "log_likelihoods": [[-1.6, -0.2], [-0.2, -1.6]],
//!   "labels": {"0": "English", "1": "Italian"}
//! }
//! ```
//!
//! The two files must come from the same fitting run: the vocabulary indices
//! are the column indices of the likelihood matrix.

use langsift_core::{Error, LabelTable, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Format tag of vocabulary artifacts
pub const VOCABULARY_FORMAT: &str = "langsift-vocabulary";

/// Format tag of classifier artifacts
pub const CLASSIFIER_FORMAT: &str = "langsift-multinomial-nb";

/// Artifact schema version understood by this build
pub const ARTIFACT_VERSION: u32 = 1;

/// Serialized token-to-feature-index mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyArtifact {
    pub format: String,
    pub version: u32,
    pub tokens: HashMap<String, usize>,
}

impl VocabularyArtifact {
    /// Create a current-version artifact from a token map
    pub fn new(tokens: HashMap<String, usize>) -> Self {
        Self {
            format: VOCABULARY_FORMAT.to_string(),
            version: ARTIFACT_VERSION,
            tokens,
        }
    }

    /// Read a vocabulary artifact from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let artifact: Self = read_json(path.as_ref(), "vocabulary")?;
        check_header(&artifact.format, artifact.version, VOCABULARY_FORMAT)?;
        Ok(artifact)
    }
}

/// Serialized multinomial Naive Bayes parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub format: String,
    pub version: u32,

    /// Number of classes C
    pub class_count: usize,

    /// Number of features V
    pub feature_count: usize,

    /// Length-C log-priors
    pub log_priors: Vec<f64>,

    /// C rows of V log-likelihoods, `log P(feature | class)`
    pub log_likelihoods: Vec<Vec<f64>>,

    /// Label-to-language table; defaults to English/Italian when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<LabelTable>,
}

impl ClassifierArtifact {
    /// Create a current-version artifact from fitted parameters
    pub fn new(log_priors: Vec<f64>, log_likelihoods: Vec<Vec<f64>>, labels: LabelTable) -> Self {
        Self {
            format: CLASSIFIER_FORMAT.to_string(),
            version: ARTIFACT_VERSION,
            class_count: log_priors.len(),
            feature_count: log_likelihoods.first().map_or(0, Vec::len),
            log_priors,
            log_likelihoods,
            labels: Some(labels),
        }
    }

    /// Read a classifier artifact from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let artifact: Self = read_json(path.as_ref(), "classifier")?;
        check_header(&artifact.format, artifact.version, CLASSIFIER_FORMAT)?;
        Ok(artifact)
    }
}

/// Write an artifact as pretty-printed JSON
pub fn write_artifact<T: Serialize>(path: impl AsRef<Path>, artifact: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(artifact)?;
    std::fs::write(path.as_ref(), json)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::artifact(format!("Failed to read {} artifact {:?}: {}", kind, path, e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        Error::artifact(format!("Failed to parse {} artifact {:?}: {}", kind, path, e))
    })
}

fn check_header(format: &str, version: u32, expected: &str) -> Result<()> {
    if format != expected {
        return Err(Error::artifact(format!(
            "Unexpected artifact format '{}', expected '{}'",
            format, expected
        )));
    }

    if version != ARTIFACT_VERSION {
        return Err(Error::artifact(format!(
            "Unsupported {} version {}, this build reads version {}",
            expected, version, ARTIFACT_VERSION
        )));
    }

    Ok(())
}
