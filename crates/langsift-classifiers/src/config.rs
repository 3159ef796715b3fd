//! Model selection configuration
//!
//! Which fitted model a process serves is a deployment-time choice: the
//! variant is fixed in configuration and never switched per request.

use langsift_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Variant served by this process
    #[serde(default)]
    pub variant: ModelVariant,

    /// Directory holding the artifact files
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Per-variant file name overrides
    #[serde(default)]
    pub variants: HashMap<ModelVariant, VariantFiles>,
}

/// Fitted model variants produced by the offline training run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelVariant {
    /// Vocabulary and classifier fit on the full dataset
    #[default]
    Full,
    /// Fit on the class-balanced undersampled dataset
    Undersampled,
}

/// Artifact file names of one variant, relative to `models_dir` unless absolute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantFiles {
    pub vocabulary: PathBuf,
    pub classifier: PathBuf,
}

/// Resolved locations of a matched artifact pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub variant: ModelVariant,
    pub vocabulary: PathBuf,
    pub classifier: PathBuf,
}

impl ArtifactPaths {
    /// Pair explicit artifact files
    pub fn new(variant: ModelVariant, vocabulary: impl Into<PathBuf>, classifier: impl Into<PathBuf>) -> Self {
        Self {
            variant,
            vocabulary: vocabulary.into(),
            classifier: classifier.into(),
        }
    }
}

impl ModelVariant {
    /// Default artifact file names for this variant
    pub fn default_files(&self) -> VariantFiles {
        let suffix = match self {
            Self::Full => "bow",
            Self::Undersampled => "bow_undersampling",
        };

        VariantFiles {
            vocabulary: PathBuf::from(format!("vocabulary_{}.json", suffix)),
            classifier: PathBuf::from(format!("nb_{}.json", suffix)),
        }
    }

    /// Config/CLI name of the variant
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Undersampled => "undersampled",
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "undersampled" | "undersampling" => Ok(Self::Undersampled),
            other => Err(format!(
                "unknown model variant '{}', expected 'full' or 'undersampled'",
                other
            )),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            variant: ModelVariant::default(),
            models_dir: default_models_dir(),
            variants: HashMap::new(),
        }
    }
}

impl ModelConfig {
    /// Load model configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read {:?}: {}", path, e)))?;
        Self::from_yaml(&content)
    }

    /// Parse model configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Invalid model configuration: {}", e)))
    }

    /// Resolve the artifact pair of the configured variant
    pub fn artifact_paths(&self) -> ArtifactPaths {
        let files = self
            .variants
            .get(&self.variant)
            .cloned()
            .unwrap_or_else(|| self.variant.default_files());

        ArtifactPaths {
            variant: self.variant,
            vocabulary: self.models_dir.join(files.vocabulary),
            classifier: self.models_dir.join(files.classifier),
        }
    }
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("./models")
}
