//! langsift Classifiers
//!
//! English/Italian language identification for short text fragments.
//!
//! The inference path is a fixed pipeline:
//! - [`normalizer`]: deterministic Unicode text cleaning
//! - [`vectorizer`]: bag-of-words counts over a fitted vocabulary
//! - [`naive_bayes`]: multinomial Naive Bayes log-space scoring
//!
//! Model artifacts are loaded once per process through the [`registry`] and
//! shared read-only by every [`pipeline::PredictionPipeline`].

pub mod artifact;
pub mod classifier;
pub mod config;
pub mod naive_bayes;
pub mod normalizer;
pub mod pipeline;
pub mod registry;
pub mod vectorizer;
pub mod vocabulary;

pub use artifact::{ClassifierArtifact, VocabularyArtifact};
pub use classifier::{FeatureVectorizer, Scorer, Scores, TextNormalizer};
pub use config::{ArtifactPaths, ModelConfig, ModelVariant, VariantFiles};
pub use naive_bayes::NaiveBayesModel;
pub use normalizer::UnicodeNormalizer;
pub use pipeline::PredictionPipeline;
pub use registry::{
    global_registry, init_global_registry, LoadedModel, ModelRegistry, RegistryState,
};
pub use vectorizer::{BagOfWordsVectorizer, SparseCountVector, Vectorized};
pub use vocabulary::VocabularyIndex;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{FeatureVectorizer, Scorer, TextNormalizer};
    pub use crate::config::{ModelConfig, ModelVariant};
    pub use crate::naive_bayes::NaiveBayesModel;
    pub use crate::normalizer::UnicodeNormalizer;
    pub use crate::pipeline::PredictionPipeline;
    pub use crate::registry::ModelRegistry;
    pub use crate::vectorizer::{BagOfWordsVectorizer, SparseCountVector};
    pub use crate::vocabulary::VocabularyIndex;
}
