//! Process-wide model registry
//!
//! The registry owns the one vocabulary/classifier pair a process serves.
//! Loading happens on first access, at most once; a failed load is cached
//! and never retried because there is no way to serve without a model.

use crate::config::{ArtifactPaths, ModelConfig, ModelVariant};
use crate::naive_bayes::NaiveBayesModel;
use crate::vocabulary::VocabularyIndex;
use langsift_core::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

/// Lifecycle of a [`ModelRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    /// Nothing has asked for the model yet
    Uninitialized,
    /// The first access is reading the artifacts
    Loading,
    /// Both artifacts loaded and passed the integrity checks
    Ready,
    /// Loading failed; terminal
    Failed,
}

/// A matched vocabulary/classifier pair
#[derive(Debug)]
pub struct LoadedModel {
    variant: ModelVariant,
    vocabulary: Arc<VocabularyIndex>,
    classifier: Arc<NaiveBayesModel>,
}

impl LoadedModel {
    /// Load both artifacts and check that they agree
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let vocabulary = VocabularyIndex::load(&paths.vocabulary)?;
        let classifier = NaiveBayesModel::load(&paths.classifier, &vocabulary)?;

        Ok(Self::new(paths.variant, vocabulary, classifier))
    }

    /// Pair already-built components
    pub fn new(variant: ModelVariant, vocabulary: VocabularyIndex, classifier: NaiveBayesModel) -> Self {
        Self {
            variant,
            vocabulary: Arc::new(vocabulary),
            classifier: Arc::new(classifier),
        }
    }

    /// Variant this pair was fit as
    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    /// Shared vocabulary
    pub fn vocabulary(&self) -> &Arc<VocabularyIndex> {
        &self.vocabulary
    }

    /// Shared classifier
    pub fn classifier(&self) -> &Arc<NaiveBayesModel> {
        &self.classifier
    }
}

/// Lazily-initialized holder of one [`LoadedModel`]
pub struct ModelRegistry {
    paths: ArtifactPaths,
    loading: AtomicBool,
    model: OnceLock<std::result::Result<Arc<LoadedModel>, String>>,
}

impl ModelRegistry {
    /// Create an uninitialized registry for the given artifacts
    pub fn new(paths: ArtifactPaths) -> Self {
        Self {
            paths,
            loading: AtomicBool::new(false),
            model: OnceLock::new(),
        }
    }

    /// Create an uninitialized registry for the configured variant
    pub fn from_config(config: &ModelConfig) -> Self {
        Self::new(config.artifact_paths())
    }

    /// Create a registry that is already `Ready`
    pub fn with_model(paths: ArtifactPaths, model: LoadedModel) -> Self {
        let registry = Self::new(paths);
        // a fresh cell is always empty
        let _ = registry.model.set(Ok(Arc::new(model)));
        registry
    }

    /// Artifact locations this registry loads from
    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Current lifecycle state
    pub fn state(&self) -> RegistryState {
        match self.model.get() {
            Some(Ok(_)) => RegistryState::Ready,
            Some(Err(_)) => RegistryState::Failed,
            None if self.loading.load(Ordering::Acquire) => RegistryState::Loading,
            None => RegistryState::Uninitialized,
        }
    }

    /// Get the loaded model, loading it on first access.
    ///
    /// Concurrent first callers block until the single load finishes; every
    /// later call returns the same `Arc` or the same load error.
    pub fn get(&self) -> Result<Arc<LoadedModel>> {
        self.get_or_load_with(LoadedModel::load)
    }

    fn get_or_load_with<F>(&self, load: F) -> Result<Arc<LoadedModel>>
    where
        F: FnOnce(&ArtifactPaths) -> Result<LoadedModel>,
    {
        let outcome = self.model.get_or_init(|| {
            self.loading.store(true, Ordering::Release);
            info!(
                "Loading {} model (vocabulary {:?}, classifier {:?})",
                self.paths.variant, self.paths.vocabulary, self.paths.classifier
            );

            let outcome = match load(&self.paths) {
                Ok(model) => {
                    info!(
                        "Model ready: {} classes, {} features",
                        model.classifier().log_priors().len(),
                        model.vocabulary().len()
                    );
                    Ok(Arc::new(model))
                }
                Err(e) => {
                    warn!("Model loading failed, registry is unusable: {}", e);
                    Err(match e {
                        Error::ArtifactLoad(msg) => msg,
                        other => other.to_string(),
                    })
                }
            };

            self.loading.store(false, Ordering::Release);
            outcome
        });

        match outcome {
            Ok(model) => Ok(Arc::clone(model)),
            Err(msg) => Err(Error::artifact(msg.clone())),
        }
    }
}

static GLOBAL_REGISTRY: OnceLock<ModelRegistry> = OnceLock::new();

/// Install the process-wide registry.
///
/// Only the first call installs; later calls return the installed registry
/// when they ask for the same artifacts and a configuration error otherwise.
/// Installing does not load: the first [`ModelRegistry::get`] does.
pub fn init_global_registry(paths: ArtifactPaths) -> Result<&'static ModelRegistry> {
    let registry = GLOBAL_REGISTRY.get_or_init(|| ModelRegistry::new(paths.clone()));

    if registry.paths() != &paths {
        return Err(Error::config(format!(
            "Model registry already initialized for {} model at {:?}",
            registry.paths().variant,
            registry.paths().classifier
        )));
    }

    Ok(registry)
}

/// The process-wide registry, if installed
pub fn global_registry() -> Option<&'static ModelRegistry> {
    GLOBAL_REGISTRY.get()
}
