//! Model registry lifecycle and artifact integrity tests

mod common;

use common::{fixture_paths, fixtures_dir};
use langsift_classifiers::artifact::{write_artifact, ClassifierArtifact, VocabularyArtifact};
use langsift_classifiers::{
    global_registry, init_global_registry, ArtifactPaths, ModelRegistry, ModelVariant,
    PredictionPipeline, RegistryState,
};
use langsift_core::Error;
use std::sync::Arc;
use tempfile::TempDir;

fn fixture_classifier() -> ClassifierArtifact {
    ClassifierArtifact::from_file(fixtures_dir().join("nb_bow.json")).unwrap()
}

fn fixture_vocabulary() -> VocabularyArtifact {
    VocabularyArtifact::from_file(fixtures_dir().join("vocabulary_bow.json")).unwrap()
}

/// Write a vocabulary/classifier pair into a temp dir and return a registry over it
fn registry_with(vocabulary: &VocabularyArtifact, classifier: &ClassifierArtifact) -> (TempDir, ModelRegistry) {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::new(
        ModelVariant::Full,
        dir.path().join("vocabulary.json"),
        dir.path().join("nb.json"),
    );
    write_artifact(&paths.vocabulary, vocabulary).unwrap();
    write_artifact(&paths.classifier, classifier).unwrap();
    (dir, ModelRegistry::new(paths))
}

#[test]
fn test_lifecycle_to_ready() {
    let registry = ModelRegistry::new(fixture_paths());
    assert_eq!(registry.state(), RegistryState::Uninitialized);

    let model = registry.get().unwrap();
    assert_eq!(registry.state(), RegistryState::Ready);
    assert_eq!(model.variant(), ModelVariant::Full);
    assert_eq!(model.vocabulary().len(), model.classifier().feature_count());
}

#[test]
fn test_ready_registry_never_reloads() {
    let registry = ModelRegistry::new(fixture_paths());

    let first = registry.get().unwrap();
    let second = registry.get().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_concurrent_first_access_loads_once() {
    let registry = ModelRegistry::new(fixture_paths());

    let models: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| registry.get().unwrap())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(registry.state(), RegistryState::Ready);
    assert!(models.iter().all(|m| Arc::ptr_eq(m, &models[0])));
}

#[test]
fn test_missing_vocabulary_fails() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::new(
        ModelVariant::Full,
        dir.path().join("missing.json"),
        fixtures_dir().join("nb_bow.json"),
    );
    let registry = ModelRegistry::new(paths);

    let err = registry.get().unwrap_err();
    assert!(matches!(err, Error::ArtifactLoad(_)));
    assert!(err.to_string().contains("vocabulary"));
    assert_eq!(registry.state(), RegistryState::Failed);
}

#[test]
fn test_failed_registry_does_not_retry() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::new(
        ModelVariant::Full,
        dir.path().join("vocabulary.json"),
        dir.path().join("nb.json"),
    );
    let registry = ModelRegistry::new(paths.clone());
    assert!(registry.get().is_err());

    // artifacts appearing later are not picked up
    write_artifact(&paths.vocabulary, &fixture_vocabulary()).unwrap();
    write_artifact(&paths.classifier, &fixture_classifier()).unwrap();

    assert!(registry.get().is_err());
    assert_eq!(registry.state(), RegistryState::Failed);
    assert!(PredictionPipeline::from_registry(&registry).is_err());
}

#[test]
fn test_mismatched_vocabulary_size_fails() {
    let mut vocabulary = fixture_vocabulary();
    let next = vocabulary.tokens.len();
    vocabulary.tokens.insert("extra".to_string(), next);

    let (_dir, registry) = registry_with(&vocabulary, &fixture_classifier());
    let err = registry.get().unwrap_err();
    assert!(err.to_string().contains("features but the vocabulary has"));
}

#[test]
fn test_wrong_prior_length_fails() {
    let mut classifier = fixture_classifier();
    classifier.log_priors.push(-3.0);

    let (_dir, registry) = registry_with(&fixture_vocabulary(), &classifier);
    assert!(registry.get().is_err());
    assert_eq!(registry.state(), RegistryState::Failed);
}

#[test]
fn test_wrong_matrix_shape_fails() {
    let mut classifier = fixture_classifier();
    classifier.log_likelihoods[0].truncate(10);

    let (_dir, registry) = registry_with(&fixture_vocabulary(), &classifier);
    let err = registry.get().unwrap_err();
    assert!(err.to_string().contains("row 0"));
}

#[test]
fn test_corrupt_classifier_fails() {
    let dir = tempfile::tempdir().unwrap();
    let classifier = dir.path().join("nb.pkl");
    std::fs::write(&classifier, b"\x80\x04\x95\x10\x00").unwrap();

    let registry = ModelRegistry::new(ArtifactPaths::new(
        ModelVariant::Full,
        fixtures_dir().join("vocabulary_bow.json"),
        classifier,
    ));
    assert!(matches!(registry.get(), Err(Error::ArtifactLoad(_))));
}

#[test]
fn test_global_registry_installed_once() {
    let registry = init_global_registry(fixture_paths()).unwrap();
    assert!(std::ptr::eq(registry, global_registry().unwrap()));

    // same artifacts: same registry
    let again = init_global_registry(fixture_paths()).unwrap();
    assert!(std::ptr::eq(registry, again));

    // different artifacts: refused
    let other = ArtifactPaths::new(ModelVariant::Undersampled, "/tmp/v.json", "/tmp/nb.json");
    assert!(matches!(init_global_registry(other), Err(Error::Config(_))));

    let pipeline = PredictionPipeline::from_registry(registry).unwrap();
    assert_eq!(pipeline.predict("ciao mondo").unwrap().language, "Italian");
}
