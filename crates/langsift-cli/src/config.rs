//! Application configuration

use crate::cli::Cli;
use langsift_classifiers::ModelConfig;
use langsift_telemetry::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model selection
    #[serde(default)]
    pub model: ModelConfig,

    /// Logging setup
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &Path, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(variant) = cli.variant {
            config.model.variant = variant;
        }

        if let Some(models_dir) = &cli.models_dir {
            config.model.models_dir = models_dir.clone();
        }

        Ok(config)
    }
}
