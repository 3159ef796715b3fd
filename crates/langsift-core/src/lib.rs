//! langsift Core
//!
//! Core types and error handling shared across langsift components.
//!
//! This crate provides:
//! - The error taxonomy (empty input, artifact loading, configuration)
//! - Class labels, the label-to-language table, and prediction results

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ClassLabel, LabelTable, PredictionResult, ENGLISH_LABEL, ITALIAN_LABEL};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ClassLabel, LabelTable, PredictionResult};
}
