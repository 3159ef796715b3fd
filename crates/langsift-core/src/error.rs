//! Error types for langsift

/// Result type alias using langsift's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for langsift operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input text was empty or whitespace-only.
    ///
    /// Recoverable: the request is rejected, the process keeps serving.
    #[error("No text provided")]
    EmptyInput,

    /// Vocabulary or classifier artifact is missing, corrupt, or
    /// dimensionally inconsistent. Fatal at startup.
    #[error("artifact load error: {0}")]
    ArtifactLoad(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new artifact load error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::ArtifactLoad(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the process can keep serving after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }
}
