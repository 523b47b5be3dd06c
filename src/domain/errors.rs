use thiserror::Error;

/// Domain-level errors shared across application components.
///
/// Every failure in the serving pipeline maps to exactly one variant so
/// callers can tell retryable conditions (artifacts still missing) apart
/// from client mistakes (bad payload) and server faults (broken artifacts).
#[derive(Debug, Error)]
pub enum DomainError {
    /// The incoming payload missed a required field or was not coercible
    /// to its declared numeric type. The message names the field.
    #[error("validation error: {0}")]
    Validation(String),

    /// A model artifact could not be read or deserialized at startup.
    #[error("artifact load failure: {0}")]
    ArtifactLoad(String),

    /// Prediction requested while the artifact pair is unavailable.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Unexpected failure inside scaling or classification, e.g. a
    /// dimensionality mismatch from a corrupted artifact.
    #[error("inference failure: {0}")]
    Inference(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::ArtifactLoad(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }
}
