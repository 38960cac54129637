use thiserror::Error;

/// Errors returned by the distance functions and input parsers.
#[derive(Error, Debug)]
pub enum DistanceError {
    /// An argument could not be read as the expected shape, or held a value
    /// the metric cannot accept (negative or non-finite probabilities).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DistanceError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        DistanceError::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DistanceError>;
