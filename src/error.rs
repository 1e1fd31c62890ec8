use thiserror::Error;

/// Analysis error types.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The series had nothing to analyze. Callers should show a loading or
    /// "not enough data" state rather than a neutral signal.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Whether this error means "no result yet" rather than a real failure.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, AnalysisError::InsufficientData(_))
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
