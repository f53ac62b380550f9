use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Malformed document: {0}")]
    Parse(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("No expense at position {index} (ledger holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl CoreError {
    /// True for failures caused by the caller's input, which leave all state untouched.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CoreError::Validation(_) | CoreError::IndexOutOfRange { .. }
        )
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Parse(err.to_string())
    }
}
