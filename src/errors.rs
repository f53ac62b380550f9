use spendbook_config::ConfigError;
use spendbook_core::CoreError;
use thiserror::Error;

/// Errors raised while assembling a session: configuration, data directory,
/// and the initial document load.
#[derive(Debug, Error)]
pub enum SpendbookError {
    #[error(transparent)]
    Ledger(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Data directory error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpendbookError>;
