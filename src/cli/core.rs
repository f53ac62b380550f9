use std::io;

use rustyline::error::ReadlineError;
use spendbook_core::CoreError;
use thiserror::Error;

use crate::errors::SpendbookError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single shell command. The shell reports it and keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] CoreError),
    #[error("Could not save settings: {0}")]
    Config(#[from] spendbook_config::ConfigError),
    #[error("exit requested")]
    ExitRequested,
}

impl CommandError {
    /// True when the user can resolve the failure by changing their input.
    pub fn is_user_error(&self) -> bool {
        match self {
            CommandError::InvalidArguments(_) => true,
            CommandError::Ledger(err) => err.is_user_error(),
            _ => false,
        }
    }
}

/// Failure that stops the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Startup(#[from] SpendbookError),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

impl From<spendbook_config::ConfigError> for CliError {
    fn from(err: spendbook_config::ConfigError) -> Self {
        CliError::Startup(SpendbookError::from(err))
    }
}
