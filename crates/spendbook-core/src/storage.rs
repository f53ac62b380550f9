use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::CoreError;

pub const EXPENSES_FILE: &str = "expenses.json";
pub const BUDGET_FILE: &str = "budget.json";

/// Load/save of a single JSON-shaped document at a named location.
///
/// Implementations keep no state between calls. A missing document loads as
/// an empty object; malformed content is a [`CoreError::Parse`].
pub trait DocumentStore: Send + Sync {
    fn load(&self, path: &Path) -> Result<Value, CoreError>;
    fn save(&self, document: &Value, path: &Path) -> Result<(), CoreError>;
}

/// Locations of the two documents backing a ledger session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerPaths {
    pub expenses: PathBuf,
    pub budget: PathBuf,
}

impl LedgerPaths {
    pub fn new(expenses: impl Into<PathBuf>, budget: impl Into<PathBuf>) -> Self {
        Self {
            expenses: expenses.into(),
            budget: budget.into(),
        }
    }

    /// Uses the default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(EXPENSES_FILE), dir.join(BUDGET_FILE))
    }
}
