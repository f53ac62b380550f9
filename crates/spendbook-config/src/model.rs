use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_EXPENSES_FILE: &str = "expenses.json";
pub const DEFAULT_BUDGET_FILE: &str = "budget.json";

/// Stores user-configurable preferences for the expense shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional override for the expenses document. Defaults to `<data dir>/expenses.json`.
    pub expenses_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional override for the budget document. Defaults to `<data dir>/budget.json`.
    pub budget_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            expenses_file: None,
            budget_file: None,
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_expenses_file(&self, data_dir: &Path) -> PathBuf {
        resolve(self.expenses_file.as_deref(), data_dir, DEFAULT_EXPENSES_FILE)
    }

    pub fn resolve_budget_file(&self, data_dir: &Path) -> PathBuf {
        resolve(self.budget_file.as_deref(), data_dir, DEFAULT_BUDGET_FILE)
    }
}

/// Relative overrides are taken relative to the data directory.
fn resolve(custom: Option<&Path>, data_dir: &Path, default_name: &str) -> PathBuf {
    match custom {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => data_dir.join(path),
        None => data_dir.join(default_name),
    }
}
