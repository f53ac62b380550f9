//! Ledger session wiring: resolves document paths from configuration and
//! opens a [`LedgerService`] over the JSON store.

use std::{fs, path::Path};

pub use spendbook_core::{CoreError, DocumentStore, LedgerPaths, LedgerService, LedgerSummary};
pub use spendbook_domain::{BudgetDocument, ExpenseDraft, ExpenseRecord, ExpensesDocument};
pub use spendbook_storage_json::JsonDocumentStore;

use crate::{config::Config, errors::Result};

/// Document locations for `config`, relative overrides resolved against `data_dir`.
pub fn ledger_paths(config: &Config, data_dir: &Path) -> LedgerPaths {
    LedgerPaths::new(
        config.resolve_expenses_file(data_dir),
        config.resolve_budget_file(data_dir),
    )
}

/// Opens the ledger session for `config`, creating `data_dir` when missing.
pub fn open_ledger(config: &Config, data_dir: &Path) -> Result<LedgerService> {
    fs::create_dir_all(data_dir)?;
    let paths = ledger_paths(config, data_dir);
    tracing::debug!(
        expenses = %paths.expenses.display(),
        budget = %paths.budget.display(),
        "opening ledger"
    );
    Ok(LedgerService::open(Box::new(JsonDocumentStore::new()), paths)?)
}
