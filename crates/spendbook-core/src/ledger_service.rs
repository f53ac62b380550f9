//! Session-scoped owner of the expense ledger and the monthly budget.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use spendbook_domain::{BudgetDocument, ExpenseDraft, ExpenseRecord, ExpensesDocument};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{CoreError, DocumentStore, LedgerPaths, LedgerSummary};

/// Holds the loaded documents for one session and persists them through a
/// [`DocumentStore`] after every mutation.
///
/// Every mutating operation validates first, persists a candidate copy, and
/// only then replaces the in-memory state. A failed persist therefore leaves
/// the service exactly as it was before the call.
pub struct LedgerService {
    store: Box<dyn DocumentStore>,
    paths: LedgerPaths,
    expenses: ExpensesDocument,
    budget: BudgetDocument,
}

impl LedgerService {
    /// Loads both documents once. Missing files start an empty ledger and an
    /// unset budget.
    pub fn open(store: Box<dyn DocumentStore>, paths: LedgerPaths) -> Result<Self, CoreError> {
        let expenses: ExpensesDocument = read_document(store.as_ref(), &paths.expenses)?;
        let budget: BudgetDocument = read_document(store.as_ref(), &paths.budget)?;
        if expenses.checked_total().is_none() {
            warn!(path = %paths.expenses.display(), "stored total exceeds the decimal range");
        }
        info!(
            records = expenses.records.len(),
            budget_set = budget.monthly_budget.is_some(),
            "ledger session opened"
        );
        Ok(Self {
            store,
            paths,
            expenses,
            budget,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Appends a new expense and returns its position.
    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Result<usize, CoreError> {
        ensure_non_negative("amount", draft.amount)?;
        let mut candidate = self.expenses.clone();
        candidate.records.push(ExpenseRecord::new(draft));
        ensure_representable_total(&candidate)?;
        let position = candidate.records.len() - 1;
        self.commit_expenses(candidate)?;
        info!(position, "expense added");
        Ok(position)
    }

    /// Replaces the fields of the expense at `index`.
    pub fn update_expense(&mut self, index: usize, draft: ExpenseDraft) -> Result<(), CoreError> {
        ensure_non_negative("amount", draft.amount)?;
        self.check_index(index)?;
        let mut candidate = self.expenses.clone();
        candidate.records[index].apply(draft);
        ensure_representable_total(&candidate)?;
        self.commit_expenses(candidate)?;
        info!(index, "expense updated");
        Ok(())
    }

    /// Removes the expense at `index`; later records shift down by one.
    ///
    /// Positions captured before this call are stale afterwards. Use
    /// [`LedgerService::position_of`] to re-resolve a record.
    pub fn delete_expense(&mut self, index: usize) -> Result<ExpenseRecord, CoreError> {
        self.check_index(index)?;
        let mut candidate = self.expenses.clone();
        let removed = candidate.records.remove(index);
        self.commit_expenses(candidate)?;
        info!(index, "expense deleted");
        Ok(removed)
    }

    pub fn list_expenses(&self) -> &[ExpenseRecord] {
        &self.expenses.records
    }

    pub fn expense(&self, index: usize) -> Option<&ExpenseRecord> {
        self.expenses.records.get(index)
    }

    /// Current position of the record carrying `id`, if it still exists.
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.expenses.records.iter().position(|record| record.id == id)
    }

    pub fn total_spent(&self) -> Decimal {
        self.expenses.total()
    }

    /// Overwrites the monthly budget and persists the budget document.
    pub fn set_budget(&mut self, amount: Decimal) -> Result<(), CoreError> {
        ensure_non_negative("budget", amount)?;
        let candidate = BudgetDocument {
            monthly_budget: Some(amount),
        };
        write_document(self.store.as_ref(), &candidate, &self.paths.budget)?;
        self.budget = candidate;
        info!(%amount, "monthly budget set");
        Ok(())
    }

    /// The configured budget; `None` when it was never set.
    pub fn budget(&self) -> Option<Decimal> {
        self.budget.monthly_budget
    }

    /// Budget minus total spend, only when a budget greater than zero is set.
    /// Negative values indicate overspend.
    pub fn remaining_budget(&self) -> Option<Decimal> {
        self.budget
            .active_budget()
            .map(|budget| budget.saturating_sub(self.total_spent()))
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            record_count: self.expenses.records.len(),
            total_spent: self.total_spent(),
            budget: self.budget(),
            remaining: self.remaining_budget(),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), CoreError> {
        let len = self.expenses.records.len();
        if index >= len {
            return Err(CoreError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    fn commit_expenses(&mut self, candidate: ExpensesDocument) -> Result<(), CoreError> {
        write_document(self.store.as_ref(), &candidate, &self.paths.expenses)?;
        self.expenses = candidate;
        Ok(())
    }
}

fn ensure_non_negative(field: &str, amount: Decimal) -> Result<(), CoreError> {
    if amount < Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative (got {amount})"
        )));
    }
    Ok(())
}

fn ensure_representable_total(candidate: &ExpensesDocument) -> Result<(), CoreError> {
    if candidate.checked_total().is_none() {
        return Err(CoreError::Validation(format!(
            "total spend would exceed the largest supported amount ({})",
            Decimal::MAX
        )));
    }
    Ok(())
}

fn read_document<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    path: &Path,
) -> Result<T, CoreError> {
    let value = store.load(path)?;
    debug!(path = %path.display(), "document loaded");
    serde_json::from_value(value)
        .map_err(|err| CoreError::Parse(format!("{}: {}", path.display(), err)))
}

fn write_document<T: Serialize>(
    store: &dyn DocumentStore,
    document: &T,
    path: &Path,
) -> Result<(), CoreError> {
    let value = serde_json::to_value(document)?;
    if let Err(err) = store.save(&value, path) {
        warn!(path = %path.display(), error = %err, "persist failed; change discarded");
        return Err(err);
    }
    debug!(path = %path.display(), "document saved");
    Ok(())
}
