//! Shapes of the two persisted documents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expense::ExpenseRecord;

/// The expenses document: `{ "records": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpensesDocument {
    #[serde(default)]
    pub records: Vec<ExpenseRecord>,
}

impl ExpensesDocument {
    /// Exact sum of every record amount, or `None` when the sum does not fit
    /// in a `Decimal`.
    pub fn checked_total(&self) -> Option<Decimal> {
        self.records
            .iter()
            .try_fold(Decimal::ZERO, |sum, record| sum.checked_add(record.amount))
    }

    /// Exact sum of every record amount. Saturates at the `Decimal` bounds
    /// for documents edited outside the ledger.
    pub fn total(&self) -> Decimal {
        self.records
            .iter()
            .fold(Decimal::ZERO, |sum, record| sum.saturating_add(record.amount))
    }
}

/// The budget document: `{ "monthly_budget": number }`, or `{}` when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<Decimal>,
}

impl BudgetDocument {
    /// Returns the budget only when it is configured and greater than zero.
    pub fn active_budget(&self) -> Option<Decimal> {
        self.monthly_budget.filter(|amount| *amount > Decimal::ZERO)
    }
}
