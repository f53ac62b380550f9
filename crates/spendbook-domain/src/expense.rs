//! Domain models for individual expense entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single dated expense stored in the ledger.
///
/// Records are addressed by their position in the ledger. The `id` is an
/// opaque handle that survives reordering and lets callers re-resolve a
/// position after other records were removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub date: String,
    pub amount: Decimal,
    pub category: String,
    #[serde(default)]
    pub note: String,
}

impl ExpenseRecord {
    pub fn new(draft: ExpenseDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: draft.date,
            amount: draft.amount,
            category: draft.category,
            note: draft.note,
        }
    }

    /// Overwrites every user-facing field, keeping the identifier.
    pub fn apply(&mut self, draft: ExpenseDraft) {
        self.date = draft.date;
        self.amount = draft.amount;
        self.category = draft.category;
        self.note = draft.note;
    }

    pub fn draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            date: self.date.clone(),
            amount: self.amount,
            category: self.category.clone(),
            note: self.note.clone(),
        }
    }
}

/// User-supplied fields for creating or replacing an expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub date: String,
    pub amount: Decimal,
    pub category: String,
    pub note: String,
}

impl ExpenseDraft {
    pub fn new(
        date: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            amount,
            category: category.into(),
            note: note.into(),
        }
    }

    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}
