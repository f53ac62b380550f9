use rust_decimal::Decimal;

/// Snapshot of the figures a presentation layer renders after each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSummary {
    pub record_count: usize,
    pub total_spent: Decimal,
    pub budget: Option<Decimal>,
    pub remaining: Option<Decimal>,
}

impl LedgerSummary {
    pub fn is_overspent(&self) -> bool {
        self.remaining
            .map(|remaining| remaining < Decimal::ZERO)
            .unwrap_or(false)
    }
}
