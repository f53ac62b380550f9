//! spendbook-domain
//!
//! Pure data types for the expense ledger and the monthly budget.
//! No I/O, no CLI, no storage.

pub mod document;
pub mod expense;

pub use document::*;
pub use expense::*;
