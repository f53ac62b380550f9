//! spendbook-core
//!
//! Ledger and budget services for Spendbook.
//! Depends on spendbook-domain. No CLI, no terminal I/O, no direct filesystem access.

pub mod error;
pub mod ledger_service;
pub mod storage;
pub mod summary;

pub use error::CoreError;
pub use ledger_service::*;
pub use storage::*;
pub use summary::*;

#[cfg(test)]
mod tests;
