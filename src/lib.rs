#![doc(test(attr(deny(warnings))))]

//! Spendbook keeps a personal expense ledger and a monthly budget in two
//! JSON documents and exposes them through a small command shell.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod utils;

/// Initializes global tracing. Safe to call more than once.
pub fn init() {
    utils::init_tracing();
}
