//! finsight: aggregates a user's transactions and debts and turns the figures into budgeting
//! advice.
//!
//! The `engine` module is the core and is free of I/O. The rest of the crate loads user-scoped
//! records from the local ledger, manages settings and exposes everything through a CLI.

pub mod args;
pub mod commands;
mod config;
pub mod debounce;
pub mod engine;
mod error;
pub mod ledger;
pub mod model;
pub mod settings;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::Error;
pub use error::Result;
