//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::settings::Settings;
use crate::{utils, Config};
use tempfile::TempDir;

/// Test environment that sets up a finsight home directory with a default config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with default settings and no ledger files.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("finsight");
        let config = Config::create(&root, Settings::default()).await.unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Writes the given CSV text to the transactions and debts ledger files.
    pub async fn write_ledger(&self, transactions_csv: &str, debts_csv: &str) {
        utils::write(self.config.transactions_path(), transactions_csv)
            .await
            .unwrap();
        utils::write(self.config.debts_path(), debts_csv)
            .await
            .unwrap();
    }
}
