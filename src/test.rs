//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::args::AddArgs;
use crate::commands::insert_transaction;
use crate::model::{Transaction, TransactionType};
use crate::store::Store;
use crate::{BackendKind, Config};
use chrono::NaiveDate;
use tempfile::TempDir;

/// Test environment that sets up a flow home directory with a file-backed Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_backend(BackendKind::File)
    }

    pub fn with_backend(backend: BackendKind) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("flow");
        let config = Config::create(&root, backend).unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Opens a new `Store` over this environment's storage. Every call reads what earlier stores
    /// persisted.
    pub fn store(&self) -> Store {
        self.config.store().unwrap()
    }

    /// The fixed "today" used by tests.
    pub fn today(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
    }

    /// Adds a transaction through the same path the `add` command takes.
    pub fn insert(
        &self,
        store: &mut Store,
        amount: &str,
        date: &str,
        description: &str,
        kind: TransactionType,
    ) -> Transaction {
        let args = AddArgs::new(amount, Some(date.to_string()), description, kind);
        insert_transaction(store, args, self.today())
            .unwrap()
            .structure()
            .unwrap()
            .clone()
    }
}
