//! Durable CRUD over the transaction collection.
//!
//! The whole collection lives in a single JSON value stored under [`STORAGE_KEY`] in a key-value
//! [`Backend`]. Every operation reads the full collection, changes it in memory and, when
//! something changed, writes the full collection back. Failures to read or write are logged and
//! absorbed here; callers always get a usable answer.

mod file;
mod memory;
mod sqlite;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use crate::model::{NewTransaction, Transaction, TransactionUpdates};
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{debug, error, trace};
use uuid::Uuid;

/// The key under which the serialized transaction collection is stored.
pub const STORAGE_KEY: &str = "finance-tracker-transactions";

/// A very small string key-value store. Implementations decide where the values actually live.
pub trait Backend {
    /// Returns the value stored under `key`, or `None` if nothing has been stored yet.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Source of the current time for `createdAt` and `updatedAt`.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc>,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// The transaction store.
///
/// A store without a backend (see [`Store::detached`]) behaves as if persistence were
/// unavailable: it lists nothing and silently skips writes.
pub struct Store {
    backend: Option<Box<dyn Backend + Send>>,
    clock: Box<dyn Clock + Send>,
}

impl Store {
    /// Create a store that persists through `backend` and uses the system clock.
    pub fn new(backend: impl Backend + Send + 'static) -> Self {
        Self {
            backend: Some(Box::new(backend)),
            clock: Box::new(SystemClock),
        }
    }

    /// Create a store that has nowhere to persist.
    pub fn detached() -> Self {
        Self {
            backend: None,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock used to stamp records.
    pub fn with_clock(mut self, clock: impl Clock + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// All transactions in stored order, newest created first.
    ///
    /// Returns an empty list when there is no backend, nothing has been stored yet, or the stored
    /// value cannot be read or parsed.
    pub fn list(&self) -> Vec<Transaction> {
        match self.load() {
            Ok(transactions) => transactions,
            Err(e) => {
                error!("Error loading transactions: {e:#}");
                Vec::new()
            }
        }
    }

    /// Looks up a single transaction by `id`.
    pub fn get(&self, id: &str) -> Option<Transaction> {
        self.list().into_iter().find(|t| t.id == id)
    }

    /// Creates a transaction with a fresh id and timestamps, puts it at the front of the
    /// collection and persists the collection.
    ///
    /// The new record is returned even if it could not be persisted; the failure is logged. When
    /// the backend cannot be read the collection is left as it is.
    pub fn create(&mut self, new: NewTransaction) -> Transaction {
        let transaction = Transaction::create(Uuid::new_v4().to_string(), new, self.clock.now());
        let Some(mut transactions) = self.load_for_write() else {
            return transaction;
        };
        transactions.insert(0, transaction.clone());
        self.save(&transactions);
        debug!("Created transaction {}", transaction.id);
        transaction
    }

    /// Merges `updates` over the transaction with `id`, refreshes its `updatedAt` and persists the
    /// collection. Returns `None`, and writes nothing, when no such transaction exists or the
    /// backend cannot be read.
    pub fn update(&mut self, id: &str, updates: TransactionUpdates) -> Option<Transaction> {
        let mut transactions = self.load_for_write()?;
        let now = self.clock.now();
        let transaction = transactions.iter_mut().find(|t| t.id == id)?;
        transaction.apply(updates, now);
        let updated = transaction.clone();
        self.save(&transactions);
        debug!("Updated transaction {id}");
        Some(updated)
    }

    /// Removes the transaction with `id`. Returns whether a transaction was removed; the
    /// collection is only rewritten when one was.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(transactions) = self.load_for_write() else {
            return false;
        };
        let before = transactions.len();
        let remaining: Vec<Transaction> = transactions.into_iter().filter(|t| t.id != id).collect();
        if remaining.len() == before {
            trace!("No transaction {id} to delete");
            return false;
        }
        self.save(&remaining);
        debug!("Deleted transaction {id}");
        true
    }

    /// Reads the collection. Only a failure of the backend itself is an error; a stored value
    /// that does not parse is logged and read as empty so the next write replaces it.
    fn load(&self) -> Result<Vec<Transaction>> {
        let Some(backend) = self.backend.as_ref() else {
            trace!("No persistence backend, nothing to load");
            return Ok(Vec::new());
        };
        let Some(stored) = backend.get(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&stored) {
            Ok(transactions) => Ok(transactions),
            Err(e) => {
                error!("Stored transactions are malformed, reading them as empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Like [`Store::load`], but `None` when the backend could not be read. Writing after a failed
    /// read would replace the stored collection with a partial one.
    fn load_for_write(&self) -> Option<Vec<Transaction>> {
        match self.load() {
            Ok(transactions) => Some(transactions),
            Err(e) => {
                error!("Error loading transactions, skipping write: {e:#}");
                None
            }
        }
    }

    fn save(&mut self, transactions: &[Transaction]) {
        if let Err(e) = self.try_save(transactions) {
            error!("Error saving transactions: {e:#}");
        }
    }

    fn try_save(&mut self, transactions: &[Transaction]) -> Result<()> {
        let Some(backend) = self.backend.as_mut() else {
            debug!("No persistence backend, skipping write");
            return Ok(());
        };
        let json = serde_json::to_string(transactions).context("Unable to serialize transactions")?;
        backend.set(STORAGE_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, TransactionType};
    use anyhow::bail;
    use chrono::{Duration, NaiveDate, TimeZone};
    use std::collections::HashSet;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// A clock that moves forward one second every time it is read.
    fn ticking_clock() -> impl Clock + Send + 'static {
        let current = Arc::new(Mutex::new(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()));
        move || {
            let mut now = current.lock().unwrap();
            *now += Duration::seconds(1);
            *now
        }
    }

    fn new_txn(amount: &str, date: &str, description: &str, kind: TransactionType) -> NewTransaction {
        NewTransaction {
            amount: Amount::from_str(amount).unwrap(),
            date: NaiveDate::from_str(date).unwrap(),
            description: description.to_string(),
            kind,
        }
    }

    fn coffee() -> NewTransaction {
        new_txn("-20", "2025-03-01", "coffee", TransactionType::Expense)
    }

    fn store() -> (Store, MemoryBackend) {
        let backend = MemoryBackend::default();
        let store = Store::new(backend.clone()).with_clock(ticking_clock());
        (store, backend)
    }

    /// Reads work, writes always fail.
    struct ReadOnlyBackend(MemoryBackend);

    impl Backend for ReadOnlyBackend {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            bail!("quota exceeded")
        }
    }

    /// Reads fail while `failing` is set.
    struct FlakyBackend {
        inner: MemoryBackend,
        failing: Arc<AtomicBool>,
    }

    impl Backend for FlakyBackend {
        fn get(&self, key: &str) -> Result<Option<String>> {
            if self.failing.load(Ordering::SeqCst) {
                bail!("database is locked");
            }
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_list_empty_store() {
        let (store, _) = store();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_create_then_list() {
        let (mut store, _) = store();
        let created = store.create(coffee());
        let listed = store.list();
        assert_eq!(listed.len(), 1);
        let txn = &listed[0];
        assert!(!txn.id().is_empty());
        assert_eq!(txn.created_at(), txn.updated_at());
        assert_eq!(txn.amount(), Amount::from_str("-20").unwrap());
        assert_eq!(txn.description(), "coffee");
        assert_eq!(txn.kind(), TransactionType::Expense);
        assert_eq!(txn, &created);
    }

    #[test]
    fn test_create_prepends() {
        let (mut store, _) = store();
        let first = store.create(coffee());
        let second = store.create(new_txn("1500", "2025-03-02", "salary", TransactionType::Income));
        let ids: Vec<String> = store.list().iter().map(|t| t.id().to_string()).collect();
        assert_eq!(ids, vec![second.id().to_string(), first.id().to_string()]);
    }

    #[test]
    fn test_ids_unique_across_burst() {
        let (mut store, _) = store();
        let ids: HashSet<String> = (0..200)
            .map(|_| store.create(coffee()).id().to_string())
            .collect();
        assert_eq!(ids.len(), 200);
        assert_eq!(store.list().len(), 200);
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let (mut store, _) = store();
        let original = store.create(coffee());
        let updates = TransactionUpdates {
            description: Some("espresso".to_string()),
            ..Default::default()
        };
        let updated = store.update(original.id(), updates).unwrap();
        assert_eq!(updated.description(), "espresso");
        assert_eq!(updated.amount(), original.amount());
        assert_eq!(updated.date(), original.date());
        assert_eq!(updated.kind(), original.kind());
        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.created_at(), original.created_at());
        assert!(updated.updated_at() > original.updated_at());
        assert_eq!(store.get(original.id()).unwrap(), updated);
    }

    #[test]
    fn test_update_keeps_position() {
        let (mut store, _) = store();
        let older = store.create(coffee());
        let newer = store.create(coffee());
        let updates = TransactionUpdates {
            date: Some(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()),
            ..Default::default()
        };
        store.update(older.id(), updates).unwrap();
        let listed = store.list();
        assert_eq!(listed[0].id(), newer.id());
        assert_eq!(listed[1].id(), older.id());
    }

    #[test]
    fn test_update_missing_id() {
        let (mut store, backend) = store();
        store.create(coffee());
        let before = backend.get(STORAGE_KEY).unwrap();
        let updates = TransactionUpdates {
            description: Some("x".to_string()),
            ..Default::default()
        };
        assert!(store.update("missing", updates).is_none());
        assert_eq!(backend.get(STORAGE_KEY).unwrap(), before);
    }

    #[test]
    fn test_delete_twice() {
        let (mut store, _) = store();
        let keep = store.create(coffee());
        let gone = store.create(coffee());
        assert!(store.delete(gone.id()));
        assert_eq!(store.list(), vec![keep.clone()]);
        assert!(!store.delete(gone.id()));
        assert_eq!(store.list(), vec![keep]);
    }

    #[test]
    fn test_malformed_data_reads_as_empty() {
        let backend = MemoryBackend::default();
        let mut raw = backend.clone();
        raw.set(STORAGE_KEY, "{not json").unwrap();
        let mut store = Store::new(backend).with_clock(ticking_clock());
        assert!(store.list().is_empty());
        assert!(!store.delete("anything"));

        // The next write replaces the unreadable value.
        let created = store.create(coffee());
        assert_eq!(store.list(), vec![created]);
    }

    #[test]
    fn test_reads_records_written_elsewhere() {
        let mut backend = MemoryBackend::default();
        backend
            .set(
                STORAGE_KEY,
                r#"[{"id":"1736935200000","amount":-50,"date":"2025-01-15","description":"Groceries",
                "type":"expense","createdAt":"2025-01-15T10:00:00.000Z","updatedAt":"2025-01-15T10:00:00.000Z"}]"#,
            )
            .unwrap();
        let store = Store::new(backend);
        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), "1736935200000");
    }

    #[test]
    fn test_detached_store() {
        let mut store = Store::detached();
        let created = store.create(coffee());
        assert!(!created.id().is_empty());
        assert!(store.list().is_empty());
        assert!(store.update(created.id(), TransactionUpdates::default()).is_none());
        assert!(!store.delete(created.id()));
    }

    #[test]
    fn test_failed_write_is_absorbed() {
        let mut seeded = MemoryBackend::default();
        let mut setup = Store::new(seeded.clone());
        let existing = setup.create(coffee());
        seeded.set("unrelated", "value").unwrap();

        let mut store = Store::new(ReadOnlyBackend(seeded)).with_clock(ticking_clock());
        let created = store.create(coffee());
        assert!(!created.id().is_empty());
        assert_eq!(store.list(), vec![existing.clone()]);
        assert!(store.delete(existing.id()));
        assert_eq!(store.list(), vec![existing]);
    }

    #[test]
    fn test_failed_read_does_not_overwrite() {
        let inner = MemoryBackend::default();
        let failing = Arc::new(AtomicBool::new(false));
        let backend = FlakyBackend {
            inner: inner.clone(),
            failing: failing.clone(),
        };
        let mut store = Store::new(backend).with_clock(ticking_clock());
        let existing: Vec<Transaction> = (0..5).map(|_| store.create(coffee())).collect();
        let stored = inner.get(STORAGE_KEY).unwrap();

        failing.store(true, Ordering::SeqCst);
        let unsaved = store.create(coffee());
        assert!(!unsaved.id().is_empty());
        let updates = TransactionUpdates {
            description: Some("espresso".to_string()),
            ..Default::default()
        };
        assert!(store.update(existing[0].id(), updates).is_none());
        assert!(!store.delete(existing[1].id()));
        assert!(store.list().is_empty());
        assert_eq!(inner.get(STORAGE_KEY).unwrap(), stored);

        failing.store(false, Ordering::SeqCst);
        let listed = store.list();
        assert_eq!(listed.len(), 5);
        assert!(listed.iter().all(|t| t.id() != unsaved.id()));
    }
}
