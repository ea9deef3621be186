//! Storage layer for Spendwise
//!
//! Holds the expense, budget and bill collections in memory, tracks a
//! revision number, notifies subscribers of changes, and saves snapshots
//! through a pluggable persistence backend.

pub mod events;
pub mod file_io;
pub mod persistence;
pub mod repository;

pub use events::{ChangeNotifier, StoreEvent};
pub use file_io::{read_json, write_json_atomic};
pub use persistence::{JsonFilePersistence, MemoryPersistence, Persistence, Snapshot};
pub use repository::{Record, Repository};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::config::paths::SpendwisePaths;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Bill, Budget, Expense};

/// Outcome of a store write: the caller's value and the event to commit
#[derive(Debug)]
pub struct Applied<R> {
    pub value: R,
    pub event: Option<StoreEvent>,
}

impl<R> Applied<R> {
    /// The write changed the store
    pub fn changed(value: R, event: StoreEvent) -> Self {
        Self {
            value,
            event: Some(event),
        }
    }

    /// The write was a no-op
    pub fn unchanged(value: R) -> Self {
        Self { value, event: None }
    }
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    pub expenses: Repository<Expense>,
    pub budgets: Repository<Budget>,
    pub bills: Repository<Bill>,
    backend: Box<dyn Persistence>,
    revision: AtomicU64,
    notifier: ChangeNotifier,
    writer: Mutex<()>,
}

impl Storage {
    /// Create an empty storage over the given backend (nothing is loaded yet)
    pub fn new(backend: Box<dyn Persistence>) -> Self {
        Self {
            expenses: Repository::new(),
            budgets: Repository::new(),
            bills: Repository::new(),
            backend,
            revision: AtomicU64::new(0),
            notifier: ChangeNotifier::new(),
            writer: Mutex::new(()),
        }
    }

    /// Storage that only lives for the session
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryPersistence::new()))
    }

    /// Open the JSON ledger under the given paths and load it
    pub fn open(paths: &SpendwisePaths) -> SpendwiseResult<Self> {
        paths.ensure_directories()?;
        let mut storage = Self::new(Box::new(JsonFilePersistence::new(paths.ledger_file())));
        storage.load_all()?;
        Ok(storage)
    }

    /// Storage seeded from a snapshot, without touching the backend
    pub fn from_snapshot(backend: Box<dyn Persistence>, snapshot: Snapshot) -> SpendwiseResult<Self> {
        let storage = Self::new(backend);
        storage.restore(snapshot)?;
        Ok(storage)
    }

    /// Load all data from the backend
    pub fn load_all(&mut self) -> SpendwiseResult<()> {
        let snapshot = self.backend.load()?;
        debug!(
            expenses = snapshot.expenses.len(),
            budgets = snapshot.budgets.len(),
            bills = snapshot.bills.len(),
            "Loaded ledger"
        );
        self.restore(snapshot)
    }

    fn restore(&self, snapshot: Snapshot) -> SpendwiseResult<()> {
        self.expenses.replace_all(snapshot.expenses)?;
        self.budgets.replace_all(snapshot.budgets)?;
        self.bills.replace_all(snapshot.bills)?;
        Ok(())
    }

    /// Owned copy of every collection
    pub fn snapshot(&self) -> SpendwiseResult<Snapshot> {
        Ok(Snapshot {
            expenses: self.expenses.get_all()?,
            budgets: self.budgets.get_all()?,
            bills: self.bills.get_all()?,
        })
    }

    /// Number of committed mutations since this storage was created
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Register a change listener
    ///
    /// Listeners run while the write is still serialized, so they must not
    /// mutate the store themselves.
    pub fn subscribe<F>(&self, listener: F) -> SpendwiseResult<()>
    where
        F: Fn(&StoreEvent, u64) + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener)
    }

    /// Apply a mutation as one serialized write
    ///
    /// Writers run one at a time. A write that reports an event is saved
    /// through the backend, then the revision is bumped and listeners are
    /// notified, so saves happen in revision order. If the mutation fails or
    /// the save fails, every collection is restored to its state before the
    /// write and the revision is unchanged.
    pub fn write<R, F>(&self, mutation: F) -> SpendwiseResult<R>
    where
        F: FnOnce(&Self) -> SpendwiseResult<Applied<R>>,
    {
        let _writer = self
            .writer
            .lock()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire writer lock: {}", e)))?;
        let before = self.snapshot()?;

        let applied = match mutation(self) {
            Ok(applied) => applied,
            Err(e) => {
                self.restore(before)?;
                return Err(e);
            }
        };
        let Some(event) = applied.event else {
            return Ok(applied.value);
        };

        if let Err(e) = self.backend.save(&self.snapshot()?) {
            warn!(error = %e, ?event, "Save failed, rolling back");
            self.restore(before)?;
            return Err(e);
        }

        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(?event, revision, "Committed change");
        self.notifier.notify(&event, revision)?;
        Ok(applied.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewBudget, NewExpense};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.snapshot().unwrap(), Snapshot::default());
        assert_eq!(storage.revision(), 0);
    }

    struct FailingPersistence;

    impl Persistence for FailingPersistence {
        fn load(&self) -> SpendwiseResult<Snapshot> {
            Ok(Snapshot::default())
        }

        fn save(&self, _snapshot: &Snapshot) -> SpendwiseResult<()> {
            Err(SpendwiseError::Storage("disk full".into()))
        }
    }

    fn food() -> Budget {
        NewBudget::new("Food", Money::from_units(2000), "bg-chart-1").into_budget()
    }

    #[test]
    fn test_write_persists_and_notifies() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        storage
            .subscribe(move |_, revision| sink.lock().unwrap().push(revision))
            .unwrap();

        let budget = food();
        let id = budget.id;
        storage
            .write(|store| {
                store.budgets.push(budget.clone())?;
                Ok(Applied::changed((), StoreEvent::BudgetAdded(id)))
            })
            .unwrap();

        assert_eq!(storage.revision(), 1);
        assert_eq!(*seen.lock().unwrap(), vec![1]);

        let reopened = Storage::open(&paths).unwrap();
        assert_eq!(reopened.budgets.get_all().unwrap(), vec![budget]);
    }

    #[test]
    fn test_unchanged_write_keeps_revision() {
        let storage = Storage::in_memory();
        let value = storage.write(|_| Ok(Applied::unchanged(7))).unwrap();
        assert_eq!(value, 7);
        assert_eq!(storage.revision(), 0);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let storage = Storage::new(Box::new(FailingPersistence));
        let notified = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&notified);
        storage
            .subscribe(move |_, _| *sink.lock().unwrap() += 1)
            .unwrap();

        let budget = food();
        let result = storage.write(|store| {
            store.budgets.push(budget.clone())?;
            Ok(Applied::changed((), StoreEvent::BudgetAdded(budget.id)))
        });

        assert!(matches!(result, Err(SpendwiseError::Storage(_))));
        assert_eq!(storage.budgets.count().unwrap(), 0);
        assert_eq!(storage.revision(), 0);
        assert_eq!(*notified.lock().unwrap(), 0);
    }

    #[test]
    fn test_failed_mutation_rolls_back() {
        let storage = Storage::in_memory();
        let result: SpendwiseResult<()> = storage.write(|store| {
            store.budgets.push(food())?;
            Err(SpendwiseError::Validation("rejected".into()))
        });

        assert!(result.unwrap_err().is_validation());
        assert_eq!(storage.budgets.count().unwrap(), 0);
        assert_eq!(storage.revision(), 0);
    }

    #[test]
    fn test_concurrent_writes_are_serialized() {
        let storage = Arc::new(Storage::in_memory());
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let storage = Arc::clone(&storage);
                std::thread::spawn(move || {
                    let expense = NewExpense::new(
                        format!("item {}", n),
                        Money::from_units(10),
                        "Food",
                        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                        "UPI",
                    )
                    .into_expense();
                    let id = expense.id;
                    storage
                        .write(|store| {
                            store.expenses.insert_front(expense)?;
                            Ok(Applied::changed((), StoreEvent::ExpenseAdded(id)))
                        })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(storage.revision(), 8);
        assert_eq!(storage.expenses.count().unwrap(), 8);
    }
}
