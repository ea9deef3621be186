//! In-memory entity repository
//!
//! Each collection sits behind its own `RwLock`, so writers are serialized
//! per collection and readers get owned copies.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Bill, BillId, Budget, BudgetId, Expense, ExpenseId};

/// An entity with an identity
pub trait Record: Clone + Send + Sync {
    type Id: Copy + Eq + std::fmt::Display + Send + Sync;

    fn id(&self) -> Self::Id;

    /// Whether a user-typed id reference points at this record
    fn matches(&self, reference: &str) -> bool;
}

impl Record for Expense {
    type Id = ExpenseId;

    fn id(&self) -> ExpenseId {
        self.id
    }

    fn matches(&self, reference: &str) -> bool {
        self.id.matches(reference)
    }
}

impl Record for Budget {
    type Id = BudgetId;

    fn id(&self) -> BudgetId {
        self.id
    }

    fn matches(&self, reference: &str) -> bool {
        self.id.matches(reference)
    }
}

impl Record for Bill {
    type Id = BillId;

    fn id(&self) -> BillId {
        self.id
    }

    fn matches(&self, reference: &str) -> bool {
        self.id.matches(reference)
    }
}

/// An ordered collection of records
pub struct Repository<T: Record> {
    data: RwLock<Vec<T>>,
}

impl<T: Record> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Repository<T> {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> SpendwiseResult<RwLockReadGuard<'_, Vec<T>>> {
        self.data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> SpendwiseResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.data
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the whole collection
    pub fn replace_all(&self, records: Vec<T>) -> SpendwiseResult<()> {
        *self.write()? = records;
        Ok(())
    }

    /// Owned copy of every record, in collection order
    pub fn get_all(&self) -> SpendwiseResult<Vec<T>> {
        Ok(self.read()?.clone())
    }

    pub fn get(&self, id: T::Id) -> SpendwiseResult<Option<T>> {
        Ok(self.read()?.iter().find(|r| r.id() == id).cloned())
    }

    /// Records whose id matches a user-typed reference
    pub fn find_matching(&self, reference: &str) -> SpendwiseResult<Vec<T>> {
        Ok(self
            .read()?
            .iter()
            .filter(|r| r.matches(reference))
            .cloned()
            .collect())
    }

    pub fn count(&self) -> SpendwiseResult<usize> {
        Ok(self.read()?.len())
    }

    /// Insert at the front of the collection
    pub fn insert_front(&self, record: T) -> SpendwiseResult<()> {
        self.write()?.insert(0, record);
        Ok(())
    }

    /// Append to the end of the collection
    pub fn push(&self, record: T) -> SpendwiseResult<()> {
        self.write()?.push(record);
        Ok(())
    }

    /// Replace the record with the same id; returns the previous value
    pub fn replace(&self, record: T) -> SpendwiseResult<Option<T>> {
        let mut data = self.write()?;
        Ok(data
            .iter_mut()
            .find(|r| r.id() == record.id())
            .map(|slot| std::mem::replace(slot, record)))
    }

    /// Remove a record by id
    pub fn remove(&self, id: T::Id) -> SpendwiseResult<Option<T>> {
        let mut data = self.write()?;
        Ok(data
            .iter()
            .position(|r| r.id() == id)
            .map(|index| data.remove(index)))
    }

    /// Run a mutation with exclusive access to the collection
    pub fn transact<R, F>(&self, f: F) -> SpendwiseResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let mut data = self.write()?;
        Ok(f(&mut data))
    }
}
