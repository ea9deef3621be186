//! Expense service
//!
//! Records and deletes expenses. Expenses have no update operation; an edit
//! is a delete followed by a new expense.

use tracing::{debug, info, warn};

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Expense, ExpenseId, MonthPeriod, NewExpense};
use crate::storage::{Applied, Storage, StoreEvent};

use super::resolve_reference;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Optional filters for listing expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub month: Option<MonthPeriod>,
    pub search: Option<String>,
}

impl ExpenseFilter {
    fn accepts(&self, expense: &Expense) -> bool {
        if let Some(category) = &self.category {
            if !expense.category.eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }
        if let Some(month) = &self.month {
            if !month.contains(expense.date) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !expense.description.to_lowercase().contains(&needle)
                && !expense.category.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense and return its id
    pub fn add(&self, input: NewExpense) -> SpendwiseResult<ExpenseId> {
        if let Err(e) = input.validate() {
            warn!(error = %e, "Rejected expense");
            return Err(SpendwiseError::Validation(e.to_string()));
        }

        let expense = input.into_expense();
        let id = expense.id;
        info!(%id, category = %expense.category, amount = %expense.amount, "Adding expense");

        self.storage.write(|store| {
            // Newest first
            store.expenses.insert_front(expense)?;
            Ok(Applied::changed(id, StoreEvent::ExpenseAdded(id)))
        })
    }

    /// Delete an expense; returns false if no expense had this id
    pub fn delete(&self, id: ExpenseId) -> SpendwiseResult<bool> {
        self.storage.write(|store| match store.expenses.remove(id)? {
            Some(removed) => {
                info!(%id, description = %removed.description, "Deleted expense");
                Ok(Applied::changed(true, StoreEvent::ExpenseDeleted(id)))
            }
            None => {
                debug!(%id, "Delete of unknown expense ignored");
                Ok(Applied::unchanged(false))
            }
        })
    }

    pub fn get(&self, id: ExpenseId) -> SpendwiseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// All expenses, newest first
    pub fn list(&self) -> SpendwiseResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Expenses accepted by the filter, newest first
    pub fn list_filtered(&self, filter: &ExpenseFilter) -> SpendwiseResult<Vec<Expense>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|e| filter.accepts(e))
            .collect())
    }

    /// Find an expense by full id or short display id
    pub fn resolve(&self, reference: &str) -> SpendwiseResult<Expense> {
        resolve_reference(
            &self.storage.expenses,
            reference,
            SpendwiseError::expense_not_found,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::{Persistence, Snapshot};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(description: &str, units: i64, category: &str, on: NaiveDate) -> NewExpense {
        NewExpense::new(description, Money::from_units(units), category, on, "UPI")
    }

    #[test]
    fn test_add_inserts_newest_first() {
        let storage = Storage::in_memory();
        let service = ExpenseService::new(&storage);

        let first = service
            .add(expense("Metro Card", 500, "Transport", date(2025, 1, 13)))
            .unwrap();
        let second = service
            .add(expense("Groceries", 2500, "Food & Drinks", date(2025, 1, 15)))
            .unwrap();

        let ids: Vec<_> = service.list().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![second, first]);
        assert_eq!(storage.revision(), 2);
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let storage = Storage::in_memory();
        let service = ExpenseService::new(&storage);

        let err = service
            .add(expense("Refund", 0, "Shopping", date(2025, 1, 7)))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(service.list().unwrap().is_empty());
        assert_eq!(storage.revision(), 0);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let storage = Storage::in_memory();
        let service = ExpenseService::new(&storage);
        let id = service
            .add(expense("Movie Tickets", 800, "Entertainment", date(2025, 1, 8)))
            .unwrap();

        assert!(!service.delete(ExpenseId::new()).unwrap());
        assert_eq!(storage.revision(), 1);

        assert!(service.delete(id).unwrap());
        assert!(service.get(id).unwrap().is_none());
        assert!(!service.delete(id).unwrap());
    }

    #[test]
    fn test_list_filtered() {
        let storage = Storage::in_memory();
        let service = ExpenseService::new(&storage);
        service
            .add(expense("Uber Rides", 1200, "Transport", date(2025, 1, 12)))
            .unwrap();
        service
            .add(expense("Metro Card", 500, "Transport", date(2025, 2, 2)))
            .unwrap();
        service
            .add(expense("Medicine", 450, "Health", date(2025, 2, 3)))
            .unwrap();

        let transport = ExpenseFilter {
            category: Some("transport".into()),
            ..Default::default()
        };
        assert_eq!(service.list_filtered(&transport).unwrap().len(), 2);

        let february = ExpenseFilter {
            month: Some(MonthPeriod::new(2025, 2).unwrap()),
            ..Default::default()
        };
        assert_eq!(service.list_filtered(&february).unwrap().len(), 2);

        let search = ExpenseFilter {
            search: Some("metro".into()),
            ..Default::default()
        };
        let found = service.list_filtered(&search).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "Metro Card");
    }

    #[test]
    fn test_resolve_by_short_id() {
        let storage = Storage::in_memory();
        let service = ExpenseService::new(&storage);
        let id = service
            .add(expense("Netflix", 649, "Entertainment", date(2025, 1, 10)))
            .unwrap();

        assert_eq!(service.resolve(&id.to_string()).unwrap().id, id);
        assert!(service.resolve("exp-zzzzzzzz").unwrap_err().is_not_found());
    }

    struct ReadOnlyDisk;

    impl Persistence for ReadOnlyDisk {
        fn load(&self) -> SpendwiseResult<Snapshot> {
            Ok(Snapshot::default())
        }

        fn save(&self, _snapshot: &Snapshot) -> SpendwiseResult<()> {
            Err(SpendwiseError::Storage("read-only file system".into()))
        }
    }

    #[test]
    fn test_failed_save_leaves_store_unchanged() {
        let storage = Storage::new(Box::new(ReadOnlyDisk));
        let service = ExpenseService::new(&storage);

        let err = service
            .add(expense("Groceries", 2500, "Food", date(2025, 1, 15)))
            .unwrap_err();
        assert!(matches!(err, SpendwiseError::Storage(_)));
        assert!(service.list().unwrap().is_empty());
        assert_eq!(storage.revision(), 0);
    }

    #[test]
    fn test_rejects_amount_above_maximum() {
        let storage = Storage::in_memory();
        let service = ExpenseService::new(&storage);
        let huge = Money::parse("90000000000000000").unwrap();

        let mut input = expense("Yacht", 1, "Shopping", date(2025, 1, 15));
        input.amount = huge;
        assert!(service.add(input).unwrap_err().is_validation());
        assert_eq!(storage.revision(), 0);
    }
}
