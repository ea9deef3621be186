//! Budget service
//!
//! Creates, updates and deletes per-category budgets.

use tracing::{debug, info, warn};

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Budget, BudgetId, BudgetUpdate, NewBudget};
use crate::storage::{Applied, Storage, StoreEvent};

use super::resolve_reference;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a budget and return its id
    pub fn add(&self, input: NewBudget) -> SpendwiseResult<BudgetId> {
        let budget = input.into_budget();
        if let Err(e) = budget.validate() {
            warn!(error = %e, "Rejected budget");
            return Err(SpendwiseError::Validation(e.to_string()));
        }

        let id = budget.id;
        info!(%id, category = %budget.category, limit = %budget.limit, "Adding budget");

        self.storage.write(|store| {
            store.budgets.push(budget)?;
            Ok(Applied::changed(id, StoreEvent::BudgetAdded(id)))
        })
    }

    /// Apply a partial update; returns `None` if no budget had this id
    ///
    /// The lookup, merge and replace happen under one write lock.
    pub fn update(&self, id: BudgetId, update: &BudgetUpdate) -> SpendwiseResult<Option<Budget>> {
        self.storage.write(|store| {
            let merged = store.budgets.transact(|budgets| -> SpendwiseResult<Option<Budget>> {
                let Some(slot) = budgets.iter_mut().find(|b| b.id == id) else {
                    return Ok(None);
                };
                let merged = slot.merged(update);
                merged
                    .validate()
                    .map_err(|e| SpendwiseError::Validation(e.to_string()))?;
                *slot = merged.clone();
                Ok(Some(merged))
            })??;

            match merged {
                Some(budget) => {
                    info!(%id, limit = %budget.limit, "Updated budget");
                    Ok(Applied::changed(Some(budget), StoreEvent::BudgetUpdated(id)))
                }
                None => {
                    debug!(%id, "Update of unknown budget ignored");
                    Ok(Applied::unchanged(None))
                }
            }
        })
    }

    /// Delete a budget; returns false if no budget had this id
    pub fn delete(&self, id: BudgetId) -> SpendwiseResult<bool> {
        self.storage.write(|store| match store.budgets.remove(id)? {
            Some(removed) => {
                info!(%id, category = %removed.category, "Deleted budget");
                Ok(Applied::changed(true, StoreEvent::BudgetDeleted(id)))
            }
            None => {
                debug!(%id, "Delete of unknown budget ignored");
                Ok(Applied::unchanged(false))
            }
        })
    }

    pub fn get(&self, id: BudgetId) -> SpendwiseResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    pub fn list(&self) -> SpendwiseResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Find a budget by full id, short display id, or category name
    /// (ASCII case-insensitive)
    pub fn resolve(&self, reference: &str) -> SpendwiseResult<Budget> {
        let by_category: Vec<Budget> = self
            .list()?
            .into_iter()
            .filter(|b| b.category.eq_ignore_ascii_case(reference.trim()))
            .collect();
        if let [budget] = by_category.as_slice() {
            return Ok(budget.clone());
        }
        resolve_reference(
            &self.storage.budgets,
            reference,
            SpendwiseError::budget_not_found,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn food() -> NewBudget {
        NewBudget::new("Food & Drinks", Money::from_units(8000), "bg-chart-1")
    }

    #[test]
    fn test_add_and_list() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        let id = service.add(food()).unwrap();

        let budgets = service.list().unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].id, id);
    }

    #[test]
    fn test_add_rejects_zero_limit() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        let mut input = food();
        input.limit = Money::zero();
        assert!(service.add(input).unwrap_err().is_validation());
    }

    #[test]
    fn test_update_partial() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        let id = service.add(food()).unwrap();

        let updated = service
            .update(
                id,
                &BudgetUpdate {
                    limit: Some(Money::from_units(9000)),
                    color: Some("bg-chart-5".into()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.limit, Money::from_units(9000));
        assert_eq!(updated.color, "bg-chart-5");
        assert_eq!(updated.category, "Food & Drinks");
        assert_eq!(service.get(id).unwrap(), Some(updated));
    }

    #[test]
    fn test_update_validates_merged_result() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        let id = service.add(food()).unwrap();

        let err = service
            .update(
                id,
                &BudgetUpdate {
                    limit: Some(Money::from_cents(-100)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get(id).unwrap().unwrap().limit, Money::from_units(8000));
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        service.add(food()).unwrap();

        let ghost = BudgetId::new();
        assert!(service.update(ghost, &BudgetUpdate::default()).unwrap().is_none());
        assert!(!service.delete(ghost).unwrap());
        assert_eq!(service.list().unwrap().len(), 1);
        assert_eq!(storage.revision(), 1);
    }

    #[test]
    fn test_resolve_by_category() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        let id = service.add(food()).unwrap();
        assert_eq!(service.resolve("food & drinks").unwrap().id, id);
        assert!(service.resolve("Travel").unwrap_err().is_not_found());
    }

    #[test]
    fn test_concurrent_partial_updates_both_apply() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        let id = service.add(food()).unwrap();

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for units in 8001..8051 {
                    let limit = BudgetUpdate {
                        limit: Some(Money::from_units(units)),
                        ..Default::default()
                    };
                    BudgetService::new(&storage).update(id, &limit).unwrap();
                }
            });
            scope.spawn(|| {
                for n in 0..50 {
                    let color = BudgetUpdate {
                        color: Some(format!("bg-chart-{}", n)),
                        ..Default::default()
                    };
                    BudgetService::new(&storage).update(id, &color).unwrap();
                }
            });
        });

        let budget = service.get(id).unwrap().unwrap();
        assert_eq!(budget.limit, Money::from_units(8050));
        assert_eq!(budget.color, "bg-chart-49");
        assert_eq!(storage.revision(), 101);
    }
}
