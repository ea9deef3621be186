//! Change notification
//!
//! Dependents subscribe to the store and are called synchronously after
//! every committed mutation.

use std::sync::RwLock;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{BillId, BudgetId, ExpenseId};

/// A committed mutation of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    ExpenseAdded(ExpenseId),
    ExpenseDeleted(ExpenseId),
    BudgetAdded(BudgetId),
    BudgetUpdated(BudgetId),
    BudgetDeleted(BudgetId),
    BillAdded(BillId),
    BillUpdated(BillId),
    BillDeleted(BillId),
    BillPaid {
        id: BillId,
        successor: Option<BillId>,
    },
}

type Listener = Box<dyn Fn(&StoreEvent, u64) + Send + Sync>;

/// Registry of change listeners
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: RwLock<Vec<Listener>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it receives the event and the new revision
    pub fn subscribe<F>(&self, listener: F) -> SpendwiseResult<()>
    where
        F: Fn(&StoreEvent, u64) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?
            .push(Box::new(listener));
        Ok(())
    }

    pub fn notify(&self, event: &StoreEvent, revision: u64) -> SpendwiseResult<()> {
        let listeners = self
            .listeners
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        for listener in listeners.iter() {
            listener(event, revision);
        }
        Ok(())
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().map(|l| l.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_listeners_receive_events_in_order() {
        let notifier = ChangeNotifier::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        notifier
            .subscribe(move |event, revision| sink.lock().unwrap().push((*event, revision)))
            .unwrap();
        assert_eq!(notifier.listener_count(), 1);

        let first = ExpenseId::new();
        let second = BudgetId::new();
        notifier.notify(&StoreEvent::ExpenseAdded(first), 1).unwrap();
        notifier.notify(&StoreEvent::BudgetDeleted(second), 2).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (StoreEvent::ExpenseAdded(first), 1),
                (StoreEvent::BudgetDeleted(second), 2)
            ]
        );
    }
}
