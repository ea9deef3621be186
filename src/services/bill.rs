//! Bill service
//!
//! Manages bill reminders and payment. Paying a recurring bill schedules its
//! next cycle according to the configured [`RecurringBillPolicy`].

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::RecurringBillPolicy;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Bill, BillId, BillUpdate, NewBill};
use crate::storage::{Applied, Storage, StoreEvent};

use super::resolve_reference;

/// Result of paying a bill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkPaidOutcome {
    /// The bill as paid (carries today's paid date)
    pub paid: Bill,
    /// The unpaid bill that now represents the next cycle, if any
    pub next: Option<Bill>,
}

enum PayResult {
    Unknown,
    AlreadyPaid,
    Paid(MarkPaidOutcome),
}

/// Service for bill management
pub struct BillService<'a> {
    storage: &'a Storage,
    clock: &'a dyn Clock,
    policy: RecurringBillPolicy,
}

impl<'a> BillService<'a> {
    pub fn new(storage: &'a Storage, clock: &'a dyn Clock) -> Self {
        Self {
            storage,
            clock,
            policy: RecurringBillPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RecurringBillPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Create a bill and return its id
    pub fn add(&self, input: NewBill) -> SpendwiseResult<BillId> {
        let bill = input.into_bill();
        if let Err(e) = bill.validate() {
            warn!(error = %e, "Rejected bill");
            return Err(SpendwiseError::Validation(e.to_string()));
        }

        let id = bill.id;
        info!(%id, name = %bill.name, due = %bill.due_date, "Adding bill");

        self.storage.write(|store| {
            store.bills.push(bill)?;
            Ok(Applied::changed(id, StoreEvent::BillAdded(id)))
        })
    }

    /// Apply a partial update; returns `None` if no bill had this id
    pub fn update(&self, id: BillId, update: &BillUpdate) -> SpendwiseResult<Option<Bill>> {
        self.storage.write(|store| {
            let merged = store.bills.transact(|bills| -> SpendwiseResult<Option<Bill>> {
                let Some(slot) = bills.iter_mut().find(|b| b.id == id) else {
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
                Some(bill) => {
                    info!(%id, "Updated bill");
                    Ok(Applied::changed(Some(bill), StoreEvent::BillUpdated(id)))
                }
                None => {
                    debug!(%id, "Update of unknown bill ignored");
                    Ok(Applied::unchanged(None))
                }
            }
        })
    }

    /// Delete a bill; returns false if no bill had this id
    pub fn delete(&self, id: BillId) -> SpendwiseResult<bool> {
        self.storage.write(|store| match store.bills.remove(id)? {
            Some(removed) => {
                info!(%id, name = %removed.name, "Deleted bill");
                Ok(Applied::changed(true, StoreEvent::BillDeleted(id)))
            }
            None => {
                debug!(%id, "Delete of unknown bill ignored");
                Ok(Applied::unchanged(false))
            }
        })
    }

    /// Mark a bill paid today
    ///
    /// Returns `None` when the id is unknown or the bill is already paid; a
    /// paid bill never schedules a second cycle. The payment and the next
    /// cycle are applied under one write lock.
    pub fn mark_paid(&self, id: BillId) -> SpendwiseResult<Option<MarkPaidOutcome>> {
        let today = self.clock.today();
        let policy = self.policy;

        self.storage.write(|store| {
            let result = store.bills.transact(|bills| {
                let Some(index) = bills.iter().position(|b| b.id == id) else {
                    return PayResult::Unknown;
                };
                if bills[index].is_paid() {
                    return PayResult::AlreadyPaid;
                }

                let mut paid = bills[index].clone();
                paid.paid_date = Some(today);
                let next_due = paid.next_due_date();

                match (policy, next_due) {
                    (RecurringBillPolicy::SpawnSuccessor, Some(due_date)) => {
                        let successor = Bill {
                            id: BillId::new(),
                            due_date,
                            paid_date: None,
                            ..paid.clone()
                        };
                        bills[index] = paid.clone();
                        bills.push(successor.clone());
                        PayResult::Paid(MarkPaidOutcome {
                            paid,
                            next: Some(successor),
                        })
                    }
                    (RecurringBillPolicy::AdvanceInPlace, Some(due_date)) => {
                        let advanced = Bill {
                            due_date,
                            paid_date: None,
                            ..paid.clone()
                        };
                        bills[index] = advanced.clone();
                        PayResult::Paid(MarkPaidOutcome {
                            paid,
                            next: Some(advanced),
                        })
                    }
                    (_, None) => {
                        bills[index] = paid.clone();
                        PayResult::Paid(MarkPaidOutcome { paid, next: None })
                    }
                }
            })?;

            match result {
                PayResult::Unknown => {
                    debug!(%id, "Payment of unknown bill ignored");
                    Ok(Applied::unchanged(None))
                }
                PayResult::AlreadyPaid => {
                    debug!(%id, "Bill already paid");
                    Ok(Applied::unchanged(None))
                }
                PayResult::Paid(outcome) => {
                    let successor = outcome
                        .next
                        .as_ref()
                        .map(|b| b.id)
                        .filter(|next_id| *next_id != id);
                    info!(
                        %id,
                        paid_date = %today,
                        next_due = ?outcome.next.as_ref().map(|b| b.due_date),
                        "Marked bill paid"
                    );
                    Ok(Applied::changed(
                        Some(outcome),
                        StoreEvent::BillPaid { id, successor },
                    ))
                }
            }
        })
    }

    pub fn get(&self, id: BillId) -> SpendwiseResult<Option<Bill>> {
        self.storage.bills.get(id)
    }

    pub fn list(&self) -> SpendwiseResult<Vec<Bill>> {
        self.storage.bills.get_all()
    }

    /// Find a bill by full id or short display id
    pub fn resolve(&self, reference: &str) -> SpendwiseResult<Bill> {
        resolve_reference(&self.storage.bills, reference, SpendwiseError::bill_not_found)
    }
}
