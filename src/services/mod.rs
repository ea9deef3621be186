//! Service layer for Spendwise
//!
//! The service layer is the store's mutation API: it validates input,
//! applies changes to the repositories inside `Storage::write`, which saves
//! each change before subscribers see it.
//!
//! Operations that reference an unknown id are no-ops: they return
//! `Ok(false)` or `Ok(None)` instead of an error.

pub mod bill;
pub mod budget;
pub mod expense;
pub mod insight;

pub use bill::{BillService, MarkPaidOutcome};
pub use budget::BudgetService;
pub use expense::{ExpenseFilter, ExpenseService};
pub use insight::InsightService;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::storage::{Record, Repository};

/// Resolve a user-typed id reference to exactly one record
pub(crate) fn resolve_reference<T: Record>(
    repo: &Repository<T>,
    reference: &str,
    not_found: fn(String) -> SpendwiseError,
) -> SpendwiseResult<T> {
    let mut matches = repo.find_matching(reference)?;
    match matches.len() {
        0 => Err(not_found(reference.to_string())),
        1 => Ok(matches.remove(0)),
        n => Err(SpendwiseError::Validation(format!(
            "'{}' is ambiguous ({} matches); use more characters of the id",
            reference, n
        ))),
    }
}
