//! Reports module for Spendwise
//!
//! Pure aggregation over snapshots of the store: spending totals, budget
//! utilization and the bill schedule. Nothing here mutates state.

pub mod bill_schedule;
pub mod budget_status;
pub mod spending;

pub use bill_schedule::{days_until_due, total_due, BillSchedule};
pub use budget_status::{budget_utilization, BudgetOverview, BudgetState, BudgetStatus};
pub use spending::{
    categories, category_totals, expenses_in_month, spent_by_category, total_budget, total_spent,
    CategorySpending, SpendingSummary,
};

use crate::models::Money;

/// Round to the nearest integer, halves toward positive infinity
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// `part` as a percentage of `whole`; 0 when `whole` is not positive
pub fn percent_of(part: Money, whole: Money) -> f64 {
    if whole.is_positive() {
        part.cents() as f64 * 100.0 / whole.cents() as f64
    } else {
        0.0
    }
}
