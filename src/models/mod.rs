//! Core data models for Spendwise
//!
//! This module contains the data structures of the personal-finance domain:
//! expenses, budgets, bills, and the derived insights.

pub mod bill;
pub mod budget;
pub mod expense;
pub mod ids;
pub mod insight;
pub mod money;
pub mod period;

pub use bill::{Bill, BillFrequency, BillUpdate, NewBill};
pub use budget::{Budget, BudgetUpdate, NewBudget};
pub use expense::{Expense, NewExpense};
pub use ids::{BillId, BudgetId, ExpenseId};
pub use insight::{Insight, InsightKind, InsightValue, Trend};
pub use money::Money;
pub use period::MonthPeriod;
