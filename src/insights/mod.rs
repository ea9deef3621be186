//! Rule-based spending insights
//!
//! Insights are derived from a snapshot of expenses and budgets plus the
//! current date. Rules run in a fixed order and the combined list is capped.

pub mod context;
pub mod engine;
pub mod rules;

pub use context::{InsightContext, MonthWindow};
pub use engine::{InsightEngine, InsightRule};
pub use rules::{
    BudgetAlertRule, CategoryTrendRule, MonthOverMonthRule, MonthlySavingsRule, TopCategoryRule,
};
