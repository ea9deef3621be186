//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod bill;
pub mod budget;
pub mod expense;
pub mod report;

pub use bill::{handle_bill_command, BillCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use report::{handle_insights_command, handle_spending_command, handle_summary_command};

use chrono::NaiveDate;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{BillFrequency, Money, MonthPeriod};

/// Parse a user-typed amount
pub fn parse_amount(s: &str) -> SpendwiseResult<Money> {
    Money::parse(s).map_err(|e| SpendwiseError::Validation(e.to_string()))
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> SpendwiseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        SpendwiseError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
    })
}

/// Parse a YYYY-MM month
pub fn parse_month(s: &str) -> SpendwiseResult<MonthPeriod> {
    MonthPeriod::parse(s).map_err(|e| SpendwiseError::Validation(e.to_string()))
}

pub fn parse_frequency(s: &str) -> SpendwiseResult<BillFrequency> {
    BillFrequency::parse(s).map_err(SpendwiseError::Validation)
}
