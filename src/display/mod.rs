//! Display formatting for terminal output
//!
//! Renders models and reports to strings. Nothing here reads or writes the
//! store.

pub mod bill;
pub mod dashboard;
pub mod expense;
pub mod format;
pub mod insight;

pub use bill::format_bill_details;
pub use dashboard::Dashboard;
pub use expense::{format_expense_details, format_expense_list, format_expense_row};
pub use format::{format_bar, truncate};
pub use insight::{format_insight_list, format_insight_value};
