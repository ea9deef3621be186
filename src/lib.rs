//! Spendwise - personal finance tracking
//!
//! This library provides the core of the Spendwise expense tracker: a record
//! store for expenses, budgets and bill reminders, pure aggregation over
//! that store, and a rule engine that turns recent spending into insights.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, thresholds and path management
//! - `error`: Custom error types
//! - `clock`: Injectable source of "today"
//! - `models`: Core data models (expenses, budgets, bills, insights)
//! - `storage`: In-memory repositories, change notification and persistence
//! - `services`: Validated mutations over the store
//! - `reports`: Spending totals, budget utilization and the bill schedule
//! - `insights`: Rule-based insight generation
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `spendwise` binary
//!
//! # Example
//!
//! ```rust
//! use spendwise::clock::FixedClock;
//! use spendwise::config::Settings;
//! use spendwise::models::{Money, NewBudget, NewExpense};
//! use spendwise::services::{BudgetService, ExpenseService, InsightService};
//! use spendwise::storage::Storage;
//!
//! let storage = Storage::in_memory();
//! let clock = FixedClock(chrono::NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
//! let settings = Settings::default();
//!
//! ExpenseService::new(&storage)
//!     .add(NewExpense::new(
//!         "Groceries",
//!         Money::from_units(2500),
//!         "Food",
//!         chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
//!         "UPI",
//!     ))
//!     .unwrap();
//! BudgetService::new(&storage)
//!     .add(NewBudget::new("Food", Money::from_units(2000), "bg-chart-1"))
//!     .unwrap();
//!
//! let insights = InsightService::new(&storage, &clock, &settings).insights().unwrap();
//! assert!(insights.iter().any(|i| i.title == "Budget Exceeded"));
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod insights;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SpendwiseError, SpendwiseResult};
