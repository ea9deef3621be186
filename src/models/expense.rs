//! Expense model
//!
//! A single recorded outflow of money. Expenses are never edited in place:
//! a correction is a delete followed by a new expense.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// Maximum length of an expense description
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Categories offered when recording an expense
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Food & Drinks",
    "Transport",
    "Entertainment",
    "Shopping",
    "Utilities",
    "Health",
    "Education",
    "Other",
];

pub const PAYMENT_METHODS: [&str; 5] = ["UPI", "Card", "Cash", "Net Banking", "Wallet"];

pub const DEFAULT_PAYMENT_METHOD: &str = "UPI";

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Money,
    /// Category name, matched against budgets by equality
    pub category: String,
    pub date: NaiveDate,
    pub payment_method: String,
}

/// Input for recording a new expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub payment_method: String,
}

impl NewExpense {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
        payment_method: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            date,
            payment_method: payment_method.into(),
        }
    }

    /// Validate the input before it enters the store
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ExpenseValidationError::DescriptionTooLong(
                description.chars().count(),
            ));
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > Money::MAX_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::MissingCategory);
        }
        if self.payment_method.trim().is_empty() {
            return Err(ExpenseValidationError::MissingPaymentMethod);
        }
        Ok(())
    }

    /// Turn validated input into a stored expense with a fresh id
    pub fn into_expense(self) -> Expense {
        Expense {
            id: ExpenseId::new(),
            description: self.description.trim().to_string(),
            amount: self.amount,
            category: self.category.trim().to_string(),
            date: self.date,
            payment_method: self.payment_method.trim().to_string(),
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount,
            self.category
        )
    }
}

/// Validation errors for expense input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    DescriptionTooLong(usize),
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    MissingCategory,
    MissingPaymentMethod,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description is required"),
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description is too long ({} characters, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than 0 (got {})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Amount {} exceeds the maximum of {}",
                amount,
                Money::MAX_AMOUNT
            ),
            Self::MissingCategory => write!(f, "Category is required"),
            Self::MissingPaymentMethod => write!(f, "Payment method is required"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
