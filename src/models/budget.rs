//! Budget model
//!
//! A per-category spending limit. Category uniqueness among budgets is not
//! enforced; expenses are matched to budgets by category name equality.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;

/// A spending limit for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub category: String,
    pub limit: Money,
    /// Display tag used by presentation layers
    pub color: String,
}

impl Budget {
    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::MissingCategory);
        }
        if !self.limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit(self.limit));
        }
        if self.limit > Money::MAX_AMOUNT {
            return Err(BudgetValidationError::LimitTooLarge(self.limit));
        }
        if self.color.trim().is_empty() {
            return Err(BudgetValidationError::MissingColor);
        }
        Ok(())
    }

    /// Apply a partial update, returning the merged budget
    pub fn merged(&self, update: &BudgetUpdate) -> Self {
        Self {
            id: self.id,
            category: update
                .category
                .as_deref()
                .map(|c| c.trim().to_string())
                .unwrap_or_else(|| self.category.clone()),
            limit: update.limit.unwrap_or(self.limit),
            color: update.color.clone().unwrap_or_else(|| self.color.clone()),
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.limit)
    }
}

/// Input for creating a budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudget {
    pub category: String,
    pub limit: Money,
    pub color: String,
}

impl NewBudget {
    pub fn new(category: impl Into<String>, limit: Money, color: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            limit,
            color: color.into(),
        }
    }

    pub fn into_budget(self) -> Budget {
        Budget {
            id: BudgetId::new(),
            category: self.category.trim().to_string(),
            limit: self.limit,
            color: self.color,
        }
    }
}

/// Partial update for a budget; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetUpdate {
    pub category: Option<String>,
    pub limit: Option<Money>,
    pub color: Option<String>,
}

impl BudgetUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.limit.is_none() && self.color.is_none()
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    MissingCategory,
    NonPositiveLimit(Money),
    LimitTooLarge(Money),
    MissingColor,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCategory => write!(f, "Category is required"),
            Self::NonPositiveLimit(limit) => {
                write!(f, "Budget limit must be greater than 0 (got {})", limit)
            }
            Self::LimitTooLarge(limit) => write!(
                f,
                "Budget limit {} exceeds the maximum of {}",
                limit,
                Money::MAX_AMOUNT
            ),
            Self::MissingColor => write!(f, "Color tag is required"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
