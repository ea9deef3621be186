//! Inputs shared by every insight rule

use chrono::NaiveDate;

use crate::models::{Budget, Expense, Money, MonthPeriod};
use crate::reports::spending::{categories, expenses_in_month, spent_by_category, total_spent};
use crate::storage::Snapshot;

/// One calendar month of expenses
#[derive(Debug, Clone)]
pub struct MonthWindow {
    pub period: MonthPeriod,
    pub expenses: Vec<Expense>,
    pub total: Money,
}

impl MonthWindow {
    fn new(expenses: &[Expense], period: MonthPeriod) -> Self {
        let expenses = expenses_in_month(expenses, period);
        let total = total_spent(&expenses);
        Self {
            period,
            expenses,
            total,
        }
    }

    pub fn category_total(&self, category: &str) -> Money {
        spent_by_category(&self.expenses, category)
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

/// Context provided to insight rules
#[derive(Debug, Clone)]
pub struct InsightContext {
    pub today: NaiveDate,
    /// Every expense, in store order
    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
    /// Distinct categories across all expenses, by first appearance
    pub categories: Vec<String>,
    pub current: MonthWindow,
    pub last: MonthWindow,
    pub two_months_ago: MonthWindow,
    /// Symbol used in insight descriptions
    pub currency: String,
}

impl InsightContext {
    pub fn new(
        expenses: &[Expense],
        budgets: &[Budget],
        today: NaiveDate,
        currency: impl Into<String>,
    ) -> Self {
        let this_month = MonthPeriod::containing(today);
        Self {
            today,
            expenses: expenses.to_vec(),
            budgets: budgets.to_vec(),
            categories: categories(expenses),
            current: MonthWindow::new(expenses, this_month),
            last: MonthWindow::new(expenses, this_month.prev()),
            two_months_ago: MonthWindow::new(expenses, this_month.prev().prev()),
            currency: currency.into(),
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot, today: NaiveDate, currency: impl Into<String>) -> Self {
        Self::new(&snapshot.expenses, &snapshot.budgets, today, currency)
    }

    /// Spending in a category across all recorded expenses
    pub fn spent_by_category(&self, category: &str) -> Money {
        spent_by_category(&self.expenses, category)
    }
}
