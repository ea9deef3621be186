//! Spending Report
//!
//! Totals by category and by calendar month.

use crate::models::{Budget, Expense, Money, MonthPeriod};

use super::{percent_of, round_half_up};

/// Sum of every expense in `category` (exact name match)
pub fn spent_by_category(expenses: &[Expense], category: &str) -> Money {
    expenses
        .iter()
        .filter(|e| e.category == category)
        .map(|e| e.amount)
        .sum()
}

pub fn total_spent(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn total_budget(budgets: &[Budget]) -> Money {
    budgets.iter().map(|b| b.limit).sum()
}

/// Expenses dated within the month, in collection order
pub fn expenses_in_month(expenses: &[Expense], month: MonthPeriod) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| month.contains(e.date))
        .cloned()
        .collect()
}

/// Distinct categories in order of first appearance
pub fn categories(expenses: &[Expense]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for expense in expenses {
        if !seen.iter().any(|c| *c == expense.category) {
            seen.push(expense.category.clone());
        }
    }
    seen
}

/// Per-category totals in order of first appearance
pub fn category_totals(expenses: &[Expense]) -> Vec<(String, Money)> {
    let mut totals: Vec<(String, Money)> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|(c, _)| *c == expense.category) {
            Some((_, total)) => *total += expense.amount,
            None => totals.push((expense.category.clone(), expense.amount)),
        }
    }
    totals
}

/// Spending for a single category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    pub category: String,
    pub total: Money,
    /// Number of expenses
    pub count: usize,
    /// Share of the summary total
    pub percentage: f64,
}

/// Spending Summary
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingSummary {
    /// Month covered, or `None` for all time
    pub month: Option<MonthPeriod>,
    /// Categories, largest total first (ties keep first appearance)
    pub categories: Vec<CategorySpending>,
    pub total: Money,
    pub expense_count: usize,
}

impl SpendingSummary {
    /// Summarize every expense
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        Self::build(expenses, None)
    }

    /// Summarize the expenses dated within a month
    pub fn for_month(expenses: &[Expense], month: MonthPeriod) -> Self {
        Self::build(&expenses_in_month(expenses, month), Some(month))
    }

    fn build(expenses: &[Expense], month: Option<MonthPeriod>) -> Self {
        let total = total_spent(expenses);

        let mut categories: Vec<CategorySpending> = category_totals(expenses)
            .into_iter()
            .map(|(category, category_total)| CategorySpending {
                count: expenses.iter().filter(|e| e.category == category).count(),
                percentage: percent_of(category_total, total),
                category,
                total: category_total,
            })
            .collect();
        // Stable sort keeps first appearance among equal totals
        categories.sort_by(|a, b| b.total.cmp(&a.total));

        Self {
            month,
            categories,
            total,
            expense_count: expenses.len(),
        }
    }

    /// Largest category, if any spending was recorded
    pub fn top_category(&self) -> Option<&CategorySpending> {
        self.categories.first().filter(|c| c.total.is_positive())
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        match self.month {
            Some(month) => output.push_str(&format!("Spending - {}\n", month)),
            None => output.push_str("Spending - All Time\n"),
        }
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<24} {:>14} {:>8} {:>8}\n",
            "Category", "Spent", "Count", "Share"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for category in &self.categories {
            output.push_str(&format!(
                "{:<24} {:>14} {:>8} {:>7}%\n",
                category.category,
                category.total.format_with_symbol(currency),
                category.count,
                round_half_up(category.percentage)
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>14} {:>8}\n",
            "TOTAL",
            self.total.format_with_symbol(currency),
            self.expense_count
        ));

        output
    }
}
