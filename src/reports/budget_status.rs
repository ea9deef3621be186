//! Budget Status Report
//!
//! Utilization of each budget against the spending recorded in its
//! category, classified into normal / warning / exceeded bands.

use std::fmt;

use serde::Serialize;

use crate::config::Thresholds;
use crate::models::{Budget, Expense, Money};

use super::spending::spent_by_category;

/// Whole-percent utilization of `limit` by `spent`, rounded half up
///
/// Returns 0 when the limit is not positive or nothing was spent.
pub fn budget_utilization(spent: Money, limit: Money) -> u32 {
    if !limit.is_positive() || !spent.is_positive() {
        return 0;
    }
    let spent = i128::from(spent.cents());
    let limit = i128::from(limit.cents());
    let rounded = (spent * 200 + limit) / (limit * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Utilization band of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetState {
    Normal,
    Warning,
    Exceeded,
}

impl BudgetState {
    /// Classify a utilization; each band includes its lower bound
    pub fn classify(utilization: u32, thresholds: &Thresholds) -> Self {
        if utilization >= thresholds.budget_exceeded_percent {
            Self::Exceeded
        } else if utilization >= thresholds.budget_warning_percent {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for BudgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Warning => write!(f, "warning"),
            Self::Exceeded => write!(f, "exceeded"),
        }
    }
}

/// A budget with its current spending
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: Money,
    /// Limit minus spent (negative when over)
    pub remaining: Money,
    pub utilization: u32,
    pub state: BudgetState,
}

impl BudgetStatus {
    pub fn new(budget: &Budget, expenses: &[Expense], thresholds: &Thresholds) -> Self {
        let spent = spent_by_category(expenses, &budget.category);
        let utilization = budget_utilization(spent, budget.limit);
        Self {
            budget: budget.clone(),
            spent,
            remaining: budget.limit - spent,
            utilization,
            state: BudgetState::classify(utilization, thresholds),
        }
    }
}

/// Budget Overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetOverview {
    /// One entry per budget, in collection order
    pub statuses: Vec<BudgetStatus>,
    pub total_limit: Money,
    pub total_spent: Money,
}

impl BudgetOverview {
    pub fn build(budgets: &[Budget], expenses: &[Expense], thresholds: &Thresholds) -> Self {
        let statuses: Vec<BudgetStatus> = budgets
            .iter()
            .map(|b| BudgetStatus::new(b, expenses, thresholds))
            .collect();
        let total_limit = statuses.iter().map(|s| s.budget.limit).sum();
        let total_spent = statuses.iter().map(|s| s.spent).sum();
        Self {
            statuses,
            total_limit,
            total_spent,
        }
    }

    /// Overall utilization across all budgets
    pub fn utilization(&self) -> u32 {
        budget_utilization(self.total_spent, self.total_limit)
    }

    pub fn count_in(&self, state: BudgetState) -> usize {
        self.statuses.iter().filter(|s| s.state == state).count()
    }

    /// Format the overview for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Budgets\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.statuses.is_empty() {
            output.push_str("No budgets set. Use 'spendwise budget add' to create one.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:<20} {:>12} {:>12} {:>12} {:>6}  {}\n",
            "ID", "Category", "Limit", "Spent", "Remaining", "Used", "State"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for status in &self.statuses {
            let marker = match status.state {
                BudgetState::Exceeded => " *",
                BudgetState::Warning => " !",
                BudgetState::Normal => "",
            };
            output.push_str(&format!(
                "{:<12} {:<20} {:>12} {:>12} {:>12} {:>5}%  {}{}\n",
                status.budget.id.to_string(),
                status.budget.category,
                status.budget.limit.format_with_symbol(currency),
                status.spent.format_with_symbol(currency),
                status.remaining.format_with_symbol(currency),
                status.utilization,
                status.state,
                marker
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<12} {:<20} {:>12} {:>12} {:>12} {:>5}%\n",
            "",
            "TOTAL",
            self.total_limit.format_with_symbol(currency),
            self.total_spent.format_with_symbol(currency),
            (self.total_limit - self.total_spent).format_with_symbol(currency),
            self.utilization()
        ));
        output.push_str("\n! = Warning   * = Exceeded\n");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewBudget, NewExpense};
    use chrono::NaiveDate;

    fn food_spending(units: i64) -> Vec<Expense> {
        vec![NewExpense::new(
            "Groceries",
            Money::from_units(units),
            "Food",
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            "UPI",
        )
        .into_expense()]
    }

    fn food_budget(limit: i64) -> Budget {
        NewBudget::new("Food", Money::from_units(limit), "bg-chart-1").into_budget()
    }

    #[test]
    fn test_exceeded_scenario() {
        let status = BudgetStatus::new(&food_budget(2000), &food_spending(2500), &Thresholds::default());
        assert_eq!(status.spent, Money::from_units(2500));
        assert_eq!(status.utilization, 125);
        assert_eq!(status.state, BudgetState::Exceeded);
        assert_eq!(status.remaining, Money::from_units(-500));
    }

    #[test]
    fn test_zero_limit_is_zero_percent() {
        assert_eq!(budget_utilization(Money::from_units(500), Money::zero()), 0);
        assert_eq!(budget_utilization(Money::zero(), Money::from_units(100)), 0);
    }

    #[test]
    fn test_rounding_half_up() {
        // 79.5% rounds into the warning band
        assert_eq!(budget_utilization(Money::from_cents(7950), Money::from_units(100)), 80);
        assert_eq!(budget_utilization(Money::from_cents(7949), Money::from_units(100)), 79);
        assert_eq!(budget_utilization(Money::from_cents(1), Money::from_units(2)), 1);
    }

    #[test]
    fn test_band_lower_bounds_are_inclusive() {
        let thresholds = Thresholds::default();
        assert_eq!(BudgetState::classify(79, &thresholds), BudgetState::Normal);
        assert_eq!(BudgetState::classify(80, &thresholds), BudgetState::Warning);
        assert_eq!(BudgetState::classify(99, &thresholds), BudgetState::Warning);
        assert_eq!(BudgetState::classify(100, &thresholds), BudgetState::Exceeded);
    }

    #[test]
    fn test_utilization_is_monotonic_in_spent() {
        let limit = Money::from_units(333);
        let mut previous = 0;
        for cents in (0..=100_000).step_by(37) {
            let current = budget_utilization(Money::from_cents(cents), limit);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_overview_totals_and_format() {
        let budgets = vec![
            food_budget(2000),
            NewBudget::new("Transport", Money::from_units(1000), "bg-chart-2").into_budget(),
        ];
        let overview = BudgetOverview::build(&budgets, &food_spending(2500), &Thresholds::default());

        assert_eq!(overview.total_limit, Money::from_units(3000));
        assert_eq!(overview.total_spent, Money::from_units(2500));
        assert_eq!(overview.utilization(), 83);
        assert_eq!(overview.count_in(BudgetState::Exceeded), 1);
        assert_eq!(overview.count_in(BudgetState::Normal), 1);

        let output = overview.format_terminal("₹");
        assert!(output.contains("exceeded *"));
        assert!(output.contains("-₹500.00"));
    }
}
