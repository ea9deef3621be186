//! Dashboard summary

use crate::models::{Insight, Money};
use crate::reports::{BillSchedule, BudgetOverview, BudgetState, SpendingSummary};

use super::format::{double_separator, format_bar, separator, truncate};
use super::insight::format_insight_list;

/// Everything the dashboard shows, computed by the caller
pub struct Dashboard<'a> {
    pub total_spent: Money,
    pub this_month: &'a SpendingSummary,
    pub budgets: &'a BudgetOverview,
    pub bills: &'a BillSchedule,
    pub insights: &'a [Insight],
}

impl Dashboard<'_> {
    pub fn render(&self, currency: &str) -> String {
        let mut output = String::new();
        let month = self
            .this_month
            .month
            .map(|m| m.to_string())
            .unwrap_or_default();

        output.push_str(&format!("Spendwise - {}\n", month));
        output.push_str(&double_separator(60));
        output.push('\n');

        output.push_str(&format!(
            "Spent this month:  {}\n",
            self.this_month.total.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Spent all time:    {}\n",
            self.total_spent.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Total budget:      {}  ({}% used)\n",
            self.budgets.total_limit.format_with_symbol(currency),
            self.budgets.utilization()
        ));
        output.push_str(&format!(
            "Bills due:         {}  ({} overdue, {} due soon)\n",
            self.bills.total_due().format_with_symbol(currency),
            self.bills.overdue.len(),
            self.bills.due_soon.len()
        ));

        if !self.budgets.statuses.is_empty() {
            output.push_str(&format!("\n{}\n", "BUDGETS"));
            output.push_str(&separator(60));
            output.push('\n');
            for status in &self.budgets.statuses {
                let flag = match status.state {
                    BudgetState::Exceeded => " over",
                    BudgetState::Warning => " near",
                    BudgetState::Normal => "",
                };
                output.push_str(&format!(
                    "{:<18} {} {:>4}%{}\n",
                    truncate(&status.budget.category, 18),
                    format_bar(f64::from(status.utilization), 100.0, 20),
                    status.utilization,
                    flag
                ));
            }
        }

        output.push_str(&format!("\n{}\n", "INSIGHTS"));
        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format_insight_list(self.insights, currency));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::models::{MonthPeriod, NewBudget, NewExpense};
    use chrono::NaiveDate;

    #[test]
    fn test_render() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let expenses = vec![NewExpense::new(
            "Groceries",
            Money::from_units(2500),
            "Food",
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            "UPI",
        )
        .into_expense()];
        let budgets = vec![NewBudget::new("Food", Money::from_units(2000), "bg-chart-1").into_budget()];
        let thresholds = Thresholds::default();

        let this_month = SpendingSummary::for_month(&expenses, MonthPeriod::containing(today));
        let overview = BudgetOverview::build(&budgets, &expenses, &thresholds);
        let bills = BillSchedule::build(&[], today, &thresholds);

        let output = Dashboard {
            total_spent: Money::from_units(2500),
            this_month: &this_month,
            budgets: &overview,
            bills: &bills,
            insights: &[],
        }
        .render("₹");

        assert!(output.contains("Spendwise - 2025-01"));
        assert!(output.contains("Spent this month:  ₹2500.00"));
        assert!(output.contains(" 125% over"));
        assert!(output.contains("No insights yet"));
    }
}
