//! Built-in insight rules
//!
//! Each rule reads the shared [`InsightContext`] and emits zero or more
//! insights. Month comparisons use calendar months around the context's
//! `today`; budget alerts use spending across all recorded expenses.

use crate::config::Thresholds;
use crate::models::{Insight, InsightKind, InsightValue, Money, Trend};
use crate::reports::{percent_of, round_half_up};

use super::context::InsightContext;
use super::engine::InsightRule;

fn insight(
    id: impl Into<String>,
    kind: InsightKind,
    title: impl Into<String>,
    description: impl Into<String>,
    value: Option<InsightValue>,
    trend: Trend,
) -> Insight {
    Insight {
        id: id.into(),
        kind,
        title: title.into(),
        description: description.into(),
        value,
        trend,
    }
}

/// Compares this month's total with last month's
pub struct MonthOverMonthRule;

impl InsightRule for MonthOverMonthRule {
    fn id(&self) -> &'static str {
        "month-over-month"
    }

    fn evaluate(&self, ctx: &InsightContext, thresholds: &Thresholds) -> Vec<Insight> {
        let current = ctx.current.total;
        let last = ctx.last.total;
        if !last.is_positive() {
            return Vec::new();
        }

        let change = percent_of(current - last, last);
        let shown = round_half_up(change).abs() as i64;

        if change > thresholds.month_over_month_percent {
            vec![insight(
                "spending-increase",
                InsightKind::Warning,
                "Spending Alert",
                format!("You've spent {}% more this month than last month", shown),
                Some(InsightValue::Percent(change)),
                Trend::Up,
            )]
        } else if change < -thresholds.month_over_month_percent {
            vec![insight(
                "spending-decrease",
                InsightKind::Saving,
                "Great Savings!",
                format!(
                    "You've spent {}% less this month compared to last month",
                    shown
                ),
                Some(InsightValue::Amount((last - current).abs())),
                Trend::Down,
            )]
        } else {
            Vec::new()
        }
    }
}

/// Flags categories that grew two months in a row
pub struct CategoryTrendRule;

impl InsightRule for CategoryTrendRule {
    fn id(&self) -> &'static str {
        "category-trend"
    }

    fn evaluate(&self, ctx: &InsightContext, _thresholds: &Thresholds) -> Vec<Insight> {
        ctx.categories
            .iter()
            .filter(|category| {
                let current = ctx.current.category_total(category);
                let last = ctx.last.category_total(category);
                let before = ctx.two_months_ago.category_total(category);
                current > last && last > before && before.is_positive()
            })
            .map(|category| {
                insight(
                    format!("category-increase-{}", category),
                    InsightKind::Category,
                    format!("{} Trending Up", category),
                    format!("{} spending has increased for 2 consecutive months", category),
                    None,
                    Trend::Up,
                )
            })
            .collect()
    }
}

/// At most one alert per budget: exceeded, else warning
pub struct BudgetAlertRule;

impl InsightRule for BudgetAlertRule {
    fn id(&self) -> &'static str {
        "budget-alert"
    }

    fn evaluate(&self, ctx: &InsightContext, thresholds: &Thresholds) -> Vec<Insight> {
        let mut insights = Vec::new();

        for budget in &ctx.budgets {
            let spent = ctx.spent_by_category(&budget.category);
            let percentage = percent_of(spent, budget.limit);

            if percentage >= f64::from(thresholds.budget_exceeded_percent) {
                let overage = spent - budget.limit;
                insights.push(insight(
                    format!("budget-exceeded-{}", budget.id.as_uuid()),
                    InsightKind::Warning,
                    "Budget Exceeded",
                    format!(
                        "You've exceeded your {} budget by {}",
                        budget.category,
                        overage.format_brief(&ctx.currency)
                    ),
                    Some(InsightValue::Amount(overage)),
                    Trend::Up,
                ));
            } else if percentage >= f64::from(thresholds.budget_warning_percent) {
                insights.push(insight(
                    format!("budget-warning-{}", budget.id.as_uuid()),
                    InsightKind::Warning,
                    "Budget Warning",
                    format!(
                        "You've used {}% of your {} budget",
                        round_half_up(percentage) as i64,
                        budget.category
                    ),
                    Some(InsightValue::Percent(percentage)),
                    Trend::Neutral,
                ));
            }
        }

        insights
    }
}

/// Reports an absolute drop in spending above the alert amount
pub struct MonthlySavingsRule;

impl InsightRule for MonthlySavingsRule {
    fn id(&self) -> &'static str {
        "monthly-savings"
    }

    fn evaluate(&self, ctx: &InsightContext, thresholds: &Thresholds) -> Vec<Insight> {
        let saved: Money = ctx.last.total - ctx.current.total;
        if saved <= thresholds.savings_alert_amount {
            return Vec::new();
        }

        vec![insight(
            "monthly-savings",
            InsightKind::Saving,
            "Monthly Savings",
            format!(
                "You saved {} compared to last month",
                saved.format_brief(&ctx.currency)
            ),
            Some(InsightValue::Amount(saved)),
            Trend::Down,
        )]
    }
}

/// Names the largest category of the current month
pub struct TopCategoryRule;

impl InsightRule for TopCategoryRule {
    fn id(&self) -> &'static str {
        "top-category"
    }

    fn evaluate(&self, ctx: &InsightContext, _thresholds: &Thresholds) -> Vec<Insight> {
        if ctx.current.is_empty() {
            return Vec::new();
        }

        // Strictly greater keeps the first-appearing category on ties
        let mut top: Option<(&str, Money)> = None;
        for category in &ctx.categories {
            let total = ctx.current.category_total(category);
            if top.map_or(true, |(_, best)| total > best) {
                top = Some((category.as_str(), total));
            }
        }

        let Some((category, total)) = top.filter(|(_, total)| total.is_positive()) else {
            return Vec::new();
        };
        let share = round_half_up(percent_of(total, ctx.current.total)) as i64;

        vec![insight(
            "top-category",
            InsightKind::Spending,
            "Top Spending",
            format!("{} is your highest expense ({}% of total)", category, share),
            Some(InsightValue::Amount(total)),
            Trend::Neutral,
        )]
    }
}
