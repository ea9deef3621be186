//! Insight Engine - runs the registered rules and caps the result

use tracing::debug;

use crate::config::{InsightOrder, Thresholds};
use crate::models::Insight;

use super::context::InsightContext;
use super::rules::{
    BudgetAlertRule, CategoryTrendRule, MonthOverMonthRule, MonthlySavingsRule, TopCategoryRule,
};

/// A single insight rule
pub trait InsightRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Produce zero or more insights from the context
    fn evaluate(&self, ctx: &InsightContext, thresholds: &Thresholds) -> Vec<Insight>;
}

/// The insight engine: evaluates rules in registration order
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
    order: InsightOrder,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self::empty();

        engine.register(Box::new(MonthOverMonthRule));
        engine.register(Box::new(CategoryTrendRule));
        engine.register(Box::new(BudgetAlertRule));
        engine.register(Box::new(MonthlySavingsRule));
        engine.register(Box::new(TopCategoryRule));

        engine
    }

    /// Create an engine with no rules
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            order: InsightOrder::default(),
        }
    }

    pub fn with_order(mut self, order: InsightOrder) -> Self {
        self.order = order;
        self
    }

    /// Register a rule after the existing ones
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Run every rule, then order and cap the combined list
    pub fn evaluate(&self, ctx: &InsightContext, thresholds: &Thresholds) -> Vec<Insight> {
        let mut insights = Vec::new();

        for rule in &self.rules {
            let produced = rule.evaluate(ctx, thresholds);
            debug!(rule = rule.id(), count = produced.len(), "Insight rule evaluated");
            insights.extend(produced);
        }

        if self.order == InsightOrder::Severity {
            insights.sort_by_key(|i| i.kind.severity_rank());
        }

        insights.truncate(thresholds.insight_limit);
        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Expense, InsightKind, Money, NewBudget, NewExpense, Trend};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(units: i64, category: &str, on: NaiveDate) -> Expense {
        NewExpense::new("item", Money::from_units(units), category, on, "UPI").into_expense()
    }

    fn budget(category: &str, limit: i64) -> Budget {
        NewBudget::new(category, Money::from_units(limit), "bg-chart-1").into_budget()
    }

    fn today() -> NaiveDate {
        date(2025, 3, 20)
    }

    fn ids(insights: &[Insight]) -> Vec<&str> {
        insights.iter().map(|i| i.id.as_str()).collect()
    }

    struct Fixed(&'static str, usize);

    impl InsightRule for Fixed {
        fn id(&self) -> &'static str {
            self.0
        }

        fn evaluate(&self, _ctx: &InsightContext, _thresholds: &Thresholds) -> Vec<Insight> {
            (0..self.1)
                .map(|n| Insight {
                    id: format!("{}-{}", self.0, n),
                    kind: InsightKind::Saving,
                    title: "t".into(),
                    description: "d".into(),
                    value: None,
                    trend: Trend::Neutral,
                })
                .collect()
        }
    }

    #[test]
    fn test_builtin_rule_order() {
        assert_eq!(
            InsightEngine::new().rule_ids(),
            vec![
                "month-over-month",
                "category-trend",
                "budget-alert",
                "monthly-savings",
                "top-category"
            ]
        );
    }

    #[test]
    fn test_empty_store_has_no_insights() {
        let ctx = InsightContext::new(&[], &[], today(), "₹");
        assert!(InsightEngine::new().evaluate(&ctx, &Thresholds::default()).is_empty());
    }

    #[test]
    fn test_output_is_capped() {
        let mut engine = InsightEngine::empty();
        engine.register(Box::new(Fixed("a", 4)));
        engine.register(Box::new(Fixed("b", 4)));

        let ctx = InsightContext::new(&[], &[], today(), "₹");
        let insights = engine.evaluate(&ctx, &Thresholds::default());
        assert_eq!(insights.len(), 5);
        assert_eq!(ids(&insights), vec!["a-0", "a-1", "a-2", "a-3", "b-0"]);
    }

    #[test]
    fn test_increase_with_exceeded_budget() {
        let expenses = vec![
            expense(1200, "Food", date(2025, 3, 5)),
            expense(1000, "Food", date(2025, 2, 5)),
        ];
        let budgets = vec![budget("Food", 2000)];
        let ctx = InsightContext::new(&expenses, &budgets, today(), "₹");

        let insights = InsightEngine::new().evaluate(&ctx, &Thresholds::default());
        assert_eq!(
            ids(&insights),
            vec![
                "spending-increase".to_string(),
                format!("budget-exceeded-{}", budgets[0].id.as_uuid()),
                "top-category".to_string()
            ]
        );
    }

    #[test]
    fn test_severity_order_option() {
        let expenses = vec![
            expense(700, "Food", date(2025, 3, 5)),
            expense(1000, "Food", date(2025, 2, 5)),
        ];
        let budgets = vec![budget("Food", 1800)];
        let ctx = InsightContext::new(&expenses, &budgets, today(), "₹");

        let rule_order = InsightEngine::new().evaluate(&ctx, &Thresholds::default());
        assert_eq!(
            rule_order.iter().map(|i| i.kind).collect::<Vec<_>>(),
            vec![InsightKind::Saving, InsightKind::Warning, InsightKind::Spending]
        );

        let by_severity = InsightEngine::new()
            .with_order(InsightOrder::Severity)
            .evaluate(&ctx, &Thresholds::default());
        assert_eq!(
            by_severity.iter().map(|i| i.kind).collect::<Vec<_>>(),
            vec![InsightKind::Warning, InsightKind::Spending, InsightKind::Saving]
        );
    }

    #[test]
    fn test_configured_limit() {
        let expenses = vec![
            expense(1200, "Food", date(2025, 3, 5)),
            expense(1000, "Food", date(2025, 2, 5)),
        ];
        let ctx = InsightContext::new(&expenses, &[], today(), "₹");
        let thresholds = Thresholds {
            insight_limit: 1,
            ..Thresholds::default()
        };
        let insights = InsightEngine::new().evaluate(&ctx, &thresholds);
        assert_eq!(ids(&insights), vec!["spending-increase"]);
    }
}
