//! Insight display formatting

use crate::models::{Insight, InsightValue};
use crate::reports::round_half_up;

/// Render an insight's headline value
pub fn format_insight_value(value: &InsightValue, currency: &str) -> String {
    match value {
        InsightValue::Amount(amount) => amount.format_brief(currency),
        InsightValue::Percent(pct) => format!("{}%", round_half_up(*pct) as i64),
    }
}

/// Format a list of insights
pub fn format_insight_list(insights: &[Insight], currency: &str) -> String {
    if insights.is_empty() {
        return "No insights yet. Record a few expenses to get started.\n".to_string();
    }

    let mut output = String::new();
    for insight in insights {
        let value = insight
            .value
            .as_ref()
            .map(|v| format!(" [{}]", format_insight_value(v, currency)))
            .unwrap_or_default();
        output.push_str(&format!(
            "{} {:<9} {}{}\n    {}\n",
            insight.trend.arrow(),
            insight.kind.to_string(),
            insight.title,
            value,
            insight.description
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InsightKind, Money, Trend};

    #[test]
    fn test_format_list() {
        let insights = vec![Insight {
            id: "monthly-savings".into(),
            kind: InsightKind::Saving,
            title: "Monthly Savings".into(),
            description: "You saved ₹600 compared to last month".into(),
            value: Some(InsightValue::Amount(Money::from_units(600))),
            trend: Trend::Down,
        }];
        let output = format_insight_list(&insights, "₹");
        assert!(output.starts_with("↓ saving"));
        assert!(output.contains("Monthly Savings [₹600]"));
        assert!(output.contains("You saved ₹600"));
    }

    #[test]
    fn test_percent_value() {
        assert_eq!(format_insight_value(&InsightValue::Percent(84.5), "₹"), "85%");
    }

    #[test]
    fn test_empty() {
        assert!(format_insight_list(&[], "₹").starts_with("No insights"));
    }
}
