//! Report CLI commands
//!
//! Dashboard, spending breakdown and insight listing.

use crate::clock::Clock;
use crate::config::Settings;
use crate::display::{format_insight_list, Dashboard};
use crate::error::SpendwiseResult;
use crate::models::MonthPeriod;
use crate::reports::{total_spent, BillSchedule, BudgetOverview, SpendingSummary};
use crate::services::InsightService;
use crate::storage::Storage;

use super::parse_month;

/// Print the dashboard
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
) -> SpendwiseResult<()> {
    let snapshot = storage.snapshot()?;
    let today = clock.today();

    let this_month = SpendingSummary::for_month(&snapshot.expenses, MonthPeriod::containing(today));
    let budgets = BudgetOverview::build(&snapshot.budgets, &snapshot.expenses, &settings.thresholds);
    let bills = BillSchedule::build(&snapshot.bills, today, &settings.thresholds);
    let insights = InsightService::new(storage, clock, settings).insights()?;

    let dashboard = Dashboard {
        total_spent: total_spent(&snapshot.expenses),
        this_month: &this_month,
        budgets: &budgets,
        bills: &bills,
        insights: &insights,
    };
    print!("{}", dashboard.render(&settings.currency_symbol));

    Ok(())
}

/// Print spending by category for a month, or for all time
pub fn handle_spending_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    month: Option<String>,
    all: bool,
) -> SpendwiseResult<()> {
    let expenses = storage.expenses.get_all()?;

    let summary = if all {
        SpendingSummary::from_expenses(&expenses)
    } else {
        let month = match month {
            Some(m) => parse_month(&m)?,
            None => MonthPeriod::containing(clock.today()),
        };
        SpendingSummary::for_month(&expenses, month)
    };
    print!("{}", summary.format_terminal(&settings.currency_symbol));

    Ok(())
}

/// Print the current insights
pub fn handle_insights_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    json: bool,
) -> SpendwiseResult<()> {
    let insights = InsightService::new(storage, clock, settings).insights()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
    } else {
        print!("{}", format_insight_list(&insights, &settings.currency_symbol));
    }

    Ok(())
}
