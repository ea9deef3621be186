//! User settings for Spendwise
//!
//! Manages user preferences and the thresholds shared by budget status
//! classification and the insight rules.

use serde::{Deserialize, Serialize};

use super::paths::SpendwisePaths;
use crate::error::SpendwiseError;
use crate::models::Money;

/// What happens to a recurring bill when it is marked paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RecurringBillPolicy {
    /// Keep the paid bill as history and add an unpaid bill for the next cycle
    #[default]
    SpawnSuccessor,
    /// Move the bill's due date forward one cycle and keep it unpaid
    AdvanceInPlace,
}

/// Ordering applied to insights before the list is capped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InsightOrder {
    /// Keep rule evaluation order
    #[default]
    RuleOrder,
    /// Stable sort by kind: warnings, category trends, spending, savings
    Severity,
}

/// Numeric thresholds used across reports and insights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Utilization (percent) at which a budget enters the warning band
    pub budget_warning_percent: u32,
    /// Utilization (percent) at which a budget counts as exceeded
    pub budget_exceeded_percent: u32,
    /// Month-over-month change (percent, strict) that triggers an insight
    pub month_over_month_percent: f64,
    /// Saved amount (strict) that triggers the monthly savings insight
    pub savings_alert_amount: Money,
    /// Maximum number of insights returned
    pub insight_limit: usize,
    /// Unpaid bills due within this many days are "due soon"
    pub due_soon_days: i64,
    /// Unpaid bills due within this many days are "upcoming"
    pub upcoming_days: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            budget_warning_percent: 80,
            budget_exceeded_percent: 100,
            month_over_month_percent: 10.0,
            savings_alert_amount: Money::from_units(500),
            insight_limit: 5,
            due_soon_days: 3,
            upcoming_days: 30,
        }
    }
}

/// User settings for Spendwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in insight text and tables
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub recurring_bills: RecurringBillPolicy,

    #[serde(default)]
    pub insight_order: InsightOrder,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            thresholds: Thresholds::default(),
            recurring_bills: RecurringBillPolicy::default(),
            insight_order: InsightOrder::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &SpendwisePaths) -> Result<Self, SpendwiseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SpendwiseError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| SpendwiseError::Config(format!("Failed to parse settings file: {}", e)))?;

        if settings.thresholds.budget_warning_percent > settings.thresholds.budget_exceeded_percent
        {
            return Err(SpendwiseError::Config(format!(
                "budget_warning_percent ({}) must not exceed budget_exceeded_percent ({})",
                settings.thresholds.budget_warning_percent,
                settings.thresholds.budget_exceeded_percent
            )));
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendwisePaths) -> Result<(), SpendwiseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SpendwiseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SpendwiseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
