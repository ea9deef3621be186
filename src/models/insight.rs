//! Insight model
//!
//! Insights are derived values: they are regenerated from the current
//! expenses and budgets on demand and never stored.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// What an insight is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Spending,
    Saving,
    Category,
    Warning,
}

impl InsightKind {
    /// Rank used when insights are ordered by severity (lower first)
    pub fn severity_rank(&self) -> u8 {
        match self {
            Self::Warning => 0,
            Self::Category => 1,
            Self::Spending => 2,
            Self::Saving => 3,
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spending => write!(f, "spending"),
            Self::Saving => write!(f, "saving"),
            Self::Category => write!(f, "category"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Direction an insight points in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Neutral => "→",
        }
    }
}

/// The headline number attached to an insight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum InsightValue {
    Amount(Money),
    Percent(f64),
}

/// A human-readable observation about recent spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Stable key, e.g. "spending-increase" or "budget-exceeded-<budget id>"
    pub id: String,
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<InsightValue>,
    pub trend: Trend,
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.trend.arrow(), self.title, self.description)
    }
}
