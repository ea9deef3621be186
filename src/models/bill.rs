//! Bill model
//!
//! A scheduled, possibly recurring, payment obligation. Payment status is
//! carried by `paid_date` alone, so a bill is paid exactly when it has a
//! paid date.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BillId;
use super::money::Money;

/// How often a bill comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BillFrequency {
    #[default]
    Monthly,
    Yearly,
    OneTime,
}

impl BillFrequency {
    /// Advance a due date by one period; `None` for one-time bills or when
    /// the result would overflow the calendar
    pub fn advance(&self, due: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Monthly => due.checked_add_months(Months::new(1)),
            Self::Yearly => due.checked_add_months(Months::new(12)),
            Self::OneTime => None,
        }
    }

    /// Parse a frequency from a string
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "yearly" | "annual" | "annually" | "year" | "y" => Ok(Self::Yearly),
            "one-time" | "onetime" | "once" => Ok(Self::OneTime),
            other => Err(format!("Unknown bill frequency: {}", other)),
        }
    }
}

impl fmt::Display for BillFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
            Self::OneTime => write!(f, "one-time"),
        }
    }
}

/// A bill reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BillRecord", into = "BillRecord")]
pub struct Bill {
    pub id: BillId,
    pub name: String,
    pub provider: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub is_recurring: bool,
    pub frequency: BillFrequency,
    /// Present exactly when the bill has been paid
    pub paid_date: Option<NaiveDate>,
}

impl Bill {
    pub fn is_paid(&self) -> bool {
        self.paid_date.is_some()
    }

    /// Whether paying this bill schedules another cycle
    pub fn recurs(&self) -> bool {
        self.is_recurring && self.frequency != BillFrequency::OneTime
    }

    /// The due date of the next cycle, if this bill recurs
    pub fn next_due_date(&self) -> Option<NaiveDate> {
        if self.recurs() {
            self.frequency.advance(self.due_date)
        } else {
            None
        }
    }

    /// Whole calendar days from `today` until the due date (negative if past)
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }

    /// Validate the bill
    pub fn validate(&self) -> Result<(), BillValidationError> {
        if self.name.trim().is_empty() {
            return Err(BillValidationError::MissingName);
        }
        if !self.amount.is_positive() {
            return Err(BillValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > Money::MAX_AMOUNT {
            return Err(BillValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }

    /// Apply a partial update, returning the merged bill
    pub fn merged(&self, update: &BillUpdate) -> Self {
        Self {
            id: self.id,
            name: update
                .name
                .as_deref()
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|| self.name.clone()),
            provider: update
                .provider
                .clone()
                .unwrap_or_else(|| self.provider.clone()),
            amount: update.amount.unwrap_or(self.amount),
            due_date: update.due_date.unwrap_or(self.due_date),
            is_recurring: update.is_recurring.unwrap_or(self.is_recurring),
            frequency: update.frequency.unwrap_or(self.frequency),
            paid_date: update.paid_date.unwrap_or(self.paid_date),
        }
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {} due {}",
            self.name,
            self.provider,
            self.amount,
            self.due_date.format("%Y-%m-%d")
        )
    }
}

/// Serialized shape of a bill, carrying the redundant `is_paid` flag for
/// external readers
#[derive(Serialize, Deserialize)]
struct BillRecord {
    id: BillId,
    name: String,
    #[serde(default)]
    provider: String,
    amount: Money,
    due_date: NaiveDate,
    #[serde(default)]
    is_recurring: bool,
    #[serde(default)]
    frequency: BillFrequency,
    #[serde(default)]
    is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    paid_date: Option<NaiveDate>,
}

impl From<BillRecord> for Bill {
    fn from(record: BillRecord) -> Self {
        // A paid flag without a date carries no payment month; the date wins.
        Self {
            id: record.id,
            name: record.name,
            provider: record.provider,
            amount: record.amount,
            due_date: record.due_date,
            is_recurring: record.is_recurring,
            frequency: record.frequency,
            paid_date: record.paid_date,
        }
    }
}

impl From<Bill> for BillRecord {
    fn from(bill: Bill) -> Self {
        Self {
            is_paid: bill.is_paid(),
            id: bill.id,
            name: bill.name,
            provider: bill.provider,
            amount: bill.amount,
            due_date: bill.due_date,
            is_recurring: bill.is_recurring,
            frequency: bill.frequency,
            paid_date: bill.paid_date,
        }
    }
}

/// Input for creating a bill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBill {
    pub name: String,
    pub provider: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub is_recurring: bool,
    pub frequency: BillFrequency,
    pub paid_date: Option<NaiveDate>,
}

impl NewBill {
    /// A recurring monthly, unpaid bill
    pub fn monthly(
        name: impl Into<String>,
        provider: impl Into<String>,
        amount: Money,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            provider: provider.into(),
            amount,
            due_date,
            is_recurring: true,
            frequency: BillFrequency::Monthly,
            paid_date: None,
        }
    }

    pub fn into_bill(self) -> Bill {
        Bill {
            id: BillId::new(),
            name: self.name.trim().to_string(),
            provider: self.provider.trim().to_string(),
            amount: self.amount,
            due_date: self.due_date,
            is_recurring: self.is_recurring,
            frequency: self.frequency,
            paid_date: self.paid_date,
        }
    }
}

/// Partial update for a bill; `None` fields are left unchanged.
/// `paid_date: Some(None)` marks the bill unpaid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillUpdate {
    pub name: Option<String>,
    pub provider: Option<String>,
    pub amount: Option<Money>,
    pub due_date: Option<NaiveDate>,
    pub is_recurring: Option<bool>,
    pub frequency: Option<BillFrequency>,
    pub paid_date: Option<Option<NaiveDate>>,
}

/// Validation errors for bills
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillValidationError {
    MissingName,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for BillValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Bill name is required"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Bill amount must be greater than 0 (got {})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Bill amount {} exceeds the maximum of {}",
                amount,
                Money::MAX_AMOUNT
            ),
        }
    }
}

impl std::error::Error for BillValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn electricity() -> Bill {
        NewBill::monthly(
            "Electricity Bill",
            "City Power Co.",
            Money::from_units(2200),
            date(2026, 1, 5),
        )
        .into_bill()
    }

    #[test]
    fn test_validate_amount_bounds() {
        let mut bill = electricity();
        assert!(bill.validate().is_ok());

        bill.amount = Money::zero();
        assert!(matches!(
            bill.validate(),
            Err(BillValidationError::NonPositiveAmount(_))
        ));

        bill.amount = Money::MAX_AMOUNT + Money::from_units(1);
        assert!(matches!(
            bill.validate(),
            Err(BillValidationError::AmountTooLarge(_))
        ));
    }

    #[test]
    fn test_advance_clamps_to_month_end() {
        assert_eq!(
            BillFrequency::Monthly.advance(date(2025, 1, 31)),
            Some(date(2025, 2, 28))
        );
        assert_eq!(
            BillFrequency::Yearly.advance(date(2024, 2, 29)),
            Some(date(2025, 2, 28))
        );
        assert_eq!(BillFrequency::OneTime.advance(date(2025, 1, 31)), None);
    }

    #[test]
    fn test_next_due_date() {
        let mut bill = electricity();
        assert_eq!(bill.next_due_date(), Some(date(2026, 2, 5)));

        bill.is_recurring = false;
        assert_eq!(bill.next_due_date(), None);

        bill.is_recurring = true;
        bill.frequency = BillFrequency::OneTime;
        assert!(!bill.recurs());
    }

    #[test]
    fn test_days_until_due() {
        let bill = electricity();
        assert_eq!(bill.days_until_due(date(2026, 1, 3)), 2);
        assert_eq!(bill.days_until_due(date(2026, 1, 5)), 0);
        assert_eq!(bill.days_until_due(date(2026, 1, 6)), -1);
    }

    #[test]
    fn test_serialized_form_carries_is_paid() {
        let mut bill = electricity();
        bill.paid_date = Some(date(2026, 1, 4));
        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["is_paid"], true);
        assert_eq!(json["frequency"], "monthly");
        assert_eq!(json["paid_date"], "2026-01-04");

        let back: Bill = serde_json::from_value(json).unwrap();
        assert_eq!(back, bill);
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!(BillFrequency::parse("Monthly"), Ok(BillFrequency::Monthly));
        assert_eq!(BillFrequency::parse("yearly"), Ok(BillFrequency::Yearly));
        assert_eq!(BillFrequency::parse("one-time"), Ok(BillFrequency::OneTime));
        assert!(BillFrequency::parse("weekly").is_err());
    }

    #[test]
    fn test_merged_can_clear_payment() {
        let mut bill = electricity();
        bill.paid_date = Some(date(2026, 1, 4));
        let update = BillUpdate {
            paid_date: Some(None),
            ..Default::default()
        };
        assert!(!bill.merged(&update).is_paid());
        assert!(bill.merged(&BillUpdate::default()).is_paid());
    }

    #[test]
    fn test_validate() {
        let mut bill = electricity();
        assert!(bill.validate().is_ok());
        bill.amount = Money::from_cents(-1);
        assert!(matches!(
            bill.validate(),
            Err(BillValidationError::NonPositiveAmount(_))
        ));
    }
}
