//! Bill Schedule
//!
//! Partitions bills by how soon they fall due relative to a given day.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::Thresholds;
use crate::models::{Bill, Money, MonthPeriod};

/// Whole calendar days from `today` to `due` (negative once past)
pub fn days_until_due(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Sum of every unpaid bill
pub fn total_due(bills: &[Bill]) -> Money {
    bills
        .iter()
        .filter(|b| !b.is_paid())
        .map(|b| b.amount)
        .sum()
}

/// Bills grouped by due-date proximity
///
/// `overdue`, `due_soon`, `upcoming`, `later` and `paid` are disjoint and
/// together hold every bill. `paid_this_month` is the subset of `paid`
/// whose payment falls in today's calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillSchedule {
    pub today: NaiveDate,
    /// Unpaid, due before today
    pub overdue: Vec<Bill>,
    /// Unpaid, due today or within `due_soon_days`
    pub due_soon: Vec<Bill>,
    /// Unpaid, due within `upcoming_days`
    pub upcoming: Vec<Bill>,
    /// Unpaid, due further out
    pub later: Vec<Bill>,
    pub paid: Vec<Bill>,
    pub paid_this_month: Vec<Bill>,
}

impl BillSchedule {
    pub fn build(bills: &[Bill], today: NaiveDate, thresholds: &Thresholds) -> Self {
        let mut schedule = Self {
            today,
            overdue: Vec::new(),
            due_soon: Vec::new(),
            upcoming: Vec::new(),
            later: Vec::new(),
            paid: Vec::new(),
            paid_this_month: Vec::new(),
        };
        let month = MonthPeriod::containing(today);

        for bill in bills {
            if let Some(paid_date) = bill.paid_date {
                if month.contains(paid_date) {
                    schedule.paid_this_month.push(bill.clone());
                }
                schedule.paid.push(bill.clone());
                continue;
            }

            let days = days_until_due(bill.due_date, today);
            let bucket = if days < 0 {
                &mut schedule.overdue
            } else if days <= thresholds.due_soon_days {
                &mut schedule.due_soon
            } else if days <= thresholds.upcoming_days {
                &mut schedule.upcoming
            } else {
                &mut schedule.later
            };
            bucket.push(bill.clone());
        }

        for bucket in [
            &mut schedule.overdue,
            &mut schedule.due_soon,
            &mut schedule.upcoming,
            &mut schedule.later,
        ] {
            bucket.sort_by_key(|b| b.due_date);
        }

        schedule
    }

    /// Sum of every unpaid bill in the schedule
    pub fn total_due(&self) -> Money {
        self.unpaid().map(|b| b.amount).sum()
    }

    pub fn unpaid(&self) -> impl Iterator<Item = &Bill> {
        self.overdue
            .iter()
            .chain(&self.due_soon)
            .chain(&self.upcoming)
            .chain(&self.later)
    }

    pub fn len(&self) -> usize {
        self.unpaid().count() + self.paid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Format the schedule for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Bills - as of {}\n", self.today));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No bills. Use 'spendwise bill add' to create one.\n");
            return output;
        }

        let sections: [(&str, &[Bill]); 5] = [
            ("OVERDUE", self.overdue.as_slice()),
            ("DUE SOON", self.due_soon.as_slice()),
            ("UPCOMING", self.upcoming.as_slice()),
            ("LATER", self.later.as_slice()),
            ("PAID", self.paid.as_slice()),
        ];

        for (title, bills) in sections {
            if bills.is_empty() {
                continue;
            }
            output.push_str(&format!("\n{}\n", title));
            for bill in bills {
                let when = match bill.paid_date {
                    Some(paid) => format!("paid {}", paid),
                    None => describe_days(days_until_due(bill.due_date, self.today)),
                };
                output.push_str(&format!(
                    "  {:<12} {:<24} {:>12}  due {}  {}\n",
                    bill.id.to_string(),
                    bill.name,
                    bill.amount.format_with_symbol(currency),
                    bill.due_date,
                    when
                ));
            }
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "Total due: {}   Paid this month: {}\n",
            self.total_due().format_with_symbol(currency),
            self.paid_this_month.len()
        ));

        output
    }
}

fn describe_days(days: i64) -> String {
    match days {
        0 => "due today".to_string(),
        1 => "in 1 day".to_string(),
        -1 => "1 day overdue".to_string(),
        d if d < 0 => format!("{} days overdue", -d),
        d => format!("in {} days", d),
    }
}
