//! Bill display formatting

use chrono::NaiveDate;

use crate::models::Bill;
use crate::reports::days_until_due;

/// Format bill details for display
pub fn format_bill_details(bill: &Bill, today: NaiveDate, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Bill:     {}\n", bill.id));
    output.push_str(&format!("Name:     {}\n", bill.name));
    if !bill.provider.is_empty() {
        output.push_str(&format!("Provider: {}\n", bill.provider));
    }
    output.push_str(&format!(
        "Amount:   {}\n",
        bill.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Due:      {}\n", bill.due_date.format("%Y-%m-%d")));

    let repeats = if bill.recurs() {
        bill.frequency.to_string()
    } else {
        "no".to_string()
    };
    output.push_str(&format!("Repeats:  {}\n", repeats));

    match bill.paid_date {
        Some(paid) => output.push_str(&format!("Status:   paid on {}\n", paid)),
        None => {
            let days = days_until_due(bill.due_date, today);
            let status = if days < 0 {
                format!("overdue by {} day(s)", -days)
            } else {
                format!("due in {} day(s)", days)
            };
            output.push_str(&format!("Status:   {}\n", status));
        }
    }

    output
}
