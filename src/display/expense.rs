//! Expense display formatting

use crate::models::Expense;

use super::format::truncate;

/// Format a single expense as a list row
pub fn format_expense_row(expense: &Expense, currency: &str) -> String {
    format!(
        "{:<12} {} {:<28} {:<16} {:>12}  {}",
        expense.id.to_string(),
        expense.date.format("%Y-%m-%d"),
        truncate(&expense.description, 28),
        truncate(&expense.category, 16),
        expense.amount.format_with_symbol(currency),
        expense.payment_method
    )
}

/// Format a list of expenses, newest first as given
pub fn format_expense_list(expenses: &[Expense], currency: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {:10} {:<28} {:<16} {:>12}  {}\n",
        "ID", "Date", "Description", "Category", "Amount", "Method"
    ));
    output.push_str(&"-".repeat(92));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, currency));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!("Paid with:   {}\n", expense.payment_method));

    output
}
