//! Expense CLI commands

use clap::Subcommand;
use tracing::warn;

use crate::clock::Clock;
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::SpendwiseResult;
use crate::models::expense::{DEFAULT_CATEGORIES, DEFAULT_PAYMENT_METHOD, PAYMENT_METHODS};
use crate::models::NewExpense;
use crate::services::{ExpenseFilter, ExpenseService};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_month};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "250" or "250.50")
        amount: String,
        /// Category (e.g., "Food & Drinks")
        #[arg(short, long)]
        category: String,
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Payment method
        #[arg(short = 'p', long = "method", default_value = DEFAULT_PAYMENT_METHOD)]
        method: String,
    },
    /// List expenses, newest first
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Search descriptions and categories
        #[arg(short, long)]
        search: Option<String>,
        /// Number of expenses to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
    /// Show expense details
    Show {
        /// Expense ID
        id: String,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
    /// List the suggested categories and payment methods
    Categories,
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: ExpenseCommands,
) -> SpendwiseResult<()> {
    let service = ExpenseService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            date,
            method,
        } => {
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => clock.today(),
            };
            if !DEFAULT_CATEGORIES
                .iter()
                .any(|c| c.eq_ignore_ascii_case(category.trim()))
            {
                warn!(%category, "Recording expense under a custom category");
            }

            let id = service.add(NewExpense::new(description, amount, category, date, method))?;
            if let Some(expense) = service.get(id)? {
                println!(
                    "Recorded {} for {} ({})",
                    expense.amount.format_with_symbol(currency),
                    expense.description,
                    expense.id
                );
            }
        }

        ExpenseCommands::List {
            category,
            month,
            search,
            limit,
        } => {
            let filter = ExpenseFilter {
                category,
                month: month.as_deref().map(parse_month).transpose()?,
                search,
            };
            let expenses = service.list_filtered(&filter)?;
            let shown: Vec<_> = expenses.iter().take(limit).cloned().collect();

            print!("{}", format_expense_list(&shown, currency));
            if expenses.len() > shown.len() {
                println!("\nShowing {} of {} expenses", shown.len(), expenses.len());
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = service.resolve(&id)?;
            print!("{}", format_expense_details(&expense, currency));
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.resolve(&id)?;
            service.delete(expense.id)?;
            println!("Deleted expense: {} ({})", expense.description, expense.id);
        }

        ExpenseCommands::Categories => {
            println!("Categories:");
            for category in DEFAULT_CATEGORIES {
                println!("  {}", category);
            }
            println!("\nPayment methods:");
            for method in PAYMENT_METHODS {
                println!("  {}", method);
            }
        }
    }

    Ok(())
}
