//! Budget CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{BudgetUpdate, NewBudget};
use crate::reports::{BudgetOverview, BudgetStatus};
use crate::services::{BudgetService, ExpenseService};
use crate::storage::Storage;

use super::parse_amount;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget for a category
    Add {
        /// Category name
        category: String,
        /// Spending limit
        limit: String,
        /// Display color tag
        #[arg(long, default_value = "default")]
        color: String,
    },
    /// Show every budget with its utilization
    List,
    /// Show one budget
    Show {
        /// Budget ID or category name
        budget: String,
    },
    /// Change a budget
    Update {
        /// Budget ID or category name
        budget: String,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New limit
        #[arg(long)]
        limit: Option<String>,
        /// New color tag
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a budget
    Delete {
        /// Budget ID or category name
        budget: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> SpendwiseResult<()> {
    let service = BudgetService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Add {
            category,
            limit,
            color,
        } => {
            let limit = parse_amount(&limit)?;
            let id = service.add(NewBudget::new(category, limit, color))?;
            if let Some(budget) = service.get(id)? {
                println!(
                    "Created budget: {} {} ({})",
                    budget.category,
                    budget.limit.format_with_symbol(currency),
                    budget.id
                );
            }
        }

        BudgetCommands::List => {
            let expenses = ExpenseService::new(storage).list()?;
            let overview = BudgetOverview::build(&service.list()?, &expenses, &settings.thresholds);
            print!("{}", overview.format_terminal(currency));
        }

        BudgetCommands::Show { budget } => {
            let budget = service.resolve(&budget)?;
            let expenses = ExpenseService::new(storage).list()?;
            let status = BudgetStatus::new(&budget, &expenses, &settings.thresholds);

            println!("Budget:    {}", budget.id);
            println!("Category:  {}", budget.category);
            println!("Limit:     {}", budget.limit.format_with_symbol(currency));
            println!("Spent:     {}", status.spent.format_with_symbol(currency));
            println!("Remaining: {}", status.remaining.format_with_symbol(currency));
            println!("Used:      {}% ({})", status.utilization, status.state);
            println!("Color:     {}", budget.color);
        }

        BudgetCommands::Update {
            budget,
            category,
            limit,
            color,
        } => {
            let budget = service.resolve(&budget)?;
            let update = BudgetUpdate {
                category,
                limit: limit.as_deref().map(parse_amount).transpose()?,
                color,
            };
            if update.is_empty() {
                return Err(SpendwiseError::Validation(
                    "Nothing to update; pass --category, --limit or --color".into(),
                ));
            }

            if let Some(updated) = service.update(budget.id, &update)? {
                println!(
                    "Updated budget: {} {} ({})",
                    updated.category,
                    updated.limit.format_with_symbol(currency),
                    updated.id
                );
            }
        }

        BudgetCommands::Delete { budget } => {
            let budget = service.resolve(&budget)?;
            service.delete(budget.id)?;
            println!("Deleted budget: {} ({})", budget.category, budget.id);
        }
    }

    Ok(())
}
