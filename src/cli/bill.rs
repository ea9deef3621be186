//! Bill CLI commands

use clap::Subcommand;

use crate::clock::Clock;
use crate::config::Settings;
use crate::display::format_bill_details;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{BillFrequency, BillUpdate, NewBill};
use crate::reports::BillSchedule;
use crate::services::BillService;
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_frequency};

/// Bill subcommands
#[derive(Subcommand)]
pub enum BillCommands {
    /// Add a bill reminder
    Add {
        /// Bill name
        name: String,
        /// Amount due
        amount: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
        /// Who the bill is paid to
        #[arg(short, long, default_value = "")]
        provider: String,
        /// monthly, yearly or one-time
        #[arg(short, long, default_value = "monthly")]
        frequency: String,
        /// The bill does not repeat
        #[arg(long)]
        once: bool,
    },
    /// Show bills grouped by due date
    List,
    /// Show bill details
    Show {
        /// Bill ID
        id: String,
    },
    /// Change a bill
    Update {
        /// Bill ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// monthly, yearly or one-time
        #[arg(long)]
        frequency: Option<String>,
        /// Whether the bill repeats
        #[arg(long)]
        recurring: Option<bool>,
    },
    /// Mark a bill paid today
    Pay {
        /// Bill ID
        id: String,
    },
    /// Mark a paid bill unpaid again
    Unpay {
        /// Bill ID
        id: String,
    },
    /// Delete a bill
    Delete {
        /// Bill ID
        id: String,
    },
}

/// Handle a bill command
pub fn handle_bill_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: BillCommands,
) -> SpendwiseResult<()> {
    let service = BillService::new(storage, clock).with_policy(settings.recurring_bills);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        BillCommands::Add {
            name,
            amount,
            due,
            provider,
            frequency,
            once,
        } => {
            let frequency = parse_frequency(&frequency)?;
            let input = NewBill {
                name,
                provider,
                amount: parse_amount(&amount)?,
                due_date: parse_date(&due)?,
                is_recurring: !once && frequency != BillFrequency::OneTime,
                frequency,
                paid_date: None,
            };

            let id = service.add(input)?;
            if let Some(bill) = service.get(id)? {
                println!(
                    "Added bill: {} {} due {} ({})",
                    bill.name,
                    bill.amount.format_with_symbol(currency),
                    bill.due_date,
                    bill.id
                );
            }
        }

        BillCommands::List => {
            let schedule = BillSchedule::build(&service.list()?, clock.today(), &settings.thresholds);
            print!("{}", schedule.format_terminal(currency));
        }

        BillCommands::Show { id } => {
            let bill = service.resolve(&id)?;
            print!("{}", format_bill_details(&bill, clock.today(), currency));
        }

        BillCommands::Update {
            id,
            name,
            provider,
            amount,
            due,
            frequency,
            recurring,
        } => {
            let bill = service.resolve(&id)?;
            let update = BillUpdate {
                name,
                provider,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                due_date: due.as_deref().map(parse_date).transpose()?,
                is_recurring: recurring,
                frequency: frequency.as_deref().map(parse_frequency).transpose()?,
                paid_date: None,
            };
            if update == BillUpdate::default() {
                return Err(SpendwiseError::Validation("Nothing to update".into()));
            }

            if let Some(updated) = service.update(bill.id, &update)? {
                println!("Updated bill: {} ({})", updated.name, updated.id);
            }
        }

        BillCommands::Pay { id } => {
            let bill = service.resolve(&id)?;
            match service.mark_paid(bill.id)? {
                Some(outcome) => {
                    println!("Paid: {} ({})", outcome.paid.name, outcome.paid.id);
                    if let Some(next) = outcome.next {
                        println!("Next due: {} ({})", next.due_date, next.id);
                    }
                }
                None => println!("{} is already paid.", bill.name),
            }
        }

        BillCommands::Unpay { id } => {
            let bill = service.resolve(&id)?;
            let update = BillUpdate {
                paid_date: Some(None),
                ..Default::default()
            };
            if service.update(bill.id, &update)?.is_some() {
                println!("Marked unpaid: {} ({})", bill.name, bill.id);
            }
        }

        BillCommands::Delete { id } => {
            let bill = service.resolve(&id)?;
            service.delete(bill.id)?;
            println!("Deleted bill: {} ({})", bill.name, bill.id);
        }
    }

    Ok(())
}
