use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spendwise::cli::{
    handle_bill_command, handle_budget_command, handle_expense_command, handle_insights_command,
    handle_spending_command, handle_summary_command, parse_date, BillCommands, BudgetCommands,
    ExpenseCommands,
};
use spendwise::clock::{Clock, FixedClock, SystemClock};
use spendwise::config::{paths::SpendwisePaths, settings::Settings};
use spendwise::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendwise",
    version,
    about = "Track expenses, budgets and bills from the terminal",
    long_about = "Spendwise records expenses, tracks per-category budgets and bill \
                  reminders, and turns recent spending into short insights."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, env = "SPENDWISE_TODAY")]
    today: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Bill reminder commands
    #[command(subcommand)]
    Bill(BillCommands),

    /// Dashboard: totals, budgets, bills and insights
    Summary,

    /// Spending by category
    Spending {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Cover every recorded expense
        #[arg(long, conflicts_with = "month")]
        all: bool,
    },

    /// Spending insights
    Insights {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let clock: Box<dyn Clock> = match cli.today.as_deref() {
        Some(date) => Box::new(FixedClock(parse_date(date)?)),
        None => Box::new(SystemClock),
    };

    // Initialize paths, settings and storage
    let paths = SpendwisePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(&paths)?;
    debug!(ledger = %paths.ledger_file().display(), today = %clock.today(), "Opened ledger");

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, clock.as_ref(), cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Bill(cmd)) => {
            handle_bill_command(&storage, &settings, clock.as_ref(), cmd)?;
        }
        Some(Commands::Summary) => {
            handle_summary_command(&storage, &settings, clock.as_ref())?;
        }
        Some(Commands::Spending { month, all }) => {
            handle_spending_command(&storage, &settings, clock.as_ref(), month, all)?;
        }
        Some(Commands::Insights { json }) => {
            handle_insights_command(&storage, &settings, clock.as_ref(), json)?;
        }
        Some(Commands::Config) => {
            println!("Spendwise Configuration");
            println!("=======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Ledger file:      {}", paths.ledger_file().display());
            println!();
            println!("Settings:");
            println!("  Currency:            {}", settings.currency_symbol);
            println!("  Recurring bills:     {:?}", settings.recurring_bills);
            println!("  Insight order:       {:?}", settings.insight_order);
            println!(
                "  Budget bands:        warning {}%, exceeded {}%",
                settings.thresholds.budget_warning_percent,
                settings.thresholds.budget_exceeded_percent
            );
            println!("  Insight limit:       {}", settings.thresholds.insight_limit);
        }
        None => {
            println!("Spendwise - expenses, budgets and bills");
            println!();
            println!("Run 'spendwise --help' for usage information.");
            println!("Run 'spendwise summary' for the dashboard.");
        }
    }

    Ok(())
}
