use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_ledger::audit::AuditLogger;
use expense_ledger::cli::{handle_expense_command, ExpenseCommands};
use expense_ledger::config::{LedgerPaths, Settings};
use expense_ledger::services::Ledger;
use expense_ledger::storage::FileStore;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Monthly expense ledger",
    long_about = "Record expenses by year and month, see the running total for \
                  a month, and delete entries you no longer need."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Show current configuration and paths, or change settings
    Config {
        /// Currency symbol shown after amounts
        #[arg(long)]
        currency: Option<String>,

        /// Record adds and deletes in the audit log (true/false)
        #[arg(long)]
        audit: Option<bool>,
    },

    /// Show the most recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    expense_ledger::init_tracing();

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            paths.ensure_directories()?;
            let mut ledger = Ledger::new(FileStore::new(paths.expenses_dir()));
            if settings.audit_enabled {
                ledger = ledger.with_audit(AuditLogger::new(paths.audit_log()));
            }
            handle_expense_command(&mut ledger, &settings.currency_symbol, cmd)?;
        }
        Some(Commands::Config { currency, audit }) => {
            if currency.is_some() || audit.is_some() {
                if let Some(symbol) = currency {
                    settings.currency_symbol = symbol;
                }
                if let Some(enabled) = audit {
                    settings.audit_enabled = enabled;
                }
                settings.save(&paths)?;
                println!("Settings saved.");
                println!();
            }

            println!("Expense Ledger Configuration");
            println!("============================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Expense store:   {}", paths.expenses_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        Some(Commands::History { limit }) => {
            let logger = AuditLogger::new(paths.audit_log());
            let entries = logger.read_recent(limit)?;
            if entries.is_empty() {
                println!("No history recorded.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("Expense Ledger - monthly expense tracking");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses list' to see this month's expenses.");
        }
    }

    Ok(())
}
