//! Expense CLI commands
//!
//! Implements the terminal front end: pick a period, list it with its
//! total, add through the validated form, show details, and delete after
//! confirmation.

use std::io::{self, BufRead, Write};

use clap::{Args, Subcommand};

use crate::display::{format_amount, format_expense_details, format_expense_list};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseForm, ExpenseId, Period};
use crate::services::{Ledger, LoadOutcome, Persistence};
use crate::storage::KeyValueStore;

/// Period selection shared by all expense commands
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Year (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<i32>,
    /// Month 1-12 (defaults to the current month)
    #[arg(short, long)]
    pub month: Option<u32>,
    /// Period as YEAR-MONTH (e.g. "2024-3")
    #[arg(long, conflicts_with_all = ["year", "month"])]
    pub period: Option<String>,
}

impl PeriodArgs {
    /// Resolve to a period, filling gaps from the current month
    pub fn resolve(&self) -> LedgerResult<Period> {
        if let Some(text) = &self.period {
            return Ok(Period::parse(text)?);
        }

        let current = Period::current();
        let year = self.year.unwrap_or(current.year());
        let month = self.month.unwrap_or(current.month());
        Ok(Period::new(year, month)?)
    }
}

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// List the expenses of a period with their total
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Add an expense
    Add {
        /// Short title
        #[arg(short, long, default_value = "")]
        title: String,
        /// Price, a positive number (e.g. "49.95")
        #[arg(short, long, default_value = "")]
        price: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Show expense details
    Show {
        /// Expense ID or a unique prefix of it
        id: String,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID or a unique prefix of it
        id: String,
        #[command(flatten)]
        period: PeriodArgs,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    currency: &str,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    match cmd {
        ExpenseCommands::List { period } => {
            let period = select_period(ledger, &period)?;
            print!(
                "{}",
                format_expense_list(period, ledger.expenses(), ledger.total(), currency)
            );
        }

        ExpenseCommands::Add {
            title,
            price,
            description,
            period,
        } => {
            let period = select_period(ledger, &period)?;
            let form = ExpenseForm::new(title, price, description);
            let fields = ledger.validate(&form)?;

            let added = ledger.add_valid(fields)?;
            report_persistence(&added.persistence);

            println!(
                "Added '{}' ({}) to {}",
                added.expense.title,
                format_amount(added.expense.price, currency),
                period
            );
            println!("ID:    {}", added.expense.id);
            println!("Total: {}", format_amount(ledger.total(), currency));
        }

        ExpenseCommands::Show { id, period } => {
            select_period(ledger, &period)?;
            let id = resolve_id(ledger.expenses(), &id)?;
            let expense = ledger
                .select(&id)
                .ok_or_else(|| LedgerError::expense_not_found(id.as_str()))?;
            print!("{}", format_expense_details(expense, currency));
        }

        ExpenseCommands::Delete { id, period, force } => {
            let period = select_period(ledger, &period)?;
            let id = resolve_id(ledger.expenses(), &id)?;
            let Some(expense) = ledger.select(&id) else {
                return Err(LedgerError::expense_not_found(id.as_str()));
            };

            if !force {
                let question = format!(
                    "Delete '{}' ({})?",
                    expense.title,
                    format_amount(expense.price, currency)
                );
                if !confirm(&question, io::stdin().lock())? {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let removed = ledger.delete(&id)?;
            report_persistence(&removed.persistence);

            for expense in &removed.expenses {
                println!("Deleted '{}' from {}", expense.title, period);
            }
            println!("Total: {}", format_amount(ledger.total(), currency));
        }
    }

    Ok(())
}

/// Load the requested period, warning if the store could not be read
fn select_period<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    args: &PeriodArgs,
) -> LedgerResult<Period> {
    let period = args.resolve()?;
    if let LoadOutcome::Degraded(e) = ledger.load(period) {
        eprintln!("Warning: could not read expenses for {}: {}", period, e);
    }
    Ok(period)
}

fn report_persistence(persistence: &Persistence) {
    if let Persistence::Unsynced(e) = persistence {
        eprintln!("Warning: change was not saved: {}", e);
    }
}

/// Match an id exactly, or by unique prefix as shown in list views
fn resolve_id(expenses: &[Expense], input: &str) -> LedgerResult<ExpenseId> {
    let input = input.trim();

    if let Some(expense) = expenses.iter().find(|e| e.id.as_str() == input) {
        return Ok(expense.id.clone());
    }

    let mut matches = expenses
        .iter()
        .filter(|e| !input.is_empty() && e.id.as_str().starts_with(input));

    match (matches.next(), matches.next()) {
        (Some(expense), None) => Ok(expense.id.clone()),
        (Some(_), Some(_)) => Err(LedgerError::Ambiguous {
            entity_type: "expense",
            identifier: input.to_string(),
        }),
        (None, _) => Err(LedgerError::expense_not_found(input)),
    }
}

/// Ask a yes/no question; anything but "y" or "yes" cancels
fn confirm<R: BufRead>(question: &str, mut input: R) -> LedgerResult<bool> {
    print!("{} (yes/no): ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
