//! CLI command handlers
//!
//! Bridges the clap argument parsing with the ledger service.

pub mod expense;

pub use expense::{handle_expense_command, ExpenseCommands, PeriodArgs};
