//! Core data models for the expense ledger
//!
//! Expenses, their identifiers, and the monthly periods they are filed under.

pub mod expense;
pub mod ids;
pub mod period;

pub use expense::{total_of, Expense, ExpenseForm, ExpenseValidationError, Field, ValidExpense};
pub use ids::ExpenseId;
pub use period::{Period, PeriodParseError};
