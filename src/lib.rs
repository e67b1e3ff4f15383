//! Expense Ledger - monthly expense tracking over a local key-value store
//!
//! Expenses are filed under a calendar month. The ledger keeps the selected
//! month's expenses and their total in memory and writes the full list back
//! to the store after every change.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expenses, ids and periods
//! - `storage`: Key-value store contract, file and memory backends
//! - `services`: The ledger state machine
//! - `audit`: Append-only log of adds and deletes
//! - `cli` / `display`: Terminal front end
//!
//! # Example
//!
//! ```rust
//! use expense_ledger::models::{ExpenseForm, Period};
//! use expense_ledger::services::Ledger;
//! use expense_ledger::storage::MemoryStore;
//!
//! let mut ledger = Ledger::new(MemoryStore::new());
//! ledger.load(Period::new(2024, 3).unwrap());
//! ledger.add(&ExpenseForm::new("Coffee", "35", "Morning")).unwrap();
//! assert_eq!(ledger.total(), 35.0);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, logging to stderr
///
/// `RUST_LOG` takes precedence; otherwise only this crate's warnings show.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("expense_ledger=warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
