//! Expense repository over a key-value store
//!
//! Stores each period's expenses as a JSON array under the period key.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, Period};

use super::kv::KeyValueStore;

/// Typed access to the expenses of each period
#[derive(Debug, Clone)]
pub struct ExpenseRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ExpenseRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the expenses of a period, `None` if nothing was ever stored
    pub fn load(&self, period: Period) -> LedgerResult<Option<Vec<Expense>>> {
        fetch(&self.store, period)
    }

    /// Replace the stored expenses of a period
    pub fn save(&self, period: Period, expenses: &[Expense]) -> LedgerResult<()> {
        let key = period.storage_key();
        let value = serde_json::to_string(expenses).map_err(|e| {
            LedgerError::Storage(format!("Failed to serialize expenses for {}: {}", key, e))
        })?;
        self.store.set(&key, &value)
    }
}

/// Read and decode one period from any store
pub(crate) fn fetch<S: KeyValueStore + ?Sized>(
    store: &S,
    period: Period,
) -> LedgerResult<Option<Vec<Expense>>> {
    let key = period.storage_key();

    let Some(raw) = store.get(&key)? else {
        return Ok(None);
    };

    let expenses = serde_json::from_str(&raw).map_err(|e| {
        LedgerError::Storage(format!("Failed to parse expenses for {}: {}", key, e))
    })?;
    Ok(Some(expenses))
}
