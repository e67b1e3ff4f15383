//! Expense ledger service
//!
//! Owns the expenses of the selected period and keeps the store in step
//! with them. Every mutation recomputes the total and writes the full list
//! back under the period key.
//!
//! Storage failures never leave the ledger unusable. A failed load yields
//! an empty list and [`LoadOutcome::Degraded`]; a failed write keeps the
//! in-memory change and reports [`Persistence::Unsynced`].
//!
//! Loads can be split in three steps ([`Ledger::begin_load`],
//! [`LoadTicket::fetch`], [`Ledger::finish_load`]) so the read can happen
//! off the caller's thread. Only the most recently issued ticket is applied;
//! results of superseded loads are dropped.

use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    total_of, Expense, ExpenseForm, ExpenseId, ExpenseValidationError, Period, ValidExpense,
};
use crate::storage::expenses::fetch;
use crate::storage::{ExpenseRepository, KeyValueStore};

/// Where the ledger is in its load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerState {
    /// No period has been loaded yet
    Unloaded,
    /// A load for `period` was issued and has not been applied
    Loading { period: Period },
    /// `period` is in memory
    Loaded { period: Period },
}

/// Result of applying a load
#[derive(Debug)]
pub enum LoadOutcome {
    /// Stored expenses were read
    Loaded { count: usize },
    /// Nothing was stored for the period
    Empty,
    /// The store failed; the period is shown as empty
    Degraded(LedgerError),
}

impl LoadOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// Whether a mutation reached the store
#[derive(Debug)]
pub enum Persistence {
    Synced,
    /// The write failed; memory and store differ until the next load
    Unsynced(LedgerError),
}

impl Persistence {
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }
}

/// An expense that was just added
#[derive(Debug)]
pub struct Added {
    pub expense: Expense,
    pub persistence: Persistence,
}

/// Outcome of a delete; `expenses` is empty when no id matched
#[derive(Debug)]
pub struct Removed {
    /// Every expense that carried the id, in list order
    pub expenses: Vec<Expense>,
    pub persistence: Persistence,
}

/// Token for an issued load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    period: Period,
    generation: u64,
}

impl LoadTicket {
    pub fn period(&self) -> Period {
        self.period
    }

    /// Read the ticket's period from the store
    pub fn fetch<S: KeyValueStore + ?Sized>(self, store: &S) -> FetchedPeriod {
        FetchedPeriod {
            ticket: self,
            result: fetch(store, self.period),
        }
    }
}

/// Raw result of a fetch, waiting to be applied
#[derive(Debug)]
pub struct FetchedPeriod {
    ticket: LoadTicket,
    result: LedgerResult<Option<Vec<Expense>>>,
}

impl FetchedPeriod {
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }
}

/// The expense ledger for one selected period at a time
pub struct Ledger<S> {
    repo: ExpenseRepository<S>,
    audit: Option<AuditLogger>,
    period: Option<Period>,
    pending: Option<LoadTicket>,
    generation: u64,
    expenses: Vec<Expense>,
    total: f64,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Create an unloaded ledger over a store
    pub fn new(store: S) -> Self {
        Self {
            repo: ExpenseRepository::new(store),
            audit: None,
            period: None,
            pending: None,
            generation: 0,
            expenses: Vec::new(),
            total: 0.0,
        }
    }

    /// Record adds and deletes in an audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn store(&self) -> &S {
        self.repo.store()
    }

    pub fn state(&self) -> LedgerState {
        match (self.pending, self.period) {
            (Some(ticket), _) => LedgerState::Loading {
                period: ticket.period,
            },
            (None, Some(period)) => LedgerState::Loaded { period },
            (None, None) => LedgerState::Unloaded,
        }
    }

    /// Period whose expenses are in memory
    pub fn period(&self) -> Option<Period> {
        self.period
    }

    /// Expenses of the loaded period, in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Sum of prices of the loaded period
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Select `period` and load it from the store
    pub fn load(&mut self, period: Period) -> LoadOutcome {
        let ticket = self.begin_load(period);
        let result = self.repo.load(period);
        self.apply(ticket, result)
    }

    /// Select `period`, superseding any load still in flight
    pub fn begin_load(&mut self, period: Period) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket {
            period,
            generation: self.generation,
        };
        self.pending = Some(ticket);
        debug!(period = %period, generation = ticket.generation, "load issued");
        ticket
    }

    /// Apply a fetched period, or drop it if a newer load was issued since
    pub fn finish_load(&mut self, fetched: FetchedPeriod) -> Option<LoadOutcome> {
        if self.pending != Some(fetched.ticket) {
            debug!(
                period = %fetched.ticket.period,
                generation = fetched.ticket.generation,
                "discarding stale load"
            );
            return None;
        }

        Some(self.apply(fetched.ticket, fetched.result))
    }

    fn apply(
        &mut self,
        ticket: LoadTicket,
        result: LedgerResult<Option<Vec<Expense>>>,
    ) -> LoadOutcome {
        let period = ticket.period;
        self.pending = None;
        self.period = Some(period);

        let outcome = match result {
            Ok(Some(expenses)) => {
                self.expenses = expenses;
                LoadOutcome::Loaded {
                    count: self.expenses.len(),
                }
            }
            Ok(None) => {
                self.expenses.clear();
                LoadOutcome::Empty
            }
            Err(e) => {
                warn!(period = %period, error = %e, "failed to load expenses");
                self.expenses.clear();
                LoadOutcome::Degraded(e)
            }
        };

        self.recompute_total();
        info!(period = %period, count = self.expenses.len(), total = self.total, "period loaded");
        outcome
    }

    /// Check a form without touching the ledger
    pub fn validate(&self, form: &ExpenseForm) -> Result<ValidExpense, ExpenseValidationError> {
        form.validate()
    }

    /// Validate a form and add it as a new expense
    pub fn add(&mut self, form: &ExpenseForm) -> LedgerResult<Added> {
        let period = self.loaded_period()?;
        let fields = form.validate()?;
        Ok(self.insert(period, fields))
    }

    /// Add an expense from already validated fields
    pub fn add_valid(&mut self, fields: ValidExpense) -> LedgerResult<Added> {
        let period = self.loaded_period()?;
        Ok(self.insert(period, fields))
    }

    /// Remove every expense with `id`; an unknown id leaves the list as is
    ///
    /// Older stored data may repeat an id, so all matches go.
    pub fn delete(&mut self, id: &ExpenseId) -> LedgerResult<Removed> {
        let period = self.loaded_period()?;

        let (removed, kept): (Vec<_>, Vec<_>) =
            self.expenses.drain(..).partition(|e| &e.id == id);
        self.expenses = kept;
        self.recompute_total();

        let persistence = self.persist(period);

        if removed.is_empty() {
            debug!(period = %period, id = %id, "delete matched no expense");
        }
        for expense in &removed {
            info!(period = %period, id = %expense.id, total = self.total, "expense deleted");
            self.record(AuditEntry::delete(period, expense));
        }

        Ok(Removed {
            expenses: removed,
            persistence,
        })
    }

    /// Look up an expense of the loaded period
    pub fn select(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    fn insert(&mut self, period: Period, fields: ValidExpense) -> Added {
        let expense = Expense::new(fields);
        self.expenses.push(expense.clone());
        self.recompute_total();

        let persistence = self.persist(period);
        info!(period = %period, id = %expense.id, total = self.total, "expense added");
        self.record(AuditEntry::create(period, &expense));

        Added {
            expense,
            persistence,
        }
    }

    fn loaded_period(&self) -> LedgerResult<Period> {
        match self.state() {
            LedgerState::Loaded { period } => Ok(period),
            _ => Err(LedgerError::NotLoaded),
        }
    }

    fn recompute_total(&mut self) {
        self.total = total_of(&self.expenses);
    }

    fn persist(&self, period: Period) -> Persistence {
        match self.repo.save(period, &self.expenses) {
            Ok(()) => Persistence::Synced,
            Err(e) => {
                warn!(period = %period, error = %e, "failed to persist expenses");
                Persistence::Unsynced(e)
            }
        }
    }

    fn record(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}
