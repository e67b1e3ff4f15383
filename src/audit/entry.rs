//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, Period};

/// Types of operations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Expense was added
    Create,
    /// Expense was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Storage key of the period the expense belongs to
    pub period: String,

    pub expense_id: String,

    pub title: String,

    /// The expense as it was created, or as it was just before deletion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<serde_json::Value>,
}

impl AuditEntry {
    fn new(operation: Operation, period: Period, expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            period: period.storage_key(),
            expense_id: expense.id.to_string(),
            title: expense.title.clone(),
            snapshot: serde_json::to_value(expense).ok(),
        }
    }

    /// Entry for an added expense
    pub fn create(period: Period, expense: &Expense) -> Self {
        Self::new(Operation::Create, period, expense)
    }

    /// Entry for a deleted expense
    pub fn delete(period: Period, expense: &Expense) -> Self {
        Self::new(Operation::Delete, period, expense)
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        format!(
            "[{}] {} {} {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.period,
            self.expense_id,
            self.title
        )
    }
}
