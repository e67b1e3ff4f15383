//! Audit logging for the expense ledger
//!
//! Records every added and deleted expense in an append-only, line-delimited
//! JSON log. The log is a side channel: a failed audit write is reported as a
//! warning and never blocks the ledger operation that triggered it.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
