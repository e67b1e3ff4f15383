//! Business logic layer
//!
//! The ledger service sits between the presentation layer and storage.

pub mod ledger;

pub use ledger::{
    Added, FetchedPeriod, Ledger, LedgerState, LoadOutcome, LoadTicket, Persistence, Removed,
};
