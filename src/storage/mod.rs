//! Storage layer for the expense ledger
//!
//! A minimal key-value store contract with file and in-memory backends,
//! plus the typed expense repository on top of it.

pub mod expenses;
pub mod file_io;
pub mod file_store;
pub mod kv;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use file_store::FileStore;
pub use kv::{KeyValueStore, MemoryStore};
