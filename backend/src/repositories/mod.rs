//! Database repositories
//!
//! Provides the data access layer for account records.

pub mod account;

pub use account::{AccountRecord, AccountRepository};
