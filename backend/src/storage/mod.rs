//! # Storage Layer
//!
//! Persistence for the invoicing domain: the storage traits the domain layer
//! depends on, and their SQLite implementation.

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::{
    ClientStorage, Connection, InvoiceStorage, JournalStorage, ProductStorage, SettingsStorage,
};
