//! # Storage Traits
//!
//! The storage abstraction consumed by the domain layer. Each aggregate gets
//! its own trait; the `Connection` trait ties them together so services can
//! be written against any backend that provides the full set.
//!
//! Multi-statement sequences (invoice create/update/delete) are single
//! methods here: the implementation must make them atomic, because the
//! individual statements are only atomic one by one.

use async_trait::async_trait;
use shared::{
    Client, CreateClientRequest, CreateProductRequest, Invoice, JournalEntry, LineItem, Product,
    Settings, UpdateSettingsRequest,
};

use crate::domain::commands::invoices::InvoiceRecord;
use crate::domain::commands::journal::EntryRecord;

pub type StorageResult<T> = Result<T, sqlx::Error>;

/// Interface for invoice aggregate storage. An invoice and its line items
/// are always written together.
#[async_trait]
pub trait InvoiceStorage: Send + Sync {
    /// Insert the invoice row and all its line items atomically.
    /// Returns the new invoice id.
    async fn create_invoice(&self, record: &InvoiceRecord) -> StorageResult<i64>;

    async fn get_invoice(&self, id: i64) -> StorageResult<Option<Invoice>>;

    /// List invoices ordered by date descending (most recent first)
    async fn list_invoices(&self) -> StorageResult<Vec<Invoice>>;

    async fn get_invoice_items(&self, invoice_id: i64) -> StorageResult<Vec<LineItem>>;

    /// Update the scalar columns and replace the full line item set
    /// atomically. Returns false if no invoice row matched.
    async fn update_invoice(&self, id: i64, record: &InvoiceRecord) -> StorageResult<bool>;

    /// Atomically: clear the weak back-reference on journal entries that
    /// point at this invoice, delete its line items, delete the row.
    /// Returns false if no invoice row matched.
    async fn delete_invoice(&self, id: i64) -> StorageResult<bool>;
}

/// Interface for cash journal storage
#[async_trait]
pub trait JournalStorage: Send + Sync {
    async fn create_entry(&self, record: &EntryRecord) -> StorageResult<i64>;

    async fn get_entry(&self, id: i64) -> StorageResult<Option<JournalEntry>>;

    /// List all entries ordered by date descending
    async fn list_entries(&self) -> StorageResult<Vec<JournalEntry>>;

    /// Returns false if no entry matched
    async fn update_entry(&self, id: i64, record: &EntryRecord) -> StorageResult<bool>;

    /// Returns false if no entry matched
    async fn delete_entry(&self, id: i64) -> StorageResult<bool>;
}

/// Interface for client storage
#[async_trait]
pub trait ClientStorage: Send + Sync {
    async fn store_client(&self, client: &CreateClientRequest) -> StorageResult<i64>;

    async fn get_client(&self, id: i64) -> StorageResult<Option<Client>>;

    /// List all clients ordered by name
    async fn list_clients(&self) -> StorageResult<Vec<Client>>;

    async fn update_client(&self, id: i64, client: &CreateClientRequest) -> StorageResult<bool>;

    async fn delete_client(&self, id: i64) -> StorageResult<bool>;
}

/// Interface for product storage
#[async_trait]
pub trait ProductStorage: Send + Sync {
    async fn store_product(&self, product: &CreateProductRequest) -> StorageResult<i64>;

    async fn get_product(&self, id: i64) -> StorageResult<Option<Product>>;

    /// List all products ordered by name
    async fn list_products(&self) -> StorageResult<Vec<Product>>;

    async fn update_product(&self, id: i64, product: &CreateProductRequest)
        -> StorageResult<bool>;

    async fn delete_product(&self, id: i64) -> StorageResult<bool>;
}

/// Interface for the settings singleton (row id = 1)
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    async fn get_settings(&self) -> StorageResult<Settings>;

    /// Rewrite the singleton row and return the stored value
    async fn update_settings(&self, update: &UpdateSettingsRequest) -> StorageResult<Settings>;
}

/// Trait defining the interface for storage connections.
///
/// Abstracts the concrete connection type and provides factory methods for
/// the repositories, so the domain layer can be wired against any backend.
pub trait Connection: Send + Sync + Clone {
    type Invoices: InvoiceStorage + Clone;
    type Journal: JournalStorage + Clone;
    type Clients: ClientStorage + Clone;
    type Products: ProductStorage + Clone;
    type Settings: SettingsStorage + Clone;

    fn create_invoice_repository(&self) -> Self::Invoices;
    fn create_journal_repository(&self) -> Self::Journal;
    fn create_client_repository(&self) -> Self::Clients;
    fn create_product_repository(&self) -> Self::Products;
    fn create_settings_repository(&self) -> Self::Settings;
}
