pub mod client_repository;
pub mod invoice_repository;
pub mod journal_repository;
pub mod product_repository;
pub mod settings_repository;

pub use client_repository::ClientRepository;
pub use invoice_repository::InvoiceRepository;
pub use journal_repository::JournalRepository;
pub use product_repository::ProductRepository;
pub use settings_repository::SettingsRepository;
