//! # Domain Layer
//!
//! Business logic for the invoicing application: pure arithmetic (money,
//! ledger, document codes) and the services that coordinate validation,
//! computation and storage per aggregate.

pub mod client_service;
pub mod commands;
pub mod document_code;
pub mod error;
pub mod export_service;
pub mod invoice_service;
pub mod journal_service;
pub mod ledger;
pub mod money;
pub mod product_service;
pub mod settings_service;

pub use client_service::ClientService;
pub use error::ServiceError;
pub use export_service::ExportService;
pub use invoice_service::InvoiceService;
pub use journal_service::JournalService;
pub use product_service::ProductService;
pub use settings_service::SettingsService;

use chrono::{SecondsFormat, Utc};

/// Current time as the RFC 3339 text the date columns store
pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
