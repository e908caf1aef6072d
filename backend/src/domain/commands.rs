//! Internal record types handed from the domain layer to storage.
//!
//! These carry fully computed values (line totals, document totals); the
//! storage layer writes them verbatim and never does arithmetic of its own.

pub mod invoices {
    use shared::{DocumentKind, InvoiceStatus};

    /// A line item ready to be written, total already computed
    #[derive(Debug, Clone)]
    pub struct LineItemRecord {
        pub product_id: Option<i64>,
        pub description: String,
        pub quantity: f64,
        pub unit_price: f64,
        pub tax_rate: f64,
        pub total: f64,
    }

    /// An invoice and its items ready to be written in one transaction
    #[derive(Debug, Clone)]
    pub struct InvoiceRecord {
        pub kind: DocumentKind,
        pub client_id: Option<i64>,
        pub date: String,
        pub due_date: Option<String>,
        pub subtotal: f64,
        pub tax_total: f64,
        pub total: f64,
        pub status: InvoiceStatus,
        pub items: Vec<LineItemRecord>,
    }
}

pub mod journal {
    use shared::EntryKind;

    /// A journal entry ready to be written
    #[derive(Debug, Clone)]
    pub struct EntryRecord {
        pub kind: EntryKind,
        pub amount: f64,
        pub description: String,
        pub date: String,
        pub category: Option<String>,
        pub document_type: Option<String>,
        pub invoice_id: Option<i64>,
    }
}
