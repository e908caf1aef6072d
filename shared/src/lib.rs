use serde::{Deserialize, Serialize};
use std::fmt;

/// Lenient numeric field decoding for values that originate in free-form
/// text inputs. Accepts a JSON number or a string; a string that does not
/// parse decodes as 0.0 rather than failing the whole request.
pub mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => n,
            NumberOrText::Text(s) => s.trim().parse().unwrap_or(0.0),
        })
    }
}

/// Company settings. Exactly one row exists (id = 1), created on first
/// initialization and rewritten in place by updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub id: i64,
    pub company_name: Option<String>,
    /// Tax identification number of the company
    pub nuit: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub logo_uri: Option<String>,
    pub locale: String,
    pub currency: String,
    /// Document-level tax percentage applied to every invoice subtotal
    pub tax_percentage: f64,
}

/// A customer that documents can be issued to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub nuit: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
}

/// A catalog product used to prefill invoice line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub price: f64,
    pub tax_rate: f64,
    pub description: Option<String>,
    pub created_at: String,
}

/// Kind of commercial document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Full invoice ("FACTURA")
    #[serde(rename = "FACTURA")]
    Invoice,
    /// Quotation ("COTACAO")
    #[serde(rename = "COTACAO")]
    Quotation,
    /// Cash sale ("VD", venda a dinheiro)
    #[serde(rename = "VD")]
    CashSale,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "FACTURA",
            DocumentKind::Quotation => "COTACAO",
            DocumentKind::CashSale => "VD",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FACTURA" => Some(DocumentKind::Invoice),
            "COTACAO" => Some(DocumentKind::Quotation),
            "VD" => Some(DocumentKind::CashSale),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a document. Set to Draft on creation; transitions
/// happen through explicit status updates from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[serde(rename = "DRAFT")]
    Draft,
    #[serde(rename = "SENT")]
    Sent,
    #[serde(rename = "PAID")]
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "DRAFT",
            InvoiceStatus::Sent => "SENT",
            InvoiceStatus::Paid => "PAID",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(InvoiceStatus::Draft),
            "SENT" => Some(InvoiceStatus::Sent),
            "PAID" => Some(InvoiceStatus::Paid),
            _ => None,
        }
    }
}

/// An invoice, quotation or cash sale together with its stored totals.
/// Totals are always derived from the current line item set at write time;
/// the stored columns exist for listing and export, not as a source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub kind: DocumentKind,
    pub client_id: Option<i64>,
    /// Issue date (RFC 3339)
    pub date: String,
    pub due_date: Option<String>,
    pub subtotal: f64,
    pub tax_total: f64,
    pub discount_total: f64,
    pub total: f64,
    pub status: InvoiceStatus,
    pub invoice_number: Option<String>,
}

/// A single line of an invoice. Owned exclusively by its invoice; replaced
/// wholesale on every edit, so ids are not stable across updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: i64,
    pub invoice_id: i64,
    pub product_id: Option<i64>,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// Per-item rate kept from the product catalog; document totals apply
    /// the settings-level percentage instead
    pub tax_rate: f64,
    /// Always quantity * unit_price, recomputed on every write
    pub total: f64,
}

/// Direction of a cash journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Money in
    #[serde(rename = "ENTRY")]
    Entry,
    /// Money out
    #[serde(rename = "EXIT")]
    Exit,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Entry => "ENTRY",
            EntryKind::Exit => "EXIT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ENTRY" => Some(EntryKind::Entry),
            "EXIT" => Some(EntryKind::Exit),
            _ => None,
        }
    }
}

/// A cash journal entry. The amount is always positive; the sign is derived
/// from the kind when the balance is folded. The invoice reference is weak:
/// deleting the invoice clears it instead of deleting the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub kind: EntryKind,
    pub amount: f64,
    pub description: String,
    pub date: String,
    pub category: Option<String>,
    pub document_type: Option<String>,
    pub invoice_id: Option<i64>,
}

/// Line item fields as submitted by the UI. Totals are not accepted from the
/// caller; they are recomputed server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemInput {
    pub product_id: Option<i64>,
    pub description: String,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub quantity: f64,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub unit_price: f64,
    #[serde(default)]
    pub tax_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    pub kind: DocumentKind,
    pub client_id: Option<i64>,
    /// Issue date override (RFC 3339) - uses current time if not provided
    pub date: Option<String>,
    pub due_date: Option<String>,
    pub items: Vec<LineItemInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub kind: DocumentKind,
    pub client_id: Option<i64>,
    pub date: String,
    pub due_date: Option<String>,
    pub items: Vec<LineItemInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub invoice: Invoice,
    /// Display code such as "FAC-003"
    pub document_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDetailResponse {
    pub invoice: Invoice,
    pub items: Vec<LineItem>,
    pub document_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<InvoiceResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateJournalEntryRequest {
    pub kind: EntryKind,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub amount: f64,
    pub description: String,
    /// Date override (RFC 3339) - uses current time if not provided
    pub date: Option<String>,
    pub category: Option<String>,
    pub document_type: Option<String>,
    pub invoice_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateJournalEntryRequest {
    pub kind: EntryKind,
    #[serde(deserialize_with = "lenient::deserialize")]
    pub amount: f64,
    pub description: String,
    pub category: Option<String>,
    pub document_type: Option<String>,
    pub invoice_id: Option<i64>,
}

/// Journal listing together with the recomputed net balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalListResponse {
    pub entries: Vec<JournalEntry>,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalBalanceResponse {
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub nuit: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

pub type UpdateClientRequest = CreateClientRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientListResponse {
    pub clients: Vec<Client>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub code: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub tax_rate: f64,
    pub description: Option<String>,
}

pub type UpdateProductRequest = CreateProductRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    pub company_name: Option<String>,
    pub nuit: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub logo_uri: Option<String>,
    pub locale: String,
    pub currency: String,
    pub tax_percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_kind_round_trips_through_wire_names() {
        for kind in [
            DocumentKind::Invoice,
            DocumentKind::Quotation,
            DocumentKind::CashSale,
        ] {
            assert_eq!(DocumentKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(DocumentKind::parse("RECIBO"), None);
    }

    #[test]
    fn entry_kind_serializes_as_stored_text() {
        let json = serde_json::to_string(&EntryKind::Entry).unwrap();
        assert_eq!(json, "\"ENTRY\"");
        let parsed: EntryKind = serde_json::from_str("\"EXIT\"").unwrap();
        assert_eq!(parsed, EntryKind::Exit);
    }

    #[test]
    fn invoice_status_defaults_to_known_names() {
        assert_eq!(InvoiceStatus::parse("DRAFT"), Some(InvoiceStatus::Draft));
        assert_eq!(InvoiceStatus::parse("draft"), None);
    }

    #[test]
    fn lenient_fields_accept_text_and_coerce_junk_to_zero() {
        let item: LineItemInput = serde_json::from_str(
            r#"{"product_id":null,"description":"Cement","quantity":"2.5","unit_price":"abc"}"#,
        )
        .unwrap();
        assert_eq!(item.quantity, 2.5);
        assert_eq!(item.unit_price, 0.0);
        assert_eq!(item.tax_rate, 0.0);

        let item: LineItemInput = serde_json::from_str(
            r#"{"product_id":1,"description":"Cement","quantity":3,"unit_price":120.0,"tax_rate":16}"#,
        )
        .unwrap();
        assert_eq!(item.quantity, 3.0);
        assert_eq!(item.unit_price, 120.0);
    }
}
