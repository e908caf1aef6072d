//! Invoice aggregate service.
//!
//! Owns the invariant that an invoice's stored totals always equal the sum
//! of its line items: totals are recomputed from the submitted item set on
//! every write and the stored columns are never trusted as authoritative.
//! All multi-row writes go through single transactional storage calls.

use std::sync::Arc;

use tracing::info;

use shared::{
    CreateInvoiceRequest, InvoiceDetailResponse, InvoiceListResponse, InvoiceResponse,
    InvoiceStatus, LineItemInput, UpdateInvoiceRequest,
};

use crate::domain::commands::invoices::{InvoiceRecord, LineItemRecord};
use crate::domain::error::ServiceError;
use crate::domain::{document_code, money, now_rfc3339};
use crate::storage::{Connection, InvoiceStorage, SettingsStorage};

#[derive(Clone)]
pub struct InvoiceService<C: Connection> {
    invoice_repository: C::Invoices,
    settings_repository: C::Settings,
}

impl<C: Connection> InvoiceService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            invoice_repository: connection.create_invoice_repository(),
            settings_repository: connection.create_settings_repository(),
        }
    }

    pub async fn create_invoice(
        &self,
        request: CreateInvoiceRequest,
    ) -> Result<InvoiceDetailResponse, ServiceError> {
        let items = validate_items(&request.items)?;
        let settings = self.settings_repository.get_settings().await?;
        let totals = money::document_totals(&items, settings.tax_percentage);

        let record = InvoiceRecord {
            kind: request.kind,
            client_id: request.client_id,
            date: request.date.unwrap_or_else(now_rfc3339),
            due_date: request.due_date,
            subtotal: totals.subtotal,
            tax_total: totals.tax,
            total: totals.total,
            status: InvoiceStatus::Draft,
            items,
        };

        let id = self.invoice_repository.create_invoice(&record).await?;
        info!(
            "Created document {} with {} items, total {:.2}",
            document_code::format_document_code(record.kind.as_str(), id),
            record.items.len(),
            record.total
        );

        self.get_invoice(id)
            .await?
            .ok_or(ServiceError::NotFound("document"))
    }

    pub async fn update_invoice(
        &self,
        id: i64,
        request: UpdateInvoiceRequest,
    ) -> Result<InvoiceDetailResponse, ServiceError> {
        let items = validate_items(&request.items)?;
        let settings = self.settings_repository.get_settings().await?;
        let totals = money::document_totals(&items, settings.tax_percentage);

        let record = InvoiceRecord {
            kind: request.kind,
            client_id: request.client_id,
            date: request.date,
            due_date: request.due_date,
            subtotal: totals.subtotal,
            tax_total: totals.tax,
            total: totals.total,
            // Status is untouched by edits; only creation sets it
            status: InvoiceStatus::Draft,
            items,
        };

        if !self.invoice_repository.update_invoice(id, &record).await? {
            return Err(ServiceError::NotFound("document"));
        }
        info!(
            "Updated document {} ({} items, total {:.2})",
            document_code::format_document_code(record.kind.as_str(), id),
            record.items.len(),
            record.total
        );

        self.get_invoice(id)
            .await?
            .ok_or(ServiceError::NotFound("document"))
    }

    /// Delete the invoice and its line items; journal entries referencing it
    /// keep living with their back-reference cleared.
    pub async fn delete_invoice(&self, id: i64) -> Result<(), ServiceError> {
        if !self.invoice_repository.delete_invoice(id).await? {
            return Err(ServiceError::NotFound("document"));
        }
        info!("Deleted document {id} and its line items");
        Ok(())
    }

    pub async fn get_invoice(
        &self,
        id: i64,
    ) -> Result<Option<InvoiceDetailResponse>, ServiceError> {
        let Some(invoice) = self.invoice_repository.get_invoice(id).await? else {
            return Ok(None);
        };
        let items = self.invoice_repository.get_invoice_items(id).await?;
        let document_code = document_code::format_document_code(invoice.kind.as_str(), invoice.id);

        Ok(Some(InvoiceDetailResponse {
            invoice,
            items,
            document_code,
        }))
    }

    pub async fn list_invoices(&self) -> Result<InvoiceListResponse, ServiceError> {
        let invoices = self
            .invoice_repository
            .list_invoices()
            .await?
            .into_iter()
            .map(|invoice| {
                let document_code =
                    document_code::format_document_code(invoice.kind.as_str(), invoice.id);
                InvoiceResponse {
                    invoice,
                    document_code,
                }
            })
            .collect();

        Ok(InvoiceListResponse { invoices })
    }
}

/// Check the submitted items and compute their line totals. Quantities and
/// prices below zero are rejected rather than silently producing negative
/// totals.
fn validate_items(items: &[LineItemInput]) -> Result<Vec<LineItemRecord>, ServiceError> {
    if items.is_empty() {
        return Err(ServiceError::validation(
            "A document needs at least one item",
        ));
    }

    items
        .iter()
        .map(|item| {
            if item.quantity < 0.0 {
                return Err(ServiceError::validation(format!(
                    "Item '{}' has a negative quantity",
                    item.description
                )));
            }
            if item.unit_price < 0.0 {
                return Err(ServiceError::validation(format!(
                    "Item '{}' has a negative unit price",
                    item.description
                )));
            }
            Ok(LineItemRecord {
                product_id: item.product_id,
                description: item.description.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                tax_rate: item.tax_rate,
                total: money::line_total(item.quantity, item.unit_price),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journal_service::JournalService;
    use crate::storage::DbConnection;
    use shared::{CreateJournalEntryRequest, DocumentKind, EntryKind};

    async fn create_test_service() -> (InvoiceService<DbConnection>, Arc<DbConnection>) {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        (InvoiceService::new(db.clone()), db)
    }

    fn item(description: &str, quantity: f64, unit_price: f64) -> LineItemInput {
        LineItemInput {
            product_id: None,
            description: description.to_string(),
            quantity,
            unit_price,
            tax_rate: 0.0,
        }
    }

    fn create_request(items: Vec<LineItemInput>) -> CreateInvoiceRequest {
        CreateInvoiceRequest {
            kind: DocumentKind::Invoice,
            client_id: None,
            date: None,
            due_date: None,
            items,
        }
    }

    #[tokio::test]
    async fn create_computes_totals_from_items_and_default_tax() {
        let (service, _db) = create_test_service().await;

        let detail = service
            .create_invoice(create_request(vec![
                item("Cement", 2.0, 50.0),
                item("Sand", 1.0, 30.0),
            ]))
            .await
            .unwrap();

        assert!((detail.invoice.subtotal - 130.0).abs() < 0.001);
        assert!((detail.invoice.tax_total - 20.8).abs() < 0.001);
        assert!((detail.invoice.total - 150.8).abs() < 0.001);
        assert_eq!(detail.invoice.status, InvoiceStatus::Draft);
        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.items[0].total, 100.0);
        assert_eq!(detail.document_code, format!("FAC-{:03}", detail.invoice.id));
    }

    #[tokio::test]
    async fn create_rejects_empty_item_list() {
        let (service, _db) = create_test_service().await;

        let err = service.create_invoice(create_request(vec![])).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_negative_quantity_and_price() {
        let (service, _db) = create_test_service().await;

        let err = service
            .create_invoice(create_request(vec![item("Cement", -1.0, 50.0)]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = service
            .create_invoice(create_request(vec![item("Cement", 1.0, -50.0)]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn update_replaces_the_item_set_wholesale() {
        let (service, _db) = create_test_service().await;

        let created = service
            .create_invoice(create_request(vec![
                item("A", 1.0, 10.0),
                item("B", 1.0, 20.0),
            ]))
            .await
            .unwrap();
        let id = created.invoice.id;

        let updated = service
            .update_invoice(
                id,
                UpdateInvoiceRequest {
                    kind: DocumentKind::Invoice,
                    client_id: None,
                    date: created.invoice.date.clone(),
                    due_date: None,
                    items: vec![item("C", 3.0, 5.0)],
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.items[0].description, "C");
        assert!((updated.invoice.subtotal - 15.0).abs() < 0.001);

        // A second read must agree: [A, B] are gone, only [C] remains
        let reread = service.get_invoice(id).await.unwrap().unwrap();
        assert_eq!(reread.items.len(), 1);
        assert_eq!(reread.items[0].description, "C");
    }

    #[tokio::test]
    async fn update_of_missing_document_is_not_found() {
        let (service, _db) = create_test_service().await;

        let err = service
            .update_invoice(
                999,
                UpdateInvoiceRequest {
                    kind: DocumentKind::Quotation,
                    client_id: None,
                    date: "2025-03-01T09:00:00Z".to_string(),
                    due_date: None,
                    items: vec![item("X", 1.0, 1.0)],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_unlinks_journal_entries_and_removes_items() {
        let (service, db) = create_test_service().await;
        let journal = JournalService::new(db.clone());

        let created = service
            .create_invoice(create_request(vec![item("Cement", 2.0, 50.0)]))
            .await
            .unwrap();
        let id = created.invoice.id;

        let entry = journal
            .create_entry(CreateJournalEntryRequest {
                kind: EntryKind::Entry,
                amount: created.invoice.total,
                description: "Payment".to_string(),
                date: None,
                category: None,
                document_type: Some(created.invoice.kind.as_str().to_string()),
                invoice_id: Some(id),
            })
            .await
            .unwrap();

        service.delete_invoice(id).await.unwrap();

        // Document and items are gone
        assert!(service.get_invoice(id).await.unwrap().is_none());
        let row = sqlx::query("SELECT count(*) AS count FROM invoice_items WHERE invoice_id = ?")
            .bind(id)
            .fetch_one(db.pool())
            .await
            .unwrap();
        let orphan_items: i64 = sqlx::Row::get(&row, "count");
        assert_eq!(orphan_items, 0);

        // The journal entry survives with the back-reference cleared
        let surviving = journal.get_entry(entry.id).await.unwrap().unwrap();
        assert_eq!(surviving.invoice_id, None);
        assert_eq!(surviving.amount, created.invoice.total);
    }

    #[tokio::test]
    async fn delete_of_missing_document_is_not_found() {
        let (service, _db) = create_test_service().await;

        let err = service.delete_invoice(42).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_orders_by_date_descending_with_codes() {
        let (service, _db) = create_test_service().await;

        service
            .create_invoice(CreateInvoiceRequest {
                kind: DocumentKind::Invoice,
                client_id: None,
                date: Some("2025-01-10T10:00:00Z".to_string()),
                due_date: None,
                items: vec![item("Old", 1.0, 10.0)],
            })
            .await
            .unwrap();
        service
            .create_invoice(CreateInvoiceRequest {
                kind: DocumentKind::CashSale,
                client_id: None,
                date: Some("2025-02-10T10:00:00Z".to_string()),
                due_date: None,
                items: vec![item("New", 1.0, 20.0)],
            })
            .await
            .unwrap();

        let list = service.list_invoices().await.unwrap();
        assert_eq!(list.invoices.len(), 2);
        assert_eq!(list.invoices[0].invoice.kind, DocumentKind::CashSale);
        assert!(list.invoices[0].document_code.starts_with("VD-"));
        assert!(list.invoices[1].document_code.starts_with("FAC-"));
    }
}
