use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::warn;

use shared::{DocumentKind, Invoice, InvoiceStatus, LineItem};

use crate::domain::commands::invoices::InvoiceRecord;
use crate::storage::sqlite::db::DbConnection;
use crate::storage::traits::{InvoiceStorage, StorageResult};

/// Repository for the invoice aggregate: the `invoices` row plus its
/// `invoice_items` rows, written and deleted together.
#[derive(Clone)]
pub struct InvoiceRepository {
    db: DbConnection,
}

impl InvoiceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_invoice(row: &SqliteRow) -> Invoice {
        let kind_text: String = row.get("type");
        let kind = DocumentKind::parse(&kind_text).unwrap_or_else(|| {
            warn!("Unknown document kind '{kind_text}' in invoices table, reading as FACTURA");
            DocumentKind::Invoice
        });

        let status_text: String = row.get("status");
        let status = InvoiceStatus::parse(&status_text).unwrap_or_else(|| {
            warn!("Unknown invoice status '{status_text}', reading as DRAFT");
            InvoiceStatus::Draft
        });

        Invoice {
            id: row.get("id"),
            kind,
            client_id: row.get("client_id"),
            date: row.get("date"),
            due_date: row.get("due_date"),
            subtotal: row.get("subtotal"),
            tax_total: row.get("tax_total"),
            discount_total: row.get("discount_total"),
            total: row.get("total"),
            status,
            invoice_number: row.get("invoice_number"),
        }
    }

    fn map_item(row: &SqliteRow) -> LineItem {
        LineItem {
            id: row.get("id"),
            invoice_id: row.get("invoice_id"),
            product_id: row.get("product_id"),
            description: row.get("description"),
            quantity: row.get("quantity"),
            unit_price: row.get("unit_price"),
            tax_rate: row.get("tax_rate"),
            total: row.get("total"),
        }
    }
}

#[async_trait]
impl InvoiceStorage for InvoiceRepository {
    async fn create_invoice(&self, record: &InvoiceRecord) -> StorageResult<i64> {
        let mut tx = self.db.pool().begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO invoices (type, client_id, date, due_date, subtotal, tax_total, total, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.kind.as_str())
        .bind(record.client_id)
        .bind(&record.date)
        .bind(&record.due_date)
        .bind(record.subtotal)
        .bind(record.tax_total)
        .bind(record.total)
        .bind(record.status.as_str())
        .execute(&mut *tx)
        .await?;

        let invoice_id = result.last_insert_rowid();

        for item in &record.items {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (invoice_id, product_id, description, quantity, unit_price, tax_rate, total)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(invoice_id)
            .bind(item.product_id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.tax_rate)
            .bind(item.total)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(invoice_id)
    }

    async fn get_invoice(&self, id: i64) -> StorageResult<Option<Invoice>> {
        let row = sqlx::query("SELECT * FROM invoices WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(Self::map_invoice))
    }

    async fn list_invoices(&self) -> StorageResult<Vec<Invoice>> {
        let rows = sqlx::query("SELECT * FROM invoices ORDER BY date DESC")
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows.iter().map(Self::map_invoice).collect())
    }

    async fn get_invoice_items(&self, invoice_id: i64) -> StorageResult<Vec<LineItem>> {
        let rows = sqlx::query("SELECT * FROM invoice_items WHERE invoice_id = ?")
            .bind(invoice_id)
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows.iter().map(Self::map_item).collect())
    }

    async fn update_invoice(&self, id: i64, record: &InvoiceRecord) -> StorageResult<bool> {
        let mut tx = self.db.pool().begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE invoices
            SET type = ?, client_id = ?, date = ?, due_date = ?, subtotal = ?, tax_total = ?, total = ?
            WHERE id = ?
            "#,
        )
        .bind(record.kind.as_str())
        .bind(record.client_id)
        .bind(&record.date)
        .bind(&record.due_date)
        .bind(record.subtotal)
        .bind(record.tax_total)
        .bind(record.total)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Ok(false);
        }

        // Full replacement of the line item set
        sqlx::query("DELETE FROM invoice_items WHERE invoice_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for item in &record.items {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (invoice_id, product_id, description, quantity, unit_price, tax_rate, total)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(id)
            .bind(item.product_id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.tax_rate)
            .bind(item.total)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_invoice(&self, id: i64) -> StorageResult<bool> {
        let mut tx = self.db.pool().begin().await?;

        // Journal entries keep living; only the back-reference is dropped
        sqlx::query("UPDATE journal_entries SET invoice_id = NULL WHERE invoice_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM invoice_items WHERE invoice_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
