use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::warn;

use shared::{EntryKind, JournalEntry};

use crate::domain::commands::journal::EntryRecord;
use crate::storage::sqlite::db::DbConnection;
use crate::storage::traits::{JournalStorage, StorageResult};

/// Repository for cash journal entries
#[derive(Clone)]
pub struct JournalRepository {
    db: DbConnection,
}

impl JournalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_entry(row: &SqliteRow) -> JournalEntry {
        let kind_text: String = row.get("type");
        let kind = EntryKind::parse(&kind_text).unwrap_or_else(|| {
            warn!("Unknown journal entry kind '{kind_text}', reading as ENTRY");
            EntryKind::Entry
        });

        JournalEntry {
            id: row.get("id"),
            kind,
            amount: row.get("amount"),
            description: row.get("description"),
            date: row.get("date"),
            category: row.get("category"),
            document_type: row.get("document_type"),
            invoice_id: row.get("invoice_id"),
        }
    }
}

#[async_trait]
impl JournalStorage for JournalRepository {
    async fn create_entry(&self, record: &EntryRecord) -> StorageResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO journal_entries (type, amount, description, date, category, document_type, invoice_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.kind.as_str())
        .bind(record.amount)
        .bind(&record.description)
        .bind(&record.date)
        .bind(&record.category)
        .bind(&record.document_type)
        .bind(record.invoice_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_entry(&self, id: i64) -> StorageResult<Option<JournalEntry>> {
        let row = sqlx::query("SELECT * FROM journal_entries WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(Self::map_entry))
    }

    async fn list_entries(&self) -> StorageResult<Vec<JournalEntry>> {
        let rows = sqlx::query("SELECT * FROM journal_entries ORDER BY date DESC")
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows.iter().map(Self::map_entry).collect())
    }

    async fn update_entry(&self, id: i64, record: &EntryRecord) -> StorageResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE journal_entries
            SET type = ?, amount = ?, description = ?, category = ?, document_type = ?, invoice_id = ?
            WHERE id = ?
            "#,
        )
        .bind(record.kind.as_str())
        .bind(record.amount)
        .bind(&record.description)
        .bind(&record.category)
        .bind(&record.document_type)
        .bind(record.invoice_id)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_entry(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
