//! Cash journal service.

use std::sync::Arc;

use tracing::info;

use shared::{
    CreateJournalEntryRequest, JournalEntry, JournalListResponse, UpdateJournalEntryRequest,
};

use crate::domain::commands::journal::EntryRecord;
use crate::domain::error::ServiceError;
use crate::domain::{ledger, now_rfc3339};
use crate::storage::{Connection, JournalStorage};

#[derive(Clone)]
pub struct JournalService<C: Connection> {
    journal_repository: C::Journal,
}

impl<C: Connection> JournalService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            journal_repository: connection.create_journal_repository(),
        }
    }

    pub async fn create_entry(
        &self,
        request: CreateJournalEntryRequest,
    ) -> Result<JournalEntry, ServiceError> {
        validate_entry(&request.description, request.amount)?;

        let record = EntryRecord {
            kind: request.kind,
            amount: request.amount,
            description: request.description,
            date: request.date.unwrap_or_else(now_rfc3339),
            category: request.category,
            document_type: request.document_type,
            invoice_id: request.invoice_id,
        };

        let id = self.journal_repository.create_entry(&record).await?;
        info!("Recorded journal {} of {:.2}", record.kind.as_str(), record.amount);

        self.journal_repository
            .get_entry(id)
            .await?
            .ok_or(ServiceError::NotFound("journal entry"))
    }

    pub async fn update_entry(
        &self,
        id: i64,
        request: UpdateJournalEntryRequest,
    ) -> Result<JournalEntry, ServiceError> {
        validate_entry(&request.description, request.amount)?;

        let existing = self
            .journal_repository
            .get_entry(id)
            .await?
            .ok_or(ServiceError::NotFound("journal entry"))?;

        let record = EntryRecord {
            kind: request.kind,
            amount: request.amount,
            description: request.description,
            // The original entry date is kept; edits change what, not when
            date: existing.date,
            category: request.category,
            document_type: request.document_type,
            invoice_id: request.invoice_id,
        };

        self.journal_repository.update_entry(id, &record).await?;

        self.journal_repository
            .get_entry(id)
            .await?
            .ok_or(ServiceError::NotFound("journal entry"))
    }

    pub async fn delete_entry(&self, id: i64) -> Result<(), ServiceError> {
        if !self.journal_repository.delete_entry(id).await? {
            return Err(ServiceError::NotFound("journal entry"));
        }
        info!("Deleted journal entry {id}");
        Ok(())
    }

    pub async fn get_entry(&self, id: i64) -> Result<Option<JournalEntry>, ServiceError> {
        Ok(self.journal_repository.get_entry(id).await?)
    }

    /// All entries, newest first, together with the net balance recomputed
    /// over the full set.
    pub async fn list_entries(&self) -> Result<JournalListResponse, ServiceError> {
        let entries = self.journal_repository.list_entries().await?;
        let balance = ledger::balance(&entries);
        Ok(JournalListResponse { entries, balance })
    }

    /// Net cash position, recomputed from scratch
    pub async fn balance(&self) -> Result<f64, ServiceError> {
        let entries = self.journal_repository.list_entries().await?;
        Ok(ledger::balance(&entries))
    }
}

fn validate_entry(description: &str, amount: f64) -> Result<(), ServiceError> {
    if description.trim().is_empty() {
        return Err(ServiceError::validation("Description is required"));
    }
    if amount <= 0.0 {
        return Err(ServiceError::validation(
            "Amount must be a positive number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;
    use shared::EntryKind;

    async fn create_test_service() -> JournalService<DbConnection> {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        JournalService::new(db)
    }

    fn entry_request(kind: EntryKind, amount: f64, description: &str) -> CreateJournalEntryRequest {
        CreateJournalEntryRequest {
            kind,
            amount,
            description: description.to_string(),
            date: None,
            category: None,
            document_type: None,
            invoice_id: None,
        }
    }

    #[tokio::test]
    async fn balance_starts_at_zero() {
        let service = create_test_service().await;
        assert_eq!(service.balance().await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn inflows_and_outflows_fold_into_the_balance() {
        let service = create_test_service().await;

        service
            .create_entry(entry_request(EntryKind::Entry, 100.0, "Sale"))
            .await
            .unwrap();
        service
            .create_entry(entry_request(EntryKind::Exit, 40.0, "Fuel"))
            .await
            .unwrap();

        assert_eq!(service.balance().await.unwrap(), 60.0);

        let list = service.list_entries().await.unwrap();
        assert_eq!(list.entries.len(), 2);
        assert_eq!(list.balance, 60.0);
    }

    #[tokio::test]
    async fn amounts_are_stored_unsigned() {
        let service = create_test_service().await;

        let entry = service
            .create_entry(entry_request(EntryKind::Exit, 25.5, "Rent"))
            .await
            .unwrap();
        // The outflow subtracts at fold time but the row keeps a positive amount
        assert_eq!(entry.amount, 25.5);
        assert_eq!(entry.kind, EntryKind::Exit);
        assert_eq!(service.balance().await.unwrap(), -25.5);
    }

    #[tokio::test]
    async fn rejects_empty_description_and_non_positive_amount() {
        let service = create_test_service().await;

        let err = service
            .create_entry(entry_request(EntryKind::Entry, 10.0, "  "))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = service
            .create_entry(entry_request(EntryKind::Entry, 0.0, "Sale"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = service
            .create_entry(entry_request(EntryKind::Exit, -5.0, "Refund"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn update_keeps_the_original_date() {
        let service = create_test_service().await;

        let created = service
            .create_entry(CreateJournalEntryRequest {
                kind: EntryKind::Entry,
                amount: 50.0,
                description: "Sale".to_string(),
                date: Some("2025-04-01T12:00:00Z".to_string()),
                category: Some("sales".to_string()),
                document_type: None,
                invoice_id: None,
            })
            .await
            .unwrap();

        let updated = service
            .update_entry(
                created.id,
                UpdateJournalEntryRequest {
                    kind: EntryKind::Entry,
                    amount: 75.0,
                    description: "Sale (corrected)".to_string(),
                    category: Some("sales".to_string()),
                    document_type: None,
                    invoice_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.amount, 75.0);
        assert_eq!(updated.date, "2025-04-01T12:00:00Z");
        assert_eq!(service.balance().await.unwrap(), 75.0);
    }

    #[tokio::test]
    async fn delete_removes_the_entry_from_the_fold() {
        let service = create_test_service().await;

        let entry = service
            .create_entry(entry_request(EntryKind::Entry, 100.0, "Sale"))
            .await
            .unwrap();
        service.delete_entry(entry.id).await.unwrap();

        assert_eq!(service.balance().await.unwrap(), 0.0);
        assert!(service.get_entry(entry.id).await.unwrap().is_none());

        let err = service.delete_entry(entry.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
