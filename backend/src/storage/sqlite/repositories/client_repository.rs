use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use shared::{Client, CreateClientRequest};

use crate::storage::sqlite::db::DbConnection;
use crate::storage::traits::{ClientStorage, StorageResult};

/// Repository for client records
#[derive(Clone)]
pub struct ClientRepository {
    db: DbConnection,
}

impl ClientRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_client(row: &SqliteRow) -> Client {
        Client {
            id: row.get("id"),
            name: row.get("name"),
            nuit: row.get("nuit"),
            email: row.get("email"),
            phone: row.get("phone"),
            address: row.get("address"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl ClientStorage for ClientRepository {
    async fn store_client(&self, client: &CreateClientRequest) -> StorageResult<i64> {
        let result = sqlx::query(
            "INSERT INTO clients (name, nuit, email, phone, address) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&client.name)
        .bind(&client.nuit)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_client(&self, id: i64) -> StorageResult<Option<Client>> {
        let row = sqlx::query("SELECT * FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(Self::map_client))
    }

    async fn list_clients(&self) -> StorageResult<Vec<Client>> {
        let rows = sqlx::query("SELECT * FROM clients ORDER BY name ASC")
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows.iter().map(Self::map_client).collect())
    }

    async fn update_client(&self, id: i64, client: &CreateClientRequest) -> StorageResult<bool> {
        let result = sqlx::query(
            "UPDATE clients SET name = ?, nuit = ?, email = ?, phone = ?, address = ? WHERE id = ?",
        )
        .bind(&client.name)
        .bind(&client.nuit)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_client(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
