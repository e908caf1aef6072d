use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use shared::{Settings, UpdateSettingsRequest};

use crate::storage::sqlite::db::DbConnection;
use crate::storage::traits::{SettingsStorage, StorageResult};

/// Repository for the settings singleton. The row is created by the schema
/// migration; reads assume it exists.
#[derive(Clone)]
pub struct SettingsRepository {
    db: DbConnection,
}

impl SettingsRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_settings(row: &SqliteRow) -> Settings {
        Settings {
            id: row.get("id"),
            company_name: row.get("company_name"),
            nuit: row.get("nuit"),
            address: row.get("address"),
            email: row.get("email"),
            phone: row.get("phone"),
            logo_uri: row.get("logo_uri"),
            locale: row.get("locale"),
            currency: row.get("currency"),
            tax_percentage: row.get("tax_percentage"),
        }
    }
}

#[async_trait]
impl SettingsStorage for SettingsRepository {
    async fn get_settings(&self) -> StorageResult<Settings> {
        let row = sqlx::query("SELECT * FROM settings LIMIT 1")
            .fetch_one(self.db.pool())
            .await?;

        Ok(Self::map_settings(&row))
    }

    async fn update_settings(&self, update: &UpdateSettingsRequest) -> StorageResult<Settings> {
        sqlx::query(
            r#"
            UPDATE settings SET
              company_name = ?, nuit = ?, address = ?, email = ?, phone = ?,
              logo_uri = ?, locale = ?, currency = ?, tax_percentage = ?
            WHERE id = 1
            "#,
        )
        .bind(&update.company_name)
        .bind(&update.nuit)
        .bind(&update.address)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.logo_uri)
        .bind(&update.locale)
        .bind(&update.currency)
        .bind(update.tax_percentage)
        .execute(self.db.pool())
        .await?;

        self.get_settings().await
    }
}
