//! Company settings service.
//!
//! The settings row is a singleton created by the schema migration. Other
//! services read it once per operation and pass the values on as plain
//! arguments; nothing caches it.

use std::sync::Arc;

use tracing::info;

use shared::{Settings, UpdateSettingsRequest};

use crate::domain::error::ServiceError;
use crate::storage::{Connection, SettingsStorage};

#[derive(Clone)]
pub struct SettingsService<C: Connection> {
    settings_repository: C::Settings,
}

impl<C: Connection> SettingsService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            settings_repository: connection.create_settings_repository(),
        }
    }

    pub async fn get_settings(&self) -> Result<Settings, ServiceError> {
        Ok(self.settings_repository.get_settings().await?)
    }

    pub async fn update_settings(
        &self,
        request: UpdateSettingsRequest,
    ) -> Result<Settings, ServiceError> {
        if request.tax_percentage < 0.0 {
            return Err(ServiceError::validation(
                "Tax percentage cannot be negative",
            ));
        }

        let settings = self.settings_repository.update_settings(&request).await?;
        info!(
            "Updated settings: tax {}%, currency {}",
            settings.tax_percentage, settings.currency
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;

    async fn create_test_service() -> SettingsService<DbConnection> {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        SettingsService::new(db)
    }

    #[tokio::test]
    async fn defaults_are_present_after_init() {
        let service = create_test_service().await;

        let settings = service.get_settings().await.unwrap();
        assert_eq!(settings.id, 1);
        assert_eq!(settings.company_name.as_deref(), Some("Minha Empresa"));
        assert_eq!(settings.currency, "MZN");
        assert_eq!(settings.tax_percentage, 16.0);
    }

    #[tokio::test]
    async fn update_rewrites_the_singleton() {
        let service = create_test_service().await;

        let updated = service
            .update_settings(UpdateSettingsRequest {
                company_name: Some("Construções Maputo Lda".to_string()),
                nuit: Some("400765432".to_string()),
                address: None,
                email: None,
                phone: None,
                logo_uri: None,
                locale: "pt-MZ".to_string(),
                currency: "MZN".to_string(),
                tax_percentage: 17.0,
            })
            .await
            .unwrap();

        assert_eq!(updated.id, 1);
        assert_eq!(
            updated.company_name.as_deref(),
            Some("Construções Maputo Lda")
        );
        assert_eq!(updated.tax_percentage, 17.0);

        // A fresh read sees the same row
        let reread = service.get_settings().await.unwrap();
        assert_eq!(reread, updated);
    }

    #[tokio::test]
    async fn rejects_negative_tax_percentage() {
        let service = create_test_service().await;

        let err = service
            .update_settings(UpdateSettingsRequest {
                company_name: None,
                nuit: None,
                address: None,
                email: None,
                phone: None,
                logo_uri: None,
                locale: "pt-MZ".to_string(),
                currency: "MZN".to_string(),
                tax_percentage: -5.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
