//! Client registry service.

use std::sync::Arc;

use tracing::info;

use shared::{Client, ClientListResponse, CreateClientRequest, UpdateClientRequest};

use crate::domain::error::ServiceError;
use crate::storage::{ClientStorage, Connection};

#[derive(Clone)]
pub struct ClientService<C: Connection> {
    client_repository: C::Clients,
}

impl<C: Connection> ClientService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            client_repository: connection.create_client_repository(),
        }
    }

    pub async fn create_client(
        &self,
        request: CreateClientRequest,
    ) -> Result<Client, ServiceError> {
        if request.name.trim().is_empty() {
            return Err(ServiceError::validation("Client name is required"));
        }

        let id = self.client_repository.store_client(&request).await?;
        info!("Added client {} ({id})", request.name);

        self.client_repository
            .get_client(id)
            .await?
            .ok_or(ServiceError::NotFound("client"))
    }

    pub async fn update_client(
        &self,
        id: i64,
        request: UpdateClientRequest,
    ) -> Result<Client, ServiceError> {
        if request.name.trim().is_empty() {
            return Err(ServiceError::validation("Client name is required"));
        }

        if !self.client_repository.update_client(id, &request).await? {
            return Err(ServiceError::NotFound("client"));
        }

        self.client_repository
            .get_client(id)
            .await?
            .ok_or(ServiceError::NotFound("client"))
    }

    pub async fn delete_client(&self, id: i64) -> Result<(), ServiceError> {
        if !self.client_repository.delete_client(id).await? {
            return Err(ServiceError::NotFound("client"));
        }
        Ok(())
    }

    pub async fn get_client(&self, id: i64) -> Result<Option<Client>, ServiceError> {
        Ok(self.client_repository.get_client(id).await?)
    }

    pub async fn list_clients(&self) -> Result<ClientListResponse, ServiceError> {
        let clients = self.client_repository.list_clients().await?;
        Ok(ClientListResponse { clients })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;

    async fn create_test_service() -> ClientService<DbConnection> {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        ClientService::new(db)
    }

    fn request(name: &str) -> CreateClientRequest {
        CreateClientRequest {
            name: name.to_string(),
            nuit: Some("400123456".to_string()),
            email: None,
            phone: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn create_and_list_ordered_by_name() {
        let service = create_test_service().await;

        service.create_client(request("Zara Lda")).await.unwrap();
        service.create_client(request("Abel Construções")).await.unwrap();

        let list = service.list_clients().await.unwrap();
        assert_eq!(list.clients.len(), 2);
        assert_eq!(list.clients[0].name, "Abel Construções");
        assert_eq!(list.clients[1].name, "Zara Lda");
    }

    #[tokio::test]
    async fn name_is_required() {
        let service = create_test_service().await;

        let err = service.create_client(request("   ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn update_rewrites_the_row() {
        let service = create_test_service().await;

        let client = service.create_client(request("Old Name")).await.unwrap();
        let updated = service
            .update_client(client.id, request("New Name"))
            .await
            .unwrap();

        assert_eq!(updated.id, client.id);
        assert_eq!(updated.name, "New Name");
    }

    #[tokio::test]
    async fn delete_missing_client_is_not_found() {
        let service = create_test_service().await;

        let err = service.delete_client(77).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
