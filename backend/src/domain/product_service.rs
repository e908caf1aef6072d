//! Product catalog service.

use std::sync::Arc;

use tracing::info;

use shared::{CreateProductRequest, Product, ProductListResponse, UpdateProductRequest};

use crate::domain::error::ServiceError;
use crate::storage::{Connection, ProductStorage};

#[derive(Clone)]
pub struct ProductService<C: Connection> {
    product_repository: C::Products,
}

impl<C: Connection> ProductService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            product_repository: connection.create_product_repository(),
        }
    }

    pub async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<Product, ServiceError> {
        validate_product(&request)?;

        let id = self.product_repository.store_product(&request).await?;
        info!("Added product {} ({id})", request.name);

        self.product_repository
            .get_product(id)
            .await?
            .ok_or(ServiceError::NotFound("product"))
    }

    pub async fn update_product(
        &self,
        id: i64,
        request: UpdateProductRequest,
    ) -> Result<Product, ServiceError> {
        validate_product(&request)?;

        if !self.product_repository.update_product(id, &request).await? {
            return Err(ServiceError::NotFound("product"));
        }

        self.product_repository
            .get_product(id)
            .await?
            .ok_or(ServiceError::NotFound("product"))
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ServiceError> {
        if !self.product_repository.delete_product(id).await? {
            return Err(ServiceError::NotFound("product"));
        }
        Ok(())
    }

    pub async fn list_products(&self) -> Result<ProductListResponse, ServiceError> {
        let products = self.product_repository.list_products().await?;
        Ok(ProductListResponse { products })
    }
}

fn validate_product(request: &CreateProductRequest) -> Result<(), ServiceError> {
    if request.name.trim().is_empty() {
        return Err(ServiceError::validation("Product name is required"));
    }
    if request.price < 0.0 {
        return Err(ServiceError::validation("Product price cannot be negative"));
    }
    Ok(())
}
