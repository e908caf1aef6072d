use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use shared::{CreateProductRequest, Product};

use crate::storage::sqlite::db::DbConnection;
use crate::storage::traits::{ProductStorage, StorageResult};

/// Repository for catalog products
#[derive(Clone)]
pub struct ProductRepository {
    db: DbConnection,
}

impl ProductRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_product(row: &SqliteRow) -> Product {
        Product {
            id: row.get("id"),
            name: row.get("name"),
            code: row.get("code"),
            price: row.get("price"),
            tax_rate: row.get("tax_rate"),
            description: row.get("description"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl ProductStorage for ProductRepository {
    async fn store_product(&self, product: &CreateProductRequest) -> StorageResult<i64> {
        let result = sqlx::query(
            "INSERT INTO products (name, code, price, tax_rate, description) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&product.name)
        .bind(&product.code)
        .bind(product.price)
        .bind(product.tax_rate)
        .bind(&product.description)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_product(&self, id: i64) -> StorageResult<Option<Product>> {
        let row = sqlx::query("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(Self::map_product))
    }

    async fn list_products(&self) -> StorageResult<Vec<Product>> {
        let rows = sqlx::query("SELECT * FROM products ORDER BY name ASC")
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows.iter().map(Self::map_product).collect())
    }

    async fn update_product(
        &self,
        id: i64,
        product: &CreateProductRequest,
    ) -> StorageResult<bool> {
        let result = sqlx::query(
            "UPDATE products SET name = ?, code = ?, price = ?, tax_rate = ?, description = ? WHERE id = ?",
        )
        .bind(&product.name)
        .bind(&product.code)
        .bind(product.price)
        .bind(product.tax_rate)
        .bind(&product.description)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_product(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
