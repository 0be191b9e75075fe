use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    model::{Product as ProductModel, ProductDraft},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn sku_label(draft: &ProductDraft) -> String {
    draft.sku.clone().unwrap_or_default()
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(&self, draft: &ProductDraft) -> Result<ProductModel, RepositoryError> {
        info!("🆕 Creating product: {}", draft.name);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let product = sqlx::query_as::<_, ProductModel>(concat!(
            "INSERT INTO products ",
            "(name, description, price, stock_quantity, category, brand, sku, is_active, created_at, updated_at) ",
            "VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, TRUE), CURRENT_TIMESTAMP, CURRENT_TIMESTAMP) ",
            "RETURNING ",
            product_columns!()
        ))
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.stock_quantity)
        .bind(&draft.category)
        .bind(&draft.brand)
        .bind(&draft.sku)
        .bind(draft.is_active)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to create product {}: {:?}", draft.name, e);
            RepositoryError::from_write(e, sku_label(draft))
        })?;

        info!("✅ Product created with ID: {}", product.id);

        Ok(product)
    }

    async fn update_product(
        &self,
        id: i64,
        draft: &ProductDraft,
    ) -> Result<ProductModel, RepositoryError> {
        info!("🔄 Updating product ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let product = sqlx::query_as::<_, ProductModel>(concat!(
            "UPDATE products SET ",
            "name = $2, description = $3, price = $4, stock_quantity = $5, category = $6, ",
            "brand = $7, sku = $8, is_active = COALESCE($9, is_active), updated_at = CURRENT_TIMESTAMP ",
            "WHERE id = $1 RETURNING ",
            product_columns!()
        ))
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.stock_quantity)
        .bind(&draft.category)
        .bind(&draft.brand)
        .bind(&draft.sku)
        .bind(draft.is_active)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update product ID {}: {:?}", id, e);
            RepositoryError::from_write(e, sku_label(draft))
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!("✅ Product ID {} updated", id);

        Ok(product)
    }

    async fn update_stock(&self, id: i64, stock: i32) -> Result<ProductModel, RepositoryError> {
        info!("📦 Setting stock of product ID {} to {}", id, stock);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(concat!(
            "UPDATE products SET stock_quantity = $2, updated_at = CURRENT_TIMESTAMP ",
            "WHERE id = $1 RETURNING ",
            product_columns!()
        ))
        .bind(id)
        .bind(stock)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update stock of product ID {}: {:?}", id, e);
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<ProductModel, RepositoryError> {
        info!("🔁 Setting is_active={} on product ID {}", active, id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(concat!(
            "UPDATE products SET is_active = $2, updated_at = CURRENT_TIMESTAMP ",
            "WHERE id = $1 RETURNING ",
            product_columns!()
        ))
        .bind(id)
        .bind(active)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to toggle product ID {}: {:?}", id, e);
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)
    }

    async fn delete_product(&self, id: i64) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting product ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product ID {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            error!("❌ No product found to delete with ID: {}", id);
            return Err(RepositoryError::NotFound);
        }

        info!("✅ Product ID {} deleted", id);
        Ok(())
    }
}
