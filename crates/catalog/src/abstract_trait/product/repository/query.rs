use crate::model::{PageRequest, Product as ProductModel};
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError>;
    /// One page plus the total number of products.
    async fn find_page(
        &self,
        req: &PageRequest,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductModel>, RepositoryError>;
    async fn find_by_sku(&self, sku: &str) -> Result<Option<ProductModel>, RepositoryError>;
    async fn find_by_category(&self, category: &str) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn find_active_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn find_by_brand(&self, brand: &str) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn find_active(&self) -> Result<Vec<ProductModel>, RepositoryError>;
    /// Case-insensitive substring match on name or description.
    async fn search(&self, keyword: &str) -> Result<Vec<ProductModel>, RepositoryError>;
    /// Inclusive on both ends.
    async fn find_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn find_by_max_price(&self, max: Decimal) -> Result<Vec<ProductModel>, RepositoryError>;
    /// Stock strictly greater than `min_stock`.
    async fn find_by_min_stock(&self, min_stock: i32)
    -> Result<Vec<ProductModel>, RepositoryError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError>;
    async fn exists_by_sku(&self, sku: &str) -> Result<bool, RepositoryError>;
    async fn exists_by_sku_excluding(&self, sku: &str, id: i64) -> Result<bool, RepositoryError>;
}
