use crate::domain::{
    requests::product::FindAllProducts,
    response::{pagination::Pagination, product::ProductResponse},
};
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(&self) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_paged(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductResponse>, Pagination), ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductResponse>, ServiceError>;
    async fn find_by_sku(&self, sku: &str) -> Result<Option<ProductResponse>, ServiceError>;
    async fn find_by_category(&self, category: &str)
    -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_active_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_by_brand(&self, brand: &str) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_active(&self) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn search(&self, keyword: &str) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_by_max_price(&self, max: Decimal) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_by_min_stock(&self, min_stock: i32)
    -> Result<Vec<ProductResponse>, ServiceError>;
    async fn is_sku_unique(&self, sku: &str) -> Result<bool, ServiceError>;
    async fn is_sku_unique_for_update(&self, sku: &str, id: i64) -> Result<bool, ServiceError>;
}
