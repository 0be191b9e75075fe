use crate::domain::{requests::product::ProductRequest, response::product::ProductResponse};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(&self, req: &ProductRequest) -> Result<ProductResponse, ServiceError>;
    async fn update_product(
        &self,
        id: i64,
        req: &ProductRequest,
    ) -> Result<ProductResponse, ServiceError>;
    async fn update_stock(&self, id: i64, stock: i32) -> Result<ProductResponse, ServiceError>;
    async fn activate_product(&self, id: i64) -> Result<ProductResponse, ServiceError>;
    async fn deactivate_product(&self, id: i64) -> Result<ProductResponse, ServiceError>;
    async fn delete_product(&self, id: i64) -> Result<(), ServiceError>;
}
