use crate::model::{Product as ProductModel, ProductDraft};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

/// Writes against the product store.
///
/// Every mutation of a missing id returns `RepositoryError::NotFound`, and a
/// write that would give two products the same non-empty SKU returns
/// `RepositoryError::AlreadyExists`.
#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(&self, draft: &ProductDraft) -> Result<ProductModel, RepositoryError>;
    async fn update_product(
        &self,
        id: i64,
        draft: &ProductDraft,
    ) -> Result<ProductModel, RepositoryError>;
    async fn update_stock(&self, id: i64, stock: i32) -> Result<ProductModel, RepositoryError>;
    async fn set_active(&self, id: i64, active: bool) -> Result<ProductModel, RepositoryError>;
    async fn delete_product(&self, id: i64) -> Result<(), RepositoryError>;
}
