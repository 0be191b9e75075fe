use crate::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::ProductCommandServiceTrait,
    },
    domain::{requests::product::ProductRequest, response::product::ProductResponse},
    model::ProductDraft,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, OperationTracer},
};
use tracing::{error, info, warn};
use validator::Validate;

pub struct ProductCommandService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    tracer: OperationTracer,
}

impl ProductCommandService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service", "ProductCommandService");

        Self {
            query,
            command,
            tracer: OperationTracer::new("product-command-service", metrics),
        }
    }

    async fn ensure_exists(&self, id: i64) -> Result<(), ServiceError> {
        if self.query.exists_by_id(id).await? {
            Ok(())
        } else {
            error!("❌ Product not found with id: {}", id);
            Err(ServiceError::not_found(id))
        }
    }

    async fn create(&self, req: &ProductRequest) -> Result<ProductResponse, ServiceError> {
        req.validate()?;

        if let Some(sku) = req.sku() {
            if self.query.exists_by_sku(sku).await? {
                warn!("⚠️ SKU {} is already taken", sku);
                return Err(ServiceError::duplicate_sku(sku));
            }
        }

        let draft = ProductDraft::from(req.clone());

        let product = self
            .command
            .create_product(&draft)
            .await
            .map_err(|err| write_error(err, None))?;

        Ok(ProductResponse::from(product))
    }

    async fn update(&self, id: i64, req: &ProductRequest) -> Result<ProductResponse, ServiceError> {
        req.validate()?;
        self.ensure_exists(id).await?;

        if let Some(sku) = req.sku() {
            if self.query.exists_by_sku_excluding(sku, id).await? {
                warn!("⚠️ SKU {} belongs to another product", sku);
                return Err(ServiceError::duplicate_sku(sku));
            }
        }

        let draft = ProductDraft::from(req.clone());

        let product = self
            .command
            .update_product(id, &draft)
            .await
            .map_err(|err| write_error(err, Some(id)))?;

        Ok(ProductResponse::from(product))
    }

    async fn set_stock(&self, id: i64, stock: i32) -> Result<ProductResponse, ServiceError> {
        if stock < 0 {
            return Err(ServiceError::validation(
                "stock_quantity: Stock quantity cannot be negative",
            ));
        }

        self.ensure_exists(id).await?;

        let product = self
            .command
            .update_stock(id, stock)
            .await
            .map_err(|err| write_error(err, Some(id)))?;

        Ok(ProductResponse::from(product))
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<ProductResponse, ServiceError> {
        self.ensure_exists(id).await?;

        let product = self
            .command
            .set_active(id, active)
            .await
            .map_err(|err| write_error(err, Some(id)))?;

        Ok(ProductResponse::from(product))
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.ensure_exists(id).await?;

        self.command
            .delete_product(id)
            .await
            .map_err(|err| write_error(err, Some(id)))
    }
}

/// Turns store-level conflicts into the domain errors callers expect.
fn write_error(err: RepositoryError, id: Option<i64>) -> ServiceError {
    match (err, id) {
        (RepositoryError::AlreadyExists(sku), _) => ServiceError::duplicate_sku(sku),
        (RepositoryError::NotFound, Some(id)) => ServiceError::not_found(id),
        (err, _) => ServiceError::Repo(err),
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(&self, req: &ProductRequest) -> Result<ProductResponse, ServiceError> {
        info!("🏗️ Creating new product: {}", req.name);

        let tracing_ctx = self.tracer.start(
            "CreateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
                KeyValue::new("product.name", req.name.clone()),
                KeyValue::new("product.price", req.price.to_string()),
                KeyValue::new("product.sku", req.sku().unwrap_or_default().to_string()),
            ],
        );

        let result = self.create(req).await;

        if let Ok(product) = &result {
            info!(
                "✅ Product created successfully: {} (ID: {})",
                product.name, product.id
            );
        }

        self.tracer.finish(
            &tracing_ctx,
            Method::Post,
            result,
            "Product created successfully",
        )
    }

    async fn update_product(
        &self,
        id: i64,
        req: &ProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🔄 Updating product ID: {}", id);

        let tracing_ctx = self.tracer.start(
            "UpdateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product.id", id),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        let result = self.update(id, req).await;

        self.tracer.finish(
            &tracing_ctx,
            Method::Put,
            result,
            "Product updated successfully",
        )
    }

    async fn update_stock(&self, id: i64, stock: i32) -> Result<ProductResponse, ServiceError> {
        info!("📦 Updating stock of product ID {} to {}", id, stock);

        let tracing_ctx = self.tracer.start(
            "UpdateStock",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update_stock"),
                KeyValue::new("product.id", id),
                KeyValue::new("product.stock", i64::from(stock)),
            ],
        );

        let result = self.set_stock(id, stock).await;

        self.tracer.finish(
            &tracing_ctx,
            Method::Patch,
            result,
            "Product stock updated successfully",
        )
    }

    async fn activate_product(&self, id: i64) -> Result<ProductResponse, ServiceError> {
        info!("🟢 Activating product ID: {}", id);

        let tracing_ctx = self.tracer.start(
            "ActivateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "activate"),
                KeyValue::new("product.id", id),
            ],
        );

        let result = self.set_active(id, true).await;

        self.tracer.finish(
            &tracing_ctx,
            Method::Patch,
            result,
            "Product activated successfully",
        )
    }

    async fn deactivate_product(&self, id: i64) -> Result<ProductResponse, ServiceError> {
        info!("⚪ Deactivating product ID: {}", id);

        let tracing_ctx = self.tracer.start(
            "DeactivateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "deactivate"),
                KeyValue::new("product.id", id),
            ],
        );

        let result = self.set_active(id, false).await;

        self.tracer.finish(
            &tracing_ctx,
            Method::Patch,
            result,
            "Product deactivated successfully",
        )
    }

    async fn delete_product(&self, id: i64) -> Result<(), ServiceError> {
        info!("🗑️ Deleting product ID: {}", id);

        let tracing_ctx = self.tracer.start(
            "DeleteProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("product.id", id),
            ],
        );

        let result = self.delete(id).await;

        self.tracer.finish(
            &tracing_ctx,
            Method::Delete,
            result,
            "Product deleted successfully",
        )
    }
}
