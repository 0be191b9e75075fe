use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::{
        requests::product::FindAllProducts,
        response::{pagination::Pagination, product::ProductResponse},
    },
    model::{PageRequest, Product as ProductModel, SortField, page::MAX_PAGE_SIZE},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, OperationTracer},
};
use tracing::info;

pub struct ProductQueryService {
    query: DynProductQueryRepository,
    tracer: OperationTracer,
}

fn to_responses(products: Vec<ProductModel>) -> Vec<ProductResponse> {
    products.into_iter().map(ProductResponse::from).collect()
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service", "ProductQueryService");

        Self {
            query,
            tracer: OperationTracer::new("product-query-service", metrics),
        }
    }

    fn page_request(req: &FindAllProducts) -> Result<PageRequest, ServiceError> {
        let mut problems = Vec::new();

        if req.page < 0 {
            problems.push("page: Page index must not be negative".to_string());
        }
        if req.size < 1 || req.size > MAX_PAGE_SIZE {
            problems.push(format!(
                "size: Page size must be between 1 and {MAX_PAGE_SIZE}"
            ));
        }

        let sort = match req.sort_by.parse::<SortField>() {
            Ok(sort) => Some(sort),
            Err(message) => {
                problems.push(format!("sort_by: {message}"));
                None
            }
        };

        match sort {
            Some(sort) if problems.is_empty() => Ok(PageRequest {
                page: req.page,
                size: req.size,
                sort,
                direction: req.direction(),
            }),
            _ => Err(ServiceError::Validation(problems)),
        }
    }

    /// Runs a list query inside its own span.
    async fn traced_list<F>(
        &self,
        operation: &str,
        attributes: Vec<KeyValue>,
        fetch: F,
    ) -> Result<Vec<ProductResponse>, ServiceError>
    where
        F: Future<Output = Result<Vec<ProductModel>, RepositoryError>> + Send,
    {
        let tracing_ctx = self.tracer.start(operation, attributes);

        let result = fetch
            .await
            .map(to_responses)
            .map_err(ServiceError::from);

        if let Ok(products) = &result {
            info!("✅ {} returned {} products", operation, products.len());
        }

        self.tracer
            .finish(&tracing_ctx, Method::Get, result, "Products retrieved successfully")
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        info!("🔍 Finding all products");

        self.traced_list(
            "FindAllProducts",
            vec![KeyValue::new("component", "product")],
            self.query.find_all(),
        )
        .await
    }

    async fn find_paged(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductResponse>, Pagination), ServiceError> {
        info!(
            "📄 Finding products | Page: {}, Size: {}, Sort: {} {}",
            req.page, req.size, req.sort_by, req.sort_direction
        );

        let tracing_ctx = self.tracer.start(
            "FindPagedProducts",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("page", req.page),
                KeyValue::new("size", req.size),
                KeyValue::new("sort_by", req.sort_by.clone()),
                KeyValue::new("sort_direction", req.sort_direction.clone()),
            ],
        );

        let result = async {
            let page_req = Self::page_request(req)?;
            let (products, total_items) = self.query.find_page(&page_req).await?;

            let pagination = Pagination {
                page: page_req.page,
                page_size: page_req.size,
                total_items,
                total_pages: page_req.total_pages(total_items),
            };

            Ok::<_, ServiceError>((to_responses(products), pagination))
        }
        .await;

        self.tracer.finish(
            &tracing_ctx,
            Method::Get,
            result,
            "Products page retrieved successfully",
        )
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProductResponse>, ServiceError> {
        info!("🆔 Finding product by ID: {}", id);

        let tracing_ctx = self.tracer.start(
            "FindProductById",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id),
            ],
        );

        let result = self
            .query
            .find_by_id(id)
            .await
            .map(|product| product.map(ProductResponse::from))
            .map_err(ServiceError::from);

        self.tracer
            .finish(&tracing_ctx, Method::Get, result, "Product lookup completed")
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<ProductResponse>, ServiceError> {
        info!("🏷️ Finding product by SKU: {}", sku);

        if sku.is_empty() {
            return Ok(None);
        }

        let tracing_ctx = self.tracer.start(
            "FindProductBySku",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.sku", sku.to_string()),
            ],
        );

        let result = self
            .query
            .find_by_sku(sku)
            .await
            .map(|product| product.map(ProductResponse::from))
            .map_err(ServiceError::from);

        self.tracer
            .finish(&tracing_ctx, Method::Get, result, "Product lookup completed")
    }

    async fn find_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ProductResponse>, ServiceError> {
        self.traced_list(
            "FindProductsByCategory",
            vec![KeyValue::new("product.category", category.to_string())],
            self.query.find_by_category(category),
        )
        .await
    }

    async fn find_active_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ProductResponse>, ServiceError> {
        self.traced_list(
            "FindActiveProductsByCategory",
            vec![KeyValue::new("product.category", category.to_string())],
            self.query.find_active_by_category(category),
        )
        .await
    }

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<ProductResponse>, ServiceError> {
        self.traced_list(
            "FindProductsByBrand",
            vec![KeyValue::new("product.brand", brand.to_string())],
            self.query.find_by_brand(brand),
        )
        .await
    }

    async fn find_active(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        self.traced_list(
            "FindActiveProducts",
            vec![KeyValue::new("component", "product")],
            self.query.find_active(),
        )
        .await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<ProductResponse>, ServiceError> {
        info!("🔎 Searching products for: {:?}", keyword);

        self.traced_list(
            "SearchProducts",
            vec![KeyValue::new("search.keyword", keyword.to_string())],
            self.query.search(keyword),
        )
        .await
    }

    async fn find_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<ProductResponse>, ServiceError> {
        self.traced_list(
            "FindProductsByPriceRange",
            vec![
                KeyValue::new("price.min", min.to_string()),
                KeyValue::new("price.max", max.to_string()),
            ],
            self.query.find_by_price_range(min, max),
        )
        .await
    }

    async fn find_by_max_price(&self, max: Decimal) -> Result<Vec<ProductResponse>, ServiceError> {
        self.traced_list(
            "FindProductsByMaxPrice",
            vec![KeyValue::new("price.max", max.to_string())],
            self.query.find_by_max_price(max),
        )
        .await
    }

    async fn find_by_min_stock(
        &self,
        min_stock: i32,
    ) -> Result<Vec<ProductResponse>, ServiceError> {
        self.traced_list(
            "FindProductsInStock",
            vec![KeyValue::new("stock.min", i64::from(min_stock))],
            self.query.find_by_min_stock(min_stock),
        )
        .await
    }

    async fn is_sku_unique(&self, sku: &str) -> Result<bool, ServiceError> {
        if sku.is_empty() {
            return Ok(true);
        }

        Ok(!self.query.exists_by_sku(sku).await?)
    }

    async fn is_sku_unique_for_update(&self, sku: &str, id: i64) -> Result<bool, ServiceError> {
        if sku.is_empty() {
            return Ok(true);
        }

        Ok(!self.query.exists_by_sku_excluding(sku, id).await?)
    }
}
