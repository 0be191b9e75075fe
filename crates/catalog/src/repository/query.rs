use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    model::{PageRequest, Product as ProductModel},
    repository::contains_pattern,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching all products");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        sqlx::query_as::<_, ProductModel>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products ORDER BY id"
        ))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn find_page(
        &self,
        req: &PageRequest,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!(
            "📄 Fetching products page {} (size {}) ordered by {} {}",
            req.page,
            req.size,
            req.sort,
            req.direction.keyword()
        );

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        // Column and keyword come from closed enums, never from the request.
        let sql = format!(
            concat!(
                "SELECT ",
                product_columns!(),
                " FROM products ORDER BY {} {}, id ASC LIMIT $1 OFFSET $2"
            ),
            req.sort.column(),
            req.direction.keyword()
        );

        let products = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(req.size)
            .bind(req.offset())
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products page: {:?}", e);
                RepositoryError::from(e)
            })?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok((products, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result)
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🏷️ Fetching product by SKU: {}", sku);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products WHERE sku = $1"
        ))
        .bind(sku)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result)
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🗂️ Fetching products in category: {}", category);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products WHERE category = $1 ORDER BY id"
        ))
        .bind(category)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products by category {}: {:?}", category, e);
            RepositoryError::from(e)
        })
    }

    async fn find_active_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🟢 Fetching active products in category: {}", category);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products WHERE category = $1 AND is_active ORDER BY id"
        ))
        .bind(category)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to fetch active products by category {}: {:?}",
                category, e
            );
            RepositoryError::from(e)
        })
    }

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🏭 Fetching products of brand: {}", brand);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products WHERE brand = $1 ORDER BY id"
        ))
        .bind(brand)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products by brand {}: {:?}", brand, e);
            RepositoryError::from(e)
        })
    }

    async fn find_active(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🟢 Fetching active products");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products WHERE is_active ORDER BY id"
        ))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Error fetching active products: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn search(&self, keyword: &str) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔎 Searching products for: {:?}", keyword);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products WHERE name ILIKE $1 OR description ILIKE $1 ORDER BY id"
        ))
        .bind(contains_pattern(keyword))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to search products: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn find_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("💰 Fetching products priced between {} and {}", min, max);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products WHERE price BETWEEN $1 AND $2 ORDER BY id"
        ))
        .bind(min)
        .bind(max)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products by price range: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn find_by_max_price(&self, max: Decimal) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("💰 Fetching products priced at most {}", max);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products WHERE price <= $1 ORDER BY id"
        ))
        .bind(max)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products by max price: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn find_by_min_stock(
        &self,
        min_stock: i32,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("📦 Fetching products with stock above {}", min_stock);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(concat!(
            "SELECT ",
            product_columns!(),
            " FROM products WHERE stock_quantity > $1 ORDER BY id"
        ))
        .bind(min_stock)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products by stock: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(RepositoryError::from)
    }

    async fn exists_by_sku(&self, sku: &str) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE sku = $1)")
            .bind(sku)
            .fetch_one(&mut *conn)
            .await
            .map_err(RepositoryError::from)
    }

    async fn exists_by_sku_excluding(&self, sku: &str, id: i64) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE sku = $1 AND id <> $2)",
        )
        .bind(sku)
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }
}
