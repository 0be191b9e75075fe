use crate::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    },
    model::{PageRequest, Product as ProductModel, ProductDraft},
};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use std::{
    collections::BTreeMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::{info, warn};

#[derive(Default)]
struct Inner {
    last_id: i64,
    products: BTreeMap<i64, ProductModel>,
}

impl Inner {
    fn sku_taken(&self, sku: Option<&str>, except: Option<i64>) -> bool {
        let Some(sku) = sku.filter(|s| !s.is_empty()) else {
            return false;
        };

        self.products
            .values()
            .any(|p| p.sku.as_deref() == Some(sku) && Some(p.id) != except)
    }

    fn filtered(&self, pred: impl Fn(&ProductModel) -> bool) -> Vec<ProductModel> {
        self.products.values().filter(|p| pred(p)).cloned().collect()
    }
}

/// Process-local product store with the same observable behaviour as the
/// Postgres repositories, including the SKU uniqueness constraint.
///
/// Used when no database is configured and by the test suites.
#[derive(Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, RepositoryError> {
        self.inner
            .read()
            .map_err(|_| RepositoryError::Custom("product store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, RepositoryError> {
        self.inner
            .write()
            .map_err(|_| RepositoryError::Custom("product store lock poisoned".into()))
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryProductStore {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self.read()?.filtered(|_| true))
    }

    async fn find_page(
        &self,
        req: &PageRequest,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        let inner = self.read()?;

        let mut all: Vec<ProductModel> = inner.products.values().cloned().collect();
        all.sort_by(|a, b| req.compare(a, b));

        let total = all.len() as i64;
        let offset = usize::try_from(req.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(req.size).unwrap_or(0);

        let page = all.into_iter().skip(offset).take(size).collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProductModel>, RepositoryError> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<ProductModel>, RepositoryError> {
        Ok(self
            .read()?
            .products
            .values()
            .find(|p| p.sku.as_deref() == Some(sku))
            .cloned())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self.read()?.filtered(|p| p.category == category))
    }

    async fn find_active_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self
            .read()?
            .filtered(|p| p.is_active && p.category == category))
    }

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self.read()?.filtered(|p| p.brand.as_deref() == Some(brand)))
    }

    async fn find_active(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self.read()?.filtered(|p| p.is_active))
    }

    async fn search(&self, keyword: &str) -> Result<Vec<ProductModel>, RepositoryError> {
        let needle = keyword.to_lowercase();

        Ok(self.read()?.filtered(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        }))
    }

    async fn find_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self
            .read()?
            .filtered(|p| p.price >= min && p.price <= max))
    }

    async fn find_by_max_price(&self, max: Decimal) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self.read()?.filtered(|p| p.price <= max))
    }

    async fn find_by_min_stock(
        &self,
        min_stock: i32,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self
            .read()?
            .filtered(|p| p.stock_quantity.is_some_and(|s| s > min_stock)))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.read()?.products.contains_key(&id))
    }

    async fn exists_by_sku(&self, sku: &str) -> Result<bool, RepositoryError> {
        Ok(self
            .read()?
            .products
            .values()
            .any(|p| p.sku.as_deref() == Some(sku)))
    }

    async fn exists_by_sku_excluding(&self, sku: &str, id: i64) -> Result<bool, RepositoryError> {
        Ok(self
            .read()?
            .products
            .values()
            .any(|p| p.sku.as_deref() == Some(sku) && p.id != id))
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryProductStore {
    async fn create_product(&self, draft: &ProductDraft) -> Result<ProductModel, RepositoryError> {
        let mut inner = self.write()?;

        if inner.sku_taken(draft.sku.as_deref(), None) {
            warn!("⚠️ Rejecting insert with duplicate SKU {:?}", draft.sku);
            return Err(RepositoryError::AlreadyExists(
                draft.sku.clone().unwrap_or_default(),
            ));
        }

        inner.last_id += 1;
        let now = Utc::now().naive_utc();

        let product = ProductModel {
            id: inner.last_id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price,
            stock_quantity: draft.stock_quantity,
            category: draft.category.clone(),
            brand: draft.brand.clone(),
            sku: draft.sku.clone(),
            is_active: draft.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        inner.products.insert(product.id, product.clone());
        info!("✅ Product created in memory with ID: {}", product.id);

        Ok(product)
    }

    async fn update_product(
        &self,
        id: i64,
        draft: &ProductDraft,
    ) -> Result<ProductModel, RepositoryError> {
        let mut inner = self.write()?;

        if !inner.products.contains_key(&id) {
            return Err(RepositoryError::NotFound);
        }

        if inner.sku_taken(draft.sku.as_deref(), Some(id)) {
            return Err(RepositoryError::AlreadyExists(
                draft.sku.clone().unwrap_or_default(),
            ));
        }

        let product = inner
            .products
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;

        product.name = draft.name.clone();
        product.description = draft.description.clone();
        product.price = draft.price;
        product.stock_quantity = draft.stock_quantity;
        product.category = draft.category.clone();
        product.brand = draft.brand.clone();
        product.sku = draft.sku.clone();
        if let Some(active) = draft.is_active {
            product.is_active = active;
        }
        product.updated_at = Utc::now().naive_utc();

        Ok(product.clone())
    }

    async fn update_stock(&self, id: i64, stock: i32) -> Result<ProductModel, RepositoryError> {
        let mut inner = self.write()?;

        let product = inner
            .products
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;

        product.stock_quantity = Some(stock);
        product.updated_at = Utc::now().naive_utc();

        Ok(product.clone())
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<ProductModel, RepositoryError> {
        let mut inner = self.write()?;

        let product = inner
            .products
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;

        product.is_active = active;
        product.updated_at = Utc::now().naive_utc();

        Ok(product.clone())
    }

    async fn delete_product(&self, id: i64) -> Result<(), RepositoryError> {
        self.write()?
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
