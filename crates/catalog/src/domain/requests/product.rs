use crate::model::{
    ProductDraft,
    page::{DEFAULT_PAGE_SIZE, SortDirection},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    #[validate(
        length(min = 2, max = 100, message = "Product name must be between 2 and 100 characters"),
        custom(function = "validate_name_present")
    )]
    #[schema(example = "Cordless Drill")]
    pub name: String,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    #[schema(example = "18V drill with two batteries")]
    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "99.90")]
    pub price: Decimal,

    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    #[schema(example = 25)]
    pub stock_quantity: Option<i32>,

    #[validate(
        length(max = 255, message = "Category cannot exceed 255 characters"),
        custom(function = "validate_category_present")
    )]
    #[schema(example = "tools")]
    pub category: String,

    #[validate(length(max = 255, message = "Brand cannot exceed 255 characters"))]
    #[schema(example = "Makita")]
    pub brand: Option<String>,

    #[validate(length(max = 255, message = "SKU cannot exceed 255 characters"))]
    #[schema(example = "DRL-18V-01")]
    pub sku: Option<String>,

    pub is_active: Option<bool>,
}

impl ProductRequest {
    /// The SKU when it is present and non-empty.
    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref().filter(|sku| !sku.is_empty())
    }
}

impl From<ProductRequest> for ProductDraft {
    fn from(value: ProductRequest) -> Self {
        ProductDraft {
            name: value.name,
            description: value.description,
            price: value.price,
            stock_quantity: value.stock_quantity,
            category: value.category,
            brand: value.brand,
            sku: value.sku.filter(|sku| !sku.is_empty()),
            is_active: value.is_active,
        }
    }
}

fn validate_name_present(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(
            ValidationError::new("blank").with_message("Product name is required".into()),
        );
    }
    Ok(())
}

fn validate_category_present(category: &str) -> Result<(), ValidationError> {
    if category.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Category is required".into()));
    }
    Ok(())
}

/// Prices are stored as `NUMERIC(19, 2)`: at most two decimals and
/// seventeen integer digits.
const PRICE_SCALE: u32 = 2;

fn price_limit() -> Decimal {
    Decimal::from(100_000_000_000_000_000_i64)
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(
            ValidationError::new("range").with_message("Price must be greater than 0".into()),
        );
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(ValidationError::new("scale")
            .with_message("Price cannot have more than 2 decimal places".into()));
    }
    if *price >= price_limit() {
        return Err(ValidationError::new("range")
            .with_message("Price must be less than 100000000000000000".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindAllProducts {
    #[serde(default)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    pub size: i64,

    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    #[serde(default = "default_sort_direction")]
    pub sort_direction: String,
}

impl Default for FindAllProducts {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
            sort_by: default_sort_by(),
            sort_direction: default_sort_direction(),
        }
    }
}

impl FindAllProducts {
    pub fn direction(&self) -> SortDirection {
        SortDirection::parse_lenient(&self.sort_direction)
    }
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    "id".to_string()
}

fn default_sort_direction() -> String {
    "asc".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchProductsRequest {
    pub keyword: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceRangeRequest {
    #[param(value_type = String)]
    pub min_price: Decimal,

    #[param(value_type = String)]
    pub max_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MaxPriceRequest {
    #[param(value_type = String)]
    pub max_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MinStockRequest {
    pub min_stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdateStockRequest {
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ValidateSkuRequest {
    pub sku: String,

    /// Product being edited; its own SKU does not count as a clash.
    pub id: Option<i64>,
}
