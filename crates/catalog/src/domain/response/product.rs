use crate::model::Product as ProductModel;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "99.90")]
    pub price: Decimal,
    pub stock_quantity: Option<i32>,
    pub category: String,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

// dari model to response
impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price,
            stock_quantity: value.stock_quantity,
            category: value.category,
            brand: value.brand,
            sku: value.sku,
            is_active: value.is_active,
            created_at: value.created_at.to_string(),
            updated_at: value.updated_at.to_string(),
        }
    }
}
