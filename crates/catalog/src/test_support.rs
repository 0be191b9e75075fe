use crate::domain::requests::product::ProductRequest;
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn product_request(name: &str, price: &str, category: &str) -> ProductRequest {
    ProductRequest {
        name: name.to_string(),
        description: None,
        price: Decimal::from_str(price).unwrap(),
        stock_quantity: None,
        category: category.to_string(),
        brand: None,
        sku: None,
        is_active: None,
    }
}
