use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: Option<i32>,
    pub category: String,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Field values written by create and full update.
///
/// `is_active: None` leaves the flag to the store: its default on insert,
/// the current value on update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: Option<i32>,
    pub category: String,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub is_active: Option<bool>,
}
