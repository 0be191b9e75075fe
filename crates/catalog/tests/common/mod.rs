#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use catalog::{
    domain::requests::product::ProductRequest,
    handler::AppRouter,
    repository::{InMemoryProductStore, ProductRepository},
    service::ProductService,
    state::AppState,
};
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use serde_json::Value;
use std::{str::FromStr, sync::Arc};
use tower::ServiceExt;

pub fn create_test_service() -> ProductService {
    let repository = ProductRepository::in_memory(Arc::new(InMemoryProductStore::new()));
    let mut registry = Registry::default();
    ProductService::new(repository.query, repository.command, &mut registry)
}

pub fn create_test_router() -> Router {
    let repository = ProductRepository::in_memory(Arc::new(InMemoryProductStore::new()));
    AppRouter::build(AppState::new(repository))
}

pub fn price(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal literal")
}

pub fn product(name: &str, price_str: &str, category: &str) -> ProductRequest {
    ProductRequest {
        name: name.to_string(),
        description: None,
        price: price(price_str),
        stock_quantity: None,
        category: category.to_string(),
        brand: None,
        sku: None,
        is_active: None,
    }
}

pub fn with_sku(mut req: ProductRequest, sku: &str) -> ProductRequest {
    req.sku = Some(sku.to_string());
    req
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn bodyless(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}
