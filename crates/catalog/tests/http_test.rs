mod common;

use axum::http::StatusCode;
use common::{bodyless, create_test_router, get, json_request, send};
use serde_json::json;

fn drill(sku: &str) -> serde_json::Value {
    json!({
        "name": "Cordless Drill",
        "description": "18V with two batteries",
        "price": "99.90",
        "stock_quantity": 12,
        "category": "tools",
        "brand": "Makita",
        "sku": sku
    })
}

#[tokio::test]
async fn create_then_fetch_by_id_and_sku() {
    let app = create_test_router();

    let (status, body) = send(&app, json_request("POST", "/api/products", &drill("DRL-1"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Product created successfully");
    assert_eq!(body["data"]["price"], "99.90");
    assert_eq!(body["data"]["is_active"], true);

    let id = body["data"]["id"].as_i64().expect("numeric id");

    let (status, body) = send(&app, get(&format!("/api/products/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sku"], "DRL-1");

    let (status, body) = send(&app, get("/api/products/sku/DRL-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
}

#[tokio::test]
async fn absent_products_are_404() {
    let app = create_test_router();

    let (status, body) = send(&app, get("/api/products/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Product not found with id: 99");

    let (status, body) = send(&app, get("/api/products/sku/NOPE")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found with SKU: NOPE");

    let (status, _) = send(&app, bodyless("DELETE", "/api/products/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, bodyless("PATCH", "/api/products/99/activate")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_sku_is_bad_request() {
    let app = create_test_router();

    let (status, _) = send(&app, json_request("POST", "/api/products", &drill("DUP"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, json_request("POST", "/api/products", &drill("DUP"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["message"],
        "SKU must be unique. Product with SKU 'DUP' already exists."
    );

    let (status, body) = send(&app, get("/api/products/validate-sku?sku=DUP")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], false);

    let (status, body) = send(&app, get("/api/products/validate-sku?sku=DUP&id=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], true);
}

#[tokio::test]
async fn invalid_bodies_are_rejected() {
    let app = create_test_router();

    let invalid = json!({ "name": "X", "price": "0", "category": "" });
    let (status, body) = send(&app, json_request("POST", "/api/products", &invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["price"].is_array());
    assert!(body["details"]["category"].is_array());

    let too_precise = json!({ "name": "Washer", "price": "0.001", "category": "tools" });
    let (status, body) = send(&app, json_request("POST", "/api/products", &too_precise)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["price"].is_array());

    let long_sku = json!({
        "name": "Washer",
        "price": "0.10",
        "category": "tools",
        "sku": "S".repeat(300)
    });
    let (status, body) = send(&app, json_request("POST", "/api/products", &long_sku)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["sku"].is_array());

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/products")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .expect("valid request");
    let (status, body) = send(&app, request).await;
    assert!(status.is_client_error());
    assert_eq!(body["error"], "Invalid JSON");
}

#[tokio::test]
async fn stock_and_activation_endpoints() {
    let app = create_test_router();

    let (_, body) = send(&app, json_request("POST", "/api/products", &drill("STK-1"))).await;
    let id = body["data"]["id"].as_i64().expect("numeric id");

    let (status, body) = send(&app, bodyless("PATCH", &format!("/api/products/{id}/stock?stock=3"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stock_quantity"], 3);

    let (status, _) = send(&app, bodyless("PATCH", &format!("/api/products/{id}/stock?stock=-1"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, bodyless("PATCH", &format!("/api/products/{id}/deactivate"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], false);

    let (_, body) = send(&app, get("/api/products/active")).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));

    let (status, body) = send(&app, bodyless("DELETE", &format!("/api/products/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = create_test_router();

    let (_, body) = send(&app, json_request("POST", "/api/products", &drill("UPD-1"))).await;
    let id = body["data"]["id"].as_i64().expect("numeric id");

    let replacement = json!({
        "name": "Hammer Drill",
        "price": 120.5,
        "category": "power-tools",
        "sku": "UPD-1"
    });
    let (status, body) = send(
        &app,
        json_request("PUT", &format!("/api/products/{id}"), &replacement),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Hammer Drill");
    assert_eq!(body["data"]["category"], "power-tools");
    assert!(body["data"]["brand"].is_null());
    assert!(body["data"]["description"].is_null());
}

#[tokio::test]
async fn paging_and_filters() {
    let app = create_test_router();

    for (name, price) in [("Alpha", "5.00"), ("Bravo", "15.00"), ("Charlie", "25.00")] {
        let req = json!({ "name": name, "price": price, "category": "tools", "stock_quantity": 1 });
        let (status, _) = send(&app, json_request("POST", "/api/products", &req)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        get("/api/products/page?page=0&size=2&sort_by=name&sort_direction=desc"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Charlie");
    assert_eq!(body["data"][1]["name"], "Bravo");
    assert_eq!(body["pagination"]["total_items"], 3);
    assert_eq!(body["pagination"]["total_pages"], 2);

    let (status, body) = send(&app, get("/api/products/page?sort_by=weight")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (_, body) = send(&app, get("/api/products/price-range?min_price=5&max_price=15")).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    let (_, body) = send(&app, get("/api/products/max-price?max_price=4.99")).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));

    let (_, body) = send(&app, get("/api/products/search?keyword=ALP")).await;
    assert_eq!(body["data"][0]["name"], "Alpha");

    let (_, body) = send(&app, get("/api/products/category/tools")).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(3));

    let (_, body) = send(&app, get("/api/products/in-stock?min_stock=0")).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn metrics_and_openapi_are_served() {
    let app = create_test_router();

    let (_, _) = send(&app, get("/api/products")).await;

    let (status, body) = send(&app, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    let text = body.as_str().expect("metrics are plain text");
    assert!(text.contains("product_query_service_request_counter"));

    let (status, body) = send(&app, get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/products/{id}"].is_object());
}
