use crate::{
    abstract_trait::product::service::DynProductCommandService,
    domain::{
        requests::product::{ProductRequest, UpdateStockRequest},
        response::{api::ApiResponse, product::ProductResponse},
    },
    middleware::ValidatedJson,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use shared::errors::HttpError;

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Product",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation failed or duplicate SKU"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    ValidatedJson(body): ValidatedJson<ProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service.create_product(&body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(product, "Product created successfully")),
    ))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Product",
    request_body = ProductRequest,
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation failed or duplicate SKU"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<ProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service.update_product(id, &body).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(product, "Product updated successfully")),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}/stock",
    tag = "Product",
    params(("id" = i64, Path, description = "Product ID"), UpdateStockRequest),
    responses(
        (status = 200, description = "Stock updated", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Negative stock"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_stock(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i64>,
    Query(params): Query<UpdateStockRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service.update_stock(id, params.stock).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(product, "Stock updated successfully")),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}/activate",
    tag = "Product",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product activated", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn activate_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service.activate_product(id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(product, "Product activated successfully")),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}/deactivate",
    tag = "Product",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deactivated", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn deactivate_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service.deactivate_product(id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(product, "Product deactivated successfully")),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = serde_json::Value),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete_product(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "Product deleted successfully"
        })),
    ))
}
