use crate::{
    abstract_trait::product::service::DynProductQueryService,
    domain::{
        requests::product::{
            FindAllProducts, MaxPriceRequest, MinStockRequest, PriceRangeRequest,
            SearchProductsRequest, ValidateSkuRequest,
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            product::ProductResponse,
        },
    },
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};
use shared::errors::{HttpError, ServiceError};

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Product",
    responses(
        (status = 200, description = "All products ordered by id", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let products = service.find_all().await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(products, "Products retrieved successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/page",
    tag = "Product",
    params(FindAllProducts),
    responses(
        (status = 200, description = "One page of products", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 400, description = "Invalid paging parameters"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_products_paged(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let (products, pagination) = service.find_paged(&params).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponsePagination::success(
            products,
            pagination,
            "Products retrieved successfully",
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service
        .find_by_id(id)
        .await?
        .ok_or_else(|| HttpError::from(ServiceError::not_found(id)))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(product, "Product retrieved successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/sku/{sku}",
    tag = "Product",
    params(("sku" = String, Path, description = "Stock-keeping unit")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_product_by_sku(
    Extension(service): Extension<DynProductQueryService>,
    Path(sku): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service
        .find_by_sku(&sku)
        .await?
        .ok_or_else(|| HttpError::NotFound(format!("Product not found with SKU: {sku}")))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(product, "Product retrieved successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/category/{category}",
    tag = "Product",
    params(("category" = String, Path, description = "Exact category name")),
    responses(
        (status = 200, description = "Products in the category", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_products_by_category(
    Extension(service): Extension<DynProductQueryService>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let products = service.find_by_category(&category).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(products, "Products retrieved successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/category/{category}/active",
    tag = "Product",
    params(("category" = String, Path, description = "Exact category name")),
    responses(
        (status = 200, description = "Active products in the category", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_active_products_by_category(
    Extension(service): Extension<DynProductQueryService>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let products = service.find_active_by_category(&category).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(products, "Products retrieved successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/brand/{brand}",
    tag = "Product",
    params(("brand" = String, Path, description = "Exact brand name")),
    responses(
        (status = 200, description = "Products of the brand", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_products_by_brand(
    Extension(service): Extension<DynProductQueryService>,
    Path(brand): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let products = service.find_by_brand(&brand).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(products, "Products retrieved successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/active",
    tag = "Product",
    responses(
        (status = 200, description = "Active products", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_active_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let products = service.find_active().await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(products, "Active products retrieved successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/search",
    tag = "Product",
    params(SearchProductsRequest),
    responses(
        (status = 200, description = "Products whose name or description match", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn search_products(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<SearchProductsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let products = service.search(&params.keyword).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(products, "Search completed successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/price-range",
    tag = "Product",
    params(PriceRangeRequest),
    responses(
        (status = 200, description = "Products priced within the range", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_products_by_price_range(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<PriceRangeRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let products = service
        .find_by_price_range(params.min_price, params.max_price)
        .await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(products, "Products retrieved successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/max-price",
    tag = "Product",
    params(MaxPriceRequest),
    responses(
        (status = 200, description = "Products priced at or below the limit", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_products_by_max_price(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<MaxPriceRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let products = service.find_by_max_price(params.max_price).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(products, "Products retrieved successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/in-stock",
    tag = "Product",
    params(MinStockRequest),
    responses(
        (status = 200, description = "Products with stock above the threshold", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_products_in_stock(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<MinStockRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let products = service.find_by_min_stock(params.min_stock).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(products, "Products retrieved successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/validate-sku",
    tag = "Product",
    params(ValidateSkuRequest),
    responses(
        (status = 200, description = "Whether the SKU is free to use", body = ApiResponse<bool>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn validate_sku(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<ValidateSkuRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let unique = match params.id {
        Some(id) => service.is_sku_unique_for_update(&params.sku, id).await?,
        None => service.is_sku_unique(&params.sku).await?,
    };

    let message = if unique {
        "SKU is available"
    } else {
        "SKU is already in use"
    };

    Ok((StatusCode::OK, Json(ApiResponse::success(unique, message))))
}
