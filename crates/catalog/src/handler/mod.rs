mod command;
mod query;

use crate::{
    domain::{
        requests::product::ProductRequest,
        response::{pagination::Pagination, product::ProductResponse},
    },
    state::AppState,
};
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Extension, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::{get, patch},
};
use prometheus_client::encoding::text::encode;
use shared::{errors::ErrorResponse, utils::shutdown_signal};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        query::get_products,
        query::get_products_paged,
        query::get_product,
        query::get_product_by_sku,
        query::get_products_by_category,
        query::get_active_products_by_category,
        query::get_products_by_brand,
        query::get_active_products,
        query::search_products,
        query::get_products_by_price_range,
        query::get_products_by_max_price,
        query::get_products_in_stock,
        query::validate_sku,

        command::create_product,
        command::update_product,
        command::update_stock,
        command::activate_product,
        command::deactivate_product,
        command::delete_product,
    ),
    components(schemas(
        ProductRequest,
        ProductResponse,
        Pagination,
        ErrorResponse,
    )),
    tags(
        (name = "Product", description = "Product catalog endpoints"),
    )
)]
struct ApiDoc;

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    if let Err(e) = encode(&mut buffer, &state.registry) {
        error!("❌ Failed to encode metrics: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}"),
        );
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let services = &app_state.di_container.product_service;

    OpenApiRouter::new()
        .route(
            "/api/products",
            get(query::get_products).post(command::create_product),
        )
        .route("/api/products/page", get(query::get_products_paged))
        .route("/api/products/active", get(query::get_active_products))
        .route("/api/products/search", get(query::search_products))
        .route(
            "/api/products/price-range",
            get(query::get_products_by_price_range),
        )
        .route(
            "/api/products/max-price",
            get(query::get_products_by_max_price),
        )
        .route("/api/products/in-stock", get(query::get_products_in_stock))
        .route("/api/products/validate-sku", get(query::validate_sku))
        .route("/api/products/sku/{sku}", get(query::get_product_by_sku))
        .route(
            "/api/products/category/{category}",
            get(query::get_products_by_category),
        )
        .route(
            "/api/products/category/{category}/active",
            get(query::get_active_products_by_category),
        )
        .route(
            "/api/products/brand/{brand}",
            get(query::get_products_by_brand),
        )
        .route(
            "/api/products/{id}",
            get(query::get_product)
                .put(command::update_product)
                .delete(command::delete_product),
        )
        .route("/api/products/{id}/stock", patch(command::update_stock))
        .route(
            "/api/products/{id}/activate",
            patch(command::activate_product),
        )
        .route(
            "/api/products/{id}/deactivate",
            patch(command::deactivate_product),
        )
        .layer(Extension(services.query.clone()))
        .layer(Extension(services.command.clone()))
}

pub struct AppRouter;

impl AppRouter {
    /// The full application: product API, `/metrics`, and Swagger UI.
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(product_routes(shared_state));

        let router_with_layers = api_router
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        let local_addr = listener.local_addr()?;
        info!("🚀 Server running on http://{local_addr}");
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server terminated unexpectedly")?;

        Ok(())
    }
}
