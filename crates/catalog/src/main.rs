use anyhow::{Context, Result};
use catalog::{
    config::Config,
    handler::AppRouter,
    repository::{InMemoryProductStore, ProductRepository},
    state::AppState,
};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use std::sync::Arc;
use tracing::{error, info, warn};

const SERVICE_NAME: &str = "catalog-service";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match &config.otel_endpoint {
        Some(endpoint) => Some(
            Telemetry::init(SERVICE_NAME, endpoint).context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    let _log_guard = init_logger(
        telemetry.as_ref().map(Telemetry::logger_provider),
        SERVICE_NAME,
        config.dev_mode,
        config.enable_file_log,
    )
    .context("Failed to initialize logger")?;

    info!("🚀 Starting Catalog Service initialization...");

    let repository = build_repository(&config).await?;
    let state = AppState::new(repository);

    info!("✅ Application setup completed successfully.");

    let result = AppRouter::serve(config.port, state).await;

    if let Some(telemetry) = telemetry {
        if let Err(e) = telemetry.shutdown() {
            error!("Failed to shutdown telemetry: {e}");
        }
    }

    info!("✅ Catalog Service shutdown complete.");
    result
}

async fn build_repository(config: &Config) -> Result<ProductRepository> {
    let Some(database_url) = &config.database_url else {
        warn!("⚠️ DATABASE_URL not set, products are kept in memory and lost on exit");
        return Ok(ProductRepository::in_memory(Arc::new(
            InMemoryProductStore::new(),
        )));
    };

    let db_pool =
        ConnectionManager::new_pool(database_url, config.db_min_conn, config.db_max_conn)
            .await
            .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
        info!("✅ Database migrations applied");
    }

    Ok(ProductRepository::new(db_pool))
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
