//! Runs against a real Postgres when `TEST_DATABASE_URL` is set, each test in
//! its own schema. Without the variable every test returns early.

mod common;

use anyhow::Result;
use catalog::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::{FindAllProducts, ProductRequest},
    model::ProductDraft,
    repository::ProductRepository,
    service::ProductService,
};
use common::{product, with_sku};
use prometheus_client::registry::Registry;
use shared::{
    config::ConnectionPool,
    errors::{RepositoryError, ServiceError},
};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;

async fn isolated_pool(schema: &str) -> Result<Option<ConnectionPool>> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping {schema}");
        return Ok(None);
    };

    let admin = PgPoolOptions::new().max_connections(1).connect(&url).await?;
    sqlx::query(&format!("DROP SCHEMA IF EXISTS {schema} CASCADE"))
        .execute(&admin)
        .await?;
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await?;
    admin.close().await;

    let options = PgConnectOptions::from_str(&url)?.options([("search_path", schema)]);
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(Some(pool))
}

fn service(pool: ConnectionPool) -> ProductService {
    let repository = ProductRepository::new(pool);
    ProductService::new(repository.query, repository.command, &mut Registry::default())
}

fn draft(req: ProductRequest) -> ProductDraft {
    ProductDraft::from(req)
}

fn blank_sku(name: &str) -> ProductDraft {
    ProductDraft {
        sku: Some(String::new()),
        ..draft(product(name, "7.00", "tools"))
    }
}

#[tokio::test]
async fn unique_index_covers_only_real_skus() -> Result<()> {
    let Some(pool) = isolated_pool("catalog_unique_sku").await? else {
        return Ok(());
    };
    let repository = ProductRepository::new(pool);

    repository
        .command
        .create_product(&draft(with_sku(product("Drill", "99.00", "tools"), "DR-1")))
        .await?;

    let err = repository
        .command
        .create_product(&draft(with_sku(product("Driver", "49.00", "tools"), "DR-1")))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::AlreadyExists(_)));

    repository
        .command
        .create_product(&draft(product("Hammer", "5.00", "tools")))
        .await?;
    repository
        .command
        .create_product(&draft(product("Mallet", "6.00", "tools")))
        .await?;
    repository.command.create_product(&blank_sku("Chisel")).await?;
    repository.command.create_product(&blank_sku("File")).await?;

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn racing_creates_leave_one_winner() -> Result<()> {
    let Some(pool) = isolated_pool("catalog_racing_creates").await? else {
        return Ok(());
    };
    let service = service(pool);

    let first = with_sku(product("Saw", "20.00", "tools"), "SAW-1");
    let second = with_sku(product("Hacksaw", "25.00", "tools"), "SAW-1");

    let (a, b) = tokio::join!(
        service.command.create_product(&first),
        service.command.create_product(&second)
    );

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes.iter().any(|r| matches!(
        r,
        Err(ServiceError::DuplicateSku { sku }) if sku == "SAW-1"
    )));
    assert_eq!(service.query.find_all().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn search_treats_wildcards_literally() -> Result<()> {
    let Some(pool) = isolated_pool("catalog_search_wildcards").await? else {
        return Ok(());
    };
    let service = service(pool);

    let mut sale = product("Gloves 50% off", "3.00", "apparel");
    sale.description = Some("Work gloves".to_string());
    service.command.create_product(&sale).await?;
    service
        .command
        .create_product(&product("Gloves 500", "4.00", "apparel"))
        .await?;
    service
        .command
        .create_product(&product("snake_case", "1.00", "books"))
        .await?;
    service
        .command
        .create_product(&product("snakeXcase", "1.00", "books"))
        .await?;

    let hits = service.query.search("50%").await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Gloves 50% off");

    let hits = service.query.search("E_C").await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "snake_case");

    let hits = service.query.search("WORK").await?;
    assert_eq!(hits.len(), 1);

    Ok(())
}

#[tokio::test]
async fn missing_brands_sort_last_ascending_and_first_descending() -> Result<()> {
    let Some(pool) = isolated_pool("catalog_null_ordering").await? else {
        return Ok(());
    };
    let service = service(pool);

    let mut acme = product("Anvil", "80.00", "tools");
    acme.brand = Some("Acme".to_string());
    let mut zenith = product("Vise", "60.00", "tools");
    zenith.brand = Some("Zenith".to_string());

    service
        .command
        .create_product(&product("Generic", "1.00", "tools"))
        .await?;
    service.command.create_product(&acme).await?;
    service.command.create_product(&zenith).await?;

    let page = |direction: &str| FindAllProducts {
        page: 0,
        size: 10,
        sort_by: "brand".to_string(),
        sort_direction: direction.to_string(),
    };

    let (asc, _) = service.query.find_paged(&page("asc")).await?;
    let names: Vec<_> = asc.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Anvil", "Vise", "Generic"]);

    let (desc, pagination) = service.query.find_paged(&page("desc")).await?;
    let names: Vec<_> = desc.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Generic", "Vise", "Anvil"]);
    assert_eq!(pagination.total_items, 3);

    Ok(())
}

#[tokio::test]
async fn column_limits_are_enforced_before_the_database() -> Result<()> {
    let Some(pool) = isolated_pool("catalog_column_limits").await? else {
        return Ok(());
    };
    let service = service(pool);

    let err = service
        .command
        .create_product(&product("Bolt", "0.001", "hardware"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = service
        .command
        .create_product(&product("Bolt", "1.00", &"c".repeat(300)))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let created = service
        .command
        .create_product(&product("Bolt", "99999999999999999.99", "hardware"))
        .await?;
    assert_eq!(created.price.to_string(), "99999999999999999.99");

    assert_eq!(service.query.find_all().await?.len(), 1);

    Ok(())
}
