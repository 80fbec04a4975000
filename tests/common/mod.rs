#![allow(dead_code)]

use product_search::config::Config;
use product_search::models::storage::SqliteBackend;
use product_search::Backend;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;
use std::sync::Arc;

pub const LATEST: &str = "2024-03-01T09:05:07Z";

/// In-memory database on a single long-lived connection.
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database")
}

pub async fn create_products_table(pool: &SqlitePool) {
    sqlx::query(
        r#"
        CREATE TABLE products (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            url TEXT NOT NULL,
            img_url TEXT NOT NULL,
            title TEXT NOT NULL,
            price REAL NOT NULL,
            used_price REAL NOT NULL,
            save REAL NOT NULL,
            region TEXT NOT NULL,
            timestamp TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("create products table");
}

pub async fn insert_product(pool: &SqlitePool, name: &str, price: f64, timestamp: &str) {
    sqlx::query(
        "INSERT INTO products (name, url, img_url, title, price, used_price, save, region, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(name)
    .bind(format!("https://shop.example/{}", name.replace(' ', "-")))
    .bind("https://img.example/product.jpg")
    .bind(format!("{} title", name))
    .bind(price)
    .bind(price * 0.75)
    .bind(price * 0.25)
    .bind("DE")
    .bind(timestamp)
    .execute(pool)
    .await
    .expect("insert product");
}

/// `lego` Lego sets priced 1.5, 2.5, ... followed by `duplo` Duplo sets
/// priced from 100.5 upwards.
pub async fn seeded_pool(lego: u32, duplo: u32) -> SqlitePool {
    let pool = memory_pool().await;
    create_products_table(&pool).await;

    for i in 0..lego {
        insert_product(&pool, &format!("Lego set {}", i), f64::from(i) + 1.5, "2024-02-01T08:00:00Z").await;
    }
    for i in 0..duplo {
        insert_product(&pool, &format!("Duplo set {}", i), f64::from(i) + 100.5, LATEST).await;
    }

    pool
}

pub fn backend(pool: SqlitePool) -> Backend {
    Arc::new(SqliteBackend::from_pool(pool))
}

pub fn test_config() -> Config {
    Config {
        public_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"),
        ..Config::default()
    }
}
