mod common;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use common::{backend, create_products_table, insert_product, memory_pool, seeded_pool, test_config};
use product_search::app;
use product_search::config::Config;
use product_search::models::product::Product;
use product_search::models::query::BuiltQuery;
use product_search::models::storage::{ProductStore, StorageError};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

async fn seeded_app(lego: u32, duplo: u32) -> Router {
    app(backend(seeded_pool(lego, duplo).await), &test_config())
}

#[tokio::test]
async fn index_renders_full_listing() {
    let (status, content_type, body) = get(seeded_app(5, 3).await, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("8 products"));
    assert!(body.contains("<time>01-Mar-2024 09:05:07</time>"));
    assert_eq!(body.matches(r#"<tr class="product""#).count(), 8);
    assert!(body.contains(r#"<option value="price ASC" selected>"#));
}

#[tokio::test]
async fn search_filters_and_links_to_next_page() {
    let (status, _, body) = get(seeded_app(30, 5).await, "/?search=lego&order=price+DESC").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches(r#"<tr class="product""#).count(), 20);
    assert!(!body.contains("Duplo"));
    assert!(body.contains("30 of 35 products match"));
    assert!(body.contains("search=lego&amp;order=price+DESC&amp;offset=20&amp;template=products"));
}

#[tokio::test]
async fn products_template_returns_rows_numbered_from_offset() {
    let (status, _, body) = get(
        seeded_app(25, 0).await,
        "/?search=lego&offset=20&template=products",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("<html"));
    assert_eq!(body.matches(r#"<tr class="product""#).count(), 5);
    for id in 21..=25 {
        assert!(body.contains(&format!(r#"<td class="position">{}</td>"#, id)));
    }
    assert!(!body.contains("load-more"));
}

#[tokio::test]
async fn blank_search_matches_everything() {
    let (status, _, body) = get(seeded_app(2, 2).await, "/?search=+++").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches(r#"<tr class="product""#).count(), 4);
}

#[tokio::test]
async fn raw_sql_order_is_rejected() {
    let (status, _, body) = get(
        seeded_app(2, 0).await,
        "/?order=price%3B+DROP+TABLE+products",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Unknown sort column"));
}

#[tokio::test]
async fn bad_offset_is_rejected() {
    let (status, _, _) = get(seeded_app(2, 0).await, "/?offset=ten").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_template_is_not_found() {
    let (status, _, body) = get(seeded_app(2, 0).await, "/?template=admin").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Unknown template"));
}

#[tokio::test]
async fn storage_failure_is_distinguishable_from_no_results() {
    let broken = app(backend(memory_pool().await), &test_config());
    let (status, _, body) = get(broken, "/?search=lego").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("unavailable"));

    let (status, _, body) = get(seeded_app(0, 2).await, "/?search=lego").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No products found."));
}

#[tokio::test]
async fn unparseable_timestamp_renders_without_update_time() {
    let pool = memory_pool().await;
    create_products_table(&pool).await;
    insert_product(&pool, "Lego set", 10.0, "last tuesday").await;
    let app = app(backend(pool), &test_config());

    let (status, _, body) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<p class="summary">1 products</p>"#));
    assert!(!body.contains("<time>"));
}

#[tokio::test]
async fn status_reports_running() {
    let (status, content_type, body) = get(seeded_app(1, 0).await, "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["service"], "product-search");
    assert_eq!(json["status"], "running");
}

#[tokio::test]
async fn serves_price_script() {
    let (status, _, body) = get(seeded_app(1, 0).await, "/public/script.js").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Intl.NumberFormat('de-DE'"));
}

struct SlowStore {
    delay: Duration,
}

#[async_trait]
impl ProductStore for SlowStore {
    async fn fetch_products(&self, _query: &BuiltQuery) -> Result<Vec<Product>, StorageError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn fetch_count(&self, _query: &BuiltQuery) -> Result<u64, StorageError> {
        Ok(0)
    }

    async fn fetch_latest_timestamp(&self) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn test_connection(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[tokio::test]
async fn slow_queries_time_out() {
    let config = Config {
        request_timeout: Duration::from_millis(50),
        ..test_config()
    };
    let slow = app(
        Arc::new(SlowStore {
            delay: Duration::from_secs(5),
        }),
        &config,
    );

    let (status, _, _) = get(slow, "/?search=lego").await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn fast_queries_finish_within_timeout() {
    let config = Config {
        request_timeout: Duration::from_secs(5),
        ..test_config()
    };
    let fast = app(
        Arc::new(SlowStore {
            delay: Duration::from_millis(1),
        }),
        &config,
    );

    let (status, _, body) = get(fast, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No products found."));
}
