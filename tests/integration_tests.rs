//! Integration tests through an axum router
//!
//! Tests the full end-to-end flow: HTTP request → PageRequest extractor →
//! query source → paginator → JSON response

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use solidafy_paginator::{
    CollectionMode, CollectionSource, DuckDbSource, Error, PageRequest, Paginate,
    PaginateCollection, Paginator, PaginatorConfig,
};
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Debug, Clone, Serialize)]
struct Article {
    id: u64,
    title: String,
}

fn articles(count: u64) -> Vec<Article> {
    (1..=count)
        .map(|id| Article {
            id,
            title: format!("Article {id}"),
        })
        .collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_articles(
    State(source): State<Arc<CollectionSource<Article>>>,
    request: PageRequest,
) -> Result<Paginator<Article>, Error> {
    source.paginate(&PaginatorConfig::new(10), &request).await
}

async fn list_articles_from_memory(request: PageRequest) -> Result<Paginator<Article>, Error> {
    let config = PaginatorConfig::new(4)
        .with_page_name("p")
        .with_data_key("articles")
        .with_collection_mode(CollectionMode::Slice);
    articles(10).paginate_collection(&config, &request)
}

async fn list_rows(
    State(source): State<Arc<DuckDbSource>>,
    request: PageRequest,
) -> Result<Paginator<Value>, Error> {
    source.paginate(&PaginatorConfig::new(5), &request).await
}

fn article_router() -> Router {
    Router::new()
        .route("/articles", get(list_articles))
        .with_state(Arc::new(CollectionSource::new(articles(25))))
        .route("/memory", get(list_articles_from_memory))
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// Collection Source Through axum
// ============================================================================

#[tokio::test]
async fn test_first_page_without_page_param() {
    init_tracing();
    let (status, body) = get_json(article_router(), "/articles").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["last_page"], 3);
    assert_eq!(body["total"], 25);
    assert_eq!(body["per_page"], 10);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["next_page_url"], "/articles?page=2");
    assert_eq!(body["prev_page_url"], Value::Null);
}

#[tokio::test]
async fn test_last_page_with_page_param() {
    let (status, body) = get_json(article_router(), "/articles?page=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_page"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"][0], json!({"id": 21, "title": "Article 21"}));
    assert_eq!(body["next_page_url"], Value::Null);
    assert_eq!(body["prev_page_url"], "/articles?page=2");
}

#[tokio::test]
async fn test_links_keep_other_query_params() {
    let (_, body) = get_json(article_router(), "/articles?sort=title&page=2&tag=rust").await;

    assert_eq!(
        body["next_page_url"],
        "/articles?sort=title&page=3&tag=rust"
    );
    assert_eq!(
        body["prev_page_url"],
        "/articles?sort=title&page=1&tag=rust"
    );
}

#[tokio::test]
async fn test_malformed_page_falls_back_to_default() {
    let (status, body) = get_json(article_router(), "/articles?page=banana").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["from"], 1);
    assert_eq!(body["to"], 10);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let (status, body) = get_json(article_router(), "/articles?page=7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["total"], 25);
    assert_eq!(body["from"], Value::Null);
    assert_eq!(body["next_page_url"], Value::Null);
    assert_eq!(body["prev_page_url"], "/articles?page=6");
}

#[tokio::test]
async fn test_in_memory_handler_with_custom_keys() {
    let (status, body) = get_json(article_router(), "/memory?p=3").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("data").is_none());
    assert_eq!(body["articles"].as_array().unwrap().len(), 2);
    assert_eq!(body["current_page"], 3);
    assert_eq!(body["last_page"], 3);
    assert_eq!(body["prev_page_url"], "/memory?p=2");
}

// ============================================================================
// DuckDB Source Through axum
// ============================================================================

fn duckdb_router() -> Router {
    let source = DuckDbSource::open_in_memory("SELECT id, sku, price FROM products")
        .unwrap()
        .with_order_by("id");
    source
        .execute_batch(
            "CREATE TABLE products (id INTEGER, sku VARCHAR, price DOUBLE);
             INSERT INTO products
             SELECT i, 'SKU-' || CAST(i AS VARCHAR), i * 1.5 FROM range(1, 13) t(i);",
        )
        .unwrap();

    Router::new()
        .route("/products", get(list_rows))
        .with_state(Arc::new(source))
}

#[tokio::test]
async fn test_duckdb_pages() {
    let (status, body) = get_json(duckdb_router(), "/products?page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 12);
    assert_eq!(body["last_page"], 3);
    assert_eq!(body["from"], 6);
    assert_eq!(body["to"], 10);
    assert_eq!(
        body["data"][0],
        json!({"id": 6, "sku": "SKU-6", "price": 9.0})
    );
    assert_eq!(body["next_page_url"], "/products?page=3");
}

#[tokio::test]
async fn test_duckdb_query_error_becomes_500() {
    let source = DuckDbSource::open_in_memory("SELECT * FROM does_not_exist").unwrap();
    let router = Router::new()
        .route("/broken", get(list_rows))
        .with_state(Arc::new(source));

    let (status, body) = get_json(router, "/broken").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Query count failed"));
}
