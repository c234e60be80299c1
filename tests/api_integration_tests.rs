//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycles through the router, including cache
//! hits, eviction and expiry as seen from HTTP.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use translation_cache::{
    api::create_router,
    cache::{build_backend, CacheBackend, MemoryCache},
    translation::{CachedTranslation, MockTranslator, TranslationQuery},
    AppState, Config,
};

// == Helper Functions ==

fn memory_cache(max_size: usize, ttl: Duration) -> Arc<MemoryCache<CachedTranslation>> {
    Arc::new(MemoryCache::new(max_size, ttl).unwrap())
}

fn app_with(cache: Arc<MemoryCache<CachedTranslation>>) -> Router {
    create_router(AppState::new(cache, Arc::new(MockTranslator::new())))
}

fn create_test_app() -> Router {
    app_with(memory_cache(100, Duration::from_secs(300)))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn translate_request(text: &str, target: &str) -> Request<Body> {
    let body = json!({
        "text": text,
        "source_language": "en",
        "target_language": target,
    });
    Request::builder()
        .method("POST")
        .uri("/api/v1/translate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn translate(app: &Router, text: &str, target: &str) -> Value {
    let response = app
        .clone()
        .oneshot(translate_request(text, target))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_to_json(response.into_body()).await
}

async fn stats(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/cache/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_to_json(response.into_body()).await
}

fn key_for(text: &str, target: &str) -> String {
    TranslationQuery {
        text,
        source_language: "en",
        target_language: target,
        model: None,
        use_cache: true,
    }
    .cache_key()
}

// == Translate Endpoint Tests ==

#[tokio::test]
async fn test_translate_known_phrase() {
    let app = create_test_app();

    let json = translate(&app, "Hello world", "hi").await;

    assert_eq!(json["translated_text"], "नमस्ते संसार");
    assert_eq!(json["source_language"], "en");
    assert_eq!(json["target_language"], "hi");
    assert_eq!(json["model_used"], "mock");
    assert_eq!(json["cached"], false);
    assert!(json["processing_time"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_repeated_translation_is_cached() {
    let app = create_test_app();

    let first = translate(&app, "Good morning", "ta").await;
    let second = translate(&app, "Good morning", "ta").await;

    assert_eq!(first["cached"], false);
    assert_eq!(second["cached"], true);
    assert_eq!(first["translated_text"], second["translated_text"]);

    let stats = stats(&app).await;
    assert_eq!(stats["backend"], "memory");
    assert_eq!(stats["size"], 1);
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_cache_disabled_request() {
    let app = create_test_app();
    let body = json!({
        "text": "Thank you",
        "source_language": "en",
        "target_language": "hi",
        "enable_cache": false,
    });

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/translate")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["cached"], false);
    }

    let stats = stats(&app).await;
    assert_eq!(stats["size"], 0);
    assert_eq!(stats["misses"], 0);
}

#[tokio::test]
async fn test_empty_text_request() {
    let app = create_test_app();

    let response = app.oneshot(translate_request("  ", "hi")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/translate")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"text": "#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == Cache Endpoint Tests ==

#[tokio::test]
async fn test_delete_cached_translation() {
    let app = create_test_app();
    translate(&app, "Hello", "bn").await;
    let uri = format!("/api/v1/cache/{}", key_for("Hello", "bn"));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(&uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["deleted"], true);

    // A second delete is a normal outcome, not an error
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(&uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["deleted"], false);

    let again = translate(&app, "Hello", "bn").await;
    assert_eq!(again["cached"], false);
}

#[tokio::test]
async fn test_clear_keeps_counters() {
    let app = create_test_app();
    translate(&app, "Hello", "hi").await;
    translate(&app, "Hello", "hi").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats = stats(&app).await;
    assert_eq!(stats["size"], 0);
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["misses"], 1);

    let again = translate(&app, "Hello", "hi").await;
    assert_eq!(again["cached"], false);
}

#[tokio::test]
async fn test_capacity_eviction_via_api() {
    let app = app_with(memory_cache(2, Duration::from_secs(300)));

    translate(&app, "Hello", "hi").await;
    translate(&app, "Goodbye", "hi").await;
    // Refresh "Hello" so "Goodbye" becomes least recently used
    translate(&app, "Hello", "hi").await;
    translate(&app, "Thank you", "hi").await;

    let stats = stats(&app).await;
    assert_eq!(stats["size"], 2);
    assert_eq!(stats["evictions"], 1);

    assert_eq!(translate(&app, "Hello", "hi").await["cached"], true);
    assert_eq!(translate(&app, "Thank you", "hi").await["cached"], true);
    assert_eq!(translate(&app, "Goodbye", "hi").await["cached"], false);
}

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let app = app_with(memory_cache(100, Duration::from_millis(50)));

    translate(&app, "Hello", "mr").await;
    assert_eq!(translate(&app, "Hello", "mr").await["cached"], true);

    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(translate(&app, "Hello", "mr").await["cached"], false);
}

// == Batch Endpoint Tests ==

fn batch_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/translate/batch")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn batch_item(text: &str, target: &str) -> Value {
    json!({"text": text, "source_language": "en", "target_language": target})
}

#[tokio::test]
async fn test_batch_translation_isolates_failures() {
    let app = create_test_app();
    translate(&app, "Hello", "hi").await;

    let body = json!({
        "requests": [
            batch_item("Hello", "hi"),
            batch_item("", "hi"),
            batch_item("Thank you", "ta"),
        ]
    });
    let response = app.clone().oneshot(batch_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success_count"], 2);
    assert_eq!(json["error_count"], 1);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["cached"], true);
    assert!(results[1]["error"].as_str().unwrap().contains("empty"));
    assert_eq!(results[2]["translated_text"], "நன்றி");
    assert_eq!(results[2]["cached"], false);

    // The fresh batch item went through the cache
    assert_eq!(translate(&app, "Thank you", "ta").await["cached"], true);
}

#[tokio::test]
async fn test_batch_size_is_bounded() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(batch_request(json!({"requests": []})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let items: Vec<Value> = (0..11).map(|i| batch_item(&format!("text {i}"), "hi")).collect();
    let response = app
        .clone()
        .oneshot(batch_request(json!({ "requests": items })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("Maximum 10"));

    // Rejected batches never reach the cache
    assert_eq!(stats(&app).await["misses"], 0);
}

// == Translation Stats Endpoint Tests ==

#[tokio::test]
async fn test_translation_stats_endpoint() {
    let app = create_test_app();
    translate(&app, "Hello", "hi").await;
    translate(&app, "Hello", "hi").await;
    translate(&app, "Good morning", "ta").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let usage = &json["translation_stats"];
    assert_eq!(usage["total_translations"], 2);
    assert_eq!(usage["cached_translations"], 1);
    assert_eq!(usage["translations_by_model"]["mock"], 2);
    assert_eq!(usage["translations_by_language"]["en-hi"], 1);
    assert_eq!(usage["translations_by_language"]["en-ta"], 1);
    assert_eq!(json["cache_stats"]["hits"], 1);
    assert_eq!(json["cache_stats"]["backend"], "memory");
    assert!(json.get("timestamp").is_some());
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
    assert_eq!(json["cache"]["max_size"], 100);
}

// == Backend Construction ==

#[tokio::test]
async fn test_app_from_configured_backend() {
    let config = Config {
        max_size: 3,
        ttl_seconds: 2,
        ..Config::default()
    };
    let handle = build_backend::<CachedTranslation>(&config).unwrap();
    let app = create_router(AppState::from_handle(&handle, MockTranslator::new()));

    for text in ["k1", "k2", "k3"] {
        translate(&app, text, "hi").await;
    }
    assert_eq!(handle.cache.stats().await.size, 3);

    translate(&app, "k4", "hi").await;

    let stats = handle.cache.stats().await;
    assert_eq!(stats.size, 3);
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.ttl_seconds, 2);
    assert!(handle.cache.get(&key_for("k1", "hi")).await.is_none());
    assert!(handle.cache.get(&key_for("k4", "hi")).await.is_some());
}
