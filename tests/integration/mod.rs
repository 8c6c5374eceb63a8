//! Integration tests for the REST + Swagger UI sample app.
//!
//! Each test starts the full router on an ephemeral port and talks to it over
//! real HTTP, the way a client or a Kubernetes probe would.

use std::net::SocketAddr;
use std::sync::OnceLock;

use metrics_exporter_prometheus::PrometheusHandle;
use reqwest::StatusCode;
use tokio::net::TcpListener;

use rest_swagger_demo::api::{create_router, AppState};
use rest_swagger_demo::metrics::{self, METRIC_HTTP_REQUESTS};

/// The global recorder can only be installed once per process.
fn metrics_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| metrics::init_metrics().expect("install recorder"))
        .clone()
}

/// Bind the app to a random local port and serve it in the background.
async fn spawn_app(state: AppState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    let router = create_router(state.clone());
    state.set_ready(true);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

async fn get(addr: SocketAddr, path: &str) -> reqwest::Response {
    reqwest::get(format!("http://{addr}{path}"))
        .await
        .expect("request failed")
}

#[tokio::test]
async fn test_context_loads() {
    let addr = spawn_app(AppState::new().with_metrics(metrics_handle())).await;
    let response = get(addr, "/actuator/health/liveness").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_greeting() {
    let addr = spawn_app(AppState::new()).await;

    let response = get(addr, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Hello world!");

    let response = get(addr, "/v1/hello").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Hello world!");

    let response = get(addr, "/v1/bye").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Bye world!");
}

#[tokio::test]
async fn test_health() {
    let addr = spawn_app(AppState::new()).await;

    let response = get(addr, "/actuator/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "UP");
}

#[tokio::test]
async fn test_readiness_after_startup() {
    let addr = spawn_app(AppState::new()).await;

    let response = get(addr, "/actuator/health/readiness").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_prometheus() {
    let addr = spawn_app(AppState::new().with_metrics(metrics_handle())).await;

    // Generate at least one recorded request
    let response = get(addr, "/v1/hello").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(addr, "/actuator/prometheus").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains(METRIC_HTTP_REQUESTS), "metrics body: {body}");
    assert!(body.contains("path=\"/v1/hello\""), "metrics body: {body}");
}

#[tokio::test]
async fn test_prometheus_labels_unmatched_routes() {
    let addr = spawn_app(AppState::new().with_metrics(metrics_handle())).await;

    let response = get(addr, "/nope/12345").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(addr, "/actuator/prometheus").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(
        body.contains("path=\"<unmatched>\",status=\"404\""),
        "metrics body: {body}"
    );
    assert!(!body.contains("/nope/12345"), "metrics body: {body}");
}

#[tokio::test]
async fn test_prometheus_disabled() {
    let addr = spawn_app(AppState::new()).await;

    let response = get(addr, "/actuator/prometheus").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document() {
    let addr = spawn_app(AppState::new()).await;

    let response = get(addr, "/v3/api-docs").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["info"]["title"], "REST + Swagger UI");
    assert_eq!(body["info"]["description"], "REST + Swagger UI sample app");
    assert_eq!(body["info"]["version"], "1.0");
    assert_eq!(body["info"]["license"]["name"], "Apache 2.0");
}
