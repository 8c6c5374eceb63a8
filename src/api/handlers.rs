//! HTTP API handlers.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use utoipa::ToSchema;

/// Body returned by `/` and `/v1/hello`.
pub const HELLO: &str = "Hello world!";
/// Body returned by `/v1/bye`.
pub const BYE: &str = "Bye world!";

/// Content type of the Prometheus text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Whether the server is accepting traffic.
    pub ready: Arc<AtomicBool>,
    /// Prometheus handle; `None` disables `/actuator/prometheus`.
    pub metrics: Option<PrometheusHandle>,
    /// Whether to serve the Swagger UI.
    pub swagger_enabled: bool,
}

impl AppState {
    /// Create new app state with metrics disabled and Swagger UI enabled.
    pub fn new() -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(false)),
            metrics: None,
            swagger_enabled: true,
        }
    }

    /// Attach a Prometheus handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Toggle the Swagger UI.
    pub fn with_swagger(mut self, enabled: bool) -> Self {
        self.swagger_enabled = enabled;
        self
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// === Greetings ===

/// Root greeting.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting", content_type = "text/plain", body = String)
    ),
    tag = "greetings"
)]
pub async fn root() -> &'static str {
    HELLO
}

/// Say hello.
#[utoipa::path(
    get,
    path = "/v1/hello",
    responses(
        (status = 200, description = "Greeting", content_type = "text/plain", body = String)
    ),
    tag = "greetings"
)]
pub async fn hello() -> &'static str {
    HELLO
}

/// Say goodbye.
#[utoipa::path(
    get,
    path = "/v1/bye",
    responses(
        (status = 200, description = "Farewell", content_type = "text/plain", body = String)
    ),
    tag = "greetings"
)]
pub async fn bye() -> &'static str {
    BYE
}

// === Actuator ===

/// Probe status, serialized the way actuator clients expect (`UP`, `OUT_OF_SERVICE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    /// Component is working.
    Up,
    /// Component is alive but must not receive traffic.
    OutOfService,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Aggregate status.
    pub status: HealthStatus,
    /// Probe groups available under `/actuator/health/{group}`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
}

impl HealthResponse {
    fn probe(status: HealthStatus) -> Self {
        Self {
            status,
            groups: Vec::new(),
        }
    }
}

/// Hypermedia link in the actuator index.
#[derive(Debug, Serialize)]
pub struct Link {
    /// Target path.
    pub href: String,
}

/// Actuator index response.
#[derive(Debug, Serialize)]
pub struct LinksResponse {
    /// Available endpoints by name.
    #[serde(rename = "_links")]
    pub links: BTreeMap<&'static str, Link>,
}

/// Actuator index - lists the enabled operational endpoints.
pub async fn actuator_index(State(state): State<AppState>) -> impl IntoResponse {
    let mut links = BTreeMap::new();
    let mut add = |name: &'static str, href: &str| {
        links.insert(name, Link { href: href.to_owned() });
    };

    add("self", "/actuator");
    add("health", "/actuator/health");
    add("health-liveness", "/actuator/health/liveness");
    add("health-readiness", "/actuator/health/readiness");
    if state.metrics.is_some() {
        add("prometheus", "/actuator/prometheus");
    }

    Json(LinksResponse { links })
}

/// Aggregate health - always returns 200 while the process serves requests.
#[utoipa::path(
    get,
    path = "/actuator/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "actuator"
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: HealthStatus::Up,
        groups: vec!["liveness".to_owned(), "readiness".to_owned()],
    })
}

/// Liveness probe - always returns 200.
#[utoipa::path(
    get,
    path = "/actuator/health/liveness",
    responses(
        (status = 200, description = "Process is alive", body = HealthResponse)
    ),
    tag = "actuator"
)]
pub async fn liveness() -> impl IntoResponse {
    Json(HealthResponse::probe(HealthStatus::Up))
}

/// Readiness probe - returns 200 if ready, 503 otherwise.
#[utoipa::path(
    get,
    path = "/actuator/health/readiness",
    responses(
        (status = 200, description = "Accepting traffic", body = HealthResponse),
        (status = 503, description = "Not accepting traffic yet", body = HealthResponse)
    ),
    tag = "actuator"
)]
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_ready() {
        (StatusCode::OK, Json(HealthResponse::probe(HealthStatus::Up)))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::probe(HealthStatus::OutOfService)),
        )
    }
}

/// Prometheus scrape endpoint.
pub async fn prometheus(handle: PrometheusHandle) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        handle.render(),
    )
}
