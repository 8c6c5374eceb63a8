//! HTTP API route definitions.

use axum::{middleware, routing::get, Json, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::ApiDoc;
use super::handlers::{
    actuator_index, bye, health, hello, liveness, prometheus, readiness, root, AppState,
};
use crate::metrics::track_http;

/// Path of the OpenAPI JSON document.
pub const OPENAPI_JSON_PATH: &str = "/v3/api-docs";
/// Mount point of the Swagger UI.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        // Greetings
        .route("/", get(root))
        .route("/v1/hello", get(hello))
        .route("/v1/bye", get(bye))
        // Actuator
        .route("/actuator", get(actuator_index))
        .route("/actuator/health", get(health))
        .route("/actuator/health/liveness", get(liveness))
        .route("/actuator/health/readiness", get(readiness));

    if let Some(handle) = state.metrics.clone() {
        router = router.route("/actuator/prometheus", get(move || prometheus(handle.clone())));
    }

    // The JSON document stays available when the UI is off
    if state.swagger_enabled {
        router = router.merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()));
    } else {
        router = router.route(OPENAPI_JSON_PATH, get(|| async { Json(ApiDoc::openapi()) }));
    }

    router
        .layer(middleware::from_fn(track_http))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
