//! OpenAPI document served at `/v3/api-docs` and rendered by Swagger UI.

use utoipa::{Modify, OpenApi};

use super::handlers::{self, HealthResponse, HealthStatus};

/// Terms of service advertised in the document info block.
pub const TERMS_OF_SERVICE: &str = "github";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "REST + Swagger UI",
        description = "REST + Swagger UI sample app",
        version = "1.0",
        license(name = "Apache 2.0")
    ),
    modifiers(&TermsOfService),
    paths(
        handlers::root,
        handlers::hello,
        handlers::bye,
        handlers::health,
        handlers::liveness,
        handlers::readiness,
    ),
    components(schemas(HealthResponse, HealthStatus)),
    tags(
        (name = "greetings", description = "Static greeting endpoints"),
        (name = "actuator", description = "Operational probes")
    )
)]
pub struct ApiDoc;

struct TermsOfService;

impl Modify for TermsOfService {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.terms_of_service = Some(TERMS_OF_SERVICE.to_owned());
    }
}

/// Render the document as pretty-printed JSON.
pub fn openapi_json() -> crate::Result<String> {
    Ok(ApiDoc::openapi().to_pretty_json()?)
}
