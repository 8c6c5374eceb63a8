//! HTTP API module: greetings, actuator probes, and OpenAPI documentation.

pub mod docs;
pub mod handlers;
pub mod routes;

pub use docs::ApiDoc;
pub use handlers::AppState;
pub use routes::create_router;
