//! REST + Swagger UI sample app.
//!
//! A small HTTP service answering a few fixed greeting routes, with generated
//! OpenAPI documentation and actuator-style operational endpoints.
//!
//! ```text
//! GET /v1/hello             -> Hello world!
//! GET /v1/bye               -> Bye world!
//! GET /actuator/health      -> {"status":"UP",...}
//! GET /actuator/prometheus  -> Prometheus text exposition
//! GET /swagger-ui/          -> Swagger UI
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: Routes, handlers, and the OpenAPI document
//! - [`metrics`]: Prometheus recorder and HTTP request metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
