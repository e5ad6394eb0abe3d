//! # HTTP Server Module
//!
//! Axum server exposing the persona API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/personas` - List (GET) and create (POST)
//! - `/personas/{id}` - Get (GET), update (PUT), delete (DELETE)

pub mod config;
pub mod errors;
pub mod health_routes;
pub mod persona_routes;
pub mod request_log;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use request_log::REQUEST_ID_HEADER;
pub use server::HttpServer;
