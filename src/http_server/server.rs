//! # HTTP Server
//!
//! Composition root: wires repository → service → routes once at startup.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::HeaderValue, middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::health_routes::health_routes;
use super::persona_routes::persona_routes;
use super::request_log::log_requests;
use crate::observability::Logger;
use crate::persona::{PersonaRepository, PersonaService};

/// HTTP server for the persona API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Build the server around an already-opened repository.
    pub fn with_repository<R: PersonaRepository + 'static>(
        config: HttpServerConfig,
        repo: R,
    ) -> Self {
        Self::with_service(config, Arc::new(PersonaService::new(repo)))
    }

    pub fn with_service<R: PersonaRepository + 'static>(
        config: HttpServerConfig,
        service: Arc<PersonaService<R>>,
    ) -> Self {
        let router = Self::build_router(&config, service);
        Self { config, router }
    }

    fn build_router<R: PersonaRepository + 'static>(
        config: &HttpServerConfig,
        service: Arc<PersonaService<R>>,
    ) -> Router {
        Router::new()
            .merge(health_routes())
            .merge(persona_routes(service))
            .layer(cors_layer(&config.cors_origins))
            .layer(middleware::from_fn(log_requests))
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for in-process tests)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let local = listener.local_addr()?.to_string();
        Logger::info("HTTP_SERVER_LISTENING", &[("addr", local.as_str())]);

        axum::serve(listener, self.router).await
    }
}

/// Permissive when no origins are configured, otherwise restricted to the list.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<_> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                Logger::warn("CORS_ORIGIN_IGNORED", &[("origin", origin.as_str())]);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(parsed))
}
