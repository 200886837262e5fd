//! # HTTP Server
//!
//! Combines all trivia API routes into one Axum router with CORS and
//! request tracing, and serves it.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::header;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::category_routes::category_routes;
use super::config::HttpServerConfig;
use super::errors::ApiError;
use super::question_routes::question_routes;
use super::quiz_routes::quiz_routes;
use super::ApiState;
use crate::store::TriviaStore;

/// HTTP server for the trivia API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over an injected store
    pub fn new(config: HttpServerConfig, store: Arc<dyn TriviaStore>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, store: Arc<dyn TriviaStore>) -> Router {
        let state = Arc::new(ApiState::new(store));

        // Clients send Content-Type and Authorization; origins come from
        // config, permissive when none are configured.
        let allow_headers = [header::CONTENT_TYPE, header::AUTHORIZATION];
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(allow_headers)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(allow_headers)
        };

        Router::new()
            .merge(category_routes(state.clone()))
            .merge(question_routes(state.clone()))
            .merge(quiz_routes(state))
            // Unknown routes get the 404 envelope, not axum's default
            .fallback(unknown_route_handler)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        tracing::info!(%addr, "starting trivia API server");
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

async fn unknown_route_handler() -> ApiError {
    ApiError::NotFound
}
