//! scribe-server - REST API server for scribe.
//!
//! Serves PDF and image text extraction over HTTP.
//!
//! # Example
//!
//! ```ignore
//! use scribe_core::ScribeConfig;
//! use scribe_server::{create_server, create_state};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScribeConfig::from_env().unwrap();
//!     let state = create_state(&config).await.unwrap();
//!     let app = create_server(state, &config.server);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod error;
pub mod factory;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use factory::create_state;
pub use state::AppState;

use axum::{middleware as axum_middleware, Router};
use scribe_core::config::ServerConfig;
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState, config: &ServerConfig) -> Router {
    routes::create_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer(&config.cors_origins))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
