//! # Arcanum API
//!
//! HTTP layer for the Arcanum crypto service.
//!
//! ## Endpoints
//!
//! - `POST /generate-key` - AES / RSA key generation
//! - `POST /encrypt`, `POST /decrypt` - AES-CBC and RSA-OAEP with a stored key
//! - `POST /generate-hash`, `POST /verify-hash` - SHA-256 / SHA-512 digests
//! - `GET /health` - liveness and key count
//! - `GET /` - banner
//!
//! Failures are rendered as `{"error": "..."}` with the status chosen by
//! [`ApiError::status`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod models;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::BANNER;
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Builds the application router with request tracing.
pub fn router(state: AppState) -> Router {
    routes::routes()
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Tests
// ============================================================================
