//! # SOBRIPOS API
//!
//! REST back office for the SOBRIPOS point of sale.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SOBRIPOS API Server                             │
//! │                                                                         │
//! │  Client ──► HTTP (5000) ──► TraceLayer ──► routes::* ──► UnitOfWork      │
//! │                                                 │             │         │
//! │                                                 ▼             ▼         │
//! │                                      ApiError (404/400/500)  SQLite     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (an optional `.env` file is read first):
//! - `BIND_ADDRESS` - listen interface (default: 0.0.0.0)
//! - `HTTP_PORT` - HTTP port (default: 5000)
//! - `DATABASE_URL` - SQLite connection string (default: sqlite://sobripos.db?mode=rwc)
//! - `DATABASE_MAX_CONNECTIONS` - pool size (default: 5)
//! - `RUN_MIGRATIONS` - apply embedded migrations at startup (default: true)
//! - `RUST_LOG` - log filter (default: info)

pub mod config;
pub mod error;
pub mod routes;

use axum::Router;
use tower_http::trace::TraceLayer;

use sobripos_db::Database;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};

/// Shared application state. The pool inside [`Database`] is the only
/// state shared between requests.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

/// Builds the full router with request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::api())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
