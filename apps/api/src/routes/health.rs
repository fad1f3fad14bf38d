use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
    pub migrations: MigrationHealth,
}

#[derive(Debug, Default, Serialize)]
pub struct MigrationHealth {
    pub total: usize,
    pub applied: usize,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    let database = state.db.health_check().await;

    let migrations = match state.db.migration_status().await {
        Ok((total, applied)) => MigrationHealth { total, applied },
        Err(err) => {
            warn!(error = %err, "Migration status unavailable");
            MigrationHealth::default()
        }
    };

    let (status_code, status) = if database && migrations.applied >= migrations.total {
        (StatusCode::OK, "ok")
    } else if database {
        (StatusCode::SERVICE_UNAVAILABLE, "migrations_pending")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "db_error")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            version,
            database,
            migrations,
        }),
    )
}
