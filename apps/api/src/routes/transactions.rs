//! Sales transaction routes.
//!
//! Lookups return [`TransactionDetails`]: the transaction with its cashier,
//! customer and line items (each with its product).
//!
//! ```text
//! GET /number/:number          one transaction or 404
//! GET /cashier/:id             all by cashier
//! GET /customer/:id            all by customer
//! GET /range?start=..&end=..   transaction_date within start..=end
//! ```

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use sobripos_core::{CoreError, Transaction, TransactionDetails};

use super::crud;
use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    crud::routes::<Transaction>()
        .route("/number/:number", get(by_number))
        .route("/cashier/:cashier_id", get(by_cashier))
        .route("/customer/:customer_id", get(by_customer))
        .route("/range", get(by_date_range))
}

/// Query string of `/range`, both bounds RFC 3339.
#[derive(Debug, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

async fn by_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> ApiResult<Json<TransactionDetails>> {
    let uow = state.db.unit_of_work();
    let transaction = uow
        .transactions()
        .get_by_transaction_number(&number)
        .await?
        .ok_or_else(|| CoreError::not_found("transaction", number))?;
    Ok(Json(transaction))
}

async fn by_cashier(
    State(state): State<AppState>,
    Path(cashier_id): Path<Uuid>,
) -> ApiResult<Json<Vec<TransactionDetails>>> {
    let uow = state.db.unit_of_work();
    Ok(Json(uow.transactions().get_by_cashier(cashier_id).await?))
}

async fn by_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> ApiResult<Json<Vec<TransactionDetails>>> {
    let uow = state.db.unit_of_work();
    Ok(Json(uow.transactions().get_by_customer(customer_id).await?))
}

async fn by_date_range(
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
) -> ApiResult<Json<Vec<TransactionDetails>>> {
    let uow = state.db.unit_of_work();
    let transactions = uow
        .transactions()
        .get_by_date_range(range.start, range.end)
        .await?;
    Ok(Json(transactions))
}
