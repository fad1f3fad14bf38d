//! Purchase order routes.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use sobripos_core::{CoreError, Purchase, PurchaseDetails};

use super::crud;
use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    crud::routes::<Purchase>()
        .route("/number/:number", get(by_number))
        .route("/supplier/:supplier_id", get(by_supplier))
}

async fn by_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> ApiResult<Json<PurchaseDetails>> {
    let uow = state.db.unit_of_work();
    let purchase = uow
        .purchases()
        .get_by_purchase_number(&number)
        .await?
        .ok_or_else(|| CoreError::not_found("purchase", number))?;
    Ok(Json(purchase))
}

async fn by_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> ApiResult<Json<Vec<PurchaseDetails>>> {
    let uow = state.db.unit_of_work();
    Ok(Json(uow.purchases().get_by_supplier(supplier_id).await?))
}
