//! Customer routes: CRUD plus phone and email lookups.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use sobripos_core::{CoreError, Customer};

use super::crud;
use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    crud::routes::<Customer>()
        .route("/phone/:phone", get(by_phone))
        .route("/email/:email", get(by_email))
}

async fn by_phone(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> ApiResult<Json<Customer>> {
    let uow = state.db.unit_of_work();
    let customer = uow
        .customers()
        .get_by_phone_number(&phone)
        .await?
        .ok_or_else(|| CoreError::not_found("customer", phone))?;
    Ok(Json(customer))
}

async fn by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<Customer>> {
    let uow = state.db.unit_of_work();
    let customer = uow
        .customers()
        .get_by_email(&email)
        .await?
        .ok_or_else(|| CoreError::not_found("customer", email))?;
    Ok(Json(customer))
}
