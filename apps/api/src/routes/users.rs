//! User routes: CRUD plus username, email and role lookups.
//!
//! `GET /role/:role` takes the stored role text (`admin`, `manager`,
//! `cashier`); anything else is rejected with 400 by the path extractor.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use sobripos_core::{CoreError, User, UserRole};

use super::crud;
use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    crud::routes::<User>()
        .route("/username/:username", get(by_username))
        .route("/email/:email", get(by_email))
        .route("/role/:role", get(by_role))
}

async fn by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<User>> {
    let uow = state.db.unit_of_work();
    let user = uow
        .users()
        .get_by_username(&username)
        .await?
        .ok_or_else(|| CoreError::not_found("user", username))?;
    Ok(Json(user))
}

async fn by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<User>> {
    let uow = state.db.unit_of_work();
    let user = uow
        .users()
        .get_by_email(&email)
        .await?
        .ok_or_else(|| CoreError::not_found("user", email))?;
    Ok(Json(user))
}

async fn by_role(
    State(state): State<AppState>,
    Path(role): Path<UserRole>,
) -> ApiResult<Json<Vec<User>>> {
    let uow = state.db.unit_of_work();
    Ok(Json(uow.users().get_by_role(role).await?))
}
