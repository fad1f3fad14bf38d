//! Category routes.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use sobripos_core::{Category, CoreError};

use super::crud;
use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    crud::routes::<Category>().route("/name/:name", get(by_name))
}

async fn by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Category>> {
    let uow = state.db.unit_of_work();
    let category = uow
        .categories()
        .get_by_name(&name)
        .await?
        .ok_or_else(|| CoreError::not_found("category", name))?;
    Ok(Json(category))
}
