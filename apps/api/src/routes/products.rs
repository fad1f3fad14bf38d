//! Product routes: CRUD plus barcode, SKU, category and low-stock lookups.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use sobripos_core::{CoreError, Product, ProductDetails};

use super::crud;
use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    crud::routes::<Product>()
        .route("/barcode/:barcode", get(by_barcode))
        .route("/sku/:sku", get(by_sku))
        .route("/low-stock", get(low_stock))
        .route("/category/:category_id", get(by_category))
}

async fn by_barcode(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> ApiResult<Json<ProductDetails>> {
    let uow = state.db.unit_of_work();
    let product = uow
        .products()
        .get_by_barcode(&barcode)
        .await?
        .ok_or_else(|| CoreError::not_found("product", barcode))?;
    Ok(Json(product))
}

async fn by_sku(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> ApiResult<Json<ProductDetails>> {
    let uow = state.db.unit_of_work();
    let product = uow
        .products()
        .get_by_sku(&sku)
        .await?
        .ok_or_else(|| CoreError::not_found("product", sku))?;
    Ok(Json(product))
}

/// Products at or below their minimum stock.
async fn low_stock(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductDetails>>> {
    let uow = state.db.unit_of_work();
    Ok(Json(uow.products().get_low_stock().await?))
}

async fn by_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> ApiResult<Json<Vec<ProductDetails>>> {
    let uow = state.db.unit_of_work();
    Ok(Json(uow.products().get_by_category(category_id).await?))
}
