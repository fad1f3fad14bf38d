//! # Generic CRUD Handlers
//!
//! The five REST verbs every resource shares, written once over
//! [`Resource`] and instantiated per entity type.
//!
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────────┐
//! │ GET    /                 │ 200 [live rows]                              │
//! │ GET    /:id              │ 200 row       | 404 empty body               │
//! │ POST   /                 │ 201 row + Location: {PATH}/{id}              │
//! │ PUT    /:id              │ 400 if body id != path id, else 204          │
//! │ DELETE /:id              │ 204 (existing or not)                        │
//! └──────────────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Each write opens its own unit of work and commits once.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use sobripos_core::{
    Category, CoreError, Customer, Entity, Product, Purchase, PurchaseItem, Supplier, Transaction,
    TransactionItem, User, UserActivityLog, Validate,
};
use sobripos_db::{HasRepository, Record, Repository, UnitOfWork};

use crate::error::ApiResult;
use crate::AppState;

/// An entity exposed over HTTP.
pub trait Resource: Record + Validate + Serialize + DeserializeOwned {
    /// Mount point, used for the `Location` header.
    const PATH: &'static str;
}

macro_rules! resource {
    ($($ty:ty => $path:literal),+ $(,)?) => {
        $( impl Resource for $ty { const PATH: &'static str = $path; } )+
    };
}

resource! {
    Product => "/api/products",
    Category => "/api/categories",
    Customer => "/api/customers",
    Supplier => "/api/suppliers",
    User => "/api/users",
    Transaction => "/api/transactions",
    Purchase => "/api/purchases",
    TransactionItem => "/api/transaction-items",
    PurchaseItem => "/api/purchase-items",
    UserActivityLog => "/api/activity-logs",
}

/// The five CRUD routes for `E`, relative to [`Resource::PATH`].
pub fn routes<E>() -> Router<AppState>
where
    E: Resource,
    UnitOfWork: HasRepository<E>,
{
    Router::new()
        .route("/", get(list::<E>).post(create::<E>))
        .route("/:id", get(fetch::<E>).put(update::<E>).delete(remove::<E>))
}

fn repository<E>(uow: &UnitOfWork) -> &Repository<E>
where
    E: Record,
    UnitOfWork: HasRepository<E>,
{
    HasRepository::<E>::repository(uow)
}

pub async fn list<E>(State(state): State<AppState>) -> ApiResult<Json<Vec<E>>>
where
    E: Resource,
    UnitOfWork: HasRepository<E>,
{
    let uow = state.db.unit_of_work();
    let rows = repository::<E>(&uow).get_all().await?;
    Ok(Json(rows))
}

pub async fn fetch<E>(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<E>>
where
    E: Resource,
    UnitOfWork: HasRepository<E>,
{
    let uow = state.db.unit_of_work();
    let row = repository::<E>(&uow)
        .get(id)
        .await?
        .ok_or_else(|| CoreError::not_found(E::NAME, id))?;
    Ok(Json(row))
}

pub async fn create<E>(
    State(state): State<AppState>,
    body: Result<Json<E>, JsonRejection>,
) -> ApiResult<(StatusCode, [(HeaderName, String); 1], Json<E>)>
where
    E: Resource,
    UnitOfWork: HasRepository<E>,
{
    let Json(entity) = body?;
    entity.validate().map_err(CoreError::from)?;

    let uow = state.db.unit_of_work();
    let stored = repository::<E>(&uow).add(entity).await?;
    uow.commit().await?;

    info!(entity = E::NAME, id = %stored.id(), "Created");

    let location = format!("{}/{}", E::PATH, stored.id());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(stored)))
}

pub async fn update<E>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<E>, JsonRejection>,
) -> ApiResult<StatusCode>
where
    E: Resource,
    UnitOfWork: HasRepository<E>,
{
    let Json(entity) = body?;

    if entity.id() != id {
        return Err(CoreError::IdMismatch {
            path: id,
            body: entity.id(),
        }
        .into());
    }
    entity.validate().map_err(CoreError::from)?;

    let uow = state.db.unit_of_work();
    repository::<E>(&uow).update(&entity).await?;
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove<E>(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode>
where
    E: Resource,
    UnitOfWork: HasRepository<E>,
{
    let uow = state.db.unit_of_work();
    repository::<E>(&uow).delete(id).await?;
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
