//! HTTP routers, one per aggregate.
//!
//! ```text
//! /health                    health::router
//! /api/products              products::router      (crud + lookups)
//! /api/categories            categories::router
//! /api/customers             customers::router
//! /api/suppliers             suppliers::router
//! /api/users                 users::router
//! /api/transactions          transactions::router
//! /api/purchases             purchases::router
//! /api/transaction-items     crud only
//! /api/purchase-items        crud only
//! /api/activity-logs         crud only
//! ```

pub mod categories;
pub mod crud;
pub mod customers;
pub mod health;
pub mod products;
pub mod purchases;
pub mod suppliers;
pub mod transactions;
pub mod users;

use axum::Router;

use sobripos_core::{PurchaseItem, TransactionItem, UserActivityLog};

use crate::AppState;

/// All `/api/*` routers.
pub fn api() -> Router<AppState> {
    Router::new()
        .nest("/api/products", products::router())
        .nest("/api/categories", categories::router())
        .nest("/api/customers", customers::router())
        .nest("/api/suppliers", suppliers::router())
        .nest("/api/users", users::router())
        .nest("/api/transactions", transactions::router())
        .nest("/api/purchases", purchases::router())
        .nest("/api/transaction-items", crud::routes::<TransactionItem>())
        .nest("/api/purchase-items", crud::routes::<PurchaseItem>())
        .nest("/api/activity-logs", crud::routes::<UserActivityLog>())
}
