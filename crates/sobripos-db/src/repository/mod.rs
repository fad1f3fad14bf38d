//! # Repository Module
//!
//! One generic, soft-delete-aware repository for every entity type, plus
//! the per-entity lookups in the submodules.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Generic Repository                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  uow.products().get_low_stock()                                │
//! │       ▼                                                                 │
//! │  Repository<E: Record>                                                 │
//! │  ├── get / get_all / find / exists / count   (live rows only)          │
//! │  ├── add     → fresh id + created_at                                   │
//! │  ├── update  → stamps updated_at, live rows only                       │
//! │  └── delete  → is_deleted = 1, live rows only                          │
//! │       │                                                                 │
//! │       │  QueryBuilder SQL on the shared Session                        │
//! │       ▼                                                                 │
//! │  SQLite (one transaction per unit of work)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Specialized Lookups
//!
//! - [`product`] - barcode, SKU, low stock, by category
//! - [`category`] - by name
//! - [`customer`] - by phone number, by email
//! - [`supplier`] - by name
//! - [`user`] - by username, by email, by role
//! - [`transaction`] - date range, cashier, customer, number
//! - [`purchase`] - supplier, number

pub mod category;
pub mod customer;
pub mod product;
pub mod purchase;
pub mod supplier;
pub mod transaction;
pub mod user;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use std::marker::PhantomData;
use tracing::debug;
use uuid::Uuid;

use sobripos_core::EntityMeta;

use crate::error::DbResult;
use crate::filter::Filter;
use crate::record::Record;
use crate::session::Session;

/// Soft-delete-aware CRUD accessor for one entity type.
///
/// ## Usage
/// ```rust,ignore
/// let uow = db.unit_of_work();
/// let category = uow.categories().add(Category { name: "Beverages".into(), ..Default::default() }).await?;
/// assert!(uow.categories().exists(category.id()).await?);
/// uow.commit().await?;
/// ```
pub struct Repository<E> {
    session: Session,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Repository {
            session: self.session.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> std::fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("entity", &std::any::type_name::<E>())
            .finish()
    }
}

impl<E: Record> Repository<E> {
    pub fn new(session: Session) -> Self {
        Repository {
            session,
            _entity: PhantomData,
        }
    }

    /// A repository for another entity over the same session.
    pub(crate) fn related<T: Record>(&self) -> Repository<T> {
        Repository::new(self.session.clone())
    }

    /// `SELECT * FROM <table> WHERE is_deleted = 0`
    fn select_live() -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new("SELECT * FROM ");
        qb.push(E::TABLE).push(" WHERE is_deleted = 0");
        qb
    }

    /// The live row with this id.
    pub async fn get(&self, id: Uuid) -> DbResult<Option<E>> {
        let mut qb = Self::select_live();
        qb.push(" AND id = ").push_bind(id);
        self.session.fetch_optional(qb).await
    }

    /// All live rows, oldest first.
    pub async fn get_all(&self) -> DbResult<Vec<E>> {
        self.find(Filter::new()).await
    }

    /// Live rows matching every clause of `filter`, oldest first.
    pub async fn find(&self, filter: Filter) -> DbResult<Vec<E>> {
        let mut qb = Self::select_live();
        filter.push_to(&mut qb);
        qb.push(" ORDER BY created_at");
        self.session.fetch_all(qb).await
    }

    /// The oldest live row matching `filter`.
    pub async fn find_first(&self, filter: Filter) -> DbResult<Option<E>> {
        let mut qb = Self::select_live();
        filter.push_to(&mut qb);
        qb.push(" ORDER BY created_at LIMIT 1");
        self.session.fetch_optional(qb).await
    }

    /// Inserts the entity under a fresh id and creation timestamp.
    ///
    /// Any id, timestamps or delete flag on the input are discarded.
    /// Returns the entity as stored.
    pub async fn add(&self, mut entity: E) -> DbResult<E> {
        *entity.meta_mut() = EntityMeta::fresh();
        let meta = entity.meta().clone();

        debug!(entity = E::NAME, id = %meta.id, "Inserting");

        let mut qb = QueryBuilder::new("INSERT INTO ");
        qb.push(E::TABLE)
            .push(" (id, created_at, updated_at, is_deleted, ")
            .push(E::COLUMNS.join(", "))
            .push(") VALUES (");
        {
            let mut values = qb.separated(", ");
            values.push_bind(meta.id);
            values.push_bind(meta.created_at);
            values.push_bind(meta.updated_at);
            values.push_bind(meta.is_deleted);
            entity.bind_columns(&mut values);
        }
        qb.push(")");

        self.session.execute(qb).await?;
        Ok(entity)
    }

    /// Overwrites every business column of the live row with this id and
    /// stamps `updated_at`.
    ///
    /// `created_at` and `is_deleted` are never taken from the input. A
    /// missing or soft-deleted id is a no-op; the return value says whether
    /// a row was written.
    pub async fn update(&self, entity: &E) -> DbResult<bool> {
        let id = entity.id();
        let now = Utc::now();

        debug!(entity = E::NAME, id = %id, "Updating");

        let mut qb = QueryBuilder::new("UPDATE ");
        qb.push(E::TABLE)
            .push(" SET (")
            .push(E::COLUMNS.join(", "))
            .push(", updated_at) = (");
        {
            let mut values = qb.separated(", ");
            entity.bind_columns(&mut values);
            values.push_bind(now);
        }
        qb.push(") WHERE id = ")
            .push_bind(id)
            .push(" AND is_deleted = 0");

        let affected = self.session.execute(qb).await?;
        Ok(affected > 0)
    }

    /// Soft-deletes the live row with this id.
    ///
    /// A missing or already-deleted id is a no-op; the return value says
    /// whether a row was flagged.
    pub async fn delete(&self, id: Uuid) -> DbResult<bool> {
        debug!(entity = E::NAME, id = %id, "Soft-deleting");

        let mut qb = QueryBuilder::new("UPDATE ");
        qb.push(E::TABLE)
            .push(" SET is_deleted = 1, updated_at = ")
            .push_bind(Utc::now())
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND is_deleted = 0");

        let affected = self.session.execute(qb).await?;
        Ok(affected > 0)
    }

    /// True iff a live row has this id.
    pub async fn exists(&self, id: Uuid) -> DbResult<bool> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM ");
        qb.push(E::TABLE)
            .push(" WHERE is_deleted = 0 AND id = ")
            .push_bind(id);
        Ok(self.session.fetch_count(qb).await? > 0)
    }

    /// Number of live rows.
    pub async fn count(&self) -> DbResult<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM ");
        qb.push(E::TABLE).push(" WHERE is_deleted = 0");
        self.session.fetch_count(qb).await
    }
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    use sobripos_core::*;

    use crate::pool::{Database, DbConfig};

    pub async fn database() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    pub fn category(name: &str) -> Category {
        Category {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn product(sku: &str, category_id: Uuid, stock: i32, minimum: i32) -> Product {
        Product {
            name: format!("Product {sku}"),
            sku: sku.to_string(),
            barcode: Some(format!("590{sku}")),
            price_cents: 250,
            stock_quantity: stock,
            minimum_stock: minimum,
            category_id,
            ..Default::default()
        }
    }

    pub fn user(username: &str, role: UserRole) -> User {
        User {
            username: username.to_string(),
            password_hash: "x".to_string(),
            full_name: format!("{username} Example"),
            email: format!("{username}@sobripos.test"),
            role,
            is_active: true,
            ..Default::default()
        }
    }

    pub fn transaction(number: &str, cashier_id: Uuid, date: DateTime<Utc>) -> Transaction {
        Transaction {
            transaction_number: number.to_string(),
            transaction_date: date,
            total_amount_cents: 1000,
            final_amount_cents: 1000,
            payment_method: PaymentMethod::Cash,
            status: TransactionStatus::Completed,
            cashier_id,
            ..Default::default()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
