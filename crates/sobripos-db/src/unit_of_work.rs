//! # Unit of Work
//!
//! Every repository, built up front over one shared [`Session`], with a
//! single commit for all of their writes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        UnitOfWork                                       │
//! │                                                                         │
//! │   products ─────────┐                                                  │
//! │   categories ───────┤                                                  │
//! │   customers ────────┤                                                  │
//! │   suppliers ────────┤                                                  │
//! │   users ────────────┼──► Session ──► one SQLite transaction            │
//! │   transactions ─────┤                                                  │
//! │   purchases ────────┤        commit()   → rows written                 │
//! │   transaction_items ┤        rollback() → discard                      │
//! │   purchase_items ───┤        drop       → discard                      │
//! │   activity_logs ────┘                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One unit of work per request. Nothing coordinates two of them.

use sqlx::SqlitePool;

use sobripos_core::{
    Category, Customer, Product, Purchase, PurchaseItem, Supplier, Transaction, TransactionItem,
    User, UserActivityLog,
};

use crate::error::DbResult;
use crate::record::Record;
use crate::repository::Repository;
use crate::session::Session;

#[derive(Debug)]
pub struct UnitOfWork {
    session: Session,
    products: Repository<Product>,
    categories: Repository<Category>,
    customers: Repository<Customer>,
    suppliers: Repository<Supplier>,
    users: Repository<User>,
    transactions: Repository<Transaction>,
    purchases: Repository<Purchase>,
    transaction_items: Repository<TransactionItem>,
    purchase_items: Repository<PurchaseItem>,
    activity_logs: Repository<UserActivityLog>,
}

impl UnitOfWork {
    pub fn new(pool: SqlitePool) -> Self {
        let session = Session::new(pool);

        UnitOfWork {
            products: Repository::new(session.clone()),
            categories: Repository::new(session.clone()),
            customers: Repository::new(session.clone()),
            suppliers: Repository::new(session.clone()),
            users: Repository::new(session.clone()),
            transactions: Repository::new(session.clone()),
            purchases: Repository::new(session.clone()),
            transaction_items: Repository::new(session.clone()),
            purchase_items: Repository::new(session.clone()),
            activity_logs: Repository::new(session.clone()),
            session,
        }
    }

    pub fn products(&self) -> &Repository<Product> {
        &self.products
    }

    pub fn categories(&self) -> &Repository<Category> {
        &self.categories
    }

    pub fn customers(&self) -> &Repository<Customer> {
        &self.customers
    }

    pub fn suppliers(&self) -> &Repository<Supplier> {
        &self.suppliers
    }

    pub fn users(&self) -> &Repository<User> {
        &self.users
    }

    pub fn transactions(&self) -> &Repository<Transaction> {
        &self.transactions
    }

    pub fn purchases(&self) -> &Repository<Purchase> {
        &self.purchases
    }

    pub fn transaction_items(&self) -> &Repository<TransactionItem> {
        &self.transaction_items
    }

    pub fn purchase_items(&self) -> &Repository<PurchaseItem> {
        &self.purchase_items
    }

    pub fn activity_logs(&self) -> &Repository<UserActivityLog> {
        &self.activity_logs
    }

    /// Commits all pending writes and returns how many rows they touched.
    pub async fn commit(&self) -> DbResult<u64> {
        self.session.commit().await
    }

    /// Discards all pending writes.
    pub async fn rollback(&self) -> DbResult<()> {
        self.session.rollback().await
    }
}

// =============================================================================
// Typed Access
// =============================================================================

/// Picks the repository for `E` out of a unit of work.
///
/// Lets generic code (such as the HTTP CRUD handlers) ask for
/// `uow.repository::<Product>()` without naming the accessor.
pub trait HasRepository<E: Record> {
    fn repository(&self) -> &Repository<E>;
}

macro_rules! has_repository {
    ($($ty:ty => $field:ident),+ $(,)?) => {
        $(
            impl HasRepository<$ty> for UnitOfWork {
                #[inline]
                fn repository(&self) -> &Repository<$ty> {
                    &self.$field
                }
            }
        )+
    };
}

has_repository! {
    Product => products,
    Category => categories,
    Customer => customers,
    Supplier => suppliers,
    User => users,
    Transaction => transactions,
    Purchase => purchases,
    TransactionItem => transaction_items,
    PurchaseItem => purchase_items,
    UserActivityLog => activity_logs,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::*;
    use sobripos_core::{Entity, UserActivityLog, UserRole};

    #[tokio::test]
    async fn test_commit_counts_every_repository() {
        let db = database().await;
        let uow = db.unit_of_work();

        let drinks = uow.categories().add(category("Beverages")).await.unwrap();
        uow.products()
            .add(product("COLA-330", drinks.id(), 5, 10))
            .await
            .unwrap();
        uow.categories().delete(uuid::Uuid::new_v4()).await.unwrap();

        assert_eq!(uow.commit().await.unwrap(), 2);
        assert_eq!(uow.commit().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dropped_unit_of_work_persists_nothing() {
        let db = database().await;

        {
            let uow = db.unit_of_work();
            uow.categories().add(category("Temp")).await.unwrap();
        }

        let uow = db.unit_of_work();
        assert_eq!(uow.categories().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rollback_then_continue() {
        let db = database().await;
        let uow = db.unit_of_work();

        uow.categories().add(category("Discarded")).await.unwrap();
        uow.rollback().await.unwrap();

        let cashier = uow.users().add(user("joao", UserRole::Cashier)).await.unwrap();
        uow.activity_logs()
            .add(UserActivityLog {
                user_id: cashier.id(),
                action: "login".to_string(),
                timestamp: at(1, 8),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(uow.commit().await.unwrap(), 2);

        assert_eq!(uow.categories().count().await.unwrap(), 0);
        assert_eq!(uow.activity_logs().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_typed_access_shares_the_session() {
        let db = database().await;
        let uow = db.unit_of_work();

        let repo: &Repository<Category> = uow.repository();
        let added = repo.add(category("Bakery")).await.unwrap();

        assert!(uow.categories().exists(added.id()).await.unwrap());
    }
}
