//! # Database Session
//!
//! One lazily-started database transaction shared by every repository of a
//! unit of work.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Session Lifecycle                               │
//! │                                                                         │
//! │   Session::new(pool)          no connection taken yet                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   first statement ──► pool.begin()  ──► tx = Some(..)                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   execute(..) ──► pending += rows_affected                             │
//! │        │                                                                │
//! │        ├── commit()   ──► tx.commit(),  returns pending, tx = None     │
//! │        ├── rollback() ──► tx.rollback(), tx = None                     │
//! │        └── drop       ──► sqlx rolls the open transaction back         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Clones share the same transaction. Statements are serialized through an
//! async mutex, so repositories never interleave on the connection.

use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool, Transaction};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::error::{DbError, DbResult};

#[derive(Default)]
struct SessionState {
    tx: Option<Transaction<'static, Sqlite>>,
    /// Rows written since the last commit or rollback.
    pending: u64,
}

impl SessionState {
    fn connection(&mut self) -> DbResult<&mut SqliteConnection> {
        self.tx
            .as_deref_mut()
            .ok_or_else(|| DbError::TransactionFailed("no open transaction".to_string()))
    }
}

/// Shared handle to the unit of work's transaction.
#[derive(Clone)]
pub struct Session {
    pool: SqlitePool,
    state: Arc<Mutex<SessionState>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(pool: SqlitePool) -> Self {
        Session {
            pool,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    /// Locks the session, beginning a transaction if none is open.
    async fn begin(&self) -> DbResult<MutexGuard<'_, SessionState>> {
        let mut state = self.state.lock().await;

        if state.tx.is_none() {
            let tx = self
                .pool
                .begin()
                .await
                .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
            debug!("Session transaction started");
            state.tx = Some(tx);
        }

        Ok(state)
    }

    /// Runs a query and maps every row to `T`.
    pub async fn fetch_all<T>(&self, mut qb: QueryBuilder<'_, Sqlite>) -> DbResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut state = self.begin().await?;
        let rows = qb
            .build_query_as::<T>()
            .fetch_all(state.connection()?)
            .await?;
        Ok(rows)
    }

    /// Runs a query expected to return at most one row.
    pub async fn fetch_optional<T>(&self, mut qb: QueryBuilder<'_, Sqlite>) -> DbResult<Option<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut state = self.begin().await?;
        let row = qb
            .build_query_as::<T>()
            .fetch_optional(state.connection()?)
            .await?;
        Ok(row)
    }

    /// Runs a `SELECT COUNT(*) ...` query.
    pub async fn fetch_count(&self, mut qb: QueryBuilder<'_, Sqlite>) -> DbResult<i64> {
        let mut state = self.begin().await?;
        let count = qb
            .build_query_scalar::<i64>()
            .fetch_one(state.connection()?)
            .await?;
        Ok(count)
    }

    /// Runs a write and returns the rows it touched.
    pub async fn execute(&self, mut qb: QueryBuilder<'_, Sqlite>) -> DbResult<u64> {
        let mut state = self.begin().await?;
        let affected = qb
            .build()
            .execute(state.connection()?)
            .await?
            .rows_affected();
        state.pending += affected;
        Ok(affected)
    }

    /// Commits the open transaction.
    ///
    /// Returns the number of rows written since the last commit, or 0 if
    /// nothing was started. The next statement opens a new transaction.
    pub async fn commit(&self) -> DbResult<u64> {
        let mut state = self.state.lock().await;
        let pending = std::mem::take(&mut state.pending);

        match state.tx.take() {
            Some(tx) => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
                debug!(rows = pending, "Session committed");
                Ok(pending)
            }
            None => Ok(0),
        }
    }

    /// Discards every write since the last commit.
    pub async fn rollback(&self) -> DbResult<()> {
        let mut state = self.state.lock().await;
        state.pending = 0;

        if let Some(tx) = state.tx.take() {
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
            debug!("Session rolled back");
        }

        Ok(())
    }

    /// Rows written since the last commit or rollback.
    pub async fn pending(&self) -> u64 {
        self.state.lock().await.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn count_categories(session: &Session) -> i64 {
        session
            .fetch_count(QueryBuilder::new("SELECT COUNT(*) FROM categories"))
            .await
            .unwrap()
    }

    fn insert_category(name: &str) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(
            "INSERT INTO categories (id, created_at, is_deleted, name) VALUES (",
        );
        qb.push_bind(uuid::Uuid::new_v4())
            .push(", ")
            .push_bind(chrono::Utc::now())
            .push(", 0, ")
            .push_bind(name.to_string())
            .push(")");
        qb
    }

    #[tokio::test]
    async fn test_commit_reports_pending_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let session = Session::new(db.pool().clone());

        assert_eq!(session.commit().await.unwrap(), 0);

        session.execute(insert_category("Dairy")).await.unwrap();
        session.execute(insert_category("Frozen")).await.unwrap();
        assert_eq!(session.pending().await, 2);

        assert_eq!(session.commit().await.unwrap(), 2);
        assert_eq!(session.pending().await, 0);
        assert_eq!(count_categories(&session).await, 2);
    }

    #[tokio::test]
    async fn test_rollback_discards_writes() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let session = Session::new(db.pool().clone());

        session.execute(insert_category("Dairy")).await.unwrap();
        session.rollback().await.unwrap();

        assert_eq!(count_categories(&session).await, 0);
    }

    #[tokio::test]
    async fn test_drop_without_commit_discards_writes() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        {
            let session = Session::new(db.pool().clone());
            session.execute(insert_category("Dairy")).await.unwrap();
        }

        let session = Session::new(db.pool().clone());
        assert_eq!(count_categories(&session).await, 0);
    }
}
