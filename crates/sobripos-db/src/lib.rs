//! # sobripos-db: Database Layer for SOBRIPOS
//!
//! This crate provides database access for the SOBRIPOS back office.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SOBRIPOS Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (GET /api/products/low-stock)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   sobripos-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  UnitOfWork   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │───►│  Session      │    │  (embedded)  │  │   │
//! │  │   │               │    │  Repository<T>│    │              │  │   │
//! │  │   │  SqlitePool   │    │  Filter       │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                 sqlite://sobripos.db?mode=rwc                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`record`] - Entity to table mapping
//! - [`filter`] - Typed `WHERE` clauses
//! - [`session`] - Lazily-started shared transaction
//! - [`repository`] - Generic repository and per-entity lookups
//! - [`unit_of_work`] - All repositories over one session
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sobripos_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("sqlite://sobripos.db?mode=rwc")).await?;
//!
//! let uow = db.unit_of_work();
//! let low = uow.products().get_low_stock().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filter;
pub mod migrations;
pub mod pool;
pub mod record;
pub mod repository;
pub mod session;
pub mod unit_of_work;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use filter::{Filter, Value};
pub use pool::{Database, DbConfig, DEFAULT_DATABASE_URL};
pub use record::Record;
pub use repository::Repository;
pub use session::Session;
pub use unit_of_work::{HasRepository, UnitOfWork};

// Repository aliases for convenience
pub use repository::category::CategoryRepository;
pub use repository::customer::CustomerRepository;
pub use repository::product::ProductRepository;
pub use repository::purchase::PurchaseRepository;
pub use repository::supplier::SupplierRepository;
pub use repository::transaction::TransactionRepository;
pub use repository::user::UserRepository;
