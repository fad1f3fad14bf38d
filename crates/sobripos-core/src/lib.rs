//! # sobripos-core: Entity Schema for SOBRIPOS
//!
//! This crate holds the back-office data model as plain types with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SOBRIPOS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    GET / POST / PUT / DELETE  /api/{resource}                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sobripos-db (Database Layer)                 │   │
//! │  │         Repository<T>, UnitOfWork, migrations, filters          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sobripos-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ entities  │  │   money   │  │   types   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ UserRole  │  │  Validate │  │   │
//! │  │   │  Purchase │  │           │  │ Percentage│  │  lengths  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`entities`] - The ten persisted entities and their eager-loaded views
//! - [`types`] - Enums stored as text, and `Percentage`
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Column length and required-field rules
//!
//! ## Example Usage
//!
//! ```rust
//! use sobripos_core::{Money, Product};
//!
//! let product = Product {
//!     name: "Cola 330ml".into(),
//!     sku: "COLA-330".into(),
//!     price_cents: 1099,
//!     stock_quantity: 5,
//!     minimum_stock: 10,
//!     ..Default::default()
//! };
//!
//! assert_eq!(product.price(), Money::from_cents(1099));
//! assert!(product.is_low_stock());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod entities;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sobripos_core::Product` instead of
// `use sobripos_core::entities::Product`

pub use entities::*;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
pub use validation::Validate;
