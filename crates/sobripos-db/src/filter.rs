//! # Query Filters
//!
//! A typed builder of column comparisons for [`Repository::find`].
//!
//! Callers never pass SQL text: a filter is a list of `column op value`
//! clauses joined with `AND`, appended after the soft-delete guard.
//!
//! ```text
//!   Filter::new().eq("sku", "COLA-330").le("stock_quantity", 5)
//!
//!   SELECT * FROM products
//!   WHERE is_deleted = 0 AND sku = ? AND stock_quantity <= ?
//! ```
//!
//! Column names are `&'static str` so they can only come from code, never
//! from a request.
//!
//! [`Repository::find`]: crate::repository::Repository::find

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

// =============================================================================
// Values
// =============================================================================

/// A bindable right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Uuid(Uuid),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

// =============================================================================
// Clauses
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ge,
    Le,
}

impl Op {
    fn as_sql(&self) -> &'static str {
        match self {
            Op::Eq => " = ",
            Op::Ge => " >= ",
            Op::Le => " <= ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Value(Value),
    Column(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
struct Clause {
    column: &'static str,
    op: Op,
    rhs: Operand,
}

/// Conjunction of column comparisons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    pub fn new() -> Self {
        Filter::default()
    }

    /// `column = value`
    pub fn eq(self, column: &'static str, value: impl Into<Value>) -> Self {
        self.push(column, Op::Eq, Operand::Value(value.into()))
    }

    /// `column >= value`
    pub fn ge(self, column: &'static str, value: impl Into<Value>) -> Self {
        self.push(column, Op::Ge, Operand::Value(value.into()))
    }

    /// `column <= value`
    pub fn le(self, column: &'static str, value: impl Into<Value>) -> Self {
        self.push(column, Op::Le, Operand::Value(value.into()))
    }

    /// `column <= other` where both sides are columns of the same row.
    pub fn column_le(self, column: &'static str, other: &'static str) -> Self {
        self.push(column, Op::Le, Operand::Column(other))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    fn push(mut self, column: &'static str, op: Op, rhs: Operand) -> Self {
        self.clauses.push(Clause { column, op, rhs });
        self
    }

    /// Appends ` AND <clause>` for every clause, binding values in order.
    ///
    /// The builder must already hold a `WHERE` condition.
    pub fn push_to<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>) {
        for clause in &self.clauses {
            qb.push(" AND ");
            qb.push(clause.column);
            qb.push(clause.op.as_sql());

            match &clause.rhs {
                Operand::Column(other) => {
                    qb.push(*other);
                }
                Operand::Value(Value::Text(v)) => {
                    qb.push_bind(v.clone());
                }
                Operand::Value(Value::Integer(v)) => {
                    qb.push_bind(*v);
                }
                Operand::Value(Value::Uuid(v)) => {
                    qb.push_bind(*v);
                }
                Operand::Value(Value::Bool(v)) => {
                    qb.push_bind(*v);
                }
                Operand::Value(Value::Timestamp(v)) => {
                    qb.push_bind(*v);
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
