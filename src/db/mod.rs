//! Catalog storage layer.
//!
//! This module provides everything between the typed entities and a storage
//! engine:
//! - Schema declarations and the SQL compiler (`schema`)
//! - The `DatabaseBackend` trait every engine implements (`backend`)
//! - An in-process engine used for tests and `:memory:` (`memory`)
//! - A PostgreSQL engine (`postgres`)
//! - Runtime engine selection (`config`)
//!
//! # Type Decisions
//!
//! **Why a column map (`Record`) at the engine boundary instead of generics?**
//! Engines enforce constraints by reading the schema declarations, which name
//! columns as strings. A single row type keeps `DatabaseBackend` object-safe so
//! commands can hold a `Box<dyn DatabaseBackend>` chosen at runtime.
//!
//! **Why `i32` for prices?**
//! `price_in_cents` is an `INTEGER` column holding minor currency units. Money
//! never passes through floating point anywhere in the crate.

pub mod backend;
pub mod config;
mod connection;
pub mod memory;
pub mod postgres;
pub mod schema;
mod value;

pub use backend::{DatabaseBackend, validate_changes, validate_insert};
pub use config::{DatabaseConfig, PostgresConfig};
pub use connection::{open_db, open_mem_db};
pub use memory::MemoryBackend;
pub use postgres::PostgresBackend;
pub use value::{Record, Value};

use std::fmt;

use thiserror::Error;

/// Which kind of integrity rule a write broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::Unique => "unique",
            ConstraintKind::ForeignKey => "foreign key",
            ConstraintKind::NotNull => "not null",
            ConstraintKind::Check => "check",
        };
        f.write_str(name)
    }
}

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to open database '{target}': {message}")]
    OpenFailed { target: String, message: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Missing column '{name}' in query result")]
    MissingColumn { name: String },

    #[error("Invalid {entity}.{field}: {message}")]
    Validation {
        entity: String,
        field: String,
        message: String,
    },

    #[error("{kind} constraint '{constraint}' violated: {message}")]
    ConstraintViolation {
        constraint: String,
        kind: ConstraintKind,
        message: String,
    },

    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },
}

impl DbError {
    pub fn validation(entity: &str, field: &str, message: impl Into<String>) -> Self {
        DbError::Validation {
            entity: entity.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &str, key: impl fmt::Display) -> Self {
        DbError::NotFound {
            entity: entity.to_string(),
            key: key.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DbError::Validation { .. })
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, DbError::ConstraintViolation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }

    /// The constraint kind, for constraint violations.
    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            DbError::ConstraintViolation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
