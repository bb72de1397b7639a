//! Backend-agnostic catalog schema definitions.
//!
//! The catalog tables are declared once here and read by every engine and by
//! the SQL compiler.
//!
//! # Overview
//!
//! 1. **Core Types** (`definition.rs`):
//!    - `DataType` - column types (Uuid, Text, Int, Timestamp)
//!    - `SchemaField` - a column with default, unique and updatable flags
//!    - `ForeignKey` / `OnDelete` - referential integrity and delete policy
//!    - `SchemaRelationship` / `Cardinality` - join metadata
//!    - `SchemaRelation` - a complete table
//!
//! 2. **Relation Definitions** (`relations.rs`):
//!    - `USERS`, `CATEGORIES`, `PRODUCTS`, `PRODUCT_VARIANTS`
//!    - `ALL_RELATIONS` - creation order (parents before children)
//!
//! 3. **Compilers** (`compilers/`):
//!    - `PostgresCompiler` - DDL and parameterised DML
//!
//! # Type Mapping
//!
//! | Rust Type | PostgreSQL Type |
//! |-----------|-----------------|
//! | `uuid::Uuid` | UUID |
//! | `String` | TEXT |
//! | `i32` | INTEGER |
//! | `chrono::DateTime<Utc>` | TIMESTAMP (UTC) |

pub mod compilers;
mod definition;
mod relations;

pub use definition::{
    Cardinality, ColumnDefault, DataType, ForeignKey, OnDelete, SchemaField, SchemaRelation,
    SchemaRelationship,
};
pub use relations::{
    ALL_RELATIONS, CATEGORIES, PRODUCT_VARIANTS, PRODUCTS, USERS, dependents_of, relation_by_name,
    relation_names,
};
