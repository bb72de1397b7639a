//! Database schema compilers.
//!
//! Generates backend-specific SQL from backend-agnostic schema definitions.

pub mod postgres;

pub use postgres::{PostgresCompiler, quote_ident};
