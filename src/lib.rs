//! catalog_db library - e-commerce catalog data model
//!
//! Declares the catalog tables (users, categories, products, product
//! variants), the storage engines that enforce their integrity rules, the
//! typed CRUD operations on top, and the schema tooling CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod output;
pub mod queries;
pub mod types;
pub mod utils;

#[macro_use]
pub mod test_macros;
