//! Catalog table creation.
//!
//! Creation is idempotent: existing tables are left untouched and reported
//! as such. There is no version tracking; the schema is created whole.

use serde::Serialize;
use tracing::info;

use crate::db::schema::{ALL_RELATIONS, SchemaRelation};
use crate::db::{DatabaseBackend, DbError};

/// Outcome of creating one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaCreationResult {
    pub relation: String,
    pub created: bool,
}

/// Create every catalog table in dependency order.
pub fn create_schema(db: &dyn DatabaseBackend) -> Result<Vec<SchemaCreationResult>, DbError> {
    create_relations(db, ALL_RELATIONS)
}

/// Create `relations` in the order given, after backend-specific setup.
pub fn create_relations(
    db: &dyn DatabaseBackend,
    relations: &[&SchemaRelation],
) -> Result<Vec<SchemaCreationResult>, DbError> {
    db.setup_backend()?;

    let mut results = Vec::with_capacity(relations.len());
    for relation in relations {
        let created = db.try_create_relation(relation)?;
        if created {
            info!(relation = relation.name, backend = db.backend_name(), "created table");
        }
        results.push(SchemaCreationResult {
            relation: relation.name.to_string(),
            created,
        });
    }
    Ok(results)
}

/// Names of the catalog tables missing from `db`.
pub fn missing_relations(db: &dyn DatabaseBackend) -> Result<Vec<&'static str>, DbError> {
    let mut missing = Vec::new();
    for relation in ALL_RELATIONS {
        if !db.relation_exists(relation.name)? {
            missing.push(relation.name);
        }
    }
    Ok(missing)
}
