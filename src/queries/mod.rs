//! Catalog operations.
//!
//! Every operation takes the engine as `&dyn DatabaseBackend`. Input is
//! validated before it reaches storage; integrity rules (unique slugs,
//! foreign keys, restrict on delete) are left to the engine.
//!
//! The generic functions here work for any `Entity`; the per-entity modules
//! give them names and add the joined reads.

pub mod categories;
pub mod products;
pub mod schema;
pub mod users;
pub mod variants;

pub use categories::*;
pub use products::*;
pub use schema::{SchemaCreationResult, create_relations, create_schema, missing_relations};
pub use users::*;
pub use variants::*;

use tracing::debug;
use uuid::Uuid;

use crate::db::schema::{Cardinality, SchemaRelation};
use crate::db::{DatabaseBackend, DbError, Value};
use crate::types::{Changeset, Entity, Insertable};

/// Validate `input` and insert it, returning the stored entity.
pub fn insert<I: Insertable>(db: &dyn DatabaseBackend, input: I) -> Result<I::Output, DbError> {
    input.validate()?;
    let relation = <I::Output as Entity>::RELATION;
    let record = db.insert_row(relation, input.into_record())?;
    let entity = <I::Output as Entity>::from_record(&record)?;
    debug!(relation = relation.name, id = %entity.id(), "created");
    Ok(entity)
}

/// Fetch an entity by id, or `None`.
pub fn find<E: Entity>(db: &dyn DatabaseBackend, id: Uuid) -> Result<Option<E>, DbError> {
    find_by_column(db, E::RELATION.primary_key, Value::Uuid(id))
}

/// Fetch an entity by id.
///
/// # Errors
/// `NotFound` if no row has that id.
pub fn get<E: Entity>(db: &dyn DatabaseBackend, id: Uuid) -> Result<E, DbError> {
    find(db, id)?.ok_or_else(|| DbError::not_found(E::RELATION.entity, id))
}

/// Fetch an entity by its unique slug.
pub fn get_by_slug<E: Entity>(db: &dyn DatabaseBackend, slug: &str) -> Result<E, DbError> {
    find_by_column(db, "slug", Value::from(slug))?
        .ok_or_else(|| DbError::not_found(E::RELATION.entity, format!("slug '{}'", slug)))
}

/// Every entity of one kind, oldest first.
pub fn list<E: Entity>(db: &dyn DatabaseBackend) -> Result<Vec<E>, DbError> {
    db.list_rows(E::RELATION)?
        .iter()
        .map(E::from_record)
        .collect()
}

/// Validate `changes` and apply them to the entity with `id`.
///
/// An empty change set returns the current entity.
pub fn update<C: Changeset>(
    db: &dyn DatabaseBackend,
    id: Uuid,
    changes: C,
) -> Result<C::Output, DbError> {
    changes.validate()?;
    let relation = <C::Output as Entity>::RELATION;
    let record = db.update_row(relation, &Value::Uuid(id), changes.into_record())?;
    debug!(relation = relation.name, %id, "updated");
    <C::Output as Entity>::from_record(&record)
}

/// Delete the entity with `id`.
///
/// # Errors
/// - `NotFound` if no row has that id
/// - `ConstraintViolation` if other rows still reference it
pub fn delete<E: Entity>(db: &dyn DatabaseBackend, id: Uuid) -> Result<(), DbError> {
    db.delete_row(E::RELATION, &Value::Uuid(id))?;
    debug!(relation = E::RELATION.name, %id, "deleted");
    Ok(())
}

fn find_by_column<E: Entity>(
    db: &dyn DatabaseBackend,
    column: &str,
    value: Value,
) -> Result<Option<E>, DbError> {
    db.find_one_by(E::RELATION, column, &value)?
        .as_ref()
        .map(E::from_record)
        .transpose()
}

/// Follow the relationship `name` declared on `from`.
///
/// `value` is the source row's value for the relationship's local column.
/// Returns the matching target entities in creation order.
pub fn related<E: Entity>(
    db: &dyn DatabaseBackend,
    from: &SchemaRelation,
    name: &str,
    value: Value,
) -> Result<Vec<E>, DbError> {
    let relationship = from.relationship(name).ok_or_else(|| DbError::QueryFailed {
        message: format!("{} has no relationship '{}'", from.entity, name),
    })?;
    if relationship.target != E::RELATION.name {
        return Err(DbError::QueryFailed {
            message: format!(
                "relationship '{}' targets {}, not {}",
                name, relationship.target, E::RELATION.name
            ),
        });
    }

    let mut rows = db.find_by(E::RELATION, relationship.references, &value)?;
    if relationship.cardinality == Cardinality::One {
        rows.truncate(1);
    }
    rows.iter().map(E::from_record).collect()
}

/// Follow a to-one relationship; the target row must exist.
pub fn related_one<E: Entity>(
    db: &dyn DatabaseBackend,
    from: &SchemaRelation,
    name: &str,
    value: Value,
) -> Result<E, DbError> {
    let key = value.to_string();
    related::<E>(db, from, name, value)?
        .into_iter()
        .next()
        .ok_or_else(|| DbError::not_found(E::RELATION.entity, key))
}
