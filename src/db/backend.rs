//! Database backend trait for abstracting different storage engines.
//!
//! The catalog never talks to an engine directly; it calls these row-level
//! operations with a `SchemaRelation` describing the table. Each engine is
//! responsible for enforcing the declared constraints (primary key, unique
//! columns, foreign keys, check constraints, not-null) and for reporting
//! breakage as `DbError::ConstraintViolation`.

use super::schema::SchemaRelation;
use super::{DbError, Record, Value};

/// Trait for storage engines that hold the catalog tables.
///
/// All methods take `&self`; engines serialise writes internally so a
/// single instance can be shared across threads.
pub trait DatabaseBackend: Send + Sync {
    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;

    /// Check if a relation (table) exists.
    fn relation_exists(&self, name: &str) -> Result<bool, DbError>;

    /// Create a relation if it doesn't exist.
    /// Returns true if created, false if already existed.
    fn try_create_relation(&self, relation: &SchemaRelation) -> Result<bool, DbError>;

    /// Insert one row and return it as stored, defaults filled in.
    ///
    /// # Errors
    /// - `Validation` if the record names an unknown column or holds a value
    ///   of the wrong type
    /// - `ConstraintViolation` for unique, foreign key, not-null or check breakage
    fn insert_row(&self, relation: &SchemaRelation, record: Record) -> Result<Record, DbError>;

    /// Fetch every row whose `column` equals `value`, in creation order.
    fn find_by(
        &self,
        relation: &SchemaRelation,
        column: &str,
        value: &Value,
    ) -> Result<Vec<Record>, DbError>;

    /// Fetch the first row whose `column` equals `value`.
    ///
    /// # Default Implementation
    /// Takes the first row of `find_by()`. Meant for primary key and unique
    /// column lookups, which match at most one row.
    fn find_one_by(
        &self,
        relation: &SchemaRelation,
        column: &str,
        value: &Value,
    ) -> Result<Option<Record>, DbError> {
        Ok(self.find_by(relation, column, value)?.into_iter().next())
    }

    /// Fetch every row of a relation, in creation order.
    fn list_rows(&self, relation: &SchemaRelation) -> Result<Vec<Record>, DbError>;

    /// Apply `changes` to the row with primary key `key` and return the new row.
    ///
    /// An empty change set returns the current row untouched.
    ///
    /// # Errors
    /// - `Validation` if a change targets the primary key or a non-updatable column
    /// - `NotFound` if no row has that key
    /// - `ConstraintViolation` if the new values break a constraint
    fn update_row(
        &self,
        relation: &SchemaRelation,
        key: &Value,
        changes: Record,
    ) -> Result<Record, DbError>;

    /// Delete the row with primary key `key`.
    ///
    /// # Errors
    /// - `NotFound` if no row has that key
    /// - `ConstraintViolation` if a restricting foreign key still references the row
    fn delete_row(&self, relation: &SchemaRelation, key: &Value) -> Result<(), DbError>;

    /// Perform backend-specific setup before tables are created.
    ///
    /// # Default Implementation
    /// Returns Ok(()) for backends that don't need special initialization.
    fn setup_backend(&self) -> Result<(), DbError> {
        Ok(())
    }
}

/// Check that every column of an insert exists and holds the declared type.
pub fn validate_insert(relation: &SchemaRelation, record: &Record) -> Result<(), DbError> {
    for (column, value) in record.iter() {
        let field = relation.field(column).ok_or_else(|| {
            DbError::validation(relation.entity, column, "unknown column")
        })?;
        if value.data_type() != field.data_type {
            return Err(DbError::validation(
                relation.entity,
                column,
                format!(
                    "expected {}, got {}",
                    field.data_type.name(),
                    value.data_type().name()
                ),
            ));
        }
    }
    Ok(())
}

/// Check that an update only touches updatable columns with the declared types.
pub fn validate_changes(relation: &SchemaRelation, changes: &Record) -> Result<(), DbError> {
    for column in changes.columns() {
        let field = relation.field(column).ok_or_else(|| {
            DbError::validation(relation.entity, column, "unknown column")
        })?;
        if field.name == relation.primary_key || !field.updatable {
            return Err(DbError::validation(
                relation.entity,
                column,
                "cannot be changed after creation",
            ));
        }
    }
    validate_insert(relation, changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::{CATEGORIES, PRODUCT_VARIANTS};
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_trait_is_object_safe() {
        fn accepts_backend(_db: &dyn DatabaseBackend) {}
        let _ = accepts_backend;
    }

    #[test]
    fn test_validate_insert_accepts_declared_columns() {
        let record = Record::new().with("name", "Shoes").with("slug", "shoes");
        assert!(validate_insert(&CATEGORIES, &record).is_ok());
    }

    #[test]
    fn test_validate_insert_rejects_unknown_column() {
        let record = Record::new().with("colour", "black");
        let err = validate_insert(&PRODUCT_VARIANTS, &record).unwrap_err();
        assert!(matches!(err, DbError::Validation { ref field, .. } if field == "colour"));
    }

    #[test]
    fn test_validate_insert_rejects_wrong_type() {
        let record = Record::new().with("price_in_cents", "9999");
        let err = validate_insert(&PRODUCT_VARIANTS, &record).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("expected integer, got text"));
    }

    #[test]
    fn test_validate_changes_rejects_immutable_columns() {
        for changes in [
            Record::new().with("id", Uuid::new_v4()),
            Record::new().with("created_at", Utc::now()),
            Record::new().with("product_id", Uuid::new_v4()),
        ] {
            let err = validate_changes(&PRODUCT_VARIANTS, &changes).unwrap_err();
            assert!(err.to_string().contains("cannot be changed"), "{}", err);
        }
    }

    #[test]
    fn test_validate_changes_accepts_mutable_columns() {
        let changes = Record::new()
            .with("color", "red")
            .with("price_in_cents", 100)
            .with("image_url", "http://example.com/b.png");
        assert!(validate_changes(&PRODUCT_VARIANTS, &changes).is_ok());
    }
}
