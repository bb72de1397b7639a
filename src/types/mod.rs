//! Typed catalog entities.
//!
//! Each entity comes in three shapes:
//! - the stored row (`Category`), converted from a `Record`
//! - the insert input (`NewCategory`), validated before it reaches storage
//! - the update input (`CategoryChanges`), limited to the mutable columns
//!
//! Joined views combining several entities live in `views`.

mod category;
mod product;
mod user;
mod variant;
mod views;

pub use category::{Category, CategoryChanges, NewCategory};
pub use product::{NewProduct, Product, ProductChanges};
pub use user::{NewUser, User, UserChanges};
pub use variant::{NewProductVariant, ProductVariant, ProductVariantChanges};
pub use views::{CategoryWithProducts, ProductDetail, VariantWithProduct};

use uuid::Uuid;

use crate::db::schema::SchemaRelation;
use crate::db::{DbError, Record};

/// A stored row of one catalog table.
pub trait Entity: Sized {
    /// The table this entity is stored in.
    const RELATION: &'static SchemaRelation;

    fn from_record(record: &Record) -> Result<Self, DbError>;

    fn id(&self) -> Uuid;
}

/// Input for creating an entity.
pub trait Insertable {
    type Output: Entity;

    /// Check required fields before anything is written.
    fn validate(&self) -> Result<(), DbError>;

    /// Columns to insert. Omitted columns take the table defaults.
    fn into_record(self) -> Record;
}

/// Input for updating an entity. Unset fields are left alone.
pub trait Changeset {
    type Output: Entity;

    fn validate(&self) -> Result<(), DbError>;

    fn into_record(self) -> Record;
}

/// Validate an optional text change: present values must not be empty.
pub(crate) fn check_text(entity: &str, field: &str, value: Option<&str>) -> Result<(), DbError> {
    match value {
        Some(value) => crate::utils::require_text(entity, field, value),
        None => Ok(()),
    }
}

/// Validate an optional slug change.
pub(crate) fn check_slug(entity: &str, field: &str, value: Option<&str>) -> Result<(), DbError> {
    match value {
        Some(value) => crate::utils::require_slug(entity, field, value),
        None => Ok(()),
    }
}
