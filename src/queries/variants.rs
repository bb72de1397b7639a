use uuid::Uuid;

use crate::db::schema::{PRODUCTS, PRODUCT_VARIANTS};
use crate::db::{DatabaseBackend, DbError, Value};
use crate::types::{NewProductVariant, ProductVariant, ProductVariantChanges, VariantWithProduct};

/// Create a variant. The product must already exist and the price must not be negative.
pub fn create_variant(
    db: &dyn DatabaseBackend,
    variant: NewProductVariant,
) -> Result<ProductVariant, DbError> {
    super::insert(db, variant)
}

pub fn get_variant(db: &dyn DatabaseBackend, id: Uuid) -> Result<ProductVariant, DbError> {
    super::get(db, id)
}

pub fn get_variant_by_slug(db: &dyn DatabaseBackend, slug: &str) -> Result<ProductVariant, DbError> {
    super::get_by_slug(db, slug)
}

/// Variants of one product, oldest first.
pub fn list_variants_for_product(
    db: &dyn DatabaseBackend,
    product_id: Uuid,
) -> Result<Vec<ProductVariant>, DbError> {
    super::related(db, &PRODUCTS, "variants", Value::Uuid(product_id))
}

pub fn update_variant(
    db: &dyn DatabaseBackend,
    id: Uuid,
    changes: ProductVariantChanges,
) -> Result<ProductVariant, DbError> {
    super::update(db, id, changes)
}

pub fn delete_variant(db: &dyn DatabaseBackend, id: Uuid) -> Result<(), DbError> {
    super::delete::<ProductVariant>(db, id)
}

/// A variant and the product it belongs to, looked up by the variant's slug.
pub fn get_variant_with_product(
    db: &dyn DatabaseBackend,
    slug: &str,
) -> Result<VariantWithProduct, DbError> {
    let variant = get_variant_by_slug(db, slug)?;
    let product = super::related_one(
        db,
        &PRODUCT_VARIANTS,
        "product",
        Value::Uuid(variant.product_id),
    )?;
    Ok(VariantWithProduct { variant, product })
}
