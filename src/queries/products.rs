use uuid::Uuid;

use crate::db::schema::{CATEGORIES, PRODUCTS};
use crate::db::{DatabaseBackend, DbError, Value};
use crate::types::{NewProduct, Product, ProductChanges, ProductDetail};

/// Create a product. The category must already exist.
pub fn create_product(db: &dyn DatabaseBackend, product: NewProduct) -> Result<Product, DbError> {
    super::insert(db, product)
}

pub fn get_product(db: &dyn DatabaseBackend, id: Uuid) -> Result<Product, DbError> {
    super::get(db, id)
}

pub fn get_product_by_slug(db: &dyn DatabaseBackend, slug: &str) -> Result<Product, DbError> {
    super::get_by_slug(db, slug)
}

/// Products of one category, oldest first.
pub fn list_products_in_category(
    db: &dyn DatabaseBackend,
    category_id: Uuid,
) -> Result<Vec<Product>, DbError> {
    super::related(db, &CATEGORIES, "products", Value::Uuid(category_id))
}

pub fn update_product(
    db: &dyn DatabaseBackend,
    id: Uuid,
    changes: ProductChanges,
) -> Result<Product, DbError> {
    super::update(db, id, changes)
}

/// Delete a product. Fails while any variant still belongs to it.
pub fn delete_product(db: &dyn DatabaseBackend, id: Uuid) -> Result<(), DbError> {
    super::delete::<Product>(db, id)
}

/// A product with its category and variants, looked up by slug.
pub fn get_product_detail(db: &dyn DatabaseBackend, slug: &str) -> Result<ProductDetail, DbError> {
    let product = get_product_by_slug(db, slug)?;
    let category = super::related_one(db, &PRODUCTS, "category", Value::Uuid(product.category_id))?;
    let variants = super::related(db, &PRODUCTS, "variants", Value::Uuid(product.id))?;
    Ok(ProductDetail {
        product,
        category,
        variants,
    })
}
