use uuid::Uuid;

use crate::db::schema::CATEGORIES;
use crate::db::{DatabaseBackend, DbError, Value};
use crate::types::{Category, CategoryChanges, CategoryWithProducts, NewCategory};

pub fn create_category(db: &dyn DatabaseBackend, category: NewCategory) -> Result<Category, DbError> {
    super::insert(db, category)
}

pub fn get_category(db: &dyn DatabaseBackend, id: Uuid) -> Result<Category, DbError> {
    super::get(db, id)
}

pub fn get_category_by_slug(db: &dyn DatabaseBackend, slug: &str) -> Result<Category, DbError> {
    super::get_by_slug(db, slug)
}

/// All categories, oldest first.
pub fn list_categories(db: &dyn DatabaseBackend) -> Result<Vec<Category>, DbError> {
    super::list(db)
}

pub fn update_category(
    db: &dyn DatabaseBackend,
    id: Uuid,
    changes: CategoryChanges,
) -> Result<Category, DbError> {
    super::update(db, id, changes)
}

/// Delete a category. Fails while any product still belongs to it.
pub fn delete_category(db: &dyn DatabaseBackend, id: Uuid) -> Result<(), DbError> {
    super::delete::<Category>(db, id)
}

/// A category and its products.
pub fn get_category_with_products(
    db: &dyn DatabaseBackend,
    slug: &str,
) -> Result<CategoryWithProducts, DbError> {
    let category = get_category_by_slug(db, slug)?;
    let products = super::related(db, &CATEGORIES, "products", Value::Uuid(category.id))?;
    Ok(CategoryWithProducts { category, products })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ConstraintKind, open_mem_db};
    use crate::queries::create_product;
    use crate::types::NewProduct;
    use rstest::{fixture, rstest};

    #[fixture]
    fn db() -> Box<dyn DatabaseBackend> {
        open_mem_db().expect("Failed to open in-memory catalog")
    }

    #[rstest]
    fn test_create_generates_id_and_timestamp(db: Box<dyn DatabaseBackend>) {
        let first = create_category(db.as_ref(), NewCategory::new("Shoes", "shoes")).unwrap();
        let second = create_category(db.as_ref(), NewCategory::new("Hats", "hats")).unwrap();

        assert!(!first.id.is_nil());
        assert_ne!(first.id, second.id);
        assert!(second.created_at >= first.created_at);
    }

    #[rstest]
    fn test_create_keeps_supplied_id(db: Box<dyn DatabaseBackend>) {
        let id = Uuid::new_v4();
        let category =
            create_category(db.as_ref(), NewCategory::new("Shoes", "shoes").with_id(id)).unwrap();
        assert_eq!(category.id, id);
    }

    #[rstest]
    fn test_duplicate_slug_rejected(db: Box<dyn DatabaseBackend>) {
        create_category(db.as_ref(), NewCategory::new("Shoes", "shoes")).unwrap();
        let err = create_category(db.as_ref(), NewCategory::new("Other Shoes", "shoes")).unwrap_err();

        match err {
            DbError::ConstraintViolation { constraint, kind, .. } => {
                assert_eq!(kind, ConstraintKind::Unique);
                assert_eq!(constraint, "category_slug_unique");
            }
            other => panic!("Expected ConstraintViolation, got {:?}", other),
        }
        assert_eq!(list_categories(db.as_ref()).unwrap().len(), 1);
    }

    #[rstest]
    fn test_update_to_taken_slug_rejected(db: Box<dyn DatabaseBackend>) {
        create_category(db.as_ref(), NewCategory::new("Shoes", "shoes")).unwrap();
        let hats = create_category(db.as_ref(), NewCategory::new("Hats", "hats")).unwrap();

        let changes = CategoryChanges {
            slug: Some("shoes".to_string()),
            ..CategoryChanges::default()
        };
        let err = update_category(db.as_ref(), hats.id, changes).unwrap_err();
        assert_eq!(err.constraint_kind(), Some(ConstraintKind::Unique));
        assert_eq!(get_category(db.as_ref(), hats.id).unwrap().slug, "hats");
    }

    #[rstest]
    fn test_update_keeps_id_and_created_at(db: Box<dyn DatabaseBackend>) {
        let shoes = create_category(db.as_ref(), NewCategory::new("Shoes", "shoes")).unwrap();
        let changes = CategoryChanges {
            name: Some("Footwear".to_string()),
            slug: Some("footwear".to_string()),
        };
        let updated = update_category(db.as_ref(), shoes.id, changes).unwrap();

        assert_eq!(updated.id, shoes.id);
        assert_eq!(updated.created_at, shoes.created_at);
        assert_eq!(updated.slug, "footwear");
        assert!(get_category_by_slug(db.as_ref(), "shoes").unwrap_err().is_not_found());
    }

    #[rstest]
    fn test_update_missing_category(db: Box<dyn DatabaseBackend>) {
        let changes = CategoryChanges {
            name: Some("Anything".to_string()),
            ..CategoryChanges::default()
        };
        let err = update_category(db.as_ref(), Uuid::new_v4(), changes).unwrap_err();
        assert!(err.is_not_found());
    }

    #[rstest]
    fn test_delete_restricted_while_products_exist(db: Box<dyn DatabaseBackend>) {
        let shoes = create_category(db.as_ref(), NewCategory::new("Shoes", "shoes")).unwrap();
        let product = create_product(
            db.as_ref(),
            NewProduct::new(shoes.id, "Black Shoes", "black-shoes", "Black leather"),
        )
        .unwrap();

        let err = delete_category(db.as_ref(), shoes.id).unwrap_err();
        assert_eq!(err.constraint_kind(), Some(ConstraintKind::ForeignKey));
        assert!(get_category(db.as_ref(), shoes.id).is_ok());

        crate::queries::delete_product(db.as_ref(), product.id).unwrap();
        delete_category(db.as_ref(), shoes.id).unwrap();
        assert!(get_category(db.as_ref(), shoes.id).unwrap_err().is_not_found());
    }

    #[rstest]
    fn test_delete_missing_category(db: Box<dyn DatabaseBackend>) {
        assert!(delete_category(db.as_ref(), Uuid::new_v4()).unwrap_err().is_not_found());
    }

    #[rstest]
    fn test_category_with_products(db: Box<dyn DatabaseBackend>) {
        let shoes = create_category(db.as_ref(), NewCategory::new("Shoes", "shoes")).unwrap();
        let hats = create_category(db.as_ref(), NewCategory::new("Hats", "hats")).unwrap();
        for slug in ["black-shoes", "white-shoes"] {
            create_product(db.as_ref(), NewProduct::new(shoes.id, slug, slug, "Shoes")).unwrap();
        }
        create_product(db.as_ref(), NewProduct::new(hats.id, "Cap", "cap", "A cap")).unwrap();

        let view = get_category_with_products(db.as_ref(), "shoes").unwrap();
        assert_eq!(view.category, shoes);
        let slugs: Vec<_> = view.products.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["black-shoes", "white-shoes"]);
    }
}
