//! End-to-end catalog scenarios against the in-memory engine.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use chrono::Utc;
use rstest::{fixture, rstest};
use uuid::Uuid;

use catalog_db::db::{ConstraintKind, DatabaseBackend, DbError, MemoryBackend, open_db};
use catalog_db::queries::{
    create_category, create_product, create_schema, create_user, create_variant, delete_category,
    delete_product, get_category_by_slug, get_category_with_products, get_product_by_slug,
    get_product_detail, get_variant_with_product, list_categories, update_category,
    update_product, update_variant,
};
use catalog_db::types::{
    Category, CategoryChanges, NewCategory, NewProduct, NewProductVariant, NewUser,
    ProductChanges, ProductVariantChanges,
};

#[fixture]
fn db() -> Box<dyn DatabaseBackend> {
    let db = open_db(":memory:").expect("Failed to open database");
    create_schema(db.as_ref()).expect("Failed to create schema");
    db
}

fn shoes(db: &dyn DatabaseBackend) -> Category {
    create_category(db, NewCategory::new("Shoes", "shoes")).expect("Failed to create category")
}

fn black_shoes(category_id: Uuid) -> NewProduct {
    NewProduct::new(
        category_id,
        "Black Shoes",
        "black-shoes",
        "The best black shoes of the universe",
    )
}

fn black_shoes_42(product_id: Uuid, price_in_cents: i32) -> NewProductVariant {
    NewProductVariant::new(
        product_id,
        "Black Shoes 42",
        "black-shoes-42",
        "black",
        price_in_cents,
        "https://cdn.example.com/black-shoes-42.png",
    )
}

#[rstest]
fn test_shoes_scenario(db: Box<dyn DatabaseBackend>) {
    let db = db.as_ref();
    let category = shoes(db);
    let product = create_product(db, black_shoes(category.id)).unwrap();
    let variant = create_variant(db, black_shoes_42(product.id, 9999)).unwrap();

    let detail = get_product_detail(db, "black-shoes").unwrap();
    assert_eq!(detail.category, category);
    assert_eq!(detail.product, product);
    assert_eq!(detail.variants.len(), 1);
    assert_eq!(detail.variants[0].price_in_cents, 9999);
    assert_eq!(detail.variants[0], variant);

    let view = get_variant_with_product(db, "black-shoes-42").unwrap();
    assert_eq!(view.product.slug, "black-shoes");

    let listing = get_category_with_products(db, "shoes").unwrap();
    assert_eq!(listing.products, vec![product]);
}

#[rstest]
fn test_generated_ids_are_unique(db: Box<dyn DatabaseBackend>) {
    let db = db.as_ref();
    let ids: HashSet<Uuid> = (0..50)
        .map(|n| {
            create_category(db, NewCategory::from_name(format!("Category {}", n)))
                .unwrap()
                .id
        })
        .collect();

    assert_eq!(ids.len(), 50);
    assert!(!ids.contains(&Uuid::nil()));
}

#[rstest]
fn test_duplicate_category_slug(db: Box<dyn DatabaseBackend>) {
    let db = db.as_ref();
    shoes(db);
    let err = create_category(db, NewCategory::new("Shoes again", "shoes")).unwrap_err();
    assert_eq!(err.constraint_kind(), Some(ConstraintKind::Unique));
    assert_eq!(list_categories(db).unwrap().len(), 1);
}

#[rstest]
fn test_product_with_unknown_category(db: Box<dyn DatabaseBackend>) {
    let err = create_product(db.as_ref(), black_shoes(Uuid::new_v4())).unwrap_err();
    assert_eq!(err.constraint_kind(), Some(ConstraintKind::ForeignKey));
}

#[rstest]
fn test_negative_price_is_validation(db: Box<dyn DatabaseBackend>) {
    let db = db.as_ref();
    let category = shoes(db);
    let product = create_product(db, black_shoes(category.id)).unwrap();

    let err = create_variant(db, black_shoes_42(product.id, -1)).unwrap_err();
    assert!(matches!(err, DbError::Validation { ref field, .. } if field == "price_in_cents"));
    assert!(get_product_detail(db, "black-shoes").unwrap().variants.is_empty());
}

#[rstest]
fn test_read_back_by_slug(db: Box<dyn DatabaseBackend>) {
    let db = db.as_ref();
    let started = Utc::now();
    let category = shoes(db);
    let created = create_product(db, black_shoes(category.id)).unwrap();

    let read = get_product_by_slug(db, "black-shoes").unwrap();
    assert_eq!(read, created);
    assert!(read.created_at >= started);
}

#[rstest]
fn test_restrict_delete(db: Box<dyn DatabaseBackend>) {
    let db = db.as_ref();
    let category = shoes(db);
    let product = create_product(db, black_shoes(category.id)).unwrap();

    let err = delete_category(db, category.id).unwrap_err();
    assert_eq!(err.constraint_kind(), Some(ConstraintKind::ForeignKey));
    assert!(get_category_by_slug(db, "shoes").is_ok());

    delete_product(db, product.id).unwrap();
    delete_category(db, category.id).unwrap();
    assert!(get_category_by_slug(db, "shoes").unwrap_err().is_not_found());
}

#[rstest]
fn test_updates_keep_identity_and_recheck_slugs(db: Box<dyn DatabaseBackend>) {
    let db = db.as_ref();
    let category = shoes(db);
    let first = create_product(db, black_shoes(category.id)).unwrap();
    let second = create_product(
        db,
        NewProduct::new(category.id, "White Shoes", "white-shoes", "White"),
    )
    .unwrap();

    let renamed = update_product(
        db,
        first.id,
        ProductChanges {
            name: Some("Jet Black Shoes".to_string()),
            ..ProductChanges::default()
        },
    )
    .unwrap();
    assert_eq!(renamed.id, first.id);
    assert_eq!(renamed.created_at, first.created_at);

    let err = update_product(
        db,
        second.id,
        ProductChanges {
            slug: Some("black-shoes".to_string()),
            ..ProductChanges::default()
        },
    )
    .unwrap_err();
    assert_eq!(err.constraint_kind(), Some(ConstraintKind::Unique));

    let err = update_category(
        db,
        Uuid::new_v4(),
        CategoryChanges {
            name: Some("Ghost".to_string()),
            ..CategoryChanges::default()
        },
    )
    .unwrap_err();
    assert!(err.is_not_found());
}

#[rstest]
fn test_variant_price_update(db: Box<dyn DatabaseBackend>) {
    let db = db.as_ref();
    let category = shoes(db);
    let product = create_product(db, black_shoes(category.id)).unwrap();
    let variant = create_variant(db, black_shoes_42(product.id, 9999)).unwrap();

    let updated = update_variant(
        db,
        variant.id,
        ProductVariantChanges {
            price_in_cents: Some(8999),
            ..ProductVariantChanges::default()
        },
    )
    .unwrap();
    assert_eq!(get_product_detail(db, "black-shoes").unwrap().min_price_in_cents(), Some(8999));
    assert_eq!(updated.created_at, variant.created_at);
}

#[rstest]
fn test_user_requires_caller_id(db: Box<dyn DatabaseBackend>) {
    let db = db.as_ref();
    assert!(create_user(db, NewUser::new(Uuid::nil(), "Ada")).unwrap_err().is_validation());
    assert!(create_user(db, NewUser::new(Uuid::new_v4(), "")).unwrap_err().is_validation());

    let id = Uuid::new_v4();
    assert_eq!(create_user(db, NewUser::new(id, "Ada")).unwrap().id, id);
}

#[test]
fn test_concurrent_slug_claims_admit_one() {
    let db = Arc::new(MemoryBackend::new());
    create_schema(db.as_ref()).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let db = Arc::clone(&db);
            thread::spawn(move || {
                create_category(db.as_ref(), NewCategory::new(format!("Shoes {}", n), "shoes"))
            })
        })
        .collect();

    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| e.constraint_kind() == Some(ConstraintKind::Unique)));
}
