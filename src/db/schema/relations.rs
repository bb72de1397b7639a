//! All catalog table definitions.
//!
//! Four tables make up the catalog: `user`, `category`, `product` and
//! `product_variant`. `ALL_RELATIONS` lists them in creation order so that
//! every foreign key points at a table created earlier.

use super::definition::{
    Cardinality, ColumnDefault, DataType, ForeignKey, OnDelete, SchemaField, SchemaRelation,
    SchemaRelationship,
};

/// Users: reference rows for identities issued by an external auth system.
///
/// The id has no default; callers always supply it.
pub const USERS: SchemaRelation = SchemaRelation {
    name: "user",
    entity: "User",
    primary_key: "id",
    fields: &[
        SchemaField::required("id", DataType::Uuid),
        SchemaField::required("name", DataType::Text).updatable(),
    ],
    foreign_keys: &[],
    relationships: &[],
};

/// Categories group products.
///
/// Unique: slug
pub const CATEGORIES: SchemaRelation = SchemaRelation {
    name: "category",
    entity: "Category",
    primary_key: "id",
    fields: &[
        SchemaField::required("id", DataType::Uuid).with_default(ColumnDefault::RandomUuid),
        SchemaField::required("name", DataType::Text).updatable(),
        SchemaField::required("slug", DataType::Text).unique().updatable(),
        SchemaField::required("created_at", DataType::Timestamp).with_default(ColumnDefault::Now),
    ],
    foreign_keys: &[],
    relationships: &[SchemaRelationship {
        name: "products",
        target: "product",
        cardinality: Cardinality::Many,
        field: "id",
        references: "category_id",
    }],
};

/// Products belong to one category and own their variants.
///
/// Unique: slug
/// Foreign keys: category_id -> category.id (restrict)
pub const PRODUCTS: SchemaRelation = SchemaRelation {
    name: "product",
    entity: "Product",
    primary_key: "id",
    fields: &[
        SchemaField::required("id", DataType::Uuid).with_default(ColumnDefault::RandomUuid),
        SchemaField::required("category_id", DataType::Uuid),
        SchemaField::required("name", DataType::Text).updatable(),
        SchemaField::required("slug", DataType::Text).unique().updatable(),
        SchemaField::required("description", DataType::Text).updatable(),
        SchemaField::required("created_at", DataType::Timestamp).with_default(ColumnDefault::Now),
    ],
    foreign_keys: &[ForeignKey {
        column: "category_id",
        target: "category",
        target_column: "id",
        on_delete: OnDelete::Restrict,
    }],
    relationships: &[
        SchemaRelationship {
            name: "category",
            target: "category",
            cardinality: Cardinality::One,
            field: "category_id",
            references: "id",
        },
        SchemaRelationship {
            name: "variants",
            target: "product_variant",
            cardinality: Cardinality::Many,
            field: "id",
            references: "product_id",
        },
    ],
};

/// Purchasable variants of a product. Prices are integer cents.
///
/// Unique: slug
/// Foreign keys: product_id -> product.id (restrict)
pub const PRODUCT_VARIANTS: SchemaRelation = SchemaRelation {
    name: "product_variant",
    entity: "ProductVariant",
    primary_key: "id",
    fields: &[
        SchemaField::required("id", DataType::Uuid).with_default(ColumnDefault::RandomUuid),
        SchemaField::required("product_id", DataType::Uuid),
        SchemaField::required("name", DataType::Text).updatable(),
        SchemaField::required("slug", DataType::Text).unique().updatable(),
        SchemaField::required("color", DataType::Text).updatable(),
        SchemaField::required("price_in_cents", DataType::Int).updatable().min(0),
        SchemaField::required("image_url", DataType::Text).updatable(),
        SchemaField::required("created_at", DataType::Timestamp).with_default(ColumnDefault::Now),
    ],
    foreign_keys: &[ForeignKey {
        column: "product_id",
        target: "product",
        target_column: "id",
        on_delete: OnDelete::Restrict,
    }],
    relationships: &[SchemaRelationship {
        name: "product",
        target: "product",
        cardinality: Cardinality::One,
        field: "product_id",
        references: "id",
    }],
};

/// All relations in creation order.
pub const ALL_RELATIONS: &[&SchemaRelation] = &[&USERS, &CATEGORIES, &PRODUCTS, &PRODUCT_VARIANTS];

/// Returns the names of all relations in creation order.
pub fn relation_names() -> Vec<&'static str> {
    ALL_RELATIONS.iter().map(|r| r.name).collect()
}

/// Looks up a catalog relation by table name.
pub fn relation_by_name(name: &str) -> Option<&'static SchemaRelation> {
    ALL_RELATIONS.iter().copied().find(|r| r.name == name)
}

/// Returns every `(relation, foreign key)` pair among `relations` whose
/// foreign key points at `target`.
pub fn dependents_of<'a>(
    relations: &[&'a SchemaRelation],
    target: &str,
) -> Vec<(&'a SchemaRelation, &'a ForeignKey)> {
    relations
        .iter()
        .flat_map(|rel| {
            rel.foreign_keys
                .iter()
                .filter(move |fk| fk.target == target)
                .map(move |fk| (*rel, fk))
        })
        .collect()
}
