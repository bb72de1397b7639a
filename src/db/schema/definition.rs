//! Core schema definition types.
//!
//! Provides a backend-agnostic type system for describing the catalog tables.
//! Every engine (in-memory and PostgreSQL) and the DDL compiler read the same
//! declarations, so constraints live in exactly one place.

/// Represents a column data type.
///
/// Maps to PostgreSQL types via `postgres_type()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 128-bit UUID identifier
    Uuid,
    /// Unbounded text
    Text,
    /// 32-bit signed integer
    Int,
    /// Timestamp without time zone, stored as UTC
    Timestamp,
}

impl DataType {
    /// Returns the PostgreSQL type name for this data type.
    pub fn postgres_type(&self) -> &'static str {
        match self {
            DataType::Uuid => "UUID",
            DataType::Text => "TEXT",
            DataType::Int => "INTEGER",
            DataType::Timestamp => "TIMESTAMP",
        }
    }

    /// Lowercase name used in `describe` output and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Uuid => "uuid",
            DataType::Text => "text",
            DataType::Int => "integer",
            DataType::Timestamp => "timestamp",
        }
    }
}

/// Value generated by the engine when an insert omits the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    /// Random (v4) UUID
    RandomUuid,
    /// Current time at row creation
    Now,
}

impl ColumnDefault {
    /// Returns the PostgreSQL default expression.
    pub fn postgres_expr(&self) -> &'static str {
        match self {
            ColumnDefault::RandomUuid => "gen_random_uuid()",
            ColumnDefault::Now => "(now() AT TIME ZONE 'utc')",
        }
    }
}

/// Represents a column in a schema relation.
///
/// All catalog columns are `NOT NULL`; there is no nullable flag.
#[derive(Debug, Clone)]
pub struct SchemaField {
    /// Column name (e.g., "slug", "price_in_cents")
    pub name: &'static str,

    /// Column data type
    pub data_type: DataType,

    /// Default generated by the engine. None means the caller must supply it.
    pub default: Option<ColumnDefault>,

    /// Whether the column carries a unique constraint
    pub unique: bool,

    /// Whether the column may change after the row is created
    pub updatable: bool,

    /// Smallest accepted value for integer columns
    pub min_value: Option<i64>,
}

impl SchemaField {
    /// A required, immutable column with no default.
    pub const fn required(name: &'static str, data_type: DataType) -> Self {
        Self {
            name,
            data_type,
            default: None,
            unique: false,
            updatable: false,
            min_value: None,
        }
    }

    pub const fn with_default(mut self, default: ColumnDefault) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn updatable(mut self) -> Self {
        self.updatable = true;
        self
    }

    pub const fn min(mut self, value: i64) -> Self {
        self.min_value = Some(value);
        self
    }

    /// Name of the check constraint guarding `min_value`, if any.
    pub fn check_constraint_name(&self, table: &str) -> Option<String> {
        self.min_value.map(|_| format!("{}_{}_check", table, self.name))
    }

    /// Name of the unique constraint on this column, if any.
    pub fn unique_constraint_name(&self, table: &str) -> Option<String> {
        self.unique.then(|| format!("{}_{}_unique", table, self.name))
    }
}

/// What happens to referencing rows when the referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    /// Refuse the delete while referencing rows exist
    Restrict,
    /// Delete referencing rows along with the referenced row
    Cascade,
}

impl OnDelete {
    pub fn postgres_action(&self) -> &'static str {
        match self {
            OnDelete::Restrict => "RESTRICT",
            OnDelete::Cascade => "CASCADE",
        }
    }
}

/// A foreign key from a column of this relation to another relation's column.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    /// Referencing column in this relation
    pub column: &'static str,

    /// Referenced relation name
    pub target: &'static str,

    /// Referenced column (always the target's primary key in this schema)
    pub target_column: &'static str,

    /// Delete policy
    pub on_delete: OnDelete,
}

impl ForeignKey {
    pub fn constraint_name(&self, table: &str) -> String {
        format!("{}_{}_fkey", table, self.column)
    }
}

/// How many rows sit on the far side of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

/// Represents a navigable relationship between two relations.
///
/// Pure metadata: the query layer uses it to build joins. `field` is the
/// column on this relation and `references` the column on `target` that
/// must match.
#[derive(Debug, Clone)]
pub struct SchemaRelationship {
    /// Relationship name (e.g., "category", "variants")
    pub name: &'static str,

    /// Target relation name
    pub target: &'static str,

    pub cardinality: Cardinality,

    /// Column on this relation
    pub field: &'static str,

    /// Column on the target relation
    pub references: &'static str,
}

/// Represents a complete database table.
#[derive(Debug, Clone)]
pub struct SchemaRelation {
    /// Table name (e.g., "category", "product_variant")
    pub name: &'static str,

    /// Entity name used in error messages (e.g., "Category")
    pub entity: &'static str,

    /// Primary key column name
    pub primary_key: &'static str,

    /// All columns, primary key first
    pub fields: &'static [SchemaField],

    /// Foreign keys declared by this relation
    pub foreign_keys: &'static [ForeignKey],

    /// Relationships to other relations
    pub relationships: &'static [SchemaRelationship],
}

impl SchemaRelation {
    /// Looks up a column by name.
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the primary key column.
    pub fn primary_key_field(&self) -> Option<&SchemaField> {
        self.field(self.primary_key)
    }

    /// Returns the columns that carry a unique constraint (primary key excluded).
    pub fn unique_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|f| f.unique)
    }

    /// Returns the columns the engine fills in when omitted.
    pub fn defaulted_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|f| f.default.is_some())
    }

    /// Looks up a relationship by name.
    pub fn relationship(&self, name: &str) -> Option<&SchemaRelationship> {
        self.relationships.iter().find(|r| r.name == name)
    }

    /// Returns the foreign key declared on `column`, if any.
    pub fn foreign_key(&self, column: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.column == column)
    }

    /// Returns the column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_postgres_types() {
        assert_eq!(DataType::Uuid.postgres_type(), "UUID");
        assert_eq!(DataType::Text.postgres_type(), "TEXT");
        assert_eq!(DataType::Int.postgres_type(), "INTEGER");
        assert_eq!(DataType::Timestamp.postgres_type(), "TIMESTAMP");
    }

    #[test]
    fn test_schema_field_builders() {
        const FIELD: SchemaField = SchemaField::required("slug", DataType::Text)
            .unique()
            .updatable();
        assert_eq!(FIELD.name, "slug");
        assert!(FIELD.unique);
        assert!(FIELD.updatable);
        assert_eq!(FIELD.default, None);
        assert_eq!(FIELD.min_value, None);
    }

    #[test]
    fn test_constraint_names() {
        let slug = SchemaField::required("slug", DataType::Text).unique();
        assert_eq!(
            slug.unique_constraint_name("product").as_deref(),
            Some("product_slug_unique")
        );
        assert_eq!(slug.check_constraint_name("product"), None);

        let price = SchemaField::required("price_in_cents", DataType::Int).min(0);
        assert_eq!(
            price.check_constraint_name("product_variant").as_deref(),
            Some("product_variant_price_in_cents_check")
        );

        let fk = ForeignKey {
            column: "category_id",
            target: "category",
            target_column: "id",
            on_delete: OnDelete::Restrict,
        };
        assert_eq!(fk.constraint_name("product"), "product_category_id_fkey");
    }

    #[test]
    fn test_schema_relation_lookups() {
        const FIELDS: &[SchemaField] = &[
            SchemaField::required("id", DataType::Uuid).with_default(ColumnDefault::RandomUuid),
            SchemaField::required("code", DataType::Text).unique(),
            SchemaField::required("label", DataType::Text).updatable(),
        ];
        let rel = SchemaRelation {
            name: "tag",
            entity: "Tag",
            primary_key: "id",
            fields: FIELDS,
            foreign_keys: &[],
            relationships: &[],
        };

        assert_eq!(rel.primary_key_field().map(|f| f.name), Some("id"));
        assert_eq!(rel.unique_fields().map(|f| f.name).collect::<Vec<_>>(), vec!["code"]);
        assert_eq!(rel.defaulted_fields().count(), 1);
        assert_eq!(rel.column_names().collect::<Vec<_>>(), vec!["id", "code", "label"]);
        assert!(rel.field("missing").is_none());
        assert!(rel.relationship("anything").is_none());
    }
}
