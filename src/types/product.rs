use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Changeset, Entity, Insertable, check_slug, check_text};
use crate::db::schema::{PRODUCTS, SchemaRelation};
use crate::db::{DbError, Record};
use crate::utils::{require_slug, require_text};

/// A product listed under exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Product {
    const RELATION: &'static SchemaRelation = &PRODUCTS;

    fn from_record(record: &Record) -> Result<Self, DbError> {
        Ok(Self {
            id: record.uuid("id")?,
            category_id: record.uuid("category_id")?,
            name: record.text("name")?,
            slug: record.text("slug")?,
            description: record.text("description")?,
            created_at: record.timestamp("created_at")?,
        })
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub category_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
}

impl NewProduct {
    pub fn new(
        category_id: Uuid,
        name: impl Into<String>,
        slug: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            category_id,
            name: name.into(),
            slug: slug.into(),
            description: description.into(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

impl Insertable for NewProduct {
    type Output = Product;

    fn validate(&self) -> Result<(), DbError> {
        require_text(PRODUCTS.entity, "name", &self.name)?;
        require_slug(PRODUCTS.entity, "slug", &self.slug)?;
        require_text(PRODUCTS.entity, "description", &self.description)
    }

    fn into_record(self) -> Record {
        Record::new()
            .with_opt("id", self.id)
            .with("category_id", self.category_id)
            .with("name", self.name)
            .with("slug", self.slug)
            .with("description", self.description)
    }
}

/// Mutable product columns. Moving a product to another category is not supported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Changeset for ProductChanges {
    type Output = Product;

    fn validate(&self) -> Result<(), DbError> {
        check_text(PRODUCTS.entity, "name", self.name.as_deref())?;
        check_slug(PRODUCTS.entity, "slug", self.slug.as_deref())?;
        check_text(PRODUCTS.entity, "description", self.description.as_deref())
    }

    fn into_record(self) -> Record {
        Record::new()
            .with_opt("name", self.name)
            .with_opt("slug", self.slug)
            .with_opt("description", self.description)
    }
}
