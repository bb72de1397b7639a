use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Changeset, Entity, Insertable, check_slug, check_text};
use crate::db::schema::{CATEGORIES, SchemaRelation};
use crate::db::{DbError, Record};
use crate::utils::{require_slug, require_text, slugify};

/// A product category such as "Shoes".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Category {
    const RELATION: &'static SchemaRelation = &CATEGORIES;

    fn from_record(record: &Record) -> Result<Self, DbError> {
        Ok(Self {
            id: record.uuid("id")?,
            name: record.text("name")?,
            slug: record.text("slug")?,
            created_at: record.timestamp("created_at")?,
        })
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    /// Generated by the engine when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub slug: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            slug: slug.into(),
        }
    }

    /// Category whose slug is derived from its name.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self::new(name, slug)
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

impl Insertable for NewCategory {
    type Output = Category;

    fn validate(&self) -> Result<(), DbError> {
        require_text(CATEGORIES.entity, "name", &self.name)?;
        require_slug(CATEGORIES.entity, "slug", &self.slug)
    }

    fn into_record(self) -> Record {
        Record::new()
            .with_opt("id", self.id)
            .with("name", self.name)
            .with("slug", self.slug)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl Changeset for CategoryChanges {
    type Output = Category;

    fn validate(&self) -> Result<(), DbError> {
        check_text(CATEGORIES.entity, "name", self.name.as_deref())?;
        check_slug(CATEGORIES.entity, "slug", self.slug.as_deref())
    }

    fn into_record(self) -> Record {
        Record::new()
            .with_opt("name", self.name)
            .with_opt("slug", self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_derives_slug() {
        let category = NewCategory::from_name("Running Shoes");
        assert_eq!(category.slug, "running-shoes");
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_invalid_slug_rejected() {
        let err = NewCategory::new("Shoes", "Shoes!").validate().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_into_record_omits_missing_id() {
        let record = NewCategory::new("Shoes", "shoes").into_record();
        assert!(!record.contains("id"));
        assert!(!record.contains("created_at"));

        let id = Uuid::new_v4();
        let record = NewCategory::new("Shoes", "shoes").with_id(id).into_record();
        assert_eq!(record.uuid("id").unwrap(), id);
    }

    #[test]
    fn test_from_record_requires_created_at() {
        let record = NewCategory::new("Shoes", "shoes")
            .with_id(Uuid::new_v4())
            .into_record();
        assert!(matches!(
            Category::from_record(&record),
            Err(DbError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_changes_validate_only_present_fields() {
        let changes = CategoryChanges {
            name: Some("Sneakers".to_string()),
            slug: None,
        };
        assert!(changes.validate().is_ok());
        assert_eq!(changes.into_record().len(), 1);

        let changes = CategoryChanges {
            name: Some(String::new()),
            slug: None,
        };
        assert!(changes.validate().unwrap_err().is_validation());
    }
}
