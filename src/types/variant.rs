use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Changeset, Entity, Insertable, check_slug, check_text};
use crate::db::schema::{PRODUCT_VARIANTS, SchemaRelation};
use crate::db::{DbError, Record};
use crate::utils::{require_non_negative, require_slug, require_text};

/// A purchasable variant of a product (size, color, ...).
///
/// Prices are whole cents; there is no floating point anywhere on the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub price_in_cents: i32,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for ProductVariant {
    const RELATION: &'static SchemaRelation = &PRODUCT_VARIANTS;

    fn from_record(record: &Record) -> Result<Self, DbError> {
        let price = record.int("price_in_cents")?;
        let price_in_cents = i32::try_from(price).map_err(|_| DbError::QueryFailed {
            message: format!("price_in_cents out of range: {}", price),
        })?;

        Ok(Self {
            id: record.uuid("id")?,
            product_id: record.uuid("product_id")?,
            name: record.text("name")?,
            slug: record.text("slug")?,
            color: record.text("color")?,
            price_in_cents,
            image_url: record.text("image_url")?,
            created_at: record.timestamp("created_at")?,
        })
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProductVariant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub product_id: Uuid,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub price_in_cents: i32,
    pub image_url: String,
}

impl NewProductVariant {
    pub fn new(
        product_id: Uuid,
        name: impl Into<String>,
        slug: impl Into<String>,
        color: impl Into<String>,
        price_in_cents: i32,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            product_id,
            name: name.into(),
            slug: slug.into(),
            color: color.into(),
            price_in_cents,
            image_url: image_url.into(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

impl Insertable for NewProductVariant {
    type Output = ProductVariant;

    fn validate(&self) -> Result<(), DbError> {
        let entity = PRODUCT_VARIANTS.entity;
        require_text(entity, "name", &self.name)?;
        require_slug(entity, "slug", &self.slug)?;
        require_text(entity, "color", &self.color)?;
        require_non_negative(entity, "price_in_cents", self.price_in_cents)?;
        require_text(entity, "image_url", &self.image_url)
    }

    fn into_record(self) -> Record {
        Record::new()
            .with_opt("id", self.id)
            .with("product_id", self.product_id)
            .with("name", self.name)
            .with("slug", self.slug)
            .with("color", self.color)
            .with("price_in_cents", self.price_in_cents)
            .with("image_url", self.image_url)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariantChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_in_cents: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Changeset for ProductVariantChanges {
    type Output = ProductVariant;

    fn validate(&self) -> Result<(), DbError> {
        let entity = PRODUCT_VARIANTS.entity;
        check_text(entity, "name", self.name.as_deref())?;
        check_slug(entity, "slug", self.slug.as_deref())?;
        check_text(entity, "color", self.color.as_deref())?;
        if let Some(price) = self.price_in_cents {
            require_non_negative(entity, "price_in_cents", price)?;
        }
        check_text(entity, "image_url", self.image_url.as_deref())
    }

    fn into_record(self) -> Record {
        Record::new()
            .with_opt("name", self.name)
            .with_opt("slug", self.slug)
            .with_opt("color", self.color)
            .with_opt("price_in_cents", self.price_in_cents)
            .with_opt("image_url", self.image_url)
    }
}
