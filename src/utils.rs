//! Utility functions for catalog data.
//!
//! Slugs are the URL-safe keys of categories, products and variants:
//! lowercase ASCII letters and digits separated by single hyphens.

use crate::db::DbError;

/// Derive a slug from a human-readable name.
///
/// Runs of anything other than ASCII letters and digits collapse into one
/// hyphen; leading and trailing hyphens are dropped.
///
/// # Examples
///
/// ```
/// use catalog_db::utils::slugify;
/// assert_eq!(
///     slugify("The Best Black Shoes of Universe"),
///     "the-best-black-shoes-of-universe"
/// );
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Whether `slug` is already in canonical slug form.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Reject empty or whitespace-only text.
pub fn require_text(entity: &str, field: &str, value: &str) -> Result<(), DbError> {
    if value.trim().is_empty() {
        return Err(DbError::validation(entity, field, "must not be empty"));
    }
    Ok(())
}

/// Reject slugs that are empty or not URL-safe.
pub fn require_slug(entity: &str, field: &str, value: &str) -> Result<(), DbError> {
    require_text(entity, field, value)?;
    if !is_valid_slug(value) {
        return Err(DbError::validation(
            entity,
            field,
            format!(
                "'{}' is not a valid slug (expected lowercase letters, digits and single hyphens, e.g. '{}')",
                value,
                slugify(value)
            ),
        ));
    }
    Ok(())
}

/// Reject negative amounts.
pub fn require_non_negative(entity: &str, field: &str, value: i32) -> Result<(), DbError> {
    if value < 0 {
        return Err(DbError::validation(
            entity,
            field,
            format!("must be >= 0, got {}", value),
        ));
    }
    Ok(())
}
