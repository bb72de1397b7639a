//! Read models that join several catalog entities.

use serde::Serialize;

use super::{Category, Product, ProductVariant};

/// A product with its category and every variant, in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    pub category: Category,
    pub variants: Vec<ProductVariant>,
}

impl ProductDetail {
    /// Lowest variant price, if the product has any variants.
    pub fn min_price_in_cents(&self) -> Option<i32> {
        self.variants.iter().map(|v| v.price_in_cents).min()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryWithProducts {
    pub category: Category,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantWithProduct {
    pub variant: ProductVariant,
    pub product: Product,
}
