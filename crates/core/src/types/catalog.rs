//! Catalog records: categories and products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::media::Media;
use super::reference::Reference;
use crate::richtext::RichText;

/// A catalog category.
///
/// `slug` is unique across all categories. `parent`, when present, points
/// at another category; the storefront only ever uses one level of nesting,
/// though the model permits arbitrary depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<Reference<Media>>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub parent: Option<Reference<Category>>,
}

impl Category {
    /// The parent category id, whether or not the relation was joined.
    #[must_use]
    pub fn parent_id(&self) -> Option<CategoryId> {
        match self.parent.as_ref()? {
            Reference::Resolved(parent) => Some(parent.id.clone()),
            Reference::Unresolved(id) => Some(CategoryId::new(id.clone())),
        }
    }

    /// Whether this is a top-level (parentless) category.
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

/// How a product's price should be presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceLabel {
    /// Plain asking price.
    #[default]
    Asking,
    /// "From" pricing, for items sold in varying configurations.
    Starting,
    /// Auction-style estimate.
    Estimate,
    /// No displayed price; buyers make an offer.
    Offer,
}

impl PriceLabel {
    /// Display prefix placed before the formatted price.
    ///
    /// [`Self::Offer`] carries no prefix because the numeric price is
    /// suppressed entirely at render time.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Asking | Self::Offer => "",
            Self::Starting => "From ",
            Self::Estimate => "Est. ",
        }
    }
}

/// Sale status of a product.
///
/// Transitions are driven externally via admin edits; any value may follow
/// any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Available,
    Pending,
    Sold,
}

impl ProductStatus {
    /// The status's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Sold => "sold",
        }
    }
}

/// A catalog product.
///
/// Every product belongs to exactly one category and carries at least one
/// image (enforced by the CMS schema, assumed here).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: RichText,
    #[serde(default)]
    pub images: Vec<Reference<Media>>,
    pub category: Reference<Category>,
    pub price: Decimal,
    #[serde(default)]
    pub price_label: PriceLabel,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// The category id, whether or not the relation was joined.
    #[must_use]
    pub fn category_id(&self) -> CategoryId {
        match &self.category {
            Reference::Resolved(category) => category.id.clone(),
            Reference::Unresolved(id) => CategoryId::new(id.clone()),
        }
    }

    /// The first image reference, used as the cover image.
    #[must_use]
    pub fn cover_image(&self) -> Option<&Reference<Media>> {
        self.images.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_label_prefixes() {
        assert_eq!(PriceLabel::Asking.prefix(), "");
        assert_eq!(PriceLabel::Starting.prefix(), "From ");
        assert_eq!(PriceLabel::Estimate.prefix(), "Est. ");
        assert_eq!(PriceLabel::Offer.prefix(), "");
    }

    #[test]
    fn category_parent_id_handles_both_reference_shapes() {
        let parent = Category {
            id: CategoryId::new("c1"),
            name: "Furniture".to_string(),
            slug: "furniture".to_string(),
            description: None,
            image: None,
            featured: false,
            parent: None,
        };

        let mut child = Category {
            id: CategoryId::new("c2"),
            name: "Tables".to_string(),
            slug: "tables".to_string(),
            description: None,
            image: None,
            featured: false,
            parent: Some(Reference::Unresolved("c1".to_string())),
        };
        assert_eq!(child.parent_id(), Some(CategoryId::new("c1")));

        child.parent = Some(Reference::from(parent));
        assert_eq!(child.parent_id(), Some(CategoryId::new("c1")));
        assert!(!child.is_top_level());
    }

    #[test]
    fn product_deserializes_with_unjoined_relations() {
        let json = r#"{
            "id": "p1",
            "title": "Regency Gilt Mirror",
            "slug": "regency-gilt-mirror",
            "images": ["m1", "m2"],
            "category": "c1",
            "price": "1450",
            "priceLabel": "estimate",
            "status": "pending",
            "createdAt": "2025-11-02T10:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.category_id(), CategoryId::new("c1"));
        assert_eq!(product.price_label, PriceLabel::Estimate);
        assert_eq!(product.status, ProductStatus::Pending);
        assert_eq!(product.images.len(), 2);
        assert!(!product.images[0].is_resolved());
    }
}
