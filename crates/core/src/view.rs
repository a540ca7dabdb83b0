//! Flattened view models consumed by presentation code.
//!
//! These transforms are pure: they never touch the CMS, they only reshape
//! records that were already fetched. Unresolved references degrade to
//! documented fallbacks instead of failing.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{Category, ImageSize, Product, ProductStatus};

/// Placeholder path used when no image URL can be resolved.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.svg";

/// Display name used when a product's category reference is unresolved.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Literal shown in place of a numeric price for make-an-offer items.
pub const MAKE_AN_OFFER: &str = "Make an Offer";

/// A product flattened for listing grids, search results, and menu tiles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub slug: String,
    pub title: String,
    /// Raw price, carried even when the display suppresses it.
    pub price: Decimal,
    /// Label-aware display text (`"From $1,200"`, `"Make an Offer"`, ...).
    pub price_display: String,
    pub category: String,
    pub category_slug: String,
    pub status: ProductStatus,
    pub image: String,
    pub featured: bool,
}

impl ProductCard {
    /// Flatten a product into a card.
    ///
    /// The category name falls back to [`UNCATEGORIZED`] (with an empty
    /// slug) when the reference is unresolved; the cover image is the
    /// first image resolved with a card-size preference, falling back to
    /// [`PLACEHOLDER_IMAGE`].
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let (category, category_slug) = match product.category.resolved() {
            Some(category) => (category.name.clone(), category.slug.clone()),
            None => (UNCATEGORIZED.to_string(), String::new()),
        };

        let image = product
            .cover_image()
            .map(|reference| reference.display_url(Some(ImageSize::Card)))
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Self {
            slug: product.slug.clone(),
            title: product.title.clone(),
            price: product.price,
            price_display: price_display(product),
            category,
            category_slug,
            status: product.status,
            image,
            featured: product.featured,
        }
    }
}

/// A category flattened for navigation and listing pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCard {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u64>,
}

impl CategoryCard {
    /// Flatten a category into a card, with an optional display count.
    #[must_use]
    pub fn from_category(category: &Category, product_count: Option<u64>) -> Self {
        let image = category
            .image
            .as_ref()
            .map(|reference| reference.display_url(Some(ImageSize::Card)))
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Self {
            slug: category.slug.clone(),
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
            image,
            product_count,
        }
    }
}

/// Label-aware price display text for a product.
fn price_display(product: &Product) -> String {
    use crate::types::PriceLabel;

    if product.price_label == PriceLabel::Offer {
        return MAKE_AN_OFFER.to_string();
    }
    format!(
        "{}{}",
        product.price_label.prefix(),
        format_price(product.price)
    )
}

/// Format a price as `$12,500` or `$249.50`.
///
/// Whole amounts drop the cents; fractional amounts keep two places. The
/// integer part is grouped with commas.
#[must_use]
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp(2);
    let text = if rounded.fract().is_zero() {
        format!("{}", rounded.trunc())
    } else {
        format!("{rounded:.2}")
    };

    let (integer, fraction) = text.split_once('.').map_or((text.as_str(), ""), |(i, f)| (i, f));
    let (sign, digits) = integer
        .strip_prefix('-')
        .map_or(("", integer), |rest| ("-", rest));

    let mut grouped = String::new();
    for (index, ch) in digits.chars().enumerate() {
        let remaining = digits.len() - index;
        if index > 0 && remaining % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction.is_empty() {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CategoryId, Media, MediaId, MediaSizes, PriceLabel, ProductId, Reference, SizeVariant,
    };
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn category() -> Category {
        Category {
            id: CategoryId::new("c1"),
            name: "Furniture".to_string(),
            slug: "furniture".to_string(),
            description: Some("Georgian through Edwardian".to_string()),
            image: None,
            featured: true,
            parent: None,
        }
    }

    fn product(label: PriceLabel) -> Product {
        Product {
            id: ProductId::new("p1"),
            title: "Georgian Mahogany Dining Table".to_string(),
            slug: "georgian-mahogany-dining-table".to_string(),
            description: crate::richtext::RichText::new(),
            images: vec![Reference::from(Media {
                id: MediaId::new("m1"),
                filename: "table.jpg".to_string(),
                alt: None,
                url: None,
                sizes: MediaSizes {
                    thumbnail: None,
                    card: Some(SizeVariant {
                        url: Some("/media/table-800.jpg".to_string()),
                        filename: Some("table-800.jpg".to_string()),
                    }),
                },
            })],
            category: Reference::from(category()),
            price: Decimal::from(12_500),
            price_label: label,
            featured: true,
            status: ProductStatus::Available,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn card_resolves_category_and_cover_image() {
        let card = ProductCard::from_product(&product(PriceLabel::Asking));
        assert_eq!(card.category, "Furniture");
        assert_eq!(card.category_slug, "furniture");
        assert_eq!(card.image, "/media/table-800.jpg");
        assert_eq!(card.price_display, "$12,500");
    }

    #[test]
    fn unresolved_category_falls_back_to_uncategorized() {
        let mut item = product(PriceLabel::Asking);
        item.category = Reference::Unresolved("c1".to_string());
        let card = ProductCard::from_product(&item);
        assert_eq!(card.category, UNCATEGORIZED);
        assert_eq!(card.category_slug, "");
    }

    #[test]
    fn missing_images_fall_back_to_placeholder() {
        let mut item = product(PriceLabel::Asking);
        item.images = vec![Reference::Unresolved("m1".to_string())];
        let card = ProductCard::from_product(&item);
        assert_eq!(card.image, PLACEHOLDER_IMAGE);

        item.images.clear();
        let card = ProductCard::from_product(&item);
        assert_eq!(card.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn price_display_follows_label() {
        assert_eq!(
            ProductCard::from_product(&product(PriceLabel::Starting)).price_display,
            "From $12,500"
        );
        assert_eq!(
            ProductCard::from_product(&product(PriceLabel::Estimate)).price_display,
            "Est. $12,500"
        );

        let offer = ProductCard::from_product(&product(PriceLabel::Offer));
        assert_eq!(offer.price_display, MAKE_AN_OFFER);
        // The raw price is still carried for offer items.
        assert_eq!(offer.price, Decimal::from(12_500));
    }

    #[test]
    fn format_price_grouping_and_cents() {
        assert_eq!(format_price(Decimal::from(950)), "$950");
        assert_eq!(format_price(Decimal::from(12_500)), "$12,500");
        assert_eq!(format_price(Decimal::from(1_250_000)), "$1,250,000");
        assert_eq!(format_price(Decimal::new(24_950, 2)), "$249.50");
    }

    #[test]
    fn category_card_uses_placeholder_and_count() {
        let card = CategoryCard::from_category(&category(), Some(14));
        assert_eq!(card.image, PLACEHOLDER_IMAGE);
        assert_eq!(card.product_count, Some(14));
        assert_eq!(card.description, "Georgian through Edwardian");
    }
}
