//! Navigation menu aggregation.
//!
//! Composes the catalog read operations into the nested structure the
//! header menu renders: top-level categories, each with its subcategories
//! and a handful of featured products with resolved cover images.

use serde::Serialize;
use tracing::instrument;

use wrenfield_core::view::ProductCard;

use super::Catalog;
use crate::cms::{
    CategoryQuery, CmsError, ContentStore, DETAIL_DEPTH, ParentFilter, ProductFilter, ProductQuery,
};

/// Maximum top-level categories shown in the menu.
pub const MENU_TOP_LEVEL_LIMIT: u32 = 10;

/// Maximum subcategories shown per top-level category.
pub const MENU_SUBCATEGORY_LIMIT: u32 = 10;

/// Featured products shown per top-level category.
pub const MENU_FEATURED_LIMIT: u32 = 3;

/// A subcategory entry in the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuSubcategory {
    pub slug: String,
    pub name: String,
}

/// A top-level category entry in the menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuCategory {
    pub slug: String,
    pub name: String,
    pub subcategories: Vec<MenuSubcategory>,
    pub featured: Vec<ProductCard>,
}

impl<S: ContentStore> Catalog<S> {
    /// Build the navigation menu.
    ///
    /// The per-category sub-queries are issued sequentially rather than
    /// concurrently, trading latency for reduced simultaneous load on the
    /// store's connection pool. Fine at the catalog sizes this shop runs;
    /// if top-level categories grow past a few dozen, batch the
    /// subcategory and featured-product lookups into two bulk queries
    /// keyed by parent id instead.
    #[instrument(skip(self))]
    pub async fn build_menu(&self) -> Result<Vec<MenuCategory>, CmsError> {
        let top_level = self
            .store()
            .find_categories(&CategoryQuery {
                featured_only: false,
                parent: Some(ParentFilter::TopLevel),
                limit: Some(MENU_TOP_LEVEL_LIMIT),
            })
            .await?;

        let mut menu = Vec::with_capacity(top_level.len());
        for category in top_level {
            let subcategories = self
                .store()
                .find_categories(&CategoryQuery {
                    featured_only: false,
                    parent: Some(ParentFilter::Of(category.id.clone())),
                    limit: Some(MENU_SUBCATEGORY_LIMIT),
                })
                .await?
                .into_iter()
                .map(|sub| MenuSubcategory {
                    slug: sub.slug,
                    name: sub.name,
                })
                .collect();

            // Deep join so cover images resolve to real URLs.
            let featured = self
                .store()
                .find_products(&ProductQuery {
                    filter: ProductFilter {
                        featured: Some(true),
                        category: Some(category.id.clone()),
                        ..ProductFilter::default()
                    },
                    limit: MENU_FEATURED_LIMIT,
                    page: 1,
                    depth: DETAIL_DEPTH,
                })
                .await?
                .docs
                .iter()
                .map(ProductCard::from_product)
                .collect();

            menu.push(MenuCategory {
                slug: category.slug,
                name: category.name,
                subcategories,
                featured,
            });
        }

        Ok(menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use wrenfield_core::richtext::RichText;
    use wrenfield_core::{
        Category, CategoryId, Media, MediaId, PriceLabel, Product, ProductId, ProductStatus,
        Reference,
    };

    use crate::cms::memory::MemoryStore;

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        let furniture = Category {
            id: CategoryId::new("c1"),
            name: "Furniture".to_string(),
            slug: "furniture".to_string(),
            description: None,
            image: None,
            featured: true,
            parent: None,
        };
        store.insert_category(furniture.clone());
        store.insert_category(Category {
            id: CategoryId::new("c2"),
            name: "Tables".to_string(),
            slug: "tables".to_string(),
            description: None,
            image: None,
            featured: false,
            parent: Some(Reference::Unresolved("c1".to_string())),
        });

        let media = Media {
            id: MediaId::new("m1"),
            filename: "table.jpg".to_string(),
            alt: None,
            url: Some("/media/table.jpg".to_string()),
            sizes: wrenfield_core::MediaSizes::default(),
        };
        for index in 1..=4 {
            store.insert_product(Product {
                id: ProductId::new(format!("p{index}")),
                title: format!("Lot {index}"),
                slug: format!("lot-{index}"),
                description: RichText::new(),
                images: vec![Reference::from(media.clone())],
                category: Reference::from(furniture.clone()),
                price: Decimal::from(100 * index),
                price_label: PriceLabel::Asking,
                featured: true,
                status: ProductStatus::Available,
                created_at: Utc::now() - chrono::Duration::hours(i64::from(index)),
            });
        }
        store
    }

    #[tokio::test]
    async fn menu_nests_subcategories_and_caps_featured() {
        let catalog = crate::catalog::Catalog::new(store());
        let menu = catalog.build_menu().await.expect("menu");

        assert_eq!(menu.len(), 1);
        let furniture = &menu[0];
        assert_eq!(furniture.slug, "furniture");
        assert_eq!(furniture.subcategories.len(), 1);
        assert_eq!(furniture.subcategories[0].slug, "tables");
        assert_eq!(furniture.featured.len(), MENU_FEATURED_LIMIT as usize);
        assert!(furniture.featured.iter().all(|card| card.image == "/media/table.jpg"));
    }

    #[tokio::test]
    async fn subcategories_do_not_appear_at_top_level() {
        let catalog = crate::catalog::Catalog::new(store());
        let menu = catalog.build_menu().await.expect("menu");
        assert!(menu.iter().all(|entry| entry.slug != "tables"));
    }
}
