//! Catalog read route handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use wrenfield_core::view::{CategoryCard, ProductCard};
use wrenfield_core::{Product, ProductStatus, SiteSettings};

use crate::catalog::menu::MenuCategory;
use crate::catalog::{CategoryOptions, DEFAULT_PAGE_SIZE, ProductListOptions};
use crate::cms::Page;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Category listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListQuery {
    /// Only featured categories.
    #[serde(default)]
    pub featured: bool,
    /// Only top-level categories.
    #[serde(default)]
    pub parents: bool,
}

/// List categories.
///
/// GET /api/categories?featured=true&parents=true
///
/// Each card carries a live product count; the per-category count queries
/// run sequentially, same trade-off as the menu builder.
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryListQuery>,
) -> Result<Json<Vec<CategoryCard>>> {
    let categories = state
        .catalog()
        .list_categories(CategoryOptions {
            featured_only: params.featured,
            parent_only: params.parents,
        })
        .await?;

    let mut cards = Vec::with_capacity(categories.len());
    for category in &categories {
        let count = state.catalog().product_count(&category.id).await?;
        cards.push(CategoryCard::from_category(category, Some(count)));
    }
    Ok(Json(cards))
}

/// Category detail response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: CategoryCard,
    pub subcategories: Vec<CategoryCard>,
}

/// Show a category with its subcategories.
///
/// GET /api/categories/{slug}
#[instrument(skip(state))]
pub async fn category_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryDetail>> {
    let Some(category) = state.catalog().category_by_slug(&slug).await? else {
        return Err(AppError::NotFound("Category not found".to_string()));
    };

    let (subcategories, count) = tokio::join!(
        state.catalog().subcategories(&slug),
        state.catalog().product_count(&category.id),
    );

    let subcategories = subcategories?
        .iter()
        .map(|sub| CategoryCard::from_category(sub, None))
        .collect();

    Ok(Json(CategoryDetail {
        category: CategoryCard::from_category(&category, Some(count?)),
        subcategories,
    }))
}

/// Product listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    #[serde(default)]
    pub featured: Option<bool>,
    /// Category slug to restrict results to.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub page: Option<u32>,
}

/// List products, newest first.
///
/// GET /api/products?category=furniture&page=2
///
/// An unknown category slug answers an empty page rather than an error.
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListQuery>,
) -> Result<Json<Page<ProductCard>>> {
    let page = params.page.unwrap_or(1).max(1);

    let category = match &params.category {
        Some(slug) if !slug.trim().is_empty() => {
            match state.catalog().category_by_slug(slug.trim()).await? {
                Some(category) => Some(category.id),
                None => return Ok(Json(Page::empty(page))),
            }
        }
        _ => None,
    };

    let products = state
        .catalog()
        .list_products(ProductListOptions {
            featured: params.featured,
            category,
            status: params.status,
            limit: params.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100),
            page,
        })
        .await?;

    Ok(Json(products.map(|product| ProductCard::from_product(&product))))
}

/// Number of related products shown on a detail page.
const RELATED_LIMIT: u32 = 4;

/// A gallery image on the product detail page.
#[derive(Debug, Serialize)]
pub struct ProductImage {
    pub url: String,
    pub alt: String,
}

/// Product detail response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub card: ProductCard,
    /// Description rendered to sanitized HTML.
    pub description_html: String,
    pub images: Vec<ProductImage>,
    pub related: Vec<ProductCard>,
}

impl ProductDetail {
    fn gallery(product: &Product) -> Vec<ProductImage> {
        product
            .images
            .iter()
            .filter_map(|reference| reference.resolved())
            .filter_map(|media| {
                // Full-size preference for the gallery; skip unresolvable entries.
                let url = media.resolve_url(None)?.to_string();
                Some(ProductImage {
                    url,
                    alt: media.alt.clone().unwrap_or_default(),
                })
            })
            .collect()
    }
}

/// Show a product with its gallery and related items.
///
/// GET /api/products/{slug}
#[instrument(skip(state))]
pub async fn product_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductDetail>> {
    let Some(product) = state.catalog().product_by_slug(&slug).await? else {
        return Err(AppError::NotFound("Product not found".to_string()));
    };

    let related = state
        .catalog()
        .related_products(&product.category_id(), &product.slug, RELATED_LIMIT)
        .await?
        .iter()
        .map(ProductCard::from_product)
        .collect();

    Ok(Json(ProductDetail {
        card: ProductCard::from_product(&product),
        description_html: product.description.to_html(),
        images: ProductDetail::gallery(&product),
        related,
    }))
}

/// Show the navigation menu.
///
/// GET /api/menu
#[instrument(skip(state))]
pub async fn menu(State(state): State<AppState>) -> Result<Json<Vec<MenuCategory>>> {
    Ok(Json(state.catalog().build_menu().await?))
}

/// Show the site settings.
///
/// GET /api/settings
#[instrument(skip(state))]
pub async fn settings(State(state): State<AppState>) -> Result<Json<SiteSettings>> {
    Ok(Json(state.catalog().site_settings().await?))
}
