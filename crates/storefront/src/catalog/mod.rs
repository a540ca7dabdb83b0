//! The catalog view-model layer.
//!
//! Read-only query operations over the content store, shaping raw records
//! into the flat view models the presentation layer renders. Every
//! operation is side-effect-free; not-found is `Ok(None)`, never an error.

pub mod menu;

use tracing::instrument;

use wrenfield_core::{Category, CategoryId, Product, ProductStatus, SiteSettings};

use crate::cms::{
    CategoryQuery, CmsError, ContentStore, DETAIL_DEPTH, Page, ParentFilter, ProductFilter,
    ProductQuery,
};

/// Default page size for product listings.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Boolean filters for category listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryOptions {
    /// Only categories flagged as featured.
    pub featured_only: bool,
    /// Only top-level (parentless) categories.
    pub parent_only: bool,
}

/// Filters and pagination for product listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListOptions {
    pub featured: Option<bool>,
    pub category: Option<CategoryId>,
    pub status: Option<ProductStatus>,
    pub limit: u32,
    /// 1-based page number.
    pub page: u32,
}

impl Default for ProductListOptions {
    fn default() -> Self {
        Self {
            featured: None,
            category: None,
            status: None,
            limit: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

/// Parameters for a catalog search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub category: Option<CategoryId>,
    pub limit: u32,
    /// 1-based page number.
    pub page: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: None,
            limit: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

/// Read-only catalog queries over a content store.
///
/// Generic over the store so tests run against
/// [`crate::cms::memory::MemoryStore`].
#[derive(Clone)]
pub struct Catalog<S> {
    store: S,
}

impl<S: ContentStore> Catalog<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying content store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Categories matching the given boolean filters, name ascending.
    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        options: CategoryOptions,
    ) -> Result<Vec<Category>, CmsError> {
        let query = CategoryQuery {
            featured_only: options.featured_only,
            parent: options.parent_only.then_some(ParentFilter::TopLevel),
            limit: None,
        };
        self.store.find_categories(&query).await
    }

    /// The unique category with the given slug.
    #[instrument(skip(self))]
    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, CmsError> {
        self.store.find_category_by_slug(slug).await
    }

    /// Direct children of the category with the given slug, name ascending.
    ///
    /// Resolving the parent and listing its children is inherently
    /// sequential; a missing parent yields an empty list.
    #[instrument(skip(self))]
    pub async fn subcategories(&self, parent_slug: &str) -> Result<Vec<Category>, CmsError> {
        let Some(parent) = self.store.find_category_by_slug(parent_slug).await? else {
            return Ok(Vec::new());
        };
        let query = CategoryQuery {
            featured_only: false,
            parent: Some(ParentFilter::Of(parent.id)),
            limit: None,
        };
        self.store.find_categories(&query).await
    }

    /// Count of products referencing the given category.
    ///
    /// A display count, recomputed per request rather than cached.
    #[instrument(skip(self))]
    pub async fn product_count(&self, category: &CategoryId) -> Result<u64, CmsError> {
        let filter = ProductFilter {
            category: Some(category.clone()),
            ..ProductFilter::default()
        };
        self.store.count_products(&filter).await
    }

    /// A page of products, newest first, filters AND-combined.
    #[instrument(skip(self, options), fields(page = options.page, limit = options.limit))]
    pub async fn list_products(
        &self,
        options: ProductListOptions,
    ) -> Result<Page<Product>, CmsError> {
        let query = ProductQuery {
            filter: ProductFilter {
                featured: options.featured,
                category: options.category,
                status: options.status,
                ..ProductFilter::default()
            },
            limit: options.limit,
            page: options.page,
            depth: crate::cms::DEFAULT_DEPTH,
        };
        self.store.find_products(&query).await
    }

    /// The unique product with the given slug, joined deep enough for the
    /// detail view (images and category fully resolved).
    #[instrument(skip(self))]
    pub async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, CmsError> {
        self.store.find_product_by_slug(slug, DETAIL_DEPTH).await
    }

    /// Other products in the same category, excluding the current one.
    #[instrument(skip(self))]
    pub async fn related_products(
        &self,
        category: &CategoryId,
        exclude_slug: &str,
        limit: u32,
    ) -> Result<Vec<Product>, CmsError> {
        let query = ProductQuery {
            filter: ProductFilter {
                category: Some(category.clone()),
                exclude_slug: Some(exclude_slug.to_string()),
                ..ProductFilter::default()
            },
            limit,
            page: 1,
            depth: DETAIL_DEPTH,
        };
        Ok(self.store.find_products(&query).await?.docs)
    }

    /// The singleton site settings.
    #[instrument(skip(self))]
    pub async fn site_settings(&self) -> Result<SiteSettings, CmsError> {
        self.store.site_settings().await
    }

    /// Substring search over title and serialized description, optionally
    /// restricted to a category.
    ///
    /// A blank or whitespace-only query short-circuits to an empty page
    /// without touching the store: an empty search must not return the
    /// entire catalog.
    #[instrument(skip(self, params), fields(query = %params.query))]
    pub async fn search(&self, params: &SearchParams) -> Result<Page<Product>, CmsError> {
        let text = params.query.trim();
        if text.is_empty() {
            return Ok(Page::empty(params.page));
        }

        let query = ProductQuery {
            filter: ProductFilter {
                category: params.category.clone(),
                text_contains: Some(text.to_string()),
                ..ProductFilter::default()
            },
            limit: params.limit,
            page: params.page,
            depth: crate::cms::DEFAULT_DEPTH,
        };
        self.store.find_products(&query).await
    }
}
