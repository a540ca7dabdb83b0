//! Content-store abstraction and implementations.
//!
//! All records live in a headless CMS that executes filter/sort/paginate
//! queries; this module defines the query vocabulary the storefront speaks
//! ([`CategoryQuery`], [`ProductQuery`], [`Page`]) and the [`ContentStore`]
//! trait the view-model layer consumes. Two implementations exist:
//!
//! - [`CmsClient`] - the HTTP client against the CMS REST API
//! - [`memory::MemoryStore`] - an in-process fake with identical
//!   filter/sort/pagination semantics, used by unit tests

mod client;
mod error;
pub mod memory;

pub use client::CmsClient;
pub use error::CmsError;

use serde::{Deserialize, Serialize};

use wrenfield_core::{
    Category, CategoryId, Media, MediaId, NewContactMessage, NewOffer, NewSubscriber, Product,
    ProductStatus, SiteSettings,
};

/// Default join depth for list queries: resolve direct relations (category,
/// images) but not relations-of-relations.
pub const DEFAULT_DEPTH: u8 = 1;

/// Join depth for detail views: additionally resolve media records behind
/// image references.
pub const DETAIL_DEPTH: u8 = 2;

/// Parent constraint for category queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentFilter {
    /// Only categories with no parent.
    TopLevel,
    /// Only direct children of the given category.
    Of(CategoryId),
}

/// A category query: AND of the present constraints, sorted by name
/// ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryQuery {
    pub featured_only: bool,
    pub parent: Option<ParentFilter>,
    pub limit: Option<u32>,
}

/// Product predicates, AND-combined when present.
///
/// `text_contains` is an OR-group over the title and the serialized
/// description (case-sensitive substring containment); `exclude_slug`
/// removes a single product, used for related-product lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub featured: Option<bool>,
    pub category: Option<CategoryId>,
    pub status: Option<ProductStatus>,
    pub exclude_slug: Option<String>,
    pub text_contains: Option<String>,
}

/// A paginated product query, sorted by creation time descending.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    pub limit: u32,
    /// 1-based page number.
    pub page: u32,
    pub depth: u8,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            filter: ProductFilter::default(),
            limit: 12,
            page: 1,
            depth: DEFAULT_DEPTH,
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub docs: Vec<T>,
    pub total_docs: u64,
    /// 1-based page number this page corresponds to.
    pub page: u32,
    pub has_next_page: bool,
}

impl<T> Page<T> {
    /// An empty page at the given page number.
    #[must_use]
    pub const fn empty(page: u32) -> Self {
        Self {
            docs: Vec::new(),
            total_docs: 0,
            page,
            has_next_page: false,
        }
    }

    /// Map the page's documents, preserving pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            docs: self.docs.into_iter().map(f).collect(),
            total_docs: self.total_docs,
            page: self.page,
            has_next_page: self.has_next_page,
        }
    }
}

/// The query interface the view-model layer consumes.
///
/// Read operations are side-effect-free; not-found is `Ok(None)`, never an
/// error. Write operations only ever create intake records or delete media,
/// never mutate catalog entities.
#[allow(async_fn_in_trait)]
pub trait ContentStore: Send + Sync {
    /// Categories matching the query, sorted by name ascending.
    async fn find_categories(&self, query: &CategoryQuery) -> Result<Vec<Category>, CmsError>;

    /// The unique category with the given slug.
    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, CmsError>;

    /// A page of products matching the query, newest first.
    async fn find_products(&self, query: &ProductQuery) -> Result<Page<Product>, CmsError>;

    /// The unique product with the given slug, joined to the given depth.
    async fn find_product_by_slug(
        &self,
        slug: &str,
        depth: u8,
    ) -> Result<Option<Product>, CmsError>;

    /// Count of products matching the filter.
    async fn count_products(&self, filter: &ProductFilter) -> Result<u64, CmsError>;

    /// The singleton site-settings record.
    async fn site_settings(&self) -> Result<SiteSettings, CmsError>;

    /// Persist a contact-form message.
    async fn create_contact_message(&self, message: &NewContactMessage) -> Result<(), CmsError>;

    /// Persist a purchase offer.
    async fn create_offer(&self, offer: &NewOffer) -> Result<(), CmsError>;

    /// Whether a subscriber with this email already exists.
    async fn subscriber_exists(&self, email: &str) -> Result<bool, CmsError>;

    /// Persist a newsletter subscriber.
    async fn create_subscriber(&self, subscriber: &NewSubscriber) -> Result<(), CmsError>;

    /// Delete a media record, returning it so callers can purge its files.
    ///
    /// Returns `Ok(None)` if no such record exists.
    async fn delete_media(&self, id: &MediaId) -> Result<Option<Media>, CmsError>;
}
