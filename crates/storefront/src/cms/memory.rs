//! In-process content store with the same query semantics as the CMS.
//!
//! Backs the unit tests for the catalog layer and the media cleanup
//! service. Filtering, sorting, and pagination mirror the CMS exactly:
//! AND-combined predicates, name-ascending categories, created-descending
//! products, 1-based pages. A query counter lets tests assert that an
//! operation never touched the store.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use wrenfield_core::{
    Category, Media, MediaId, NewContactMessage, NewOffer, NewSubscriber, Product, SiteSettings,
};

use super::{CategoryQuery, CmsError, ContentStore, Page, ParentFilter, ProductFilter, ProductQuery};

#[derive(Default)]
struct MemoryStoreInner {
    categories: Vec<Category>,
    products: Vec<Product>,
    media: HashMap<MediaId, Media>,
    settings: SiteSettings,
    messages: Vec<NewContactMessage>,
    offers: Vec<NewOffer>,
    subscribers: Vec<NewSubscriber>,
}

/// In-memory [`ContentStore`] for tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
    queries: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_category(&self, category: Category) {
        self.write().categories.push(category);
    }

    pub fn insert_product(&self, product: Product) {
        self.write().products.push(product);
    }

    pub fn insert_media(&self, media: Media) {
        self.write().media.insert(media.id.clone(), media);
    }

    pub fn set_settings(&self, settings: SiteSettings) {
        self.write().settings = settings;
    }

    /// Number of queries the store has executed.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn subscriber_count(&self) -> usize {
        self.read().subscribers.len()
    }

    pub fn offer_count(&self) -> usize {
        self.read().offers.len()
    }

    pub fn message_count(&self) -> usize {
        self.read().messages.len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, MemoryStoreInner> {
        self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, MemoryStoreInner> {
        self.inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::SeqCst);
    }
}

fn matches_filter(product: &Product, filter: &ProductFilter) -> bool {
    if let Some(featured) = filter.featured
        && product.featured != featured
    {
        return false;
    }
    if let Some(category) = &filter.category
        && product.category_id() != *category
    {
        return false;
    }
    if let Some(status) = filter.status
        && product.status != status
    {
        return false;
    }
    if let Some(slug) = &filter.exclude_slug
        && product.slug == *slug
    {
        return false;
    }
    if let Some(text) = &filter.text_contains
        && !product.title.contains(text.as_str())
        && !product.description.plain_text().contains(text.as_str())
    {
        return false;
    }
    true
}

fn paginate(mut docs: Vec<Product>, limit: u32, page: u32) -> Page<Product> {
    docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total_docs = docs.len() as u64;
    let page = page.max(1);
    let limit = limit.max(1) as usize;
    let start = (page as usize - 1) * limit;

    let docs: Vec<Product> = docs.into_iter().skip(start).take(limit).collect();
    let has_next_page = (start + limit) < total_docs as usize;

    Page {
        docs,
        total_docs,
        page,
        has_next_page,
    }
}

impl ContentStore for MemoryStore {
    async fn find_categories(&self, query: &CategoryQuery) -> Result<Vec<Category>, CmsError> {
        self.record_query();
        let mut categories: Vec<Category> = self
            .read()
            .categories
            .iter()
            .filter(|category| !query.featured_only || category.featured)
            .filter(|category| match &query.parent {
                Some(ParentFilter::TopLevel) => category.is_top_level(),
                Some(ParentFilter::Of(parent)) => {
                    category.parent_id().as_ref() == Some(parent)
                }
                None => true,
            })
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        if let Some(limit) = query.limit {
            categories.truncate(limit as usize);
        }
        Ok(categories)
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, CmsError> {
        self.record_query();
        Ok(self
            .read()
            .categories
            .iter()
            .find(|category| category.slug == slug)
            .cloned())
    }

    async fn find_products(&self, query: &ProductQuery) -> Result<Page<Product>, CmsError> {
        self.record_query();
        let docs: Vec<Product> = self
            .read()
            .products
            .iter()
            .filter(|product| matches_filter(product, &query.filter))
            .cloned()
            .collect();
        Ok(paginate(docs, query.limit, query.page))
    }

    async fn find_product_by_slug(
        &self,
        slug: &str,
        _depth: u8,
    ) -> Result<Option<Product>, CmsError> {
        self.record_query();
        Ok(self
            .read()
            .products
            .iter()
            .find(|product| product.slug == slug)
            .cloned())
    }

    async fn count_products(&self, filter: &ProductFilter) -> Result<u64, CmsError> {
        self.record_query();
        Ok(self
            .read()
            .products
            .iter()
            .filter(|product| matches_filter(product, filter))
            .count() as u64)
    }

    async fn site_settings(&self) -> Result<SiteSettings, CmsError> {
        self.record_query();
        Ok(self.read().settings.clone())
    }

    async fn create_contact_message(&self, message: &NewContactMessage) -> Result<(), CmsError> {
        self.write().messages.push(message.clone());
        Ok(())
    }

    async fn create_offer(&self, offer: &NewOffer) -> Result<(), CmsError> {
        self.write().offers.push(offer.clone());
        Ok(())
    }

    async fn subscriber_exists(&self, email: &str) -> Result<bool, CmsError> {
        self.record_query();
        Ok(self
            .read()
            .subscribers
            .iter()
            .any(|subscriber| subscriber.email == email))
    }

    async fn create_subscriber(&self, subscriber: &NewSubscriber) -> Result<(), CmsError> {
        self.write().subscribers.push(subscriber.clone());
        Ok(())
    }

    async fn delete_media(&self, id: &MediaId) -> Result<Option<Media>, CmsError> {
        self.record_query();
        Ok(self.write().media.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use wrenfield_core::{CategoryId, PriceLabel, ProductId, ProductStatus, Reference};
    use wrenfield_core::richtext::RichText;

    fn product(index: i64) -> Product {
        Product {
            id: ProductId::new(format!("p{index}")),
            title: format!("Lot {index}"),
            slug: format!("lot-{index}"),
            description: RichText::new(),
            images: Vec::new(),
            category: Reference::Unresolved("c1".to_string()),
            price: Decimal::from(100),
            price_label: PriceLabel::Asking,
            featured: false,
            status: ProductStatus::Available,
            created_at: Utc::now() - Duration::hours(index),
        }
    }

    #[tokio::test]
    async fn paginates_one_based_newest_first() {
        let store = MemoryStore::new();
        // product(1) is the most recent, product(11) the oldest.
        for index in 1..=11 {
            store.insert_product(product(index));
        }

        let query = ProductQuery {
            limit: 4,
            page: 3,
            ..ProductQuery::default()
        };
        let page = store.find_products(&query).await.expect("query");

        assert_eq!(page.total_docs, 11);
        assert_eq!(page.page, 3);
        assert!(!page.has_next_page);
        // Page 3 holds the 9th-11th most recent.
        let slugs: Vec<&str> = page.docs.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["lot-9", "lot-10", "lot-11"]);
    }

    #[tokio::test]
    async fn middle_pages_report_next_page() {
        let store = MemoryStore::new();
        for index in 1..=11 {
            store.insert_product(product(index));
        }

        let query = ProductQuery {
            limit: 4,
            page: 2,
            ..ProductQuery::default()
        };
        let page = store.find_products(&query).await.expect("query");
        assert_eq!(page.docs.len(), 4);
        assert!(page.has_next_page);
    }

    #[tokio::test]
    async fn text_filter_matches_title_or_description() {
        let store = MemoryStore::new();
        let mut table = product(1);
        table.title = "Georgian Mahogany Dining Table".to_string();
        let mut sofa = product(2);
        sofa.title = "Victorian Chesterfield Sofa".to_string();
        store.insert_product(table);
        store.insert_product(sofa);

        let query = ProductQuery {
            filter: ProductFilter {
                text_contains: Some("Georgian".to_string()),
                ..ProductFilter::default()
            },
            ..ProductQuery::default()
        };
        let page = store.find_products(&query).await.expect("query");
        assert_eq!(page.total_docs, 1);
        assert_eq!(page.docs[0].title, "Georgian Mahogany Dining Table");
    }

    #[tokio::test]
    async fn categories_sort_by_name() {
        let store = MemoryStore::new();
        for (id, name, slug) in [
            ("c1", "Silver", "silver"),
            ("c2", "Clocks", "clocks"),
            ("c3", "Furniture", "furniture"),
        ] {
            store.insert_category(Category {
                id: CategoryId::new(id),
                name: name.to_string(),
                slug: slug.to_string(),
                description: None,
                image: None,
                featured: false,
                parent: None,
            });
        }

        let categories = store
            .find_categories(&CategoryQuery::default())
            .await
            .expect("query");
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Clocks", "Furniture", "Silver"]);
    }
}
