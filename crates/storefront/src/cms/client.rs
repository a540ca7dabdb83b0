//! HTTP client for the CMS content API.
//!
//! The CMS exposes a REST surface per collection
//! (`GET /api/{collection}?where[...]&sort&limit&page&depth`, `POST` to
//! create, `DELETE /api/{collection}/{id}`) plus `GET /api/globals/{slug}`
//! for singletons. Categories and site settings are read-mostly and cached
//! with `moka` (5-minute TTL); products are always fetched fresh.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use wrenfield_core::{
    Category, Media, MediaId, NewContactMessage, NewOffer, NewSubscriber, Product, SiteSettings,
};

use super::{
    CategoryQuery, CmsError, ContentStore, Page, ParentFilter, ProductFilter, ProductQuery,
};
use crate::config::CmsConfig;

/// Cache key for read-mostly CMS records.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    /// Categories keyed by the query's parameter fingerprint.
    Categories(String),
    Settings,
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Categories(Arc<Vec<Category>>),
    Settings(Arc<SiteSettings>),
}

/// Paginated list envelope returned by every collection endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse<T> {
    docs: Vec<T>,
    #[serde(default)]
    total_docs: u64,
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default)]
    has_next_page: bool,
}

const fn default_page() -> u32 {
    1
}

/// Envelope returned by create/delete endpoints.
#[derive(Debug, Deserialize)]
struct DocResponse<T> {
    doc: T,
}

/// Client for the CMS content API.
///
/// Cheaply cloneable via `Arc`; holds the HTTP client, the API key, and the
/// read cache.
#[derive(Clone)]
pub struct CmsClient {
    inner: Arc<CmsClientInner>,
}

struct CmsClientInner {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    cache: Cache<CacheKey, CacheValue>,
}

impl CmsClient {
    /// Create a new CMS client.
    #[must_use]
    pub fn new(config: &CmsConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(256)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CmsClientInner {
                http: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_key: config.api_key.clone(),
                cache,
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(
            "Authorization",
            format!("users API-Key {}", self.inner.api_key.expose_secret()),
        )
    }

    /// Execute a request and parse the JSON body.
    ///
    /// The body is read as text first so parse failures can be logged with
    /// a snippet of what the CMS actually returned.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, CmsError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "CMS API returned non-success status"
            );
            return Err(CmsError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse CMS response"
                );
                Err(CmsError::Parse(e))
            }
        }
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        collection: &str,
        params: &[(String, String)],
    ) -> Result<Page<T>, CmsError> {
        let request = self
            .inner
            .http
            .get(self.url(&format!("/api/{collection}")))
            .query(params);
        let list: ListResponse<T> = self.execute(request).await?;
        Ok(Page {
            docs: list.docs,
            total_docs: list.total_docs,
            page: list.page,
            has_next_page: list.has_next_page,
        })
    }

    async fn create<B: serde::Serialize>(
        &self,
        collection: &str,
        body: &B,
    ) -> Result<(), CmsError> {
        let request = self
            .inner
            .http
            .post(self.url(&format!("/api/{collection}")))
            .json(body);
        let _: serde_json::Value = self.execute(request).await?;
        Ok(())
    }

    /// Create a document in an arbitrary collection, returning its id.
    ///
    /// Used by the seed tooling; the storefront itself only creates intake
    /// records through the typed [`ContentStore`] methods.
    pub async fn create_document<B: serde::Serialize>(
        &self,
        collection: &str,
        body: &B,
    ) -> Result<String, CmsError> {
        let request = self
            .inner
            .http
            .post(self.url(&format!("/api/{collection}")))
            .json(body);
        let response: serde_json::Value = self.execute(request).await?;
        Ok(response
            .get("doc")
            .and_then(|doc| doc.get("id"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    /// Replace the global with the given slug. Used by the seed tooling.
    pub async fn update_global<B: serde::Serialize>(
        &self,
        slug: &str,
        body: &B,
    ) -> Result<(), CmsError> {
        let request = self
            .inner
            .http
            .post(self.url(&format!("/api/globals/{slug}")))
            .json(body);
        let _: serde_json::Value = self.execute(request).await?;
        Ok(())
    }

    /// Unique lookup by slug: `where[slug][equals]` with `limit=1`.
    async fn find_by_slug<T: DeserializeOwned>(
        &self,
        collection: &str,
        slug: &str,
        depth: u8,
    ) -> Result<Option<T>, CmsError> {
        let params = vec![
            ("where[slug][equals]".to_string(), slug.to_string()),
            ("limit".to_string(), "1".to_string()),
            ("depth".to_string(), depth.to_string()),
        ];
        let page: Page<T> = self.get_list(collection, &params).await?;
        Ok(page.docs.into_iter().next())
    }
}

/// Build query parameters for a category query.
fn category_params(query: &CategoryQuery) -> Vec<(String, String)> {
    let mut params = vec![
        ("sort".to_string(), "name".to_string()),
        ("depth".to_string(), DEFAULT_CATEGORY_DEPTH.to_string()),
        (
            "limit".to_string(),
            query.limit.unwrap_or(CATEGORY_LIST_LIMIT).to_string(),
        ),
    ];

    let mut clause = 0;
    if query.featured_only {
        params.push((
            format!("where[and][{clause}][featured][equals]"),
            "true".to_string(),
        ));
        clause += 1;
    }
    match &query.parent {
        Some(ParentFilter::TopLevel) => {
            params.push((
                format!("where[and][{clause}][parent][exists]"),
                "false".to_string(),
            ));
        }
        Some(ParentFilter::Of(parent)) => {
            params.push((
                format!("where[and][{clause}][parent][equals]"),
                parent.to_string(),
            ));
        }
        None => {}
    }

    params
}

/// Build query parameters for a product filter.
fn filter_params(filter: &ProductFilter, params: &mut Vec<(String, String)>) {
    let mut clause = 0;
    let mut push = |key: String, value: String| {
        params.push((key, value));
    };

    if let Some(featured) = filter.featured {
        push(
            format!("where[and][{clause}][featured][equals]"),
            featured.to_string(),
        );
        clause += 1;
    }
    if let Some(category) = &filter.category {
        push(
            format!("where[and][{clause}][category][equals]"),
            category.to_string(),
        );
        clause += 1;
    }
    if let Some(status) = filter.status {
        push(
            format!("where[and][{clause}][status][equals]"),
            status.as_str().to_string(),
        );
        clause += 1;
    }
    if let Some(slug) = &filter.exclude_slug {
        push(
            format!("where[and][{clause}][slug][not_equals]"),
            slug.clone(),
        );
        clause += 1;
    }
    if let Some(text) = &filter.text_contains {
        // OR-group over title and the flattened description text the CMS
        // maintains alongside the rich-text field.
        push(
            format!("where[and][{clause}][or][0][title][contains]"),
            text.clone(),
        );
        push(
            format!("where[and][{clause}][or][1][descriptionText][contains]"),
            text.clone(),
        );
    }
}

fn product_params(query: &ProductQuery) -> Vec<(String, String)> {
    let mut params = vec![
        ("sort".to_string(), "-createdAt".to_string()),
        ("limit".to_string(), query.limit.to_string()),
        ("page".to_string(), query.page.max(1).to_string()),
        ("depth".to_string(), query.depth.to_string()),
    ];
    filter_params(&query.filter, &mut params);
    params
}

/// Categories are joined one level deep so their image and parent resolve.
const DEFAULT_CATEGORY_DEPTH: u8 = 1;

/// Upper bound on category list sizes; the catalog is small by design.
const CATEGORY_LIST_LIMIT: u32 = 100;

impl ContentStore for CmsClient {
    #[instrument(skip(self))]
    async fn find_categories(&self, query: &CategoryQuery) -> Result<Vec<Category>, CmsError> {
        let params = category_params(query);
        let fingerprint = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let key = CacheKey::Categories(fingerprint);

        if let Some(CacheValue::Categories(cached)) = self.inner.cache.get(&key).await {
            return Ok(cached.as_ref().clone());
        }

        let page: Page<Category> = self.get_list("categories", &params).await?;
        let categories = Arc::new(page.docs);
        self.inner
            .cache
            .insert(key, CacheValue::Categories(Arc::clone(&categories)))
            .await;
        Ok(categories.as_ref().clone())
    }

    #[instrument(skip(self))]
    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, CmsError> {
        self.find_by_slug("categories", slug, DEFAULT_CATEGORY_DEPTH)
            .await
    }

    #[instrument(skip(self, query), fields(page = query.page, limit = query.limit))]
    async fn find_products(&self, query: &ProductQuery) -> Result<Page<Product>, CmsError> {
        self.get_list("products", &product_params(query)).await
    }

    #[instrument(skip(self))]
    async fn find_product_by_slug(
        &self,
        slug: &str,
        depth: u8,
    ) -> Result<Option<Product>, CmsError> {
        self.find_by_slug("products", slug, depth).await
    }

    #[instrument(skip(self, filter))]
    async fn count_products(&self, filter: &ProductFilter) -> Result<u64, CmsError> {
        // A zero-width page still carries totalDocs.
        let mut params = vec![
            ("limit".to_string(), "1".to_string()),
            ("depth".to_string(), "0".to_string()),
        ];
        filter_params(filter, &mut params);
        let page: Page<serde_json::Value> = self.get_list("products", &params).await?;
        Ok(page.total_docs)
    }

    #[instrument(skip(self))]
    async fn site_settings(&self) -> Result<SiteSettings, CmsError> {
        if let Some(CacheValue::Settings(cached)) =
            self.inner.cache.get(&CacheKey::Settings).await
        {
            return Ok(cached.as_ref().clone());
        }

        let request = self.inner.http.get(self.url("/api/globals/site-settings"));
        let settings: SiteSettings = self.execute(request).await?;
        self.inner
            .cache
            .insert(
                CacheKey::Settings,
                CacheValue::Settings(Arc::new(settings.clone())),
            )
            .await;
        Ok(settings)
    }

    #[instrument(skip(self, message), fields(email = %message.email))]
    async fn create_contact_message(&self, message: &NewContactMessage) -> Result<(), CmsError> {
        self.create("messages", message).await
    }

    #[instrument(skip(self, offer), fields(email = %offer.email, product = %offer.product))]
    async fn create_offer(&self, offer: &NewOffer) -> Result<(), CmsError> {
        self.create("offers", offer).await
    }

    #[instrument(skip(self))]
    async fn subscriber_exists(&self, email: &str) -> Result<bool, CmsError> {
        let params = vec![
            ("where[email][equals]".to_string(), email.to_string()),
            ("limit".to_string(), "1".to_string()),
            ("depth".to_string(), "0".to_string()),
        ];
        let page: Page<serde_json::Value> = self.get_list("subscribers", &params).await?;
        Ok(page.total_docs > 0)
    }

    #[instrument(skip(self, subscriber), fields(email = %subscriber.email))]
    async fn create_subscriber(&self, subscriber: &NewSubscriber) -> Result<(), CmsError> {
        self.create("subscribers", subscriber).await
    }

    #[instrument(skip(self))]
    async fn delete_media(&self, id: &MediaId) -> Result<Option<Media>, CmsError> {
        let request = self
            .inner
            .http
            .delete(self.url(&format!("/api/media/{id}")));
        match self.execute::<DocResponse<Media>>(request).await {
            Ok(response) => Ok(Some(response.doc)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrenfield_core::{CategoryId, ProductStatus};

    #[test]
    fn product_params_and_combine_filters() {
        let query = ProductQuery {
            filter: ProductFilter {
                featured: Some(true),
                category: Some(CategoryId::new("c1")),
                status: Some(ProductStatus::Available),
                exclude_slug: None,
                text_contains: None,
            },
            limit: 4,
            page: 3,
            depth: 1,
        };
        let params = product_params(&query);

        assert!(params.contains(&("sort".to_string(), "-createdAt".to_string())));
        assert!(params.contains(&("limit".to_string(), "4".to_string())));
        assert!(params.contains(&("page".to_string(), "3".to_string())));
        assert!(params.contains(&(
            "where[and][0][featured][equals]".to_string(),
            "true".to_string()
        )));
        assert!(params.contains(&(
            "where[and][1][category][equals]".to_string(),
            "c1".to_string()
        )));
        assert!(params.contains(&(
            "where[and][2][status][equals]".to_string(),
            "available".to_string()
        )));
    }

    #[test]
    fn text_filter_becomes_or_group() {
        let filter = ProductFilter {
            text_contains: Some("Georgian".to_string()),
            ..ProductFilter::default()
        };
        let mut params = Vec::new();
        filter_params(&filter, &mut params);

        assert!(params.contains(&(
            "where[and][0][or][0][title][contains]".to_string(),
            "Georgian".to_string()
        )));
        assert!(params.contains(&(
            "where[and][0][or][1][descriptionText][contains]".to_string(),
            "Georgian".to_string()
        )));
    }

    #[test]
    fn top_level_categories_use_exists_false() {
        let query = CategoryQuery {
            featured_only: false,
            parent: Some(ParentFilter::TopLevel),
            limit: None,
        };
        let params = category_params(&query);
        assert!(params.contains(&(
            "where[and][0][parent][exists]".to_string(),
            "false".to_string()
        )));
        assert!(params.contains(&("sort".to_string(), "name".to_string())));
    }
}
