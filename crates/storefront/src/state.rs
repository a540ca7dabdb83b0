//! Shared application state.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::cms::CmsClient;
use crate::config::StorefrontConfig;

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog<CmsClient>,
}

impl AppState {
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let client = CmsClient::new(&config.cms);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::new(client),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog<CmsClient> {
        &self.inner.catalog
    }

    /// Direct access to the content store, for write operations.
    #[must_use]
    pub fn store(&self) -> &CmsClient {
        self.inner.catalog.store()
    }
}
