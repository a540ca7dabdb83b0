//! Search route handler.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use wrenfield_core::view::ProductCard;

use crate::catalog::{DEFAULT_PAGE_SIZE, SearchParams};
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    /// Category slug to restrict results to.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub page: Option<u32>,
}

/// Search response body.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<ProductCard>,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    const fn empty() -> Self {
        Self {
            results: Vec::new(),
            total: 0,
            error: None,
        }
    }
}

/// Search the catalog.
///
/// GET /api/search?q=...&category=...
///
/// A blank query answers an empty result set without querying the store.
/// An unknown category slug also answers empty: a stale filter link should
/// degrade to "no results", not an error page.
#[instrument(skip(state), fields(q = %params.q))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    if params.q.trim().is_empty() {
        return (StatusCode::OK, Json(SearchResponse::empty()));
    }

    // Resolve the category slug, if one was given.
    let category = match &params.category {
        Some(slug) if !slug.trim().is_empty() => {
            match state.catalog().category_by_slug(slug.trim()).await {
                Ok(Some(category)) => Some(category.id),
                Ok(None) => return (StatusCode::OK, Json(SearchResponse::empty())),
                Err(e) => {
                    tracing::error!(error = %e, "Search category lookup failed");
                    sentry::capture_error(&e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(SearchResponse {
                            error: Some("Search is temporarily unavailable.".to_string()),
                            ..SearchResponse::empty()
                        }),
                    );
                }
            }
        }
        _ => None,
    };

    let search = SearchParams {
        query: params.q.clone(),
        category,
        limit: params.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100),
        page: params.page.unwrap_or(1).max(1),
    };

    match state.catalog().search(&search).await {
        Ok(page) => {
            let total = page.total_docs;
            let results = page.docs.iter().map(ProductCard::from_product).collect();
            (
                StatusCode::OK,
                Json(SearchResponse {
                    results,
                    total,
                    error: None,
                }),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Search failed");
            sentry::capture_error(&e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResponse {
                    error: Some("Search is temporarily unavailable.".to_string()),
                    ..SearchResponse::empty()
                }),
            )
        }
    }
}
