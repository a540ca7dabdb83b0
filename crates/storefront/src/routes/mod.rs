//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings the CMS)
//!
//! # Catalog (read)
//! GET  /api/categories          - Category listing (?featured, ?parents)
//! GET  /api/categories/{slug}   - Category detail with subcategories
//! GET  /api/products            - Paged product listing
//! GET  /api/products/{slug}     - Product detail with related products
//! GET  /api/menu                - Navigation menu
//! GET  /api/settings            - Site settings
//! GET  /api/search              - Product search (?q, ?category)
//!
//! # Intake forms (rate limited)
//! POST /api/contact             - Contact form
//! POST /api/newsletter          - Newsletter signup
//! POST /api/offers              - Purchase offer
//! ```

pub mod catalog;
pub mod contact;
pub mod newsletter;
pub mod offers;
pub mod search;

use std::sync::LazyLock;

use axum::{
    Router,
    routing::{get, post},
};
use regex::Regex;
use serde::Serialize;

use crate::middleware::rate_limit;
use crate::state::AppState;

/// Email shape check: non-whitespace local part, `@`, domain with a dot.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Basic email validation.
///
/// Deliberately shallow; deliverability is the mail server's problem.
pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Response body shared by the intake form endpoints.
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormResponse {
    pub const fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Create the intake form routes router (rate limited).
pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(contact::submit))
        .route("/newsletter", post(newsletter::subscribe))
        .route("/offers", post(offers::submit))
        .layer(rate_limit::form_rate_limiter())
}

/// Create the catalog read routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(catalog::list_categories))
        .route("/categories/{slug}", get(catalog::category_detail))
        .route("/products", get(catalog::list_products))
        .route("/products/{slug}", get(catalog::product_detail))
        .route("/menu", get(catalog::menu))
        .route("/settings", get(catalog::settings))
        .route("/search", get(search::search))
        .layer(rate_limit::api_rate_limiter())
}

/// Create all /api routes for the storefront.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(catalog_routes()).merge(form_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name@domain.co.uk"));
        assert!(is_valid_email("a@b.c"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@"));
        assert!(!is_valid_email("test@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("test@domain")); // no TLD
        assert!(!is_valid_email("two words@example.com"));
        assert!(!is_valid_email("test"));
    }
}
