//! Purchase offer route handler.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use wrenfield_core::{NewOffer, OfferStatus};

use super::{FormResponse, is_valid_email};
use crate::cms::{ContentStore, DETAIL_DEPTH};
use crate::state::AppState;

/// Purchase offer form data.
///
/// Required fields are optional at the wire level so an absent field
/// answers 400 from validation rather than 422 from the extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferForm {
    #[serde(default)]
    pub product_slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub offer_amount: Option<Decimal>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Submit a purchase offer.
///
/// POST /api/offers
///
/// The offer is recorded against the product resolved from `productSlug`;
/// an unknown slug answers 404 and creates nothing.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<OfferForm>,
) -> impl IntoResponse {
    process(state.store(), form).await
}

/// Validate, resolve the product, and persist an offer.
pub(crate) async fn process<S: ContentStore>(
    store: &S,
    form: OfferForm,
) -> (StatusCode, Json<FormResponse>) {
    let email = form.email.as_deref().unwrap_or_default().trim().to_lowercase();

    if !is_valid_email(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(FormResponse::error("Please enter a valid email address.")),
        );
    }

    let name = form.name.as_deref().unwrap_or_default().trim();
    let message = form.message.as_deref().unwrap_or_default().trim();
    let slug = form.product_slug.as_deref().unwrap_or_default().trim();
    if name.is_empty() || message.is_empty() || slug.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(FormResponse::error(
                "Product, name, and message are required.",
            )),
        );
    }

    // Resolve the slug to a product id before creating anything.
    let product = match store.find_product_by_slug(slug, DETAIL_DEPTH).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(FormResponse::error("This item is no longer available.")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up product for offer");
            sentry::capture_error(&e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FormResponse::error(
                    "Something went wrong. Please try again.",
                )),
            );
        }
    };

    let record = NewOffer {
        product: product.id,
        name: name.to_string(),
        email,
        phone: form
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from),
        offer_amount: form.offer_amount,
        message: message.to_string(),
        status: OfferStatus::New,
    };

    match store.create_offer(&record).await {
        Ok(()) => {
            tracing::info!("Offer received");
            (StatusCode::OK, Json(FormResponse::ok()))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to store offer");
            sentry::capture_error(&e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FormResponse::error(
                    "Something went wrong. Please try again.",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wrenfield_core::richtext::RichText;
    use wrenfield_core::{PriceLabel, Product, ProductId, ProductStatus, Reference};

    use crate::cms::memory::MemoryStore;

    fn store_with_bureau() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_product(Product {
            id: ProductId::new("p1"),
            title: "Queen Anne Walnut Bureau".to_string(),
            slug: "queen-anne-walnut-bureau".to_string(),
            description: RichText::new(),
            images: Vec::new(),
            category: Reference::Unresolved("c1".to_string()),
            price: Decimal::from(9_800),
            price_label: PriceLabel::Offer,
            featured: false,
            status: ProductStatus::Pending,
            created_at: Utc::now(),
        });
        store
    }

    fn offer(slug: &str) -> OfferForm {
        OfferForm {
            product_slug: Some(slug.to_string()),
            name: Some("Test Person".to_string()),
            email: Some("buyer@example.com".to_string()),
            offer_amount: Some(Decimal::from(8_500)),
            message: Some("Would you consider 8,500?".to_string()),
            ..OfferForm::default()
        }
    }

    #[tokio::test]
    async fn unknown_product_is_not_found_and_creates_nothing() {
        let store = store_with_bureau();
        let (status, _) = process(&store, offer("no-such-lot")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(store.offer_count(), 0);
    }

    #[tokio::test]
    async fn missing_field_is_bad_request_not_unprocessable() {
        let store = store_with_bureau();
        // productSlug omitted entirely: the form still deserializes and the
        // handler answers 400.
        let form: OfferForm = serde_json::from_str(
            r#"{"name":"Test","email":"buyer@example.com","message":"Offer"}"#,
        )
        .expect("deserialize");
        let (status, _) = process(&store, form).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(store.offer_count(), 0);
    }

    #[tokio::test]
    async fn valid_offer_is_recorded_against_the_product() {
        let store = store_with_bureau();
        let (status, body) = process(&store, offer("queen-anne-walnut-bureau")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(store.offer_count(), 1);
    }
}
