//! Newsletter subscription route handler.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use wrenfield_core::{NewSubscriber, SubscriberStatus};

use super::{FormResponse, is_valid_email};
use crate::cms::ContentStore;
use crate::state::AppState;

/// Newsletter subscription form data.
///
/// `email` is optional at the wire level so an absent field answers 400
/// from validation rather than 422 from the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: Option<String>,
}

/// Subscribe to the newsletter.
///
/// POST /api/newsletter
///
/// Duplicate signups answer 409 rather than creating a second record, so
/// the subscriber list stays unique per email.
#[instrument(skip(state, form))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(form): Json<SubscribeForm>,
) -> impl IntoResponse {
    process(state.store(), form).await
}

/// Validate and persist a subscription.
pub(crate) async fn process<S: ContentStore>(
    store: &S,
    form: SubscribeForm,
) -> (StatusCode, Json<FormResponse>) {
    let email = form.email.as_deref().unwrap_or_default().trim().to_lowercase();

    if !is_valid_email(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(FormResponse::error("Please enter a valid email address.")),
        );
    }

    match store.subscriber_exists(&email).await {
        Ok(true) => {
            tracing::info!("Duplicate newsletter signup");
            return (
                StatusCode::CONFLICT,
                Json(FormResponse::error("This email is already subscribed.")),
            );
        }
        Ok(false) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed to check subscriber");
            sentry::capture_error(&e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FormResponse::error(
                    "Something went wrong. Please try again.",
                )),
            );
        }
    }

    let record = NewSubscriber {
        email,
        status: SubscriberStatus::Subscribed,
    };

    match store.create_subscriber(&record).await {
        Ok(()) => {
            tracing::info!("Newsletter subscription successful");
            (StatusCode::OK, Json(FormResponse::ok()))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to store subscriber");
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
