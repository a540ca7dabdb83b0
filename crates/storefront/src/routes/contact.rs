//! Contact form route handler.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use wrenfield_core::{MessageStatus, NewContactMessage};

use super::{FormResponse, is_valid_email};
use crate::cms::ContentStore;
use crate::state::AppState;

/// Contact form data.
///
/// Every field is optional at the wire level so an absent field reaches
/// the handler's validation (and a 400) instead of being rejected by the
/// extractor with a 422.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Submit a contact message.
///
/// POST /api/contact
///
/// Persists the message as an intake record with status `new`, where the
/// dealer picks it up in the admin panel.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> impl IntoResponse {
    process(state.store(), form).await
}

/// Validate and persist a contact submission.
pub(crate) async fn process<S: ContentStore>(
    store: &S,
    form: ContactForm,
) -> (StatusCode, Json<FormResponse>) {
    let email = form.email.as_deref().unwrap_or_default().trim().to_lowercase();

    if !is_valid_email(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(FormResponse::error("Please enter a valid email address.")),
        );
    }

    let name = form.name.as_deref().unwrap_or_default().trim();
    let subject = form.subject.as_deref().unwrap_or_default().trim();
    let message = form.message.as_deref().unwrap_or_default().trim();
    if name.is_empty() || subject.is_empty() || message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(FormResponse::error(
                "Name, subject, and message are required.",
            )),
        );
    }

    let record = NewContactMessage {
        name: name.to_string(),
        email,
        subject: subject.to_string(),
        message: message.to_string(),
        status: MessageStatus::New,
    };

    match store.create_contact_message(&record).await {
        Ok(()) => {
            tracing::info!("Contact message received");
            (StatusCode::OK, Json(FormResponse::ok()))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to store contact message");
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
