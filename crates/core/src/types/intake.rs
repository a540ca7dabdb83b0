//! Intake payloads created by the public forms.
//!
//! The storefront only ever creates these records with their initial
//! status; all later lifecycle transitions (read, contacted, replied,
//! closed, archived) happen through the CMS admin.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Lifecycle status of a contact message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    New,
    Read,
    Replied,
    Archived,
}

/// Lifecycle status of a purchase offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    #[default]
    New,
    Contacted,
    Closed,
}

/// Subscription state of a newsletter subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberStatus {
    #[default]
    Subscribed,
    Unsubscribed,
}

/// A new contact-form message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub status: MessageStatus,
}

/// A new purchase offer against a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOffer {
    /// The product the offer is for (always a bare id on create).
    pub product: ProductId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_amount: Option<Decimal>,
    pub message: String,
    #[serde(default)]
    pub status: OfferStatus,
}

/// A new newsletter subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubscriber {
    pub email: String,
    #[serde(default)]
    pub status: SubscriberStatus,
}
