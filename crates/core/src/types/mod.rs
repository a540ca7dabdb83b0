//! Domain types shared across Wrenfield components.

mod catalog;
mod id;
mod intake;
mod media;
mod reference;
mod settings;

pub use catalog::{Category, PriceLabel, Product, ProductStatus};
pub use id::{CategoryId, MediaId, ProductId};
pub use intake::{
    MessageStatus, NewContactMessage, NewOffer, NewSubscriber, OfferStatus, SubscriberStatus,
};
pub use media::{ImageSize, Media, MediaSizes, SizeVariant};
pub use reference::Reference;
pub use settings::{Hero, SiteSettings, SocialLink};
