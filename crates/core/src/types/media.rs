//! Uploaded media records and display-URL resolution.
//!
//! Uploads are stored in S3-compatible object storage with a fixed set of
//! derived sizes generated at upload time. Resolution always prefers the
//! canonical full-size URL; derived sizes exist for thumbnails only and are
//! used as fallbacks when the original is unavailable.

use serde::{Deserialize, Serialize};

use super::id::MediaId;
use super::reference::Reference;

/// Named derived-size presets generated at upload time.
///
/// The set is closed: the upload pipeline only ever produces these two,
/// plus the size-capped original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// 400x400 contain, for dense grids.
    Thumbnail,
    /// 800x800 contain, for cards and menu tiles.
    Card,
}

impl ImageSize {
    /// Fallback preference order when no canonical URL and no preferred
    /// variant exist: larger sizes first.
    pub const FALLBACK_ORDER: [Self; 2] = [Self::Card, Self::Thumbnail];

    /// The preset's wire name, matching the key in the stored size map.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Card => "card",
        }
    }

    /// The bounding box the variant is resized to fit within.
    #[must_use]
    pub const fn max_dimensions(self) -> (u32, u32) {
        match self {
            Self::Thumbnail => (400, 400),
            Self::Card => (800, 800),
        }
    }
}

/// The bounding box the original upload is capped to.
pub const ORIGINAL_MAX_DIMENSIONS: (u32, u32) = (1600, 1600);

/// A single derived size variant of an upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeVariant {
    /// URL of the derived file, if generation succeeded.
    #[serde(default)]
    pub url: Option<String>,
    /// Object-storage filename of the derived file.
    #[serde(default)]
    pub filename: Option<String>,
}

/// The fixed map of derived sizes attached to a media record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaSizes {
    #[serde(default)]
    pub thumbnail: Option<SizeVariant>,
    #[serde(default)]
    pub card: Option<SizeVariant>,
}

impl MediaSizes {
    /// Get the variant for a named size, if present.
    #[must_use]
    pub const fn variant(&self, size: ImageSize) -> Option<&SizeVariant> {
        match size {
            ImageSize::Thumbnail => self.thumbnail.as_ref(),
            ImageSize::Card => self.card.as_ref(),
        }
    }

    /// Get a non-empty URL for a named size, if present.
    #[must_use]
    pub fn variant_url(&self, size: ImageSize) -> Option<&str> {
        self.variant(size)
            .and_then(|v| v.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// An uploaded media record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub id: MediaId,
    pub filename: String,
    /// Alternative text for accessibility.
    #[serde(default)]
    pub alt: Option<String>,
    /// Canonical full-size URL (the capped original).
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub sizes: MediaSizes,
}

impl Media {
    /// Resolve the best available display URL.
    ///
    /// The canonical full-size URL always wins over a requested derived
    /// size: derived sizes are for thumbnails only, and detail views want
    /// maximum fidelity when the original is available. Failing that, the
    /// preferred variant, then any variant in [`ImageSize::FALLBACK_ORDER`].
    #[must_use]
    pub fn resolve_url(&self, preferred: Option<ImageSize>) -> Option<&str> {
        if let Some(url) = self.url.as_deref().filter(|url| !url.is_empty()) {
            return Some(url);
        }
        if let Some(size) = preferred
            && let Some(url) = self.sizes.variant_url(size)
        {
            return Some(url);
        }
        ImageSize::FALLBACK_ORDER
            .iter()
            .find_map(|&size| self.sizes.variant_url(size))
    }

    /// Object-storage filenames for every derived variant that exists.
    pub fn variant_filenames(&self) -> impl Iterator<Item = &str> {
        ImageSize::FALLBACK_ORDER
            .iter()
            .filter_map(|&size| self.sizes.variant(size))
            .filter_map(|variant| variant.filename.as_deref())
    }
}

impl Reference<Media> {
    /// Resolve a display URL through a possibly unjoined reference.
    ///
    /// An unresolved reference yields an empty string; the caller is
    /// expected to have requested a sufficiently deep join if a URL is
    /// needed, and to supply its own placeholder on empty.
    #[must_use]
    pub fn display_url(&self, preferred: Option<ImageSize>) -> String {
        match self {
            Self::Resolved(media) => media
                .resolve_url(preferred)
                .map_or_else(String::new, str::to_string),
            Self::Unresolved(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(url: Option<&str>, thumbnail: Option<&str>, card: Option<&str>) -> Media {
        let variant = |url: Option<&str>| {
            url.map(|u| SizeVariant {
                url: Some(u.to_string()),
                filename: None,
            })
        };
        Media {
            id: MediaId::new("m1"),
            filename: "clock.jpg".to_string(),
            alt: None,
            url: url.map(str::to_string),
            sizes: MediaSizes {
                thumbnail: variant(thumbnail),
                card: variant(card),
            },
        }
    }

    #[test]
    fn full_size_wins_over_requested_variant() {
        let media = media(Some("/clock.jpg"), Some("/clock-400.jpg"), Some("/clock-800.jpg"));
        assert_eq!(media.resolve_url(Some(ImageSize::Card)), Some("/clock.jpg"));
    }

    #[test]
    fn preferred_variant_used_when_no_canonical_url() {
        let media = media(None, Some("/clock-400.jpg"), Some("/clock-800.jpg"));
        assert_eq!(
            media.resolve_url(Some(ImageSize::Thumbnail)),
            Some("/clock-400.jpg")
        );
    }

    #[test]
    fn fallback_prefers_card_over_thumbnail() {
        let media = media(None, Some("/clock-400.jpg"), Some("/clock-800.jpg"));
        assert_eq!(media.resolve_url(None), Some("/clock-800.jpg"));
    }

    #[test]
    fn no_urls_resolves_to_none() {
        let media = media(None, None, None);
        assert_eq!(media.resolve_url(Some(ImageSize::Card)), None);
    }

    #[test]
    fn resolution_is_idempotent() {
        let media = media(None, Some("/clock-400.jpg"), None);
        let first = media.resolve_url(Some(ImageSize::Card)).map(str::to_string);
        let second = media.resolve_url(Some(ImageSize::Card)).map(str::to_string);
        assert_eq!(first, second);
    }

    #[test]
    fn unresolved_reference_yields_empty_string() {
        let reference: Reference<Media> = Reference::Unresolved("m1".to_string());
        assert_eq!(reference.display_url(Some(ImageSize::Card)), "");
    }

    #[test]
    fn empty_string_url_is_treated_as_absent() {
        let media = media(Some(""), None, Some("/clock-800.jpg"));
        assert_eq!(media.resolve_url(None), Some("/clock-800.jpg"));
    }
}
