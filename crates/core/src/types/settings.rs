//! Site-wide settings (a CMS global/singleton record).

use serde::{Deserialize, Serialize};

/// Hero banner copy for the home page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
}

/// A social-media link shown in the footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Singleton site settings.
///
/// Every field defaults so a partially filled-in global still deserializes;
/// presentation code handles empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    /// Postal address as free text, one line per newline.
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub hero: Hero,
    #[serde(default)]
    pub footer_text: String,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

impl SiteSettings {
    /// The address split into display lines, blank lines removed.
    pub fn address_lines(&self) -> impl Iterator<Item = &str> {
        self.address
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}
