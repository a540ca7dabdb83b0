//! Seed the CMS with catalog data from a YAML fixture.
//!
//! Reads categories, products, and site settings from a YAML file and
//! creates them through the CMS REST API. Categories are created in two
//! passes so children can reference their parent's freshly assigned id.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use wrenfield_core::richtext::{Block, RichText, Span};

/// A category in the seed fixture. `parent` is the parent's slug.
#[derive(Debug, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub parent: Option<String>,
}

/// A product in the seed fixture. `category` is the category's slug and
/// `description` is plain text, one paragraph per line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedProduct {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub price: Decimal,
    #[serde(default)]
    pub price_label: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub status: Option<String>,
}

/// The whole seed fixture.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

/// Seed the catalog from a YAML fixture.
///
/// # Errors
///
/// Returns an error if environment variables are missing, the file cannot
/// be read or parsed, or a CMS request fails.
pub async fn catalog(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading seed fixture");
    let content = tokio::fs::read_to_string(path).await?;
    let fixture: SeedFile = serde_yaml::from_str(&content)?;
    info!(
        categories = fixture.categories.len(),
        products = fixture.products.len(),
        "Parsed fixture"
    );

    let client = super::cms_client()?;

    // Categories: top-level first, then children, so parents resolve to ids.
    let mut category_ids: HashMap<&str, String> = HashMap::new();
    for pass in [false, true] {
        for category in fixture.categories.iter().filter(|c| c.parent.is_some() == pass) {
            let parent_id = match &category.parent {
                Some(slug) => Some(
                    category_ids
                        .get(slug.as_str())
                        .ok_or_else(|| format!("Unknown parent category: {slug}"))?
                        .clone(),
                ),
                None => None,
            };
            let body = json!({
                "name": category.name,
                "slug": category.slug,
                "description": category.description,
                "featured": category.featured,
                "parent": parent_id,
            });
            let id = client.create_document("categories", &body).await?;
            info!(slug = %category.slug, id = %id, "Created category");
            category_ids.insert(category.slug.as_str(), id);
        }
    }

    for product in &fixture.products {
        let category_id = category_ids
            .get(product.category.as_str())
            .ok_or_else(|| format!("Unknown category for product: {}", product.category))?;
        let body = json!({
            "title": product.title,
            "slug": product.slug,
            "description": paragraphs(product.description.as_deref().unwrap_or_default()),
            "category": category_id,
            "price": product.price,
            "priceLabel": product.price_label.as_deref().unwrap_or("asking"),
            "featured": product.featured,
            "status": product.status.as_deref().unwrap_or("available"),
        });
        let id = client.create_document("products", &body).await?;
        info!(slug = %product.slug, id = %id, "Created product");
    }

    if let Some(settings) = &fixture.settings {
        client.update_global("site-settings", settings).await?;
        info!("Updated site settings");
    }

    info!("Seeding complete");
    Ok(())
}

/// Turn plain text into rich-text paragraph blocks, one per non-empty line.
fn paragraphs(text: &str) -> RichText {
    RichText(
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Block::Paragraph {
                children: vec![Span::new(line)],
            })
            .collect(),
    )
}
