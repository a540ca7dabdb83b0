//! Verify CMS connectivity and print catalog counts.

use tracing::info;

use wrenfield_storefront::catalog::{Catalog, CategoryOptions, ProductListOptions};

/// Ping the CMS and report what the catalog contains.
///
/// # Errors
///
/// Returns an error if environment variables are missing or the CMS is
/// unreachable.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::new(super::cms_client()?);

    let settings = catalog.site_settings().await?;
    info!(site = %settings.site_name, "CMS reachable");

    let categories = catalog.list_categories(CategoryOptions::default()).await?;
    let products = catalog
        .list_products(ProductListOptions {
            limit: 1,
            ..ProductListOptions::default()
        })
        .await?;

    info!("Catalog summary");
    info!("  Categories: {}", categories.len());
    info!("  Products: {}", products.total_docs);

    let menu = catalog.build_menu().await?;
    info!("  Menu entries: {}", menu.len());
    for entry in &menu {
        info!(
            "    {} ({} subcategories, {} featured)",
            entry.name,
            entry.subcategories.len(),
            entry.featured.len()
        );
    }

    Ok(())
}
