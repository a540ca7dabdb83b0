//! CLI command implementations.

pub mod check;
pub mod purge;
pub mod seed;

use secrecy::SecretString;

use wrenfield_storefront::cms::CmsClient;
use wrenfield_storefront::config::CmsConfig;

/// Build a CMS client from `CMS_BASE_URL` / `CMS_API_KEY`.
pub fn cms_client() -> Result<CmsClient, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let base_url = std::env::var("CMS_BASE_URL").map_err(|_| "CMS_BASE_URL not set")?;
    let api_key = std::env::var("CMS_API_KEY")
        .map(SecretString::from)
        .map_err(|_| "CMS_API_KEY not set")?;

    Ok(CmsClient::new(&CmsConfig { base_url, api_key }))
}
