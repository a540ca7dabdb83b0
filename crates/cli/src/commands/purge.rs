//! Purge media records and their stored files.
//!
//! Deletes each media record through the CMS, then removes the original
//! file and every size variant from object storage. Per-item failures are
//! logged and skipped.

use tracing::{info, warn};

use wrenfield_core::MediaId;
use wrenfield_storefront::cms::CmsClient;
use wrenfield_storefront::config::StorefrontConfig;
use wrenfield_storefront::media::MediaCleanup;
use wrenfield_storefront::storage::S3Storage;

/// Purge the given media ids.
///
/// # Errors
///
/// Returns an error if configuration is missing; per-item delete failures
/// only reduce the purge count.
pub async fn run(ids: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let Some(storage_config) = &config.storage else {
        return Err("S3_ENDPOINT not set; object storage is required for purging".into());
    };

    let store = CmsClient::new(&config.cms);
    let storage = S3Storage::new(storage_config);
    let cleanup = MediaCleanup::new(&store, &storage);

    let ids: Vec<MediaId> = ids.iter().map(|id| MediaId::new(id.as_str())).collect();
    let purged = cleanup.purge_removed_images(&ids, &[]).await;

    info!(purged, requested = ids.len(), "Media purge complete");
    if purged < ids.len() {
        warn!(
            skipped = ids.len() - purged,
            "Some records were missing or failed; see warnings above"
        );
    }
    Ok(())
}
