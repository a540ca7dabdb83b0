//! Media-deletion cascade.
//!
//! When a product edit removes images (or a media record is deleted
//! outright), the underlying files must be purged from object storage:
//! the capped original plus every derived size variant. Cleanup is
//! best-effort and sequential; a per-item failure is logged and skipped
//! rather than aborting the surrounding mutation, because an orphaned
//! file is a storage-cost concern, not a correctness one.

use wrenfield_core::{Media, MediaId};

use crate::cms::ContentStore;
use crate::storage::ObjectStorage;

/// Best-effort cleanup of media records and their stored files.
pub struct MediaCleanup<'a, S, O> {
    store: &'a S,
    storage: &'a O,
}

impl<'a, S: ContentStore, O: ObjectStorage> MediaCleanup<'a, S, O> {
    pub const fn new(store: &'a S, storage: &'a O) -> Self {
        Self { store, storage }
    }

    /// Purge images removed by a product update.
    ///
    /// Compares the old and new image-reference sets and issues one
    /// delete per removed media record, each followed by deletion of the
    /// record's files. Returns the number of records purged.
    pub async fn purge_removed_images(&self, old: &[MediaId], new: &[MediaId]) -> usize {
        let mut purged = 0;
        for id in old {
            if new.contains(id) {
                continue;
            }
            match self.store.delete_media(id).await {
                Ok(Some(media)) => {
                    self.purge_files(&media).await;
                    purged += 1;
                }
                Ok(None) => {
                    tracing::warn!(media_id = %id, "Media record already gone, skipping");
                }
                Err(e) => {
                    tracing::warn!(media_id = %id, error = %e, "Failed to delete media record, skipping");
                }
            }
        }
        purged
    }

    /// Delete a media record's files: the original, then each size
    /// variant that exists.
    pub async fn purge_files(&self, media: &Media) {
        self.delete_object(&media.filename).await;
        for filename in media.variant_filenames() {
            self.delete_object(filename).await;
        }
    }

    async fn delete_object(&self, key: &str) {
        if let Err(e) = self.storage.delete(key).await {
            tracing::warn!(key = %key, error = %e, "Failed to delete object, skipping");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrenfield_core::{MediaSizes, SizeVariant};

    use crate::cms::memory::MemoryStore;
    use crate::storage::MemoryObjectStorage;

    fn media(id: &str) -> Media {
        let variant = |suffix: &str| {
            Some(SizeVariant {
                url: Some(format!("/media/{id}-{suffix}.jpg")),
                filename: Some(format!("{id}-{suffix}.jpg")),
            })
        };
        Media {
            id: MediaId::new(id),
            filename: format!("{id}.jpg"),
            alt: None,
            url: Some(format!("/media/{id}.jpg")),
            sizes: MediaSizes {
                thumbnail: variant("400"),
                card: variant("800"),
            },
        }
    }

    #[tokio::test]
    async fn purges_each_removed_image_and_its_variants() {
        let store = MemoryStore::new();
        for id in ["m1", "m2", "m3"] {
            store.insert_media(media(id));
        }
        let storage = MemoryObjectStorage::new();
        let cleanup = MediaCleanup::new(&store, &storage);

        let old: Vec<MediaId> = ["m1", "m2", "m3"].iter().map(|id| MediaId::new(*id)).collect();
        let purged = cleanup.purge_removed_images(&old, &[]).await;

        assert_eq!(purged, 3);
        let deleted = storage.deleted_keys();
        // Original plus two variants per media record.
        assert_eq!(deleted.len(), 9);
        for id in ["m1", "m2", "m3"] {
            assert!(deleted.contains(&format!("{id}.jpg")));
            assert!(deleted.contains(&format!("{id}-400.jpg")));
            assert!(deleted.contains(&format!("{id}-800.jpg")));
        }
    }

    #[tokio::test]
    async fn retained_images_are_untouched() {
        let store = MemoryStore::new();
        store.insert_media(media("m1"));
        store.insert_media(media("m2"));
        let storage = MemoryObjectStorage::new();
        let cleanup = MediaCleanup::new(&store, &storage);

        let old: Vec<MediaId> = ["m1", "m2"].iter().map(|id| MediaId::new(*id)).collect();
        let new: Vec<MediaId> = vec![MediaId::new("m1")];
        let purged = cleanup.purge_removed_images(&old, &new).await;

        assert_eq!(purged, 1);
        assert!(!storage.deleted_keys().contains(&"m1.jpg".to_string()));
    }

    #[tokio::test]
    async fn missing_media_record_is_skipped_not_fatal() {
        let store = MemoryStore::new();
        store.insert_media(media("m2"));
        let storage = MemoryObjectStorage::new();
        let cleanup = MediaCleanup::new(&store, &storage);

        let old: Vec<MediaId> = ["m1", "m2"].iter().map(|id| MediaId::new(*id)).collect();
        let purged = cleanup.purge_removed_images(&old, &[]).await;

        // m1 is already gone; m2 still purges.
        assert_eq!(purged, 1);
        assert!(storage.deleted_keys().contains(&"m2.jpg".to_string()));
    }

    #[tokio::test]
    async fn media_without_variants_deletes_only_the_original() {
        let store = MemoryStore::new();
        let mut bare = media("m1");
        bare.sizes = MediaSizes::default();
        store.insert_media(bare);
        let storage = MemoryObjectStorage::new();
        let cleanup = MediaCleanup::new(&store, &storage);

        let old = vec![MediaId::new("m1")];
        cleanup.purge_removed_images(&old, &[]).await;
        assert_eq!(storage.deleted_keys(), vec!["m1.jpg".to_string()]);
    }
}
