//! Disk-backed media store.
//!
//! Uploaded blobs are written under the configured media directory with a
//! UUID-based name (the original filename is kept only as metadata), and are
//! served over HTTP by the site binary. Deletion is best-effort: the `media`
//! row is authoritative, and a failed unlink only leaves an orphaned file.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use verdant_core::MediaKind;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Errors that can occur in the media store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to the media directory.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    public_base: String,
}

impl MediaStore {
    /// Create a store rooted at `root`, serving blobs under `public_base`.
    #[must_use]
    pub fn new(root: PathBuf, public_base: String) -> Self {
        Self { root, public_base }
    }

    /// Ensure the media directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Write a blob, returning its stored name and public URL.
    ///
    /// The stored name is a fresh UUID with the extension implied by the
    /// content type, so uploads can never collide or traverse paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(
        &self,
        kind: MediaKind,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredBlob, StorageError> {
        let stored_name = format!("{}.{}", Uuid::new_v4(), extension_for(kind, content_type));
        let path = self.root.join(&stored_name);

        tokio::fs::write(&path, bytes).await?;

        let url = format!("{}/{stored_name}", self.public_base.trim_end_matches('/'));
        Ok(StoredBlob { stored_name, url })
    }

    /// Remove a blob, best-effort.
    ///
    /// A missing or locked file is logged and swallowed; callers have
    /// already deleted the authoritative row.
    pub async fn delete_best_effort(&self, stored_name: &str) {
        // The stored name is generated by us, but never trust a path from the DB blindly
        if Path::new(stored_name).components().count() != 1 {
            tracing::warn!(stored_name, "Refusing to unlink suspicious stored name");
            return;
        }

        let path = self.root.join(stored_name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(error = %e, path = %path.display(), "Media blob unlink failed");
        }
    }
}

/// A blob that has been written to the store.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    /// Name on disk.
    pub stored_name: String,
    /// Public path the blob is served under.
    pub url: String,
}

/// File extension for a stored blob.
fn extension_for(kind: MediaKind, content_type: &str) -> &'static str {
    match (kind, content_type) {
        (MediaKind::Image, "image/png") => "png",
        (MediaKind::Image, "image/webp") => "webp",
        (MediaKind::Image, "image/gif") => "gif",
        (MediaKind::Image, "image/svg+xml") => "svg",
        (MediaKind::Image, _) => "jpg",
        (MediaKind::Pdf, _) => "pdf",
        (MediaKind::Video, _) => "mp4",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store() -> MediaStore {
        let dir = std::env::temp_dir().join(format!("verdant-media-{}", Uuid::new_v4()));
        MediaStore::new(dir, "/media".to_string())
    }

    #[tokio::test]
    async fn test_save_writes_blob_and_builds_url() {
        let store = temp_store();
        store.ensure_root().await.unwrap();

        let blob = store
            .save(MediaKind::Image, "image/png", b"not really a png")
            .await
            .unwrap();

        assert!(blob.stored_name.ends_with(".png"));
        assert_eq!(blob.url, format!("/media/{}", blob.stored_name));

        let on_disk = tokio::fs::read(store.root.join(&blob.stored_name))
            .await
            .unwrap();
        assert_eq!(on_disk, b"not really a png");
    }

    #[tokio::test]
    async fn test_stored_names_are_unique() {
        let store = temp_store();
        store.ensure_root().await.unwrap();

        let a = store.save(MediaKind::Pdf, "application/pdf", b"a").await.unwrap();
        let b = store.save(MediaKind::Pdf, "application/pdf", b"b").await.unwrap();
        assert_ne!(a.stored_name, b.stored_name);
    }

    #[tokio::test]
    async fn test_delete_best_effort_swallows_missing() {
        let store = temp_store();
        store.ensure_root().await.unwrap();

        // Must not panic or error
        store.delete_best_effort("no-such-file.png").await;
    }

    #[tokio::test]
    async fn test_delete_best_effort_refuses_traversal() {
        let store = temp_store();
        store.ensure_root().await.unwrap();

        // A traversal-looking name is ignored entirely
        store.delete_best_effort("../outside.png").await;
    }

    #[test]
    fn test_extension_for_content_types() {
        assert_eq!(extension_for(MediaKind::Image, "image/jpeg"), "jpg");
        assert_eq!(extension_for(MediaKind::Image, "image/webp"), "webp");
        assert_eq!(extension_for(MediaKind::Pdf, "application/pdf"), "pdf");
        assert_eq!(extension_for(MediaKind::Video, "video/mp4"), "mp4");
    }
}
