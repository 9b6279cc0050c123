//! `gallery.json` accessor.
//!
//! Reads prefer the object store (assumed more current in production) and
//! fall back to the local file, then to an empty gallery. Writes go to the
//! object store when configured and to the local file otherwise, each trying
//! the other target if the first fails. When neither accepts the write the
//! computed gallery is handed back to the caller so an operator can apply it
//! by hand.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use lifesavers_core::gallery::{self, GalleryImage, NewImage, GALLERY_FILE};
use lifesavers_core::types::DbId;

use crate::blob::{BlobEntry, ObjectStore};
use crate::error::StoreError;
use crate::local;

/// Directory (under the data dir) for images uploaded without object storage.
pub const IMAGES_DIR: &str = "images";

/// Where a rewritten gallery ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
    Remote { url: String },
    Local,
    /// Neither target accepted the write.
    Unsaved,
}

#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub image: GalleryImage,
    pub gallery: Vec<GalleryImage>,
    pub persisted: Persisted,
}

#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    pub removed: GalleryImage,
    pub gallery: Vec<GalleryImage>,
    pub persisted: Persisted,
}

/// State of the local gallery file for diagnostics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalFileStatus {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Snapshot of both backing stores.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryDiagnostics {
    pub has_token: bool,
    pub local_file: LocalFileStatus,
    pub blob_files: Vec<BlobEntry>,
    pub errors: Vec<String>,
}

pub struct GalleryStore {
    local_path: PathBuf,
    images_dir: PathBuf,
    remote: Option<Arc<dyn ObjectStore>>,
    write_lock: Mutex<()>,
}

impl GalleryStore {
    /// Gallery kept in `data_dir/gallery.json`, optionally mirrored remotely.
    pub fn new(data_dir: &Path, remote: Option<Arc<dyn ObjectStore>>) -> Self {
        Self {
            local_path: data_dir.join(GALLERY_FILE),
            images_dir: data_dir.join(IMAGES_DIR),
            remote,
            write_lock: Mutex::new(()),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    /// Current gallery: remote copy, else local file, else empty.
    pub async fn load(&self) -> Result<Vec<GalleryImage>, StoreError> {
        if let Some(remote) = &self.remote {
            match load_remote(remote.as_ref()).await {
                Ok(Some(gallery)) => return Ok(gallery),
                Ok(None) => tracing::debug!("No remote gallery.json, using local file"),
                Err(e) => tracing::warn!(error = %e, "Remote gallery read failed, using local file"),
            }
        }

        Ok(local::read_array(&self.local_path).await?.unwrap_or_default())
    }

    /// Gallery to rewrite: like [`load`](Self::load), but a failed or
    /// unparsable remote read is an error. Only a missing remote blob falls
    /// through to the local file, so a stale copy never overwrites the
    /// remote gallery.
    async fn load_for_update(&self) -> Result<Vec<GalleryImage>, StoreError> {
        if let Some(remote) = &self.remote {
            if let Some(gallery) = load_remote(remote.as_ref()).await? {
                return Ok(gallery);
            }
        }

        Ok(local::read_array(&self.local_path).await?.unwrap_or_default())
    }

    /// Append a new image and persist the whole gallery.
    pub async fn upload(&self, new: NewImage) -> Result<UploadOutcome, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut images = self.load_for_update().await?;
        let image = gallery::append(&mut images, new);
        let persisted = self.persist(&images).await?;

        tracing::info!(id = image.id, persisted = ?persisted, "Gallery image added");
        Ok(UploadOutcome {
            image,
            gallery: images,
            persisted,
        })
    }

    /// Remove the image with `id` and persist the whole gallery.
    ///
    /// An unknown id fails with `NotFound` and writes nothing.
    pub async fn delete(&self, id: DbId) -> Result<DeleteOutcome, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut images = self.load_for_update().await?;
        let removed = gallery::remove(&mut images, id)?;
        let persisted = self.persist(&images).await?;

        tracing::info!(id, persisted = ?persisted, "Gallery image deleted");
        Ok(DeleteOutcome {
            removed,
            gallery: images,
            persisted,
        })
    }

    /// Store uploaded image bytes in the object store.
    pub async fn put_image(
        &self,
        pathname: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<BlobEntry, StoreError> {
        let remote = self.remote.as_ref().ok_or(StoreError::NotConfigured)?;
        remote.put(pathname, bytes, content_type).await
    }

    /// Write image bytes under the local images directory and return the
    /// site-relative path (`images/{name}`).
    pub async fn save_local_image(&self, name: &str, bytes: &[u8]) -> Result<String, StoreError> {
        local::write_atomic(&self.images_dir.join(name), bytes).await?;
        Ok(format!("{IMAGES_DIR}/{name}"))
    }

    /// Report what each backing store currently holds.
    pub async fn diagnose(&self) -> GalleryDiagnostics {
        let mut errors = Vec::new();

        let local_file = match tokio::fs::read(&self.local_path).await {
            Ok(bytes) => match serde_json::from_slice::<serde_json::Value>(&bytes) {
                Ok(parsed) => LocalFileStatus {
                    exists: true,
                    size: Some(bytes.len()),
                    parsed: Some(parsed),
                    error: None,
                },
                Err(e) => LocalFileStatus {
                    exists: true,
                    size: Some(bytes.len()),
                    parsed: None,
                    error: Some(e.to_string()),
                },
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => LocalFileStatus {
                exists: false,
                size: None,
                parsed: None,
                error: None,
            },
            Err(e) => LocalFileStatus {
                exists: false,
                size: None,
                parsed: None,
                error: Some(e.to_string()),
            },
        };

        let blob_files = match &self.remote {
            Some(remote) => remote.list().await.unwrap_or_else(|e| {
                errors.push(format!("Blob list error: {e}"));
                Vec::new()
            }),
            None => {
                errors.push("No BLOB_READ_WRITE_TOKEN set".to_string());
                Vec::new()
            }
        };

        GalleryDiagnostics {
            has_token: self.remote.is_some(),
            local_file,
            blob_files,
            errors,
        }
    }

    /// Write `images` to the preferred target, falling back to the other.
    async fn persist(&self, images: &[GalleryImage]) -> Result<Persisted, StoreError> {
        let bytes = local::to_pretty(images)?;

        if let Some(remote) = &self.remote {
            match remote.put(GALLERY_FILE, bytes.clone(), "application/json").await {
                Ok(entry) => return Ok(Persisted::Remote { url: entry.url }),
                Err(e) => tracing::warn!(error = %e, "Remote gallery write failed, trying local file"),
            }
            return Ok(match local::write_atomic(&self.local_path, &bytes).await {
                Ok(()) => Persisted::Local,
                Err(e) => {
                    tracing::error!(error = %e, "Local gallery write failed too");
                    Persisted::Unsaved
                }
            });
        }

        Ok(match local::write_atomic(&self.local_path, &bytes).await {
            Ok(()) => Persisted::Local,
            Err(e) => {
                tracing::error!(error = %e, path = %self.local_path.display(), "Local gallery write failed");
                Persisted::Unsaved
            }
        })
    }
}

/// Pick the gallery blob: exact pathname, then suffix, then substring match.
pub fn find_gallery_blob(blobs: &[BlobEntry]) -> Option<&BlobEntry> {
    blobs
        .iter()
        .find(|b| b.pathname == GALLERY_FILE)
        .or_else(|| blobs.iter().find(|b| b.pathname.ends_with(GALLERY_FILE)))
        .or_else(|| blobs.iter().find(|b| b.pathname.contains(GALLERY_FILE)))
}

async fn load_remote(remote: &dyn ObjectStore) -> Result<Option<Vec<GalleryImage>>, StoreError> {
    let blobs = remote.list().await?;
    let Some(entry) = find_gallery_blob(&blobs) else {
        return Ok(None);
    };
    let bytes = remote.fetch(entry).await?;
    Ok(Some(serde_json::from_slice(&bytes)?))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
