//! Gallery records and the id/filename rules shared by every backing store.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Name of the collection file, locally and in the object store.
pub const GALLERY_FILE: &str = "gallery.json";

/// Dimensions recorded for uploads; the client lays images out from these.
pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Title used when an upload does not provide one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// One entry of `gallery.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: DbId,
    /// Absolute URL or site-relative path.
    pub image: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

/// Input for a new gallery entry.
#[derive(Debug, Clone, Default)]
pub struct NewImage {
    pub image: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Next free id: one past the largest id present, or 1 for an empty gallery.
pub fn next_id(gallery: &[GalleryImage]) -> DbId {
    gallery.iter().map(|img| img.id).max().map_or(1, |max| max + 1)
}

/// Append `new` with a fresh id and return the stored record.
pub fn append(gallery: &mut Vec<GalleryImage>, new: NewImage) -> GalleryImage {
    let image = GalleryImage {
        id: next_id(gallery),
        image: new.image,
        title: new
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: new.description.unwrap_or_default(),
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
    };
    gallery.push(image.clone());
    image
}

/// Remove the record with `id`, leaving every other record untouched.
pub fn remove(gallery: &mut Vec<GalleryImage>, id: DbId) -> Result<GalleryImage, CoreError> {
    let index = gallery
        .iter()
        .position(|img| img.id == id)
        .ok_or(CoreError::NotFound { entity: "Image", id })?;
    Ok(gallery.remove(index))
}

/// Replace characters outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Object-store pathname for an uploaded image.
pub fn blob_pathname(filename: &str, unix_millis: i64) -> String {
    format!("gallery/{unix_millis}-{}", sanitize_filename(filename))
}

/// File name for an image stored in the local `images/` directory.
///
/// Keeps the original extension (sanitized) so the web server can infer the
/// content type.
pub fn local_image_name(original: &str, unix_millis: i64) -> String {
    let ext = std::path::Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", sanitize_filename(e)))
        .unwrap_or_default();
    format!("gallery-{unix_millis}{ext}")
}
