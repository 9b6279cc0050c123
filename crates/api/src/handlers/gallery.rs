//! Handlers for the `/gallery` resource.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use lifesavers_core::gallery::{blob_pathname, local_image_name, GalleryImage, NewImage};
use lifesavers_core::types::DbId;
use lifesavers_store::{GalleryDiagnostics, Persisted, UploadOutcome};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AdminUser;
use crate::state::AppState;

/// Largest file accepted by the multipart upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Content type assumed for base64 uploads that do not name one.
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

const MANUAL_UPDATE_NOTE: &str =
    "Copy updatedGallery into gallery.json, or set BLOB_READ_WRITE_TOKEN to update it automatically";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/gallery/upload-blob`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadBlobRequest {
    pub image_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Base64 file content, optionally as a `data:` URL.
    pub file_data: Option<String>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

/// Request body for `POST /api/gallery/upload-url`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadUrlRequest {
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: &'static str,
    pub image: GalleryImage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<GalleryImage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_gallery: Option<Vec<GalleryImage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

impl From<UploadOutcome> for UploadResponse {
    fn from(outcome: UploadOutcome) -> Self {
        match outcome.persisted {
            Persisted::Remote { url } => Self {
                message: "Image uploaded successfully! Gallery updated in object storage.",
                image: outcome.image,
                gallery: Some(outcome.gallery),
                gallery_url: Some(url),
                updated_gallery: None,
                note: None,
            },
            Persisted::Local => Self {
                message: "Image uploaded successfully",
                image: outcome.image,
                gallery: Some(outcome.gallery),
                gallery_url: None,
                updated_gallery: None,
                note: None,
            },
            Persisted::Unsaved => Self {
                message: "Image uploaded! Please update gallery.json manually.",
                image: outcome.image,
                gallery: None,
                gallery_url: None,
                updated_gallery: Some(outcome.gallery),
                note: Some(MANUAL_UPDATE_NOTE),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: &'static str,
    pub deleted_image: GalleryImage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_gallery: Option<Vec<GalleryImage>>,
}

#[derive(Debug, Serialize)]
pub struct UploadUrlResponse {
    pub message: &'static str,
    pub filename: String,
    pub note: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/gallery/list
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<GalleryImage>>> {
    Ok(Json(state.gallery.load().await?))
}

/// POST /api/gallery/upload-blob
///
/// Add an image by URL, or by base64 file data that is first stored in the
/// object store.
pub async fn upload_blob(
    admin: AdminUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<UploadBlobRequest>,
) -> AppResult<Json<UploadResponse>> {
    let file = match (non_empty(input.file_data), non_empty(input.filename)) {
        (Some(data), Some(filename)) => Some((data, filename)),
        _ => None,
    };

    let image_url = match file {
        Some((data, filename)) => {
            let bytes = decode_file_data(&data)?;
            let pathname = blob_pathname(&filename, Utc::now().timestamp_millis());
            let content_type = non_empty(input.content_type)
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

            let entry = state.gallery.put_image(&pathname, bytes, &content_type).await?;
            tracing::info!(pathname = %entry.pathname, "Image stored in object storage");
            Some(entry.url)
        }
        None => non_empty(input.image_url),
    };

    let image_url = image_url
        .ok_or_else(|| AppError::BadRequest("Image URL or file data is required".into()))?;

    let outcome = state
        .gallery
        .upload(NewImage {
            image: image_url,
            title: input.title,
            description: input.description,
        })
        .await?;

    tracing::info!(admin = %admin.username, id = outcome.image.id, "Gallery upload");
    Ok(Json(outcome.into()))
}

/// POST /api/gallery/upload
///
/// Multipart upload (`image`, `title`, `description`) saved under the local
/// images directory.
pub async fn upload(
    admin: AdminUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| AppError::rejected(e.status(), e.body_text()))?;

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut title = None;
    let mut description = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::rejected(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let original = field.file_name().unwrap_or("image").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
                if bytes.len() > MAX_UPLOAD_BYTES {
                    return Err(AppError::BadRequest(
                        "Image exceeds the 10 MiB upload limit".into(),
                    ));
                }
                file = Some((original, bytes.to_vec()));
            }
            "title" | "description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
                if name == "title" {
                    title = Some(text);
                } else {
                    description = Some(text);
                }
            }
            _ => {}
        }
    }

    let (original, bytes) =
        file.ok_or_else(|| AppError::BadRequest("No image file provided".into()))?;

    let name = local_image_name(&original, Utc::now().timestamp_millis());
    let image = state.gallery.save_local_image(&name, &bytes).await?;

    let outcome = state
        .gallery
        .upload(NewImage {
            image,
            title: title.filter(|t| !t.is_empty()),
            description,
        })
        .await?;

    tracing::info!(admin = %admin.username, id = outcome.image.id, file = %name, "Gallery file upload");
    Ok(Json(outcome.into()))
}

/// POST /api/gallery/upload-url
///
/// Tell a client which object-store pathname to upload a file to.
pub async fn upload_url(
    _admin: AdminUser,
    JsonBody(input): JsonBody<UploadUrlRequest>,
) -> AppResult<Json<UploadUrlResponse>> {
    let filename = non_empty(input.filename)
        .ok_or_else(|| AppError::BadRequest("Filename is required".into()))?;

    tracing::debug!(content_type = ?input.content_type, "Upload pathname requested");
    Ok(Json(UploadUrlResponse {
        message: "Upload the file directly to object storage",
        filename: blob_pathname(&filename, Utc::now().timestamp_millis()),
        note: "Then register it with /api/gallery/upload-blob using the returned URL",
    }))
}

/// GET /api/gallery/debug
pub async fn debug(State(state): State<AppState>) -> Json<GalleryDiagnostics> {
    Json(state.gallery.diagnose().await)
}

/// DELETE /api/gallery/delete/{id}
pub async fn delete(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let id: DbId = id
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid image id: {id}")))?;

    let outcome = state.gallery.delete(id).await?;
    tracing::info!(admin = %admin.username, id, "Gallery delete");

    let response = match outcome.persisted {
        Persisted::Unsaved => DeleteResponse {
            message: "Image removed. Please update gallery.json manually.",
            deleted_image: outcome.removed,
            updated_gallery: Some(outcome.gallery),
        },
        Persisted::Remote { .. } | Persisted::Local => DeleteResponse {
            message: "Image deleted successfully",
            deleted_image: outcome.removed,
            updated_gallery: None,
        },
    };
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Decode base64 upload data, accepting a `data:<type>;base64,` prefix.
fn decode_file_data(data: &str) -> AppResult<Vec<u8>> {
    let encoded = if data.starts_with("data:") {
        data.split_once(',').map(|(_, rest)| rest).unwrap_or_default()
    } else {
        data
    };

    STANDARD
        .decode(encoded.trim())
        .map_err(|e| AppError::BadRequest(format!("Invalid file data: {e}")))
}
