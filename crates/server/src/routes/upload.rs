//! Wine image upload handler.
//!
//! Accepts a single multipart `file` field, constrains type and size and
//! stores the image under the configured upload directory with a random
//! name. The files are served back via `ServeDir` at `/uploads`.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Maximum accepted image size in bytes (5 MiB).
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted content types and the extension stored for each.
const ACCEPTED_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
];

/// Build the upload router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/upload/image", post(upload_image))
        // Leave headroom above the image limit for multipart framing.
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 64 * 1024))
}

/// Response for a stored image.
#[derive(Debug, Serialize)]
struct UploadResponse {
    url: String,
    filename: String,
}

/// Store an uploaded wine image.
///
/// POST /api/upload/image
///
/// # Errors
///
/// Returns 400 when the `file` field is missing, the content type is not
/// an accepted image type or the file exceeds 5 MiB.
async fn upload_image(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(String, axum::body::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_owned();
        let extension = ACCEPTED_TYPES
            .iter()
            .find(|(ct, _)| *ct == content_type)
            .map(|(_, ext)| (*ext).to_owned())
            .ok_or_else(|| {
                AppError::Validation(
                    "Only JPEG, PNG, WebP and GIF images are allowed".to_owned(),
                )
            })?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if data.len() > MAX_IMAGE_BYTES {
            return Err(AppError::Validation(
                "Image must be 5 MB or smaller".to_owned(),
            ));
        }

        file = Some((extension, data));
        break;
    }

    let (extension, data) =
        file.ok_or_else(|| AppError::Validation("A file field is required".to_owned()))?;

    let filename = format!("{}.{extension}", Uuid::new_v4());
    let dir = state.config().upload_dir.join("wines");
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::Internal(format!("failed to create upload directory: {e}")))?;
    tokio::fs::write(dir.join(&filename), &data)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store upload: {e}")))?;

    tracing::info!(%filename, bytes = data.len(), "Stored wine image");

    Ok(Json(UploadResponse {
        url: format!("/uploads/wines/{filename}"),
        filename,
    }))
}
