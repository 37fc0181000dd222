//! Media route handlers.

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use serde_json::json;
use tracing::instrument;

use verdant_core::{Media, MediaId, MediaKind};

use crate::db::{activity, media};
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdminAuth, RequireEditor};
use crate::state::AppState;
use crate::storage::MAX_UPLOAD_BYTES;

/// List all media rows.
///
/// GET /media
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<Media>>> {
    Ok(Json(media::list(state.pool()).await?))
}

/// Upload a media file.
///
/// POST /media/upload (multipart, field `file`)
///
/// Rejects files over 5 MB or with a content type outside the allow-list
/// (images, PDF, mp4). The blob lands in the media directory under a
/// UUID-based name; the returned row carries the public URL.
#[instrument(skip(state, admin, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    mut multipart: Multipart,
) -> Result<Json<Media>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid upload: {e}")))?
        .ok_or_else(|| AppError::BadRequest("No file in upload.".to_string()))?;

    let filename = field
        .file_name()
        .map(sanitize_filename)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Upload is missing a filename.".to_string()))?;

    let content_type = field
        .content_type()
        .map(str::to_owned)
        .ok_or_else(|| AppError::BadRequest("Upload is missing a content type.".to_string()))?;

    let Some(kind) = MediaKind::from_content_type(&content_type) else {
        return Err(AppError::BadRequest(
            "Only images, PDFs, and MP4 videos can be uploaded.".to_string(),
        ));
    };

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Upload failed: {e}")))?;

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(
            "Files must be 5 MB or smaller.".to_string(),
        ));
    }
    if bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty.".to_string()));
    }

    state.media().ensure_root().await?;
    let blob = state.media().save(kind, &content_type, &bytes).await?;

    #[allow(clippy::cast_possible_wrap)] // bounded by MAX_UPLOAD_BYTES
    let size_bytes = bytes.len() as i64;

    let row = media::create(
        state.pool(),
        &media::MediaInput {
            filename,
            stored_name: blob.stored_name,
            url: blob.url,
            content_type,
            kind,
            size_bytes,
        },
    )
    .await?;

    activity::log(
        state.pool(),
        &admin,
        "upload",
        "media",
        Some(row.id.as_i32()),
        json!({ "filename": row.filename, "size_bytes": row.size_bytes }),
    );

    Ok(Json(row))
}

/// Delete a media row; the blob unlink is best-effort.
///
/// DELETE /media/{id}
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Path(id): Path<MediaId>,
) -> Result<Json<super::ApiSuccess>> {
    let row = media::delete(state.pool(), id)
        .await
        .map_err(|e| super::named_not_found(e, "media file"))?;

    // Row is gone; a failed unlink only orphans the blob
    state.media().delete_best_effort(&row.stored_name).await;

    activity::log(
        state.pool(),
        &admin,
        "delete",
        "media",
        Some(id.as_i32()),
        json!({ "filename": row.filename }),
    );

    Ok(Json(super::ApiSuccess::ok()))
}

/// Keep only the base name and drop path separators from a client filename.
fn sanitize_filename(raw: &str) -> String {
    raw.rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_control())
        .take(255)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_strips_paths() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\photos\\rose.jpg"), "rose.jpg");
        assert_eq!(sanitize_filename("rose.jpg"), "rose.jpg");
    }

    #[test]
    fn test_sanitize_filename_drops_control_chars() {
        assert_eq!(sanitize_filename("ro\x00se.jpg"), "rose.jpg");
    }

    #[test]
    fn test_upload_size_limit_is_five_megabytes() {
        assert_eq!(MAX_UPLOAD_BYTES, 5 * 1024 * 1024);
    }
}
