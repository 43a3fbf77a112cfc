//! Upload form and upload endpoint.

use axum::{
    Router,
    extract::{Multipart, State},
    http::header::CONTENT_LENGTH,
    response::Html,
    routing::{get, post},
};
use bucketdrop_core::{PublicUrl, UploadRequest};
use bucketdrop_shared::AppError;
use tracing::info;

use crate::{AppState, error::ApiError, pages::PageData};

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// Creates the upload routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/up", get(upload_form))
        .route("/upload", post(upload).fallback(upload_form))
}

/// GET `/up` and non-POST `/upload` - the bare upload form.
async fn upload_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.pages.render(&PageData::default())?))
}

/// POST `/upload` - store the file, then show its URL with the bucket listing.
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, ApiError> {
    let link = store_file_field(&state, &mut multipart).await?;

    let images = state
        .listings
        .list(&state.settings.bucket, state.settings.max_results)
        .await
        .map_err(AppError::from)?;

    info!(link = %link, listed = images.len(), "Upload complete");

    let page = state.pages.render(&PageData {
        link: Some(link),
        images,
    })?;
    Ok(Html(page))
}

/// Find the `file` field and hand its stream to the upload service.
async fn store_file_field(state: &AppState, multipart: &mut Multipart) -> Result<PublicUrl, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Parse(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let declared_size = field
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let request =
            UploadRequest::new(file_name, content_type, field).with_declared_size(declared_size);
        let url = state
            .uploads
            .store(request, &state.settings.bucket, state.settings.max_bytes)
            .await?;
        return Ok(url);
    }

    Err(AppError::MissingFile("no file field in form".to_string()))
}
