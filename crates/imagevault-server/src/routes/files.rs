//! File listing, download, and upload handlers

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Routes mounted under `/files`
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_files).post(upload_file))
        .route("/download/:image_name", get(download_file))
}

/// GET /files
///
/// Lists the bare filenames stored in the bucket.
async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let files = state.gateway.list_objects().await?;
    Ok(Json(files))
}

/// GET /files/download/{image_name}
///
/// Downloads the first stored image whose filename contains `image_name`.
async fn download_file(
    State(state): State<AppState>,
    Path(image_name): Path<String>,
) -> Result<Response> {
    if image_name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Image name must not be empty".to_string(),
        ));
    }

    let download = state.gateway.download_object(&image_name).await?;

    let content_type = download
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let disposition = format!("attachment; filename=\"{}\"", download.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.bytes,
    )
        .into_response())
}

/// POST /files
///
/// Accepts a multipart form with a `file` field and stores its contents
/// under the uploaded filename. Returns 204 on success.
async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<StatusCode> {
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("File field has no filename".to_string()))?;
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(bad_multipart)?;

        state
            .gateway
            .upload_object(&file_name, bytes, content_type.as_deref())
            .await?;

        return Ok(StatusCode::NO_CONTENT);
    }

    Err(ApiError::BadRequest(
        "Multipart form must contain a 'file' field".to_string(),
    ))
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Invalid multipart form: {err}"))
}
