use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::envelope::ApiResponse;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UploadDto {
    pub(crate) id: String,
    pub(crate) url: String,
    pub(crate) filename: String,
    pub(crate) mime: String,
    pub(crate) size: u64,
}

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "media",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = ApiResponse<UploadDto>),
        (status = 400, description = "Missing file part"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadDto>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let mime = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(err.to_string()))?;

        let size = bytes.len() as u64;
        let id = state
            .uploads
            .put(filename.clone(), mime.clone(), bytes.to_vec())?;
        let url = format!("{}/api/upload/{id}", state.settings.public_base_url);

        return Ok(Json(ApiResponse::ok(
            UploadDto {
                id,
                url,
                filename,
                mime,
                size,
            },
            "OK",
        )));
    }

    Err(AppError::BadRequest("file requis".to_string()))
}

#[utoipa::path(
    get,
    path = "/api/upload/{id}",
    tag = "media",
    params(("id" = String, Path, description = "Upload id")),
    responses(
        (status = 200, description = "Raw file bytes"),
        (status = 404, description = "Unknown id")
    )
)]
pub(crate) async fn serve_upload(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let upload = match state.uploads.get(&id) {
        Ok(Some(upload)) => upload,
        Ok(None) => return (StatusCode::NOT_FOUND, "Not found").into_response(),
        Err(err) => return AppError::from(err).into_response(),
    };

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&upload.mime) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(upload.size));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    let disposition = format!("inline; filename=\"{}\"", ascii_filename(&upload.filename));
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    (StatusCode::OK, headers, upload.bytes).into_response()
}

/// Header values only take visible ASCII, so anything else in a stored
/// filename is replaced before it lands in Content-Disposition.
fn ascii_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|ch| match ch {
            '"' | '\\' => '_',
            ch if ch.is_ascii_graphic() || ch == ' ' => ch,
            _ => '_',
        })
        .collect()
}
