use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::content_repository::{ContentFacets, ContentFilter, ContentRepository};
use crate::data::query::{PageRequest, Pagination};
use crate::domain::content::{
    Content, ContentAsset, ContentPatch, ContentStatus, ContentType, NewContent,
};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::envelope::ApiResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ContentListQuery {
    pub(crate) page: Option<String>,
    pub(crate) size: Option<String>,
    pub(crate) q: Option<String>,
    #[serde(rename = "type")]
    pub(crate) content_type: Option<String>,
    pub(crate) lang: Option<String>,
    pub(crate) status: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateContentDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(max = 4000))]
    pub(crate) description: Option<String>,
    #[serde(rename = "type")]
    pub(crate) content_type: Option<ContentType>,
    pub(crate) lang: Option<String>,
    pub(crate) status: Option<ContentStatus>,
    pub(crate) teacher_id: Option<i64>,
    pub(crate) download_enabled: Option<bool>,
    #[serde(default)]
    pub(crate) assets: Vec<ContentAsset>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateContentDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: Option<String>,
    #[validate(length(max = 4000))]
    pub(crate) description: Option<String>,
    #[serde(rename = "type")]
    pub(crate) content_type: Option<ContentType>,
    pub(crate) lang: Option<String>,
    pub(crate) status: Option<ContentStatus>,
    pub(crate) teacher_id: Option<i64>,
    pub(crate) download_enabled: Option<bool>,
    pub(crate) assets: Option<Vec<ContentAsset>>,
}

/// Listing body: raw page plus facet counts, no envelope.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ContentListDto {
    pub(crate) data: Vec<Content>,
    pub(crate) pagination: Pagination,
    pub(crate) facets: ContentFacets,
}

impl From<CreateContentDto> for NewContent {
    fn from(dto: CreateContentDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            content_type: dto.content_type.unwrap_or(ContentType::Audio),
            lang: dto.lang.unwrap_or_else(|| "fr".to_string()),
            status: dto.status.unwrap_or(ContentStatus::Draft),
            teacher_id: dto.teacher_id,
            download_enabled: dto.download_enabled.unwrap_or(true),
            assets: dto.assets,
        }
    }
}

impl From<UpdateContentDto> for ContentPatch {
    fn from(dto: UpdateContentDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            content_type: dto.content_type,
            lang: dto.lang,
            status: dto.status,
            teacher_id: dto.teacher_id,
            download_enabled: dto.download_enabled,
            assets: dto.assets,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/contents",
    tag = "contents",
    params(
        ("page" = Option<String>, Query, description = "Page number, defaults to 1"),
        ("size" = Option<String>, Query, description = "Page size, clamped to 1..=100"),
        ("q" = Option<String>, Query, description = "Free-text term over title and description"),
        ("type" = Option<String>, Query, description = "Exact content type, e.g. AUDIO"),
        ("lang" = Option<String>, Query, description = "Exact language code"),
        ("status" = Option<String>, Query, description = "Exact status, e.g. PUBLISHED")
    ),
    responses(
        (status = 200, description = "Paged contents with facets", body = ContentListDto),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn list_contents(
    State(state): State<AppState>,
    Query(query): Query<ContentListQuery>,
) -> AppResult<Json<ContentListDto>> {
    let page = PageRequest::parse(query.page.as_deref(), query.size.as_deref());
    let filter = ContentFilter {
        term: query.q,
        content_type: query.content_type,
        lang: query.lang,
        status: query.status,
    };

    let result = state.contents.list_contents(filter, page).await?;

    Ok(Json(ContentListDto {
        data: result.data,
        pagination: result.pagination,
        facets: result.facets,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/contents/{id}",
    tag = "contents",
    params(("id" = i64, Path, description = "Content id")),
    responses(
        (status = 200, description = "Content found", body = ApiResponse<Content>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Content>>> {
    let content = state
        .contents
        .get_content(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(content, "OK")))
}

#[utoipa::path(
    post,
    path = "/api/admin/contents",
    tag = "contents",
    request_body = CreateContentDto,
    responses(
        (status = 201, description = "Content created", body = ApiResponse<Content>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn create_content(
    State(state): State<AppState>,
    Json(dto): Json<CreateContentDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<Content>>)> {
    dto.validate()?;

    let input = NewContent::from(dto).validate()?;
    let content = state.contents.create_content(input).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(content, "Créé"))))
}

#[utoipa::path(
    put,
    path = "/api/admin/contents/{id}",
    tag = "contents",
    params(("id" = i64, Path, description = "Content id")),
    request_body = UpdateContentDto,
    responses(
        (status = 200, description = "Content updated", body = ApiResponse<Content>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateContentDto>,
) -> AppResult<Json<ApiResponse<Content>>> {
    dto.validate()?;

    let patch = ContentPatch::from(dto).validate()?;
    let content = state
        .contents
        .update_content(id, patch)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(content, "OK")))
}

#[utoipa::path(
    delete,
    path = "/api/admin/contents/{id}",
    tag = "contents",
    params(("id" = i64, Path, description = "Content id")),
    responses(
        (status = 200, description = "Content removed", body = ApiResponse<bool>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    if !state.contents.delete_content(id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::ok(true, "Supprimé")))
}

async fn transition(
    state: &AppState,
    id: i64,
    status: ContentStatus,
    message: &str,
) -> AppResult<Json<ApiResponse<Content>>> {
    let content = state
        .contents
        .set_content_status(id, status)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(content, message)))
}

#[utoipa::path(
    post,
    path = "/api/admin/contents/{id}/publish",
    tag = "contents",
    params(("id" = i64, Path, description = "Content id")),
    responses(
        (status = 200, description = "Content published", body = ApiResponse<Content>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn publish_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Content>>> {
    transition(&state, id, ContentStatus::Published, "Publié").await
}

#[utoipa::path(
    post,
    path = "/api/admin/contents/{id}/unpublish",
    tag = "contents",
    params(("id" = i64, Path, description = "Content id")),
    responses(
        (status = 200, description = "Content back to approved", body = ApiResponse<Content>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn unpublish_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Content>>> {
    transition(&state, id, ContentStatus::Approved, "Dépublié").await
}

#[utoipa::path(
    post,
    path = "/api/admin/contents/{id}/approve",
    tag = "contents",
    params(("id" = i64, Path, description = "Content id")),
    responses(
        (status = 200, description = "Content approved", body = ApiResponse<Content>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn approve_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Content>>> {
    transition(&state, id, ContentStatus::Approved, "Approuvé").await
}

#[utoipa::path(
    post,
    path = "/api/admin/contents/{id}/reject",
    tag = "contents",
    params(("id" = i64, Path, description = "Content id")),
    responses(
        (status = 200, description = "Content rejected", body = ApiResponse<Content>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn reject_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Content>>> {
    transition(&state, id, ContentStatus::Rejected, "Rejeté").await
}
