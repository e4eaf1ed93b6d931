use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::data::query::PageRequest;
use crate::data::tag_repository::{TagFilter, TagRepository};
use crate::domain::tag::{NewTag, Tag, TagPatch, TagType};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::envelope::{ApiResponse, ListResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct TagListQuery {
    pub(crate) page: Option<String>,
    pub(crate) size: Option<String>,
    pub(crate) q: Option<String>,
    #[serde(rename = "type")]
    pub(crate) tag_type: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateTagDto {
    #[validate(length(min = 1, max = 120))]
    pub(crate) name: String,
    pub(crate) slug: Option<String>,
    pub(crate) description: Option<String>,
    #[serde(rename = "type")]
    pub(crate) tag_type: Option<TagType>,
    pub(crate) color_code: Option<String>,
    #[serde(default)]
    pub(crate) is_featured: bool,
    #[serde(default = "default_active")]
    pub(crate) is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateTagDto {
    #[validate(length(min = 1, max = 120))]
    pub(crate) name: Option<String>,
    pub(crate) slug: Option<String>,
    pub(crate) description: Option<String>,
    #[serde(rename = "type")]
    pub(crate) tag_type: Option<TagType>,
    pub(crate) color_code: Option<String>,
    pub(crate) is_featured: Option<bool>,
    pub(crate) is_active: Option<bool>,
}

fn default_active() -> bool {
    true
}

impl From<CreateTagDto> for NewTag {
    fn from(dto: CreateTagDto) -> Self {
        Self {
            name: dto.name,
            slug: dto.slug,
            description: dto.description,
            tag_type: dto.tag_type.unwrap_or(TagType::General),
            color_code: dto.color_code,
            is_featured: dto.is_featured,
            is_active: dto.is_active,
        }
    }
}

impl From<UpdateTagDto> for TagPatch {
    fn from(dto: UpdateTagDto) -> Self {
        Self {
            name: dto.name,
            slug: dto.slug,
            description: dto.description,
            tag_type: dto.tag_type,
            color_code: dto.color_code,
            is_featured: dto.is_featured,
            is_active: dto.is_active,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/tags",
    tag = "tags",
    params(
        ("page" = Option<String>, Query, description = "Page number, defaults to 1"),
        ("size" = Option<String>, Query, description = "Page size, clamped to 1..=100"),
        ("q" = Option<String>, Query, description = "Free-text term over name and slug"),
        ("type" = Option<String>, Query, description = "Exact tag type, e.g. TOPIC")
    ),
    responses(
        (status = 200, description = "Paged tags", body = ListResponse<Tag>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn list_tags(
    State(state): State<AppState>,
    Query(query): Query<TagListQuery>,
) -> AppResult<Json<ListResponse<Tag>>> {
    let page = PageRequest::parse(query.page.as_deref(), query.size.as_deref());
    let filter = TagFilter {
        term: query.q,
        tag_type: query.tag_type,
    };

    let result = state.tags.list_tags(filter, page).await?;

    Ok(Json(ListResponse {
        data: result.data,
        pagination: result.pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/tags/{id}",
    tag = "tags",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag found", body = ApiResponse<Tag>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Tag>>> {
    let tag = state.tags.get_tag(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(tag, "OK")))
}

#[utoipa::path(
    post,
    path = "/api/admin/tags",
    tag = "tags",
    request_body = CreateTagDto,
    responses(
        (status = 201, description = "Tag created", body = ApiResponse<Tag>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn create_tag(
    State(state): State<AppState>,
    Json(dto): Json<CreateTagDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<Tag>>)> {
    dto.validate()?;

    let input = NewTag::from(dto).validate()?;
    let tag = state.tags.create_tag(input).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(tag, "Créé"))))
}

#[utoipa::path(
    put,
    path = "/api/admin/tags/{id}",
    tag = "tags",
    params(("id" = i64, Path, description = "Tag id")),
    request_body = UpdateTagDto,
    responses(
        (status = 200, description = "Tag updated", body = ApiResponse<Tag>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateTagDto>,
) -> AppResult<Json<ApiResponse<Tag>>> {
    dto.validate()?;

    let patch = TagPatch::from(dto).validate()?;
    let tag = state
        .tags
        .update_tag(id, patch)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(tag, "OK")))
}

#[utoipa::path(
    delete,
    path = "/api/admin/tags/{id}",
    tag = "tags",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag removed", body = ApiResponse<bool>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    if !state.tags.delete_tag(id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::ok(true, "Supprimé")))
}
