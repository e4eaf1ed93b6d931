use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::data::query::PageRequest;
use crate::data::theme_repository::{ThemeFilter, ThemeRepository};
use crate::domain::theme::{NewTheme, Theme, ThemePatch};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::envelope::{ApiResponse, ListResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ThemeListQuery {
    pub(crate) page: Option<String>,
    pub(crate) size: Option<String>,
    pub(crate) q: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateThemeDto {
    #[validate(length(min = 1, max = 120))]
    pub(crate) name: String,
    pub(crate) slug: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) parent_id: Option<i64>,
    #[serde(default)]
    pub(crate) display_order: i64,
    pub(crate) icon_name: Option<String>,
    pub(crate) color_code: Option<String>,
    #[serde(default)]
    pub(crate) is_featured: bool,
    #[serde(default = "default_active")]
    pub(crate) is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateThemeDto {
    #[validate(length(min = 1, max = 120))]
    pub(crate) name: Option<String>,
    pub(crate) slug: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) parent_id: Option<i64>,
    pub(crate) display_order: Option<i64>,
    pub(crate) icon_name: Option<String>,
    pub(crate) color_code: Option<String>,
    pub(crate) is_featured: Option<bool>,
    pub(crate) is_active: Option<bool>,
}

fn default_active() -> bool {
    true
}

impl From<CreateThemeDto> for NewTheme {
    fn from(dto: CreateThemeDto) -> Self {
        Self {
            name: dto.name,
            slug: dto.slug,
            description: dto.description,
            parent_id: dto.parent_id,
            display_order: dto.display_order,
            icon_name: dto.icon_name,
            color_code: dto.color_code,
            is_featured: dto.is_featured,
            is_active: dto.is_active,
        }
    }
}

impl From<UpdateThemeDto> for ThemePatch {
    fn from(dto: UpdateThemeDto) -> Self {
        Self {
            name: dto.name,
            slug: dto.slug,
            description: dto.description,
            parent_id: dto.parent_id,
            display_order: dto.display_order,
            icon_name: dto.icon_name,
            color_code: dto.color_code,
            is_featured: dto.is_featured,
            is_active: dto.is_active,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/themes",
    tag = "themes",
    params(
        ("page" = Option<String>, Query, description = "Page number, defaults to 1"),
        ("size" = Option<String>, Query, description = "Page size, clamped to 1..=100"),
        ("q" = Option<String>, Query, description = "Free-text term over name and slug")
    ),
    responses(
        (status = 200, description = "Paged themes", body = ListResponse<Theme>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn list_themes(
    State(state): State<AppState>,
    Query(query): Query<ThemeListQuery>,
) -> AppResult<Json<ListResponse<Theme>>> {
    let page = PageRequest::parse(query.page.as_deref(), query.size.as_deref());
    let filter = ThemeFilter { term: query.q };

    let result = state.themes.list_themes(filter, page).await?;

    Ok(Json(ListResponse {
        data: result.data,
        pagination: result.pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/themes/{id}",
    tag = "themes",
    params(("id" = i64, Path, description = "Theme id")),
    responses(
        (status = 200, description = "Theme found", body = ApiResponse<Theme>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn get_theme(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Theme>>> {
    let theme = state.themes.get_theme(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(theme, "OK")))
}

#[utoipa::path(
    post,
    path = "/api/admin/themes",
    tag = "themes",
    request_body = CreateThemeDto,
    responses(
        (status = 201, description = "Theme created", body = ApiResponse<Theme>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn create_theme(
    State(state): State<AppState>,
    Json(dto): Json<CreateThemeDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<Theme>>)> {
    dto.validate()?;

    let input = NewTheme::from(dto).validate()?;
    let theme = state.themes.create_theme(input).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(theme, "Créé"))))
}

#[utoipa::path(
    put,
    path = "/api/admin/themes/{id}",
    tag = "themes",
    params(("id" = i64, Path, description = "Theme id")),
    request_body = UpdateThemeDto,
    responses(
        (status = 200, description = "Theme updated", body = ApiResponse<Theme>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn update_theme(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateThemeDto>,
) -> AppResult<Json<ApiResponse<Theme>>> {
    dto.validate()?;

    let patch = ThemePatch::from(dto).validate()?;
    let theme = state
        .themes
        .update_theme(id, patch)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(theme, "OK")))
}

#[utoipa::path(
    delete,
    path = "/api/admin/themes/{id}",
    tag = "themes",
    params(("id" = i64, Path, description = "Theme id")),
    responses(
        (status = 200, description = "Theme removed", body = ApiResponse<bool>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn delete_theme(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    if !state.themes.delete_theme(id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::ok(true, "Supprimé")))
}
