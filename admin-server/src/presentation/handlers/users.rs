use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::data::query::PageRequest;
use crate::data::user_repository::{UserFilter, UserRepository};
use crate::domain::user::{NewUser, User, UserPatch, UserRole, UserStatus};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::envelope::{ApiResponse, ListResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UserListQuery {
    pub(crate) page: Option<String>,
    pub(crate) size: Option<String>,
    pub(crate) q: Option<String>,
    pub(crate) role: Option<String>,
    pub(crate) status: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateUserDto {
    #[validate(email)]
    pub(crate) email: String,
    #[validate(length(min = 1, max = 120))]
    pub(crate) name: Option<String>,
    pub(crate) roles: Option<Vec<UserRole>>,
    pub(crate) lang: Option<String>,
    pub(crate) country: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateUserDto {
    #[validate(email)]
    pub(crate) email: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub(crate) name: Option<String>,
    pub(crate) roles: Option<Vec<UserRole>>,
    pub(crate) lang: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) status: Option<UserStatus>,
    pub(crate) email_verified: Option<bool>,
    pub(crate) profile_picture_url: Option<String>,
}

impl From<CreateUserDto> for NewUser {
    fn from(dto: CreateUserDto) -> Self {
        // The account name falls back to the email address.
        let name = dto.name.unwrap_or_else(|| dto.email.clone());
        Self {
            email: dto.email,
            name,
            roles: dto.roles.unwrap_or_else(|| vec![UserRole::User]),
            lang: dto.lang.unwrap_or_else(|| "fr".to_string()),
            country: dto.country,
        }
    }
}

impl From<UpdateUserDto> for UserPatch {
    fn from(dto: UpdateUserDto) -> Self {
        Self {
            email: dto.email,
            name: dto.name,
            roles: dto.roles,
            lang: dto.lang,
            country: dto.country,
            status: dto.status,
            email_verified: dto.email_verified,
            profile_picture_url: dto.profile_picture_url,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "users",
    params(
        ("page" = Option<String>, Query, description = "Page number, defaults to 1"),
        ("size" = Option<String>, Query, description = "Page size, clamped to 1..=100"),
        ("q" = Option<String>, Query, description = "Free-text term over name and email"),
        ("role" = Option<String>, Query, description = "Role membership, e.g. ADMIN"),
        ("status" = Option<String>, Query, description = "Exact status, e.g. ACTIVE")
    ),
    responses(
        (status = 200, description = "Paged users", body = ListResponse<User>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> AppResult<Json<ListResponse<User>>> {
    let page = PageRequest::parse(query.page.as_deref(), query.size.as_deref());
    let filter = UserFilter {
        term: query.q,
        role: query.role,
        status: query.status,
    };

    let result = state.users.list_users(filter, page).await?;

    Ok(Json(ListResponse {
        data: result.data,
        pagination: result.pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<User>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = state.users.get_user(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(user, "OK")))
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = "users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = ApiResponse<User>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn create_user(
    State(state): State<AppState>,
    Json(dto): Json<CreateUserDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    dto.validate()?;

    let input = NewUser::from(dto).validate()?;
    let user = state.users.create_user(input).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user, "Créé"))))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<User>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateUserDto>,
) -> AppResult<Json<ApiResponse<User>>> {
    dto.validate()?;

    let patch = UserPatch::from(dto).validate()?;
    let user = state
        .users
        .update_user(id, patch)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(user, "OK")))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User removed", body = ApiResponse<bool>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    if !state.users.delete_user(id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::ok(true, "Supprimé")))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/suspend",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User suspended", body = ApiResponse<User>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn suspend_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = state
        .users
        .set_user_status(id, UserStatus::Suspended)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(user, "Suspendu")))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/unsuspend",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User active again", body = ApiResponse<User>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn unsuspend_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = state
        .users
        .set_user_status(id, UserStatus::Active)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(user, "Réactivé")))
}
