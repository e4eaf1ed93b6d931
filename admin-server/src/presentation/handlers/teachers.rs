use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::data::query::PageRequest;
use crate::data::teacher_repository::{TeacherFilter, TeacherRepository};
use crate::domain::teacher::{NewTeacher, Teacher, TeacherPatch, TeacherStatus};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::envelope::{ApiResponse, ListResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct TeacherListQuery {
    pub(crate) page: Option<String>,
    pub(crate) size: Option<String>,
    pub(crate) q: Option<String>,
    pub(crate) verified: Option<String>,
    pub(crate) lang: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateTeacherDto {
    #[validate(length(min = 1, max = 120))]
    pub(crate) display_name: String,
    pub(crate) bio: Option<String>,
    #[serde(default)]
    pub(crate) languages: Vec<String>,
    #[serde(default)]
    pub(crate) specializations: Vec<String>,
    #[serde(default)]
    pub(crate) links: Vec<String>,
    pub(crate) nationality: Option<String>,
    pub(crate) profile_image_url: Option<String>,
    pub(crate) user_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateTeacherDto {
    #[validate(length(min = 1, max = 120))]
    pub(crate) display_name: Option<String>,
    pub(crate) bio: Option<String>,
    pub(crate) languages: Option<Vec<String>>,
    pub(crate) specializations: Option<Vec<String>>,
    pub(crate) links: Option<Vec<String>>,
    pub(crate) verified: Option<bool>,
    pub(crate) status: Option<TeacherStatus>,
    pub(crate) nationality: Option<String>,
    pub(crate) profile_image_url: Option<String>,
}

/// Optional body for the reject transition.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct RejectTeacherDto {
    pub(crate) notes: Option<String>,
}

impl From<CreateTeacherDto> for NewTeacher {
    fn from(dto: CreateTeacherDto) -> Self {
        Self {
            display_name: dto.display_name,
            bio: dto.bio,
            languages: dto.languages,
            specializations: dto.specializations,
            links: dto.links,
            nationality: dto.nationality,
            profile_image_url: dto.profile_image_url,
            user_id: dto.user_id,
        }
    }
}

impl From<UpdateTeacherDto> for TeacherPatch {
    fn from(dto: UpdateTeacherDto) -> Self {
        Self {
            display_name: dto.display_name,
            bio: dto.bio,
            languages: dto.languages,
            specializations: dto.specializations,
            links: dto.links,
            verified: dto.verified,
            status: dto.status,
            nationality: dto.nationality,
            profile_image_url: dto.profile_image_url,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/teachers",
    tag = "teachers",
    params(
        ("page" = Option<String>, Query, description = "Page number, defaults to 1"),
        ("size" = Option<String>, Query, description = "Page size, clamped to 1..=100"),
        ("q" = Option<String>, Query, description = "Free-text term over name and bio"),
        ("verified" = Option<String>, Query, description = "Literal true or false"),
        ("lang" = Option<String>, Query, description = "Language membership, e.g. fr")
    ),
    responses(
        (status = 200, description = "Paged teachers", body = ListResponse<Teacher>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn list_teachers(
    State(state): State<AppState>,
    Query(query): Query<TeacherListQuery>,
) -> AppResult<Json<ListResponse<Teacher>>> {
    let page = PageRequest::parse(query.page.as_deref(), query.size.as_deref());
    let filter = TeacherFilter {
        term: query.q,
        verified: query.verified,
        lang: query.lang,
    };

    let result = state.teachers.list_teachers(filter, page).await?;

    Ok(Json(ListResponse {
        data: result.data,
        pagination: result.pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/teachers/{id}",
    tag = "teachers",
    params(("id" = i64, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Teacher found", body = ApiResponse<Teacher>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Teacher>>> {
    let teacher = state
        .teachers
        .get_teacher(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(teacher, "OK")))
}

#[utoipa::path(
    post,
    path = "/api/admin/teachers",
    tag = "teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher created", body = ApiResponse<Teacher>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn create_teacher(
    State(state): State<AppState>,
    Json(dto): Json<CreateTeacherDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<Teacher>>)> {
    dto.validate()?;

    let input = NewTeacher::from(dto).validate()?;
    let teacher = state.teachers.create_teacher(input).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(teacher, "Créé"))))
}

#[utoipa::path(
    put,
    path = "/api/admin/teachers/{id}",
    tag = "teachers",
    params(("id" = i64, Path, description = "Teacher id")),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = ApiResponse<Teacher>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateTeacherDto>,
) -> AppResult<Json<ApiResponse<Teacher>>> {
    dto.validate()?;

    let patch = TeacherPatch::from(dto).validate()?;
    let teacher = state
        .teachers
        .update_teacher(id, patch)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(teacher, "OK")))
}

#[utoipa::path(
    delete,
    path = "/api/admin/teachers/{id}",
    tag = "teachers",
    params(("id" = i64, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Teacher removed", body = ApiResponse<bool>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    if !state.teachers.delete_teacher(id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::ok(true, "Supprimé")))
}

#[utoipa::path(
    post,
    path = "/api/admin/teachers/{id}/verify",
    tag = "teachers",
    params(("id" = i64, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Teacher verified", body = ApiResponse<Teacher>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn verify_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Teacher>>> {
    let teacher = state
        .teachers
        .set_verification(id, true, TeacherStatus::Verified, None)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(teacher, "Vérifié")))
}

#[utoipa::path(
    post,
    path = "/api/admin/teachers/{id}/reject",
    tag = "teachers",
    params(("id" = i64, Path, description = "Teacher id")),
    request_body = RejectTeacherDto,
    responses(
        (status = 200, description = "Teacher rejected", body = ApiResponse<Teacher>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn reject_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<RejectTeacherDto>>,
) -> AppResult<Json<ApiResponse<Teacher>>> {
    let notes = body.and_then(|Json(dto)| dto.notes);

    let teacher = state
        .teachers
        .set_verification(id, false, TeacherStatus::Rejected, notes)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(teacher, "Rejeté")))
}
