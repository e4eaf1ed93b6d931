use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::data::mosque_repository::{MosqueFilter, MosqueRepository};
use crate::data::query::PageRequest;
use crate::domain::mosque::{Mosque, MosquePatch, MosqueStatus, NewMosque};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::envelope::{ApiResponse, ListResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct MosqueListQuery {
    pub(crate) page: Option<String>,
    pub(crate) size: Option<String>,
    pub(crate) q: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) verified: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateMosqueDto {
    #[validate(length(min = 1, max = 120))]
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) region: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
    pub(crate) phone_number: Option<String>,
    #[validate(email)]
    pub(crate) email: Option<String>,
    pub(crate) website_url: Option<String>,
    pub(crate) image_url: Option<String>,
    pub(crate) imam_name: Option<String>,
    pub(crate) capacity: Option<i64>,
    #[serde(default)]
    pub(crate) languages: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateMosqueDto {
    #[validate(length(min = 1, max = 120))]
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) region: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
    pub(crate) phone_number: Option<String>,
    #[validate(email)]
    pub(crate) email: Option<String>,
    pub(crate) website_url: Option<String>,
    pub(crate) image_url: Option<String>,
    pub(crate) imam_name: Option<String>,
    pub(crate) capacity: Option<i64>,
    pub(crate) verified: Option<bool>,
    pub(crate) status: Option<MosqueStatus>,
    pub(crate) languages: Option<Vec<String>>,
}

impl From<CreateMosqueDto> for NewMosque {
    fn from(dto: CreateMosqueDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            address: dto.address,
            city: dto.city.unwrap_or_default(),
            region: dto.region,
            country: dto.country.unwrap_or_default(),
            latitude: dto.latitude,
            longitude: dto.longitude,
            phone_number: dto.phone_number,
            email: dto.email,
            website_url: dto.website_url,
            image_url: dto.image_url,
            imam_name: dto.imam_name,
            capacity: dto.capacity,
            languages: dto.languages,
        }
    }
}

impl From<UpdateMosqueDto> for MosquePatch {
    fn from(dto: UpdateMosqueDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            address: dto.address,
            city: dto.city,
            region: dto.region,
            country: dto.country,
            latitude: dto.latitude,
            longitude: dto.longitude,
            phone_number: dto.phone_number,
            email: dto.email,
            website_url: dto.website_url,
            image_url: dto.image_url,
            imam_name: dto.imam_name,
            capacity: dto.capacity,
            verified: dto.verified,
            status: dto.status,
            languages: dto.languages,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/mosques",
    tag = "mosques",
    params(
        ("page" = Option<String>, Query, description = "Page number, defaults to 1"),
        ("size" = Option<String>, Query, description = "Page size, clamped to 1..=100"),
        ("q" = Option<String>, Query, description = "Free-text term over name and city"),
        ("city" = Option<String>, Query, description = "Exact city"),
        ("country" = Option<String>, Query, description = "Exact country"),
        ("verified" = Option<String>, Query, description = "Literal true or false")
    ),
    responses(
        (status = 200, description = "Paged mosques", body = ListResponse<Mosque>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn list_mosques(
    State(state): State<AppState>,
    Query(query): Query<MosqueListQuery>,
) -> AppResult<Json<ListResponse<Mosque>>> {
    let page = PageRequest::parse(query.page.as_deref(), query.size.as_deref());
    let filter = MosqueFilter {
        term: query.q,
        city: query.city,
        country: query.country,
        verified: query.verified,
    };

    let result = state.mosques.list_mosques(filter, page).await?;

    Ok(Json(ListResponse {
        data: result.data,
        pagination: result.pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/mosques/{id}",
    tag = "mosques",
    params(("id" = i64, Path, description = "Mosque id")),
    responses(
        (status = 200, description = "Mosque found", body = ApiResponse<Mosque>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn get_mosque(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Mosque>>> {
    let mosque = state
        .mosques
        .get_mosque(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(mosque, "OK")))
}

#[utoipa::path(
    post,
    path = "/api/admin/mosques",
    tag = "mosques",
    request_body = CreateMosqueDto,
    responses(
        (status = 201, description = "Mosque created", body = ApiResponse<Mosque>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn create_mosque(
    State(state): State<AppState>,
    Json(dto): Json<CreateMosqueDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<Mosque>>)> {
    dto.validate()?;

    let input = NewMosque::from(dto).validate()?;
    let mosque = state.mosques.create_mosque(input).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(mosque, "Créé"))))
}

#[utoipa::path(
    put,
    path = "/api/admin/mosques/{id}",
    tag = "mosques",
    params(("id" = i64, Path, description = "Mosque id")),
    request_body = UpdateMosqueDto,
    responses(
        (status = 200, description = "Mosque updated", body = ApiResponse<Mosque>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn update_mosque(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateMosqueDto>,
) -> AppResult<Json<ApiResponse<Mosque>>> {
    dto.validate()?;

    let patch = MosquePatch::from(dto).validate()?;
    let mosque = state
        .mosques
        .update_mosque(id, patch)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(mosque, "OK")))
}

#[utoipa::path(
    delete,
    path = "/api/admin/mosques/{id}",
    tag = "mosques",
    params(("id" = i64, Path, description = "Mosque id")),
    responses(
        (status = 200, description = "Mosque removed", body = ApiResponse<bool>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn delete_mosque(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    if !state.mosques.delete_mosque(id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::ok(true, "Supprimé")))
}

#[utoipa::path(
    post,
    path = "/api/admin/mosques/{id}/verify",
    tag = "mosques",
    params(("id" = i64, Path, description = "Mosque id")),
    responses(
        (status = 200, description = "Mosque verified", body = ApiResponse<Mosque>),
        (status = 404, description = "Unknown id"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn verify_mosque(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Mosque>>> {
    let mosque = state
        .mosques
        .set_mosque_verified(id, true)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok(mosque, "Vérifié")))
}
