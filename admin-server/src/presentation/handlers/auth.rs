use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{AppendHeaders, IntoResponse},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::identity::{LoginRequest, SessionUser};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::envelope::ApiResponse;
use crate::presentation::middleware::auth::{AuthenticatedUser, bearer_token, extract_token};

/// Expires the session cookie on logout.
const CLEAR_COOKIE: &str = "auth_token=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0";

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginDto {
    pub(crate) email: Option<String>,
    pub(crate) password: Option<String>,
    #[serde(default)]
    pub(crate) remember_me: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TokenDto {
    pub(crate) token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RefreshDto {
    pub(crate) ok: bool,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Authenticated", body = ApiResponse<TokenDto>),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<TokenDto>>)> {
    let (Some(email), Some(password)) = (dto.email, dto.password) else {
        return Err(AppError::BadRequest(
            "Email et mot de passe requis".to_string(),
        ));
    };

    let req = LoginRequest {
        email,
        password,
        remember_me: dto.remember_me,
    };

    let result = state.auth_service.login(req).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            TokenDto {
                token: result.token,
            },
            "OK",
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session revoked, cookie cleared", body = ApiResponse<bool>)
    )
)]
pub(crate) async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    // Best effort: an absent or unknown token still yields a clean logout.
    if let Some(token) = extract_token(&headers) {
        state.auth_service.logout(&token);
    }

    (
        AppendHeaders([(header::SET_COOKIE, CLEAR_COOKIE)]),
        Json(ApiResponse::ok(true, "Déconnecté")),
    )
}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "auth",
    responses(
        (status = 200, description = "Credential still valid", body = ApiResponse<RefreshDto>),
        (status = 401, description = "Invalid or expired credential")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<RefreshDto>>> {
    // Validity probe over the Authorization header only, no cookie fallback.
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;

    state
        .tokens
        .resolve(&token)
        .map_err(|_| AppError::Unauthorized)?;

    Ok(Json(ApiResponse::ok(RefreshDto { ok: true }, "OK")))
}

#[utoipa::path(
    get,
    path = "/api/me",
    tag = "auth",
    responses(
        (status = 200, description = "Session snapshot", body = ApiResponse<SessionUser>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn me(auth: AuthenticatedUser) -> Json<ApiResponse<SessionUser>> {
    Json(ApiResponse::ok(auth.user, "OK"))
}
