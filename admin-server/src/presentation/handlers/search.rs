use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::application::search_service::{SearchResults, SearchSuggestions};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::envelope::ApiResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct SearchQuery {
    pub(crate) q: Option<String>,
    pub(crate) limit: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/search",
    tag = "search",
    params(
        ("q" = Option<String>, Query, description = "Free-text term"),
        ("limit" = Option<String>, Query, description = "Per-collection cap, clamped to 1..=20")
    ),
    responses(
        (status = 200, description = "Matches across contents and teachers", body = ApiResponse<SearchResults>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<SearchResults>>> {
    let results = state
        .search_service
        .search(query.q.as_deref(), query.limit.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(results, "OK")))
}

#[utoipa::path(
    get,
    path = "/api/search/suggest",
    tag = "search",
    params(
        ("q" = Option<String>, Query, description = "Free-text term"),
        ("limit" = Option<String>, Query, description = "Suggestion cap, clamped to 1..=5")
    ),
    responses(
        (status = 200, description = "Distinct title and name suggestions", body = ApiResponse<SearchSuggestions>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<SearchSuggestions>>> {
    let suggestions = state
        .search_service
        .suggest(query.q.as_deref(), query.limit.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(suggestions, "OK")))
}
