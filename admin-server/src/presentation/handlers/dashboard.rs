use std::collections::BTreeMap;

use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::query::facet_counts;
use crate::data::store::read;
use crate::domain::content::Content;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::envelope::ApiResponse;

/// Console landing-page numbers, recomputed from the store on every call.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DashboardStats {
    pub(crate) total_contents: u64,
    pub(crate) total_teachers: u64,
    pub(crate) total_mosques: u64,
    pub(crate) total_themes: u64,
    pub(crate) total_tags: u64,
    pub(crate) total_users: u64,
    pub(crate) total_views: i64,
    pub(crate) total_downloads: i64,
    pub(crate) contents_by_type: BTreeMap<String, u64>,
    pub(crate) contents_by_status: BTreeMap<String, u64>,
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard/stats",
    tag = "dashboard",
    responses(
        (status = 200, description = "Collection totals and content breakdowns", body = ApiResponse<DashboardStats>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn dashboard_stats(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let store = &state.store;

    let (total_contents, total_views, total_downloads, contents_by_type, contents_by_status) = {
        let contents = read(&store.contents)?;
        let items = contents.items();
        let refs: Vec<&Content> = items.iter().collect();

        (
            items.len() as u64,
            items.iter().map(|content| content.views_count).sum(),
            items.iter().map(|content| content.downloads_count).sum(),
            facet_counts(&refs, |content| content.content_type.as_str()),
            facet_counts(&refs, |content| content.status.as_str()),
        )
    };

    let stats = DashboardStats {
        total_contents,
        total_teachers: read(&store.teachers)?.items().len() as u64,
        total_mosques: read(&store.mosques)?.items().len() as u64,
        total_themes: read(&store.themes)?.items().len() as u64,
        total_tags: read(&store.tags)?.items().len() as u64,
        total_users: read(&store.users)?.items().len() as u64,
        total_views,
        total_downloads,
        contents_by_type,
        contents_by_status,
    };

    Ok(Json(ApiResponse::ok(stats, "OK")))
}
