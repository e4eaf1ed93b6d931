use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::presentation::AppState;

/// Path extensions the proxy will fetch. Everything else is refused before
/// any upstream request is made.
const ALLOWED_EXTENSIONS: [&str; 7] = [".pdf", ".mp4", ".mp3", ".m3u8", ".webm", ".ogg", ".wav"];

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ProxyQuery {
    pub(crate) url: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/proxy",
    tag = "media",
    params(("url" = Option<String>, Query, description = "Upstream http(s) media URL")),
    responses(
        (status = 200, description = "Upstream bytes, streamed"),
        (status = 400, description = "Missing or disallowed URL"),
        (status = 502, description = "Upstream returned a non-success status")
    )
)]
pub(crate) async fn proxy_media(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> Response {
    let Some(raw_url) = query.url else {
        return (StatusCode::BAD_REQUEST, "Missing url").into_response();
    };

    let Ok(url) = reqwest::Url::parse(&raw_url) else {
        return (StatusCode::BAD_REQUEST, "Invalid protocol").into_response();
    };
    if !matches!(url.scheme(), "http" | "https") {
        return (StatusCode::BAD_REQUEST, "Invalid protocol").into_response();
    }

    let path = url.path().to_ascii_lowercase();
    if !ALLOWED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return (StatusCode::BAD_REQUEST, "File type not allowed").into_response();
    }

    let upstream = match state.http_client.get(url).send().await {
        Ok(response) => response,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "Proxy error").into_response(),
    };

    let status = upstream.status();
    if !status.is_success() {
        return (
            StatusCode::BAD_GATEWAY,
            format!("Upstream error {}", status.as_u16()),
        )
            .into_response();
    }

    let mut headers = HeaderMap::new();
    for (name, value) in upstream.headers() {
        if name == header::CONTENT_SECURITY_POLICY
            || name == header::TRANSFER_ENCODING
            || name == header::CONNECTION
        {
            continue;
        }
        headers.insert(name.clone(), value.clone());
    }
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN"));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=300"),
    );

    let body = Body::from_stream(upstream.bytes_stream());

    (StatusCode::OK, headers, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::ALLOWED_EXTENSIONS;

    #[test]
    fn extension_allowlist_covers_media_types_only() {
        let path = "/media/fiqh-priere.mp3".to_ascii_lowercase();
        assert!(ALLOWED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)));

        let html = "/page/index.html".to_ascii_lowercase();
        assert!(!ALLOWED_EXTENSIONS.iter().any(|ext| html.ends_with(ext)));
    }
}
