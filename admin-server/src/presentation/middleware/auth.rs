use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::domain::identity::SessionUser;
use crate::presentation::AppState;
use crate::presentation::app_error::AppError;

/// Cookie set by browser clients as an alternative to the bearer header.
pub(crate) const AUTH_COOKIE: &str = "auth_token";

#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedUser {
    pub(crate) user: SessionUser,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Strict `Bearer <token>` parse: exactly two whitespace-separated parts,
/// case-insensitive scheme, non-empty token.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == AUTH_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

/// The Authorization header wins; the session cookie is only consulted when
/// no header is present. A malformed header never falls back to the cookie.
pub(crate) fn extract_token(headers: &HeaderMap) -> Option<String> {
    if headers.contains_key(header::AUTHORIZATION) {
        return bearer_token(headers);
    }
    cookie_token(headers)
}

pub(crate) async fn session_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers()).ok_or(AppError::Unauthorized)?;

    let user = state
        .tokens
        .resolve(&token)
        .map_err(|_| AppError::Unauthorized)?;

    request.extensions_mut().insert(AuthenticatedUser { user });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::{bearer_token, cookie_token, extract_token};

    fn headers_with(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_parse_is_strict() {
        let ok = headers_with(header::AUTHORIZATION, "Bearer abc123");
        assert_eq!(bearer_token(&ok).as_deref(), Some("abc123"));

        let lowercase = headers_with(header::AUTHORIZATION, "bearer abc123");
        assert_eq!(bearer_token(&lowercase).as_deref(), Some("abc123"));

        for bad in ["abc123", "Bearer", "Bearer a b", "Basic abc123"] {
            let headers = headers_with(header::AUTHORIZATION, bad);
            assert!(bearer_token(&headers).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn cookie_is_found_among_other_pairs() {
        let headers = headers_with(header::COOKIE, "theme=dark; auth_token=tok-1; lang=fr");
        assert_eq!(cookie_token(&headers).as_deref(), Some("tok-1"));

        let other = headers_with(header::COOKIE, "theme=dark");
        assert!(cookie_token(&other).is_none());
    }

    #[test]
    fn header_wins_over_cookie() {
        let mut headers = headers_with(header::AUTHORIZATION, "Bearer from-header");
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("auth_token=from-cookie"),
        );

        assert_eq!(extract_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn malformed_header_does_not_fall_back_to_cookie() {
        let mut headers = headers_with(header::AUTHORIZATION, "Token abc");
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("auth_token=from-cookie"),
        );

        assert!(extract_token(&headers).is_none());
    }

    #[test]
    fn cookie_is_used_when_the_header_is_absent() {
        let headers = headers_with(header::COOKIE, "auth_token=from-cookie");
        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }
}
