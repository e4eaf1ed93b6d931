use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};

pub(crate) fn build_cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let layer = if allowed_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("invalid CORS origin: {origin}"))
            })
            .collect::<Result<Vec<_>>>()?;

        CorsLayer::new().allow_origin(origins)
    };

    Ok(layer
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]))
}

pub(crate) fn apply_cors(router: Router, allowed_origins: &[String]) -> Result<Router> {
    let cors = build_cors_layer(allowed_origins)?;
    Ok(router.layer(cors))
}

#[cfg(test)]
mod tests {
    use super::build_cors_layer;

    #[test]
    fn wildcard_and_explicit_origins_both_build() {
        build_cors_layer(&["*".to_string()]).expect("wildcard must build");
        build_cors_layer(&["http://localhost:3000".to_string()]).expect("origin must build");
    }

    #[test]
    fn unparseable_origin_is_rejected() {
        build_cors_layer(&["bad\norigin".to_string()]).expect_err("origin must be rejected");
    }
}
