use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::presentation::middleware::cors::apply_cors;
use crate::presentation::middleware::trace::apply_trace;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::{AppState, http_handlers};

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);
    let app = apply_limits(app, settings);
    let app = apply_trace(app);
    let app = apply_cors(app, &settings.cors_origins)?;

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn build_router(state: AppState) -> Router {
    http_handlers::routes(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Body size, per-request timeout and global concurrency all come from the
/// environment. The timeout layer answers 408 on its own, so the router's
/// error type stays infallible.
fn apply_limits(app: Router, settings: &Settings) -> Router {
    app.layer(RequestBodyLimitLayer::new(
        settings.http_request_body_limit_bytes,
    ))
    .layer(TimeoutLayer::new(Duration::from_secs(
        settings.http_request_timeout_secs,
    )))
    .layer(GlobalConcurrencyLimitLayer::new(
        settings.http_concurrency_limit,
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::build_router;
    use crate::application::auth_service::AuthService;
    use crate::data::store::MemoryStore;
    use crate::domain::identity::SessionUser;
    use crate::infrastructure::settings::Settings;
    use crate::infrastructure::token::{OpaqueTokens, SignedTokens, TokenMode, TokenService};
    use crate::presentation::AppState;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";
    const ADMIN_EMAIL: &str = "admin@quranapp.sn";
    const ADMIN_PASSWORD: &str = "tres-secret-01";

    fn test_settings() -> Settings {
        Settings {
            http_addr: "127.0.0.1:0".to_string(),
            log_level: "warn".to_string(),
            cors_origins: vec!["*".to_string()],
            http_request_body_limit_bytes: 2 * 1024 * 1024,
            http_concurrency_limit: 32,
            http_request_timeout_secs: 5,
            jwt_secret: SECRET.to_string(),
            token_mode: TokenMode::Signed,
            token_ttl_seconds: 3600,
            token_ttl_extended_seconds: 7200,
            admin_email: ADMIN_EMAIL.to_string(),
            admin_password: ADMIN_PASSWORD.to_string(),
            public_base_url: String::new(),
        }
    }

    fn app_with(tokens: Arc<dyn TokenService>) -> Router {
        let settings = Arc::new(test_settings());
        let store = Arc::new(MemoryStore::new());
        let admin = store.seed(&settings.admin_email).expect("seed must succeed");
        let auth_service = Arc::new(
            AuthService::new(
                SessionUser::from(&admin),
                &settings.admin_password,
                tokens.clone(),
            )
            .expect("auth service must build"),
        );
        build_router(AppState::new(settings, store, tokens, auth_service))
    }

    fn app() -> Router {
        app_with(Arc::new(SignedTokens::new(SECRET, 3600, 7200)))
    }

    fn request(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder
    }

    fn bare(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
        request(method, uri, token)
            .body(Body::empty())
            .expect("request must build")
    }

    fn with_json(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
        request(method, uri, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request must build")
    }

    async fn raw(app: &Router, request: Request<Body>) -> Response {
        app.clone()
            .oneshot(request)
            .await
            .expect("router must answer")
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = raw(app, request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn login(app: &Router) -> String {
        let (status, json) = send(
            app,
            with_json(
                "POST",
                "/api/auth/login",
                None,
                &json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        json["data"]["token"]
            .as_str()
            .expect("login must return a token")
            .to_string()
    }

    #[tokio::test]
    async fn healthz_is_public() {
        let app = app();
        let (status, json) = send(&app, bare("GET", "/healthz", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = app();
        let (status, json) = send(&app, bare("GET", "/api-docs/openapi.json", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["paths"]["/api/admin/contents"].is_object());
    }

    #[tokio::test]
    async fn admin_routes_require_a_session() {
        let app = app();

        let (status, json) = send(&app, bare("GET", "/api/admin/contents", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Non autorisé");
        assert!(json["data"].is_null());

        let (status, _) = send(&app, bare("GET", "/api/admin/contents", Some("garbage"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_checks_credentials() {
        let app = app();

        let (status, json) = send(
            &app,
            with_json("POST", "/api/auth/login", None, &json!({"email": ADMIN_EMAIL})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Email et mot de passe requis");

        let (status, json) = send(
            &app,
            with_json(
                "POST",
                "/api/auth/login",
                None,
                &json!({"email": ADMIN_EMAIL, "password": "pas-le-bon"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Identifiants invalides");

        let (status, json) = send(
            &app,
            with_json(
                "POST",
                "/api/auth/login",
                None,
                &json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert!(json["data"]["token"].is_string());
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn the_issued_token_opens_the_console() {
        let app = app();
        let token = login(&app).await;

        let (status, json) = send(&app, bare("GET", "/api/me", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["email"], ADMIN_EMAIL);

        // the same token carried by the session cookie works as well
        let cookie_request = Request::builder()
            .method("GET")
            .uri("/api/me")
            .header(header::COOKIE, format!("auth_token={token}"))
            .body(Body::empty())
            .expect("request must build");
        let (status, json) = send(&app, cookie_request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["email"], ADMIN_EMAIL);
    }

    #[tokio::test]
    async fn logout_clears_the_session_cookie() {
        let app = app();
        let token = login(&app).await;

        let response = raw(&app, bare("POST", "/api/auth/logout", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .expect("logout must reset the cookie");
        assert!(cookie.starts_with("auth_token="));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn opaque_sessions_can_be_revoked() {
        let app = app_with(Arc::new(OpaqueTokens::new(3600, 7200)));
        let token = login(&app).await;

        let (status, _) = send(&app, bare("GET", "/api/me", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, bare("POST", "/api/auth/logout", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = send(&app, bare("GET", "/api/me", Some(&token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Non autorisé");
    }

    #[tokio::test]
    async fn contents_listing_filters_and_facets() {
        let app = app();
        let token = login(&app).await;

        let (status, json) = send(&app, bare("GET", "/api/admin/contents", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["pagination"]["total"], 3);
        assert_eq!(json["facets"]["types"]["AUDIO"], 1);
        assert_eq!(json["facets"]["types"]["VIDEO"], 1);
        assert_eq!(json["facets"]["types"]["PDF"], 1);
        assert_eq!(json["facets"]["langs"]["fr"], 2);
        assert_eq!(json["facets"]["langs"]["wo"], 1);

        let (_, json) = send(
            &app,
            bare("GET", "/api/admin/contents?q=tafsir", Some(&token)),
        )
        .await;
        assert_eq!(json["pagination"]["total"], 1);
        assert_eq!(json["data"][0]["title"], "Introduction au Tafsir");

        let (_, json) = send(
            &app,
            bare("GET", "/api/admin/contents?type=VIDEO", Some(&token)),
        )
        .await;
        assert_eq!(json["pagination"]["total"], 1);
        assert_eq!(json["data"][0]["title"], "Fiqh de la prière");
    }

    #[tokio::test]
    async fn paging_past_the_end_keeps_totals() {
        let app = app();
        let token = login(&app).await;

        let (status, json) = send(
            &app,
            bare("GET", "/api/admin/mosques?page=3&size=10", Some(&token)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().map(Vec::len), Some(0));
        assert_eq!(json["pagination"]["total"], 2);
        assert_eq!(json["pagination"]["totalPages"], 1);
        assert_eq!(json["pagination"]["hasNext"], false);
        assert_eq!(json["pagination"]["hasPrevious"], true);
    }

    #[tokio::test]
    async fn content_lifecycle_round_trip() {
        let app = app();
        let token = login(&app).await;

        let (status, json) = send(
            &app,
            with_json(
                "POST",
                "/api/admin/contents",
                Some(&token),
                &json!({"title": "Les quarante hadiths"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Créé");
        assert_eq!(json["data"]["type"], "AUDIO");
        assert_eq!(json["data"]["status"], "DRAFT");
        assert_eq!(json["data"]["lang"], "fr");
        let id = json["data"]["id"].as_i64().expect("created id");

        let (status, json) = send(
            &app,
            with_json(
                "PUT",
                &format!("/api/admin/contents/{id}"),
                Some(&token),
                &json!({"description": "Commentaire de la collection de Nawawi"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["data"]["description"],
            "Commentaire de la collection de Nawawi"
        );

        let (_, json) = send(
            &app,
            bare("POST", &format!("/api/admin/contents/{id}/publish"), Some(&token)),
        )
        .await;
        assert_eq!(json["message"], "Publié");
        assert_eq!(json["data"]["status"], "PUBLISHED");
        assert!(json["data"]["publishedAt"].is_string());

        let (_, json) = send(
            &app,
            bare(
                "POST",
                &format!("/api/admin/contents/{id}/unpublish"),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(json["message"], "Dépublié");
        assert_eq!(json["data"]["status"], "APPROVED");

        let (status, json) = send(
            &app,
            bare("DELETE", &format!("/api/admin/contents/{id}"), Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Supprimé");
        assert_eq!(json["data"], true);

        let (status, json) = send(
            &app,
            bare("GET", &format!("/api/admin/contents/{id}"), Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Introuvable");
    }

    #[tokio::test]
    async fn teacher_verification_round_trip() {
        let app = app();
        let token = login(&app).await;

        let (_, json) = send(
            &app,
            bare("GET", "/api/admin/teachers?verified=false", Some(&token)),
        )
        .await;
        assert_eq!(json["pagination"]["total"], 1);
        let id = json["data"][0]["id"].as_i64().expect("pending teacher id");

        let (status, json) = send(
            &app,
            bare("POST", &format!("/api/admin/teachers/{id}/verify"), Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Vérifié");
        assert_eq!(json["data"]["verified"], true);
        assert_eq!(json["data"]["status"], "VERIFIED");

        let (_, json) = send(
            &app,
            with_json(
                "POST",
                &format!("/api/admin/teachers/{id}/reject"),
                Some(&token),
                &json!({"notes": "Profil incomplet"}),
            ),
        )
        .await;
        assert_eq!(json["message"], "Rejeté");
        assert_eq!(json["data"]["verified"], false);
        assert_eq!(json["data"]["status"], "REJECTED");
        assert_eq!(json["data"]["verificationNotes"], "Profil incomplet");
    }

    #[tokio::test]
    async fn user_suspension_round_trip() {
        let app = app();
        let token = login(&app).await;

        let (status, json) = send(
            &app,
            with_json(
                "POST",
                "/api/admin/users",
                Some(&token),
                &json!({"email": "fatou@example.sn"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        // the account name falls back to the email address
        assert_eq!(json["data"]["name"], "fatou@example.sn");
        let id = json["data"]["id"].as_i64().expect("created user id");

        let (_, json) = send(
            &app,
            bare("POST", &format!("/api/admin/users/{id}/suspend"), Some(&token)),
        )
        .await;
        assert_eq!(json["message"], "Suspendu");
        assert_eq!(json["data"]["status"], "SUSPENDED");

        let (_, json) = send(
            &app,
            bare("GET", "/api/admin/users?status=SUSPENDED", Some(&token)),
        )
        .await;
        assert_eq!(json["pagination"]["total"], 1);

        let (_, json) = send(
            &app,
            bare("POST", &format!("/api/admin/users/{id}/unsuspend"), Some(&token)),
        )
        .await;
        assert_eq!(json["message"], "Réactivé");
        assert_eq!(json["data"]["status"], "ACTIVE");
    }

    #[tokio::test]
    async fn dashboard_reports_store_totals() {
        let app = app();
        let token = login(&app).await;

        let (status, json) = send(&app, bare("GET", "/api/admin/dashboard/stats", Some(&token))).await;

        assert_eq!(status, StatusCode::OK);
        let stats = &json["data"];
        assert_eq!(stats["totalContents"], 3);
        assert_eq!(stats["totalTeachers"], 2);
        assert_eq!(stats["totalMosques"], 2);
        assert_eq!(stats["totalThemes"], 5);
        assert_eq!(stats["totalTags"], 4);
        assert_eq!(stats["totalUsers"], 1);
        assert_eq!(stats["totalViews"], 4000);
        assert_eq!(stats["totalDownloads"], 450);
        assert_eq!(stats["contentsByType"]["AUDIO"], 1);
        assert_eq!(stats["contentsByStatus"]["PUBLISHED"], 3);
    }

    #[tokio::test]
    async fn search_spans_contents_and_teachers() {
        let app = app();
        let token = login(&app).await;

        let (status, json) = send(&app, bare("GET", "/api/search?q=tafsir", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["contents"].as_array().map(Vec::len), Some(1));
        // the bio of the seeded imam mentions tafsir
        assert_eq!(json["data"]["teachers"].as_array().map(Vec::len), Some(1));

        let (_, json) = send(
            &app,
            bare("GET", "/api/search/suggest?q=tafsir", Some(&token)),
        )
        .await;
        let titles = json["data"]["contentTitles"]
            .as_array()
            .expect("suggestions must list titles");
        assert!(titles.contains(&Value::from("Introduction au Tafsir")));
    }

    #[tokio::test]
    async fn uploads_round_trip_through_the_public_url() {
        let app = app();
        let token = login(&app).await;

        let boundary = "xqastestboundaryx";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"cours-tajwid.mp3\"\r\n\
             Content-Type: audio/mpeg\r\n\r\n\
             fake-mp3-bytes\r\n\
             --{boundary}--\r\n"
        );
        let upload = request("POST", "/api/upload", Some(&token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request must build");

        let (status, json) = send(&app, upload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["filename"], "cours-tajwid.mp3");
        assert_eq!(json["data"]["mime"], "audio/mpeg");
        assert_eq!(json["data"]["size"], 14);
        let url = json["data"]["url"].as_str().expect("upload url");
        assert!(url.starts_with("/api/upload/"));

        // the stored file is public, raw and uncacheable
        let response = raw(&app, bare("GET", url, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some("audio/mpeg".as_bytes())
        );
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some("no-store".as_bytes())
        );
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        assert_eq!(&bytes[..], b"fake-mp3-bytes");

        let response = raw(&app, bare("GET", "/api/upload/absent", None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn upload_needs_a_file_part() {
        let app = app();
        let token = login(&app).await;

        let boundary = "xqastestboundaryx";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"comment\"\r\n\r\n\
             pas de fichier\r\n\
             --{boundary}--\r\n"
        );
        let upload = request("POST", "/api/upload", Some(&token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request must build");

        let (status, json) = send(&app, upload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "file requis");
    }

    #[tokio::test]
    async fn proxy_validates_before_fetching() {
        let app = app();

        let (status, json) = send(&app, bare("GET", "/api/proxy", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Missing url");

        let (status, json) = send(
            &app,
            bare("GET", "/api/proxy?url=ftp://example.org/a.mp3", None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid protocol");

        let (status, json) = send(
            &app,
            bare("GET", "/api/proxy?url=https://example.org/a.exe", None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "File type not allowed");
    }
}
