use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::application::search_service::{SearchResults, SearchSuggestions};
use crate::data::content_repository::ContentFacets;
use crate::data::query::Pagination;
use crate::domain::content::{AssetKind, Content, ContentAsset, ContentStatus, ContentType};
use crate::domain::identity::SessionUser;
use crate::domain::mosque::{Mosque, MosqueStatus};
use crate::domain::tag::{Tag, TagType};
use crate::domain::teacher::{Teacher, TeacherStatus};
use crate::domain::theme::Theme;
use crate::domain::user::{User, UserRole, UserStatus};
use crate::presentation::envelope::{ApiResponse, ListResponse};
use crate::presentation::handlers::auth::{LoginDto, RefreshDto, TokenDto};
use crate::presentation::handlers::contents::{
    ContentListDto, CreateContentDto, UpdateContentDto,
};
use crate::presentation::handlers::dashboard::DashboardStats;
use crate::presentation::handlers::mosques::{CreateMosqueDto, UpdateMosqueDto};
use crate::presentation::handlers::tags::{CreateTagDto, UpdateTagDto};
use crate::presentation::handlers::teachers::{
    CreateTeacherDto, RejectTeacherDto, UpdateTeacherDto,
};
use crate::presentation::handlers::themes::{CreateThemeDto, UpdateThemeDto};
use crate::presentation::handlers::uploads::UploadDto;
use crate::presentation::handlers::users::{CreateUserDto, UpdateUserDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::auth::refresh,
        crate::presentation::handlers::auth::me,
        crate::presentation::handlers::contents::list_contents,
        crate::presentation::handlers::contents::get_content,
        crate::presentation::handlers::contents::create_content,
        crate::presentation::handlers::contents::update_content,
        crate::presentation::handlers::contents::delete_content,
        crate::presentation::handlers::contents::publish_content,
        crate::presentation::handlers::contents::unpublish_content,
        crate::presentation::handlers::contents::approve_content,
        crate::presentation::handlers::contents::reject_content,
        crate::presentation::handlers::teachers::list_teachers,
        crate::presentation::handlers::teachers::get_teacher,
        crate::presentation::handlers::teachers::create_teacher,
        crate::presentation::handlers::teachers::update_teacher,
        crate::presentation::handlers::teachers::delete_teacher,
        crate::presentation::handlers::teachers::verify_teacher,
        crate::presentation::handlers::teachers::reject_teacher,
        crate::presentation::handlers::mosques::list_mosques,
        crate::presentation::handlers::mosques::get_mosque,
        crate::presentation::handlers::mosques::create_mosque,
        crate::presentation::handlers::mosques::update_mosque,
        crate::presentation::handlers::mosques::delete_mosque,
        crate::presentation::handlers::mosques::verify_mosque,
        crate::presentation::handlers::themes::list_themes,
        crate::presentation::handlers::themes::get_theme,
        crate::presentation::handlers::themes::create_theme,
        crate::presentation::handlers::themes::update_theme,
        crate::presentation::handlers::themes::delete_theme,
        crate::presentation::handlers::tags::list_tags,
        crate::presentation::handlers::tags::get_tag,
        crate::presentation::handlers::tags::create_tag,
        crate::presentation::handlers::tags::update_tag,
        crate::presentation::handlers::tags::delete_tag,
        crate::presentation::handlers::users::list_users,
        crate::presentation::handlers::users::get_user,
        crate::presentation::handlers::users::create_user,
        crate::presentation::handlers::users::update_user,
        crate::presentation::handlers::users::delete_user,
        crate::presentation::handlers::users::suspend_user,
        crate::presentation::handlers::users::unsuspend_user,
        crate::presentation::handlers::dashboard::dashboard_stats,
        crate::presentation::handlers::search::search,
        crate::presentation::handlers::search::suggest,
        crate::presentation::handlers::uploads::upload_file,
        crate::presentation::handlers::uploads::serve_upload,
        crate::presentation::handlers::proxy::proxy_media
    ),
    components(
        schemas(
            SessionUser,
            LoginDto,
            TokenDto,
            RefreshDto,
            Content,
            ContentAsset,
            ContentType,
            ContentStatus,
            AssetKind,
            CreateContentDto,
            UpdateContentDto,
            ContentListDto,
            ContentFacets,
            Teacher,
            TeacherStatus,
            CreateTeacherDto,
            UpdateTeacherDto,
            RejectTeacherDto,
            Mosque,
            MosqueStatus,
            CreateMosqueDto,
            UpdateMosqueDto,
            Theme,
            CreateThemeDto,
            UpdateThemeDto,
            Tag,
            TagType,
            CreateTagDto,
            UpdateTagDto,
            User,
            UserRole,
            UserStatus,
            CreateUserDto,
            UpdateUserDto,
            Pagination,
            DashboardStats,
            SearchResults,
            SearchSuggestions,
            UploadDto,
            ApiResponse<SessionUser>,
            ApiResponse<TokenDto>,
            ApiResponse<RefreshDto>,
            ApiResponse<Content>,
            ApiResponse<Teacher>,
            ApiResponse<Mosque>,
            ApiResponse<Theme>,
            ApiResponse<Tag>,
            ApiResponse<User>,
            ApiResponse<bool>,
            ApiResponse<DashboardStats>,
            ApiResponse<SearchResults>,
            ApiResponse<SearchSuggestions>,
            ApiResponse<UploadDto>,
            ListResponse<Teacher>,
            ListResponse<Mosque>,
            ListResponse<Theme>,
            ListResponse<Tag>,
            ListResponse<User>
        )
    ),
    tags(
        (name = "auth", description = "Session endpoints"),
        (name = "contents", description = "Content management"),
        (name = "teachers", description = "Teacher management"),
        (name = "mosques", description = "Mosque management"),
        (name = "themes", description = "Theme management"),
        (name = "tags", description = "Tag management"),
        (name = "users", description = "User management"),
        (name = "dashboard", description = "Console statistics"),
        (name = "search", description = "Cross-collection search"),
        (name = "media", description = "Uploads and media proxy")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
