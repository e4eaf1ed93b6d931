use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::search_service::SearchService;
use crate::data::repositories::memory::content_repository::MemoryContentRepository;
use crate::data::repositories::memory::mosque_repository::MemoryMosqueRepository;
use crate::data::repositories::memory::tag_repository::MemoryTagRepository;
use crate::data::repositories::memory::teacher_repository::MemoryTeacherRepository;
use crate::data::repositories::memory::theme_repository::MemoryThemeRepository;
use crate::data::repositories::memory::user_repository::MemoryUserRepository;
use crate::data::store::MemoryStore;
use crate::data::uploads::UploadStore;
use crate::infrastructure::settings::Settings;
use crate::infrastructure::token::TokenService;

pub(crate) mod app_error;
pub(crate) mod envelope;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) settings: Arc<Settings>,
    pub(crate) store: Arc<MemoryStore>,
    pub(crate) tokens: Arc<dyn TokenService>,
    pub(crate) auth_service: Arc<AuthService>,
    pub(crate) search_service: Arc<SearchService<MemoryContentRepository, MemoryTeacherRepository>>,
    pub(crate) contents: Arc<MemoryContentRepository>,
    pub(crate) teachers: Arc<MemoryTeacherRepository>,
    pub(crate) mosques: Arc<MemoryMosqueRepository>,
    pub(crate) themes: Arc<MemoryThemeRepository>,
    pub(crate) tags: Arc<MemoryTagRepository>,
    pub(crate) users: Arc<MemoryUserRepository>,
    pub(crate) uploads: Arc<UploadStore>,
    pub(crate) http_client: reqwest::Client,
}

impl AppState {
    pub(crate) fn new(
        settings: Arc<Settings>,
        store: Arc<MemoryStore>,
        tokens: Arc<dyn TokenService>,
        auth_service: Arc<AuthService>,
    ) -> Self {
        let search_service = Arc::new(SearchService::new(
            MemoryContentRepository::new(store.clone()),
            MemoryTeacherRepository::new(store.clone()),
        ));

        Self {
            contents: Arc::new(MemoryContentRepository::new(store.clone())),
            teachers: Arc::new(MemoryTeacherRepository::new(store.clone())),
            mosques: Arc::new(MemoryMosqueRepository::new(store.clone())),
            themes: Arc::new(MemoryThemeRepository::new(store.clone())),
            tags: Arc::new(MemoryTagRepository::new(store.clone())),
            users: Arc::new(MemoryUserRepository::new(store.clone())),
            uploads: Arc::new(UploadStore::new()),
            http_client: reqwest::Client::new(),
            search_service,
            settings,
            store,
            tokens,
            auth_service,
        }
    }
}
