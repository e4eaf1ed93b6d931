use async_trait::async_trait;

use crate::data::query::{PageRequest, Pagination};
use crate::domain::error::DomainError;
use crate::domain::theme::{NewTheme, Theme, ThemePatch};

#[derive(Debug, Clone, Default)]
pub(crate) struct ThemeFilter {
    pub(crate) term: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct ThemePage {
    pub(crate) data: Vec<Theme>,
    pub(crate) pagination: Pagination,
}

#[async_trait]
pub(crate) trait ThemeRepository: Send + Sync {
    async fn create_theme(&self, input: NewTheme) -> Result<Theme, DomainError>;
    async fn get_theme(&self, id: i64) -> Result<Option<Theme>, DomainError>;
    async fn update_theme(&self, id: i64, patch: ThemePatch) -> Result<Option<Theme>, DomainError>;
    async fn delete_theme(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_themes(
        &self,
        filter: ThemeFilter,
        page: PageRequest,
    ) -> Result<ThemePage, DomainError>;
}
