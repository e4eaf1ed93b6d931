use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::query::{PageRequest, Pagination};
use crate::domain::content::{Content, ContentPatch, ContentStatus, NewContent};
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Default)]
pub(crate) struct ContentFilter {
    pub(crate) term: Option<String>,
    pub(crate) content_type: Option<String>,
    pub(crate) lang: Option<String>,
    pub(crate) status: Option<String>,
}

/// Counts per content type and language, shipped alongside every listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub(crate) struct ContentFacets {
    pub(crate) types: BTreeMap<String, u64>,
    pub(crate) langs: BTreeMap<String, u64>,
}

#[derive(Debug, Clone)]
pub(crate) struct ContentPage {
    pub(crate) data: Vec<Content>,
    pub(crate) pagination: Pagination,
    pub(crate) facets: ContentFacets,
}

#[async_trait]
pub(crate) trait ContentRepository: Send + Sync {
    async fn create_content(&self, input: NewContent) -> Result<Content, DomainError>;
    async fn get_content(&self, id: i64) -> Result<Option<Content>, DomainError>;
    async fn update_content(
        &self,
        id: i64,
        patch: ContentPatch,
    ) -> Result<Option<Content>, DomainError>;
    async fn delete_content(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_contents(
        &self,
        filter: ContentFilter,
        page: PageRequest,
    ) -> Result<ContentPage, DomainError>;
    async fn set_content_status(
        &self,
        id: i64,
        status: ContentStatus,
    ) -> Result<Option<Content>, DomainError>;
}
