use async_trait::async_trait;

use crate::data::query::{PageRequest, Pagination};
use crate::domain::error::DomainError;
use crate::domain::mosque::{Mosque, MosquePatch, NewMosque};

#[derive(Debug, Clone, Default)]
pub(crate) struct MosqueFilter {
    pub(crate) term: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) verified: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct MosquePage {
    pub(crate) data: Vec<Mosque>,
    pub(crate) pagination: Pagination,
}

#[async_trait]
pub(crate) trait MosqueRepository: Send + Sync {
    async fn create_mosque(&self, input: NewMosque) -> Result<Mosque, DomainError>;
    async fn get_mosque(&self, id: i64) -> Result<Option<Mosque>, DomainError>;
    async fn update_mosque(
        &self,
        id: i64,
        patch: MosquePatch,
    ) -> Result<Option<Mosque>, DomainError>;
    async fn delete_mosque(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_mosques(
        &self,
        filter: MosqueFilter,
        page: PageRequest,
    ) -> Result<MosquePage, DomainError>;
    async fn set_mosque_verified(
        &self,
        id: i64,
        verified: bool,
    ) -> Result<Option<Mosque>, DomainError>;
}
