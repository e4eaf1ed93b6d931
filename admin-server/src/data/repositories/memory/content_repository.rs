use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::data::content_repository::{
    ContentFacets, ContentFilter, ContentPage, ContentRepository,
};
use crate::data::query::{self, PageRequest, Predicate, TermMatch};
use crate::data::store::{MemoryStore, read, write};
use crate::domain::content::{Content, ContentPatch, ContentStatus, NewContent};
use crate::domain::error::DomainError;

impl TermMatch for Content {
    fn term_fields(&self) -> [Option<&str>; 2] {
        [Some(&self.title), self.description.as_deref()]
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryContentRepository {
    store: Arc<MemoryStore>,
}

impl MemoryContentRepository {
    pub(crate) fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

fn content_predicates(filter: &ContentFilter) -> Vec<Predicate<'_, Content>> {
    let mut predicates: Vec<Predicate<'_, Content>> = Vec::new();
    if let Some(content_type) = query::active_filter(&filter.content_type) {
        predicates.push(Box::new(move |content: &Content| {
            content.content_type.as_str() == content_type
        }));
    }
    if let Some(lang) = query::active_filter(&filter.lang) {
        predicates.push(Box::new(move |content: &Content| content.lang == lang));
    }
    if let Some(status) = query::active_filter(&filter.status) {
        predicates.push(Box::new(move |content: &Content| {
            content.status.as_str() == status
        }));
    }
    predicates
}

#[async_trait]
impl ContentRepository for MemoryContentRepository {
    async fn create_content(&self, input: NewContent) -> Result<Content, DomainError> {
        let now = Utc::now();
        let mut contents = write(&self.store.contents)?;
        Ok(contents.insert_with(|id| Content {
            id,
            title: input.title,
            description: input.description,
            content_type: input.content_type,
            lang: input.lang,
            status: input.status,
            teacher_id: input.teacher_id,
            views_count: 0,
            downloads_count: 0,
            likes_count: 0,
            favorites_count: 0,
            reports_count: 0,
            download_enabled: input.download_enabled,
            assets: input.assets,
            published_at: (input.status == ContentStatus::Published).then_some(now),
            created_at: now,
            updated_at: now,
        }))
    }

    async fn get_content(&self, id: i64) -> Result<Option<Content>, DomainError> {
        Ok(read(&self.store.contents)?.find(id))
    }

    async fn update_content(
        &self,
        id: i64,
        patch: ContentPatch,
    ) -> Result<Option<Content>, DomainError> {
        let now = Utc::now();
        let mut contents = write(&self.store.contents)?;
        Ok(contents.update(id, |content| {
            if let Some(title) = patch.title {
                content.title = title;
            }
            if let Some(description) = patch.description {
                content.description = Some(description);
            }
            if let Some(content_type) = patch.content_type {
                content.content_type = content_type;
            }
            if let Some(lang) = patch.lang {
                content.lang = lang;
            }
            if let Some(status) = patch.status {
                content.status = status;
                if status == ContentStatus::Published && content.published_at.is_none() {
                    content.published_at = Some(now);
                }
            }
            if let Some(teacher_id) = patch.teacher_id {
                content.teacher_id = Some(teacher_id);
            }
            if let Some(download_enabled) = patch.download_enabled {
                content.download_enabled = download_enabled;
            }
            if let Some(assets) = patch.assets {
                content.assets = assets;
            }
            content.updated_at = now;
        }))
    }

    async fn delete_content(&self, id: i64) -> Result<bool, DomainError> {
        Ok(write(&self.store.contents)?.remove(id))
    }

    async fn list_contents(
        &self,
        filter: ContentFilter,
        page: PageRequest,
    ) -> Result<ContentPage, DomainError> {
        let contents = read(&self.store.contents)?;
        let matched = query::filter_by_term(contents.items(), filter.term.as_deref());
        // facets count the term-matched set before categorical filters apply
        let facets = ContentFacets {
            types: query::facet_counts(&matched, |content| content.content_type.as_str()),
            langs: query::facet_counts(&matched, |content| content.lang.as_str()),
        };
        let filtered = query::apply_filters(matched, &content_predicates(&filter));
        let (data, pagination) = query::paginate(&filtered, page);
        Ok(ContentPage {
            data,
            pagination,
            facets,
        })
    }

    async fn set_content_status(
        &self,
        id: i64,
        status: ContentStatus,
    ) -> Result<Option<Content>, DomainError> {
        let now = Utc::now();
        let mut contents = write(&self.store.contents)?;
        Ok(contents.update(id, |content| {
            content.status = status;
            if status == ContentStatus::Published && content.published_at.is_none() {
                content.published_at = Some(now);
            }
            content.updated_at = now;
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::MemoryContentRepository;
    use crate::data::content_repository::{ContentFilter, ContentRepository};
    use crate::data::query::PageRequest;
    use crate::data::store::MemoryStore;
    use crate::domain::content::{ContentPatch, ContentStatus, ContentType, NewContent};

    fn seeded_repo() -> MemoryContentRepository {
        let store = Arc::new(MemoryStore::new());
        store.seed("admin@example.org").expect("seed should succeed");
        MemoryContentRepository::new(store)
    }

    fn filter(term: Option<&str>, content_type: Option<&str>) -> ContentFilter {
        ContentFilter {
            term: term.map(str::to_string),
            content_type: content_type.map(str::to_string),
            ..ContentFilter::default()
        }
    }

    #[tokio::test]
    async fn term_and_type_compose_on_the_fixture() {
        let repo = seeded_repo();

        let page = repo
            .list_contents(filter(Some("tafsir"), Some("AUDIO")), PageRequest::parse(None, None))
            .await
            .expect("list should succeed");
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].title, "Introduction au Tafsir");
        assert_eq!(page.pagination.total, 1);

        let page = repo
            .list_contents(filter(Some("tafsir"), Some("VIDEO")), PageRequest::parse(None, None))
            .await
            .expect("list should succeed");
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 0);
    }

    #[tokio::test]
    async fn facets_ignore_categorical_filters() {
        let repo = seeded_repo();

        let page = repo
            .list_contents(filter(None, Some("AUDIO")), PageRequest::parse(None, None))
            .await
            .expect("list should succeed");

        // one AUDIO row in data, but facets still describe the whole term set
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.facets.types.get("AUDIO"), Some(&1));
        assert_eq!(page.facets.types.get("VIDEO"), Some(&1));
        assert_eq!(page.facets.types.get("PDF"), Some(&1));
        assert_eq!(page.facets.langs.get("fr"), Some(&2));
        assert_eq!(page.facets.langs.get("wo"), Some(&1));
    }

    #[tokio::test]
    async fn listing_is_most_recent_first() {
        let repo = seeded_repo();

        let page = repo
            .list_contents(ContentFilter::default(), PageRequest::parse(None, None))
            .await
            .expect("list should succeed");
        let titles: Vec<&str> = page.data.iter().map(|content| content.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Guide du Ramadan", "Fiqh de la prière", "Introduction au Tafsir"]
        );
    }

    #[tokio::test]
    async fn update_merges_and_refreshes_updated_at() {
        let repo = seeded_repo();
        let created = repo
            .create_content(
                NewContent {
                    title: "Brouillon".to_string(),
                    description: None,
                    content_type: ContentType::Text,
                    lang: "fr".to_string(),
                    status: ContentStatus::Draft,
                    teacher_id: None,
                    download_enabled: false,
                    assets: Vec::new(),
                }
                .validate()
                .expect("input should be valid"),
            )
            .await
            .expect("create should succeed");
        assert!(created.published_at.is_none());

        let patch = ContentPatch {
            status: Some(ContentStatus::Published),
            ..Default::default()
        };
        let updated = repo
            .update_content(created.id, patch)
            .await
            .expect("update should succeed")
            .expect("content should exist");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Brouillon");
        assert!(updated.published_at.is_some());
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn publish_transition_stamps_published_at_once() {
        let repo = seeded_repo();
        let created = repo
            .create_content(NewContent {
                title: "Sermon du vendredi".to_string(),
                description: None,
                content_type: ContentType::Audio,
                lang: "fr".to_string(),
                status: ContentStatus::PendingReview,
                teacher_id: None,
                download_enabled: true,
                assets: Vec::new(),
            })
            .await
            .expect("create should succeed");

        let published = repo
            .set_content_status(created.id, ContentStatus::Published)
            .await
            .expect("transition should succeed")
            .expect("content should exist");
        let stamp = published.published_at.expect("publish should stamp the date");

        let republished = repo
            .set_content_status(created.id, ContentStatus::Published)
            .await
            .expect("transition should succeed")
            .expect("content should exist");
        assert_eq!(republished.published_at, Some(stamp));
    }
}
