use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::data::query::{self, PageRequest, Predicate, TermMatch};
use crate::data::store::{MemoryStore, read, write};
use crate::data::tag_repository::{TagFilter, TagPage, TagRepository};
use crate::domain::error::DomainError;
use crate::domain::tag::{NewTag, Tag, TagPatch};
use crate::domain::theme::slugify;

impl TermMatch for Tag {
    fn term_fields(&self) -> [Option<&str>; 2] {
        [Some(&self.name), Some(&self.slug)]
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryTagRepository {
    store: Arc<MemoryStore>,
}

impl MemoryTagRepository {
    pub(crate) fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

fn tag_predicates(filter: &TagFilter) -> Vec<Predicate<'_, Tag>> {
    let mut predicates: Vec<Predicate<'_, Tag>> = Vec::new();
    if let Some(tag_type) = query::active_filter(&filter.tag_type) {
        predicates.push(Box::new(move |tag: &Tag| tag.tag_type.as_str() == tag_type));
    }
    predicates
}

#[async_trait]
impl TagRepository for MemoryTagRepository {
    async fn create_tag(&self, input: NewTag) -> Result<Tag, DomainError> {
        let now = Utc::now();
        let slug = input.slug.unwrap_or_else(|| slugify(&input.name));
        let mut tags = write(&self.store.tags)?;
        Ok(tags.insert_with(|id| Tag {
            id,
            name: input.name,
            slug,
            description: input.description,
            tag_type: input.tag_type,
            color_code: input.color_code,
            is_featured: input.is_featured,
            is_active: input.is_active,
            usage_count: 0,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn get_tag(&self, id: i64) -> Result<Option<Tag>, DomainError> {
        Ok(read(&self.store.tags)?.find(id))
    }

    async fn update_tag(&self, id: i64, patch: TagPatch) -> Result<Option<Tag>, DomainError> {
        let now = Utc::now();
        let mut tags = write(&self.store.tags)?;
        Ok(tags.update(id, |tag| {
            if let Some(name) = patch.name {
                tag.name = name;
            }
            if let Some(slug) = patch.slug {
                tag.slug = slug;
            }
            if let Some(description) = patch.description {
                tag.description = Some(description);
            }
            if let Some(tag_type) = patch.tag_type {
                tag.tag_type = tag_type;
            }
            if let Some(color_code) = patch.color_code {
                tag.color_code = Some(color_code);
            }
            if let Some(is_featured) = patch.is_featured {
                tag.is_featured = is_featured;
            }
            if let Some(is_active) = patch.is_active {
                tag.is_active = is_active;
            }
            tag.updated_at = now;
        }))
    }

    async fn delete_tag(&self, id: i64) -> Result<bool, DomainError> {
        Ok(write(&self.store.tags)?.remove(id))
    }

    async fn list_tags(
        &self,
        filter: TagFilter,
        page: PageRequest,
    ) -> Result<TagPage, DomainError> {
        let tags = read(&self.store.tags)?;
        let filtered = query::filter_items(
            tags.items(),
            filter.term.as_deref(),
            &tag_predicates(&filter),
        );
        let (data, pagination) = query::paginate(&filtered, page);
        Ok(TagPage { data, pagination })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::MemoryTagRepository;
    use crate::data::query::PageRequest;
    use crate::data::store::MemoryStore;
    use crate::data::tag_repository::{TagFilter, TagRepository};

    #[tokio::test]
    async fn type_filter_selects_matching_tags() {
        let store = Arc::new(MemoryStore::new());
        store.seed("admin@example.org").expect("seed should succeed");
        let repo = MemoryTagRepository::new(store);

        let page = repo
            .list_tags(
                TagFilter {
                    term: None,
                    tag_type: Some("TOPIC".to_string()),
                },
                PageRequest::parse(None, None),
            )
            .await
            .expect("list should succeed");
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "coran");
    }
}
