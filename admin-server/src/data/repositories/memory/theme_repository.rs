use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::data::query::{self, PageRequest, TermMatch};
use crate::data::store::{MemoryStore, read, write};
use crate::data::theme_repository::{ThemeFilter, ThemePage, ThemeRepository};
use crate::domain::error::DomainError;
use crate::domain::theme::{NewTheme, Theme, ThemePatch, slugify};

impl TermMatch for Theme {
    fn term_fields(&self) -> [Option<&str>; 2] {
        [Some(&self.name), Some(&self.slug)]
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryThemeRepository {
    store: Arc<MemoryStore>,
}

impl MemoryThemeRepository {
    pub(crate) fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ThemeRepository for MemoryThemeRepository {
    async fn create_theme(&self, input: NewTheme) -> Result<Theme, DomainError> {
        let now = Utc::now();
        let slug = input.slug.unwrap_or_else(|| slugify(&input.name));
        let mut themes = write(&self.store.themes)?;
        Ok(themes.insert_with(|id| Theme {
            id,
            name: input.name,
            slug,
            description: input.description,
            parent_id: input.parent_id,
            display_order: input.display_order,
            icon_name: input.icon_name,
            color_code: input.color_code,
            is_featured: input.is_featured,
            is_active: input.is_active,
            content_count: 0,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn get_theme(&self, id: i64) -> Result<Option<Theme>, DomainError> {
        Ok(read(&self.store.themes)?.find(id))
    }

    async fn update_theme(&self, id: i64, patch: ThemePatch) -> Result<Option<Theme>, DomainError> {
        let now = Utc::now();
        let mut themes = write(&self.store.themes)?;
        Ok(themes.update(id, |theme| {
            if let Some(name) = patch.name {
                theme.name = name;
            }
            if let Some(slug) = patch.slug {
                theme.slug = slug;
            }
            if let Some(description) = patch.description {
                theme.description = Some(description);
            }
            if let Some(parent_id) = patch.parent_id {
                theme.parent_id = Some(parent_id);
            }
            if let Some(display_order) = patch.display_order {
                theme.display_order = display_order;
            }
            if let Some(icon_name) = patch.icon_name {
                theme.icon_name = Some(icon_name);
            }
            if let Some(color_code) = patch.color_code {
                theme.color_code = Some(color_code);
            }
            if let Some(is_featured) = patch.is_featured {
                theme.is_featured = is_featured;
            }
            if let Some(is_active) = patch.is_active {
                theme.is_active = is_active;
            }
            theme.updated_at = now;
        }))
    }

    async fn delete_theme(&self, id: i64) -> Result<bool, DomainError> {
        Ok(write(&self.store.themes)?.remove(id))
    }

    async fn list_themes(
        &self,
        filter: ThemeFilter,
        page: PageRequest,
    ) -> Result<ThemePage, DomainError> {
        let themes = read(&self.store.themes)?;
        let filtered = query::filter_items(themes.items(), filter.term.as_deref(), &[]);
        let (data, pagination) = query::paginate(&filtered, page);
        Ok(ThemePage { data, pagination })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::MemoryThemeRepository;
    use crate::data::query::PageRequest;
    use crate::data::store::MemoryStore;
    use crate::data::theme_repository::{ThemeFilter, ThemeRepository};
    use crate::domain::theme::NewTheme;

    #[tokio::test]
    async fn create_derives_the_slug_from_the_name() {
        let store = Arc::new(MemoryStore::new());
        let repo = MemoryThemeRepository::new(store);

        let theme = repo
            .create_theme(
                NewTheme {
                    name: "Tafsir du Coran".to_string(),
                    slug: None,
                    description: None,
                    parent_id: None,
                    display_order: 0,
                    icon_name: None,
                    color_code: None,
                    is_featured: false,
                    is_active: true,
                }
                .validate()
                .expect("input should be valid"),
            )
            .await
            .expect("create should succeed");

        assert_eq!(theme.slug, "tafsir-du-coran");
    }

    #[tokio::test]
    async fn term_matches_name_or_slug() {
        let store = Arc::new(MemoryStore::new());
        store.seed("admin@example.org").expect("seed should succeed");
        let repo = MemoryThemeRepository::new(store);

        let page = repo
            .list_themes(
                ThemeFilter {
                    term: Some("fiqh".to_string()),
                },
                PageRequest::parse(None, None),
            )
            .await
            .expect("list should succeed");
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "Fiqh");
    }
}
