use serde::Serialize;
use utoipa::ToSchema;

use crate::data::content_repository::{ContentFilter, ContentRepository};
use crate::data::query::PageRequest;
use crate::data::teacher_repository::{TeacherFilter, TeacherRepository};
use crate::domain::content::Content;
use crate::domain::error::DomainError;
use crate::domain::teacher::Teacher;

const SEARCH_LIMIT_MAX: u64 = 20;
const SEARCH_LIMIT_DEFAULT: u64 = 10;
const SUGGEST_LIMIT_MAX: u64 = 5;
const SUGGEST_LIMIT_DEFAULT: u64 = 5;
// suggestions dedupe over a wider window than they return
const SUGGEST_SCAN_SIZE: u64 = 100;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResults {
    pub(crate) contents: Vec<Content>,
    pub(crate) teachers: Vec<Teacher>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchSuggestions {
    pub(crate) content_titles: Vec<String>,
    pub(crate) teacher_names: Vec<String>,
}

/// Cross-resource term search over contents and teachers.
pub(crate) struct SearchService<C, T> {
    contents: C,
    teachers: T,
}

impl<C: ContentRepository, T: TeacherRepository> SearchService<C, T> {
    pub(crate) fn new(contents: C, teachers: T) -> Self {
        Self { contents, teachers }
    }

    pub(crate) async fn search(
        &self,
        term: Option<&str>,
        limit: Option<&str>,
    ) -> Result<SearchResults, DomainError> {
        let limit = parse_limit(limit, SEARCH_LIMIT_DEFAULT, SEARCH_LIMIT_MAX);

        let contents = self
            .contents
            .list_contents(term_filter(term), PageRequest::first(limit))
            .await?
            .data;
        let teachers = self
            .teachers
            .list_teachers(teacher_term_filter(term), PageRequest::first(limit))
            .await?
            .data;

        Ok(SearchResults { contents, teachers })
    }

    pub(crate) async fn suggest(
        &self,
        term: Option<&str>,
        limit: Option<&str>,
    ) -> Result<SearchSuggestions, DomainError> {
        let limit = parse_limit(limit, SUGGEST_LIMIT_DEFAULT, SUGGEST_LIMIT_MAX) as usize;

        let contents = self
            .contents
            .list_contents(term_filter(term), PageRequest::first(SUGGEST_SCAN_SIZE))
            .await?
            .data;
        let teachers = self
            .teachers
            .list_teachers(teacher_term_filter(term), PageRequest::first(SUGGEST_SCAN_SIZE))
            .await?
            .data;

        Ok(SearchSuggestions {
            content_titles: distinct(contents.into_iter().map(|content| content.title), limit),
            teacher_names: distinct(
                teachers.into_iter().map(|teacher| teacher.display_name),
                limit,
            ),
        })
    }
}

fn term_filter(term: Option<&str>) -> ContentFilter {
    ContentFilter {
        term: term.map(str::to_string),
        ..ContentFilter::default()
    }
}

fn teacher_term_filter(term: Option<&str>) -> TeacherFilter {
    TeacherFilter {
        term: term.map(str::to_string),
        ..TeacherFilter::default()
    }
}

fn parse_limit(raw: Option<&str>, default: u64, max: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .map(|value| (value.max(1) as u64).min(max))
        .unwrap_or(default)
}

fn distinct(values: impl Iterator<Item = String>, limit: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if seen.len() == limit {
            break;
        }
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::SearchService;
    use crate::data::repositories::memory::content_repository::MemoryContentRepository;
    use crate::data::repositories::memory::teacher_repository::MemoryTeacherRepository;
    use crate::data::store::MemoryStore;

    fn seeded_service() -> SearchService<MemoryContentRepository, MemoryTeacherRepository> {
        let store = Arc::new(MemoryStore::new());
        store.seed("admin@example.org").expect("seed should succeed");
        SearchService::new(
            MemoryContentRepository::new(store.clone()),
            MemoryTeacherRepository::new(store),
        )
    }

    #[tokio::test]
    async fn search_spans_contents_and_teachers() {
        let service = seeded_service();

        let results = service
            .search(Some("fiqh"), None)
            .await
            .expect("search should succeed");

        assert_eq!(results.contents.len(), 1);
        assert_eq!(results.contents[0].title, "Fiqh de la prière");
        assert_eq!(results.teachers.len(), 1);
        assert_eq!(results.teachers[0].display_name, "Imam Mansour Diop");
    }

    #[tokio::test]
    async fn search_limit_is_clamped() {
        let service = seeded_service();

        let results = service
            .search(None, Some("1"))
            .await
            .expect("search should succeed");
        assert_eq!(results.contents.len(), 1);
        assert_eq!(results.teachers.len(), 1);

        // junk falls back to the default rather than erroring
        let results = service
            .search(None, Some("junk"))
            .await
            .expect("search should succeed");
        assert_eq!(results.contents.len(), 3);
        assert_eq!(results.teachers.len(), 2);
    }

    #[tokio::test]
    async fn suggestions_are_distinct_and_capped() {
        let service = seeded_service();

        let suggestions = service
            .suggest(Some("a"), Some("2"))
            .await
            .expect("suggest should succeed");

        assert!(suggestions.content_titles.len() <= 2);
        assert!(suggestions.teacher_names.len() <= 2);
        let mut deduped = suggestions.content_titles.clone();
        deduped.dedup();
        assert_eq!(deduped, suggestions.content_titles);
    }
}
