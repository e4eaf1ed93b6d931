use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::data::query::{self, PageRequest, Predicate, TermMatch};
use crate::data::store::{MemoryStore, read, write};
use crate::data::teacher_repository::{TeacherFilter, TeacherPage, TeacherRepository};
use crate::domain::error::DomainError;
use crate::domain::teacher::{NewTeacher, Teacher, TeacherPatch, TeacherStatus};

impl TermMatch for Teacher {
    fn term_fields(&self) -> [Option<&str>; 2] {
        [Some(&self.display_name), self.bio.as_deref()]
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryTeacherRepository {
    store: Arc<MemoryStore>,
}

impl MemoryTeacherRepository {
    pub(crate) fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

fn teacher_predicates(filter: &TeacherFilter) -> Vec<Predicate<'_, Teacher>> {
    let mut predicates: Vec<Predicate<'_, Teacher>> = Vec::new();
    if let Some(verified) = query::active_filter(&filter.verified) {
        // only the literals "true" and "false" select anything
        predicates.push(Box::new(move |teacher: &Teacher| match verified {
            "true" => teacher.verified,
            "false" => !teacher.verified,
            _ => false,
        }));
    }
    if let Some(lang) = query::active_filter(&filter.lang) {
        predicates.push(Box::new(move |teacher: &Teacher| {
            teacher.languages.iter().any(|language| language == lang)
        }));
    }
    predicates
}

#[async_trait]
impl TeacherRepository for MemoryTeacherRepository {
    async fn create_teacher(&self, input: NewTeacher) -> Result<Teacher, DomainError> {
        let now = Utc::now();
        let mut teachers = write(&self.store.teachers)?;
        Ok(teachers.insert_with(|id| Teacher {
            id,
            display_name: input.display_name,
            bio: input.bio,
            languages: input.languages,
            specializations: input.specializations,
            links: input.links,
            verified: false,
            status: TeacherStatus::Pending,
            verification_notes: None,
            nationality: input.nationality,
            profile_image_url: input.profile_image_url,
            user_id: input.user_id,
            followers_count: 0,
            total_content_count: 0,
            total_views: 0,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>, DomainError> {
        Ok(read(&self.store.teachers)?.find(id))
    }

    async fn update_teacher(
        &self,
        id: i64,
        patch: TeacherPatch,
    ) -> Result<Option<Teacher>, DomainError> {
        let now = Utc::now();
        let mut teachers = write(&self.store.teachers)?;
        Ok(teachers.update(id, |teacher| {
            if let Some(display_name) = patch.display_name {
                teacher.display_name = display_name;
            }
            if let Some(bio) = patch.bio {
                teacher.bio = Some(bio);
            }
            if let Some(languages) = patch.languages {
                teacher.languages = languages;
            }
            if let Some(specializations) = patch.specializations {
                teacher.specializations = specializations;
            }
            if let Some(links) = patch.links {
                teacher.links = links;
            }
            if let Some(verified) = patch.verified {
                teacher.verified = verified;
            }
            if let Some(status) = patch.status {
                teacher.status = status;
            }
            if let Some(nationality) = patch.nationality {
                teacher.nationality = Some(nationality);
            }
            if let Some(profile_image_url) = patch.profile_image_url {
                teacher.profile_image_url = Some(profile_image_url);
            }
            teacher.updated_at = now;
        }))
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool, DomainError> {
        Ok(write(&self.store.teachers)?.remove(id))
    }

    async fn list_teachers(
        &self,
        filter: TeacherFilter,
        page: PageRequest,
    ) -> Result<TeacherPage, DomainError> {
        let teachers = read(&self.store.teachers)?;
        let filtered = query::filter_items(
            teachers.items(),
            filter.term.as_deref(),
            &teacher_predicates(&filter),
        );
        let (data, pagination) = query::paginate(&filtered, page);
        Ok(TeacherPage { data, pagination })
    }

    async fn set_verification(
        &self,
        id: i64,
        verified: bool,
        status: TeacherStatus,
        notes: Option<String>,
    ) -> Result<Option<Teacher>, DomainError> {
        let now = Utc::now();
        let mut teachers = write(&self.store.teachers)?;
        Ok(teachers.update(id, |teacher| {
            teacher.verified = verified;
            teacher.status = status;
            if let Some(notes) = notes {
                teacher.verification_notes = Some(notes);
            }
            teacher.updated_at = now;
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::MemoryTeacherRepository;
    use crate::data::query::PageRequest;
    use crate::data::store::MemoryStore;
    use crate::data::teacher_repository::{TeacherFilter, TeacherRepository};
    use crate::domain::teacher::TeacherStatus;

    fn seeded_repo() -> MemoryTeacherRepository {
        let store = Arc::new(MemoryStore::new());
        store.seed("admin@example.org").expect("seed should succeed");
        MemoryTeacherRepository::new(store)
    }

    #[tokio::test]
    async fn verified_filter_uses_the_literal_strings() {
        let repo = seeded_repo();

        let page = repo
            .list_teachers(
                TeacherFilter {
                    verified: Some("true".to_string()),
                    ..TeacherFilter::default()
                },
                PageRequest::parse(None, None),
            )
            .await
            .expect("list should succeed");
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].display_name, "Imam Mansour Diop");

        // anything else selects nothing rather than erroring
        let page = repo
            .list_teachers(
                TeacherFilter {
                    verified: Some("yes".to_string()),
                    ..TeacherFilter::default()
                },
                PageRequest::parse(None, None),
            )
            .await
            .expect("list should succeed");
        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn verification_transition_updates_status_and_notes() {
        let repo = seeded_repo();
        let pending = repo
            .list_teachers(
                TeacherFilter {
                    verified: Some("false".to_string()),
                    ..TeacherFilter::default()
                },
                PageRequest::parse(None, None),
            )
            .await
            .expect("list should succeed");
        let id = pending.data[0].id;

        let verified = repo
            .set_verification(
                id,
                true,
                TeacherStatus::Verified,
                Some("Diplômes vérifiés".to_string()),
            )
            .await
            .expect("transition should succeed")
            .expect("teacher should exist");
        assert!(verified.verified);
        assert_eq!(verified.status, TeacherStatus::Verified);
        assert_eq!(
            verified.verification_notes.as_deref(),
            Some("Diplômes vérifiés")
        );

        // rejecting without notes keeps the previous ones
        let rejected = repo
            .set_verification(id, false, TeacherStatus::Rejected, None)
            .await
            .expect("transition should succeed")
            .expect("teacher should exist");
        assert_eq!(
            rejected.verification_notes.as_deref(),
            Some("Diplômes vérifiés")
        );
    }
}
