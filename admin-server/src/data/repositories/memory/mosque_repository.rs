use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::data::mosque_repository::{MosqueFilter, MosquePage, MosqueRepository};
use crate::data::query::{self, PageRequest, Predicate, TermMatch};
use crate::data::store::{MemoryStore, read, write};
use crate::domain::error::DomainError;
use crate::domain::mosque::{Mosque, MosquePatch, MosqueStatus, NewMosque};

impl TermMatch for Mosque {
    fn term_fields(&self) -> [Option<&str>; 2] {
        [Some(&self.name), Some(&self.city)]
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryMosqueRepository {
    store: Arc<MemoryStore>,
}

impl MemoryMosqueRepository {
    pub(crate) fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

fn mosque_predicates(filter: &MosqueFilter) -> Vec<Predicate<'_, Mosque>> {
    let mut predicates: Vec<Predicate<'_, Mosque>> = Vec::new();
    if let Some(city) = query::active_filter(&filter.city) {
        predicates.push(Box::new(move |mosque: &Mosque| mosque.city == city));
    }
    if let Some(country) = query::active_filter(&filter.country) {
        predicates.push(Box::new(move |mosque: &Mosque| mosque.country == country));
    }
    if let Some(verified) = query::active_filter(&filter.verified) {
        predicates.push(Box::new(move |mosque: &Mosque| match verified {
            "true" => mosque.verified,
            "false" => !mosque.verified,
            _ => false,
        }));
    }
    predicates
}

#[async_trait]
impl MosqueRepository for MemoryMosqueRepository {
    async fn create_mosque(&self, input: NewMosque) -> Result<Mosque, DomainError> {
        let now = Utc::now();
        let mut mosques = write(&self.store.mosques)?;
        Ok(mosques.insert_with(|id| Mosque {
            id,
            name: input.name,
            description: input.description,
            address: input.address,
            city: input.city,
            region: input.region,
            country: input.country,
            latitude: input.latitude,
            longitude: input.longitude,
            phone_number: input.phone_number,
            email: input.email,
            website_url: input.website_url,
            image_url: input.image_url,
            imam_name: input.imam_name,
            capacity: input.capacity,
            verified: false,
            status: MosqueStatus::Active,
            languages: input.languages,
            followers_count: 0,
            content_count: 0,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn get_mosque(&self, id: i64) -> Result<Option<Mosque>, DomainError> {
        Ok(read(&self.store.mosques)?.find(id))
    }

    async fn update_mosque(
        &self,
        id: i64,
        patch: MosquePatch,
    ) -> Result<Option<Mosque>, DomainError> {
        let now = Utc::now();
        let mut mosques = write(&self.store.mosques)?;
        Ok(mosques.update(id, |mosque| {
            if let Some(name) = patch.name {
                mosque.name = name;
            }
            if let Some(description) = patch.description {
                mosque.description = Some(description);
            }
            if let Some(address) = patch.address {
                mosque.address = Some(address);
            }
            if let Some(city) = patch.city {
                mosque.city = city;
            }
            if let Some(region) = patch.region {
                mosque.region = Some(region);
            }
            if let Some(country) = patch.country {
                mosque.country = country;
            }
            if let Some(latitude) = patch.latitude {
                mosque.latitude = Some(latitude);
            }
            if let Some(longitude) = patch.longitude {
                mosque.longitude = Some(longitude);
            }
            if let Some(phone_number) = patch.phone_number {
                mosque.phone_number = Some(phone_number);
            }
            if let Some(email) = patch.email {
                mosque.email = Some(email);
            }
            if let Some(website_url) = patch.website_url {
                mosque.website_url = Some(website_url);
            }
            if let Some(image_url) = patch.image_url {
                mosque.image_url = Some(image_url);
            }
            if let Some(imam_name) = patch.imam_name {
                mosque.imam_name = Some(imam_name);
            }
            if let Some(capacity) = patch.capacity {
                mosque.capacity = Some(capacity);
            }
            if let Some(verified) = patch.verified {
                mosque.verified = verified;
            }
            if let Some(status) = patch.status {
                mosque.status = status;
            }
            if let Some(languages) = patch.languages {
                mosque.languages = languages;
            }
            mosque.updated_at = now;
        }))
    }

    async fn delete_mosque(&self, id: i64) -> Result<bool, DomainError> {
        Ok(write(&self.store.mosques)?.remove(id))
    }

    async fn list_mosques(
        &self,
        filter: MosqueFilter,
        page: PageRequest,
    ) -> Result<MosquePage, DomainError> {
        let mosques = read(&self.store.mosques)?;
        let filtered = query::filter_items(
            mosques.items(),
            filter.term.as_deref(),
            &mosque_predicates(&filter),
        );
        let (data, pagination) = query::paginate(&filtered, page);
        Ok(MosquePage { data, pagination })
    }

    async fn set_mosque_verified(
        &self,
        id: i64,
        verified: bool,
    ) -> Result<Option<Mosque>, DomainError> {
        let now = Utc::now();
        let mut mosques = write(&self.store.mosques)?;
        Ok(mosques.update(id, |mosque| {
            mosque.verified = verified;
            mosque.updated_at = now;
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::MemoryMosqueRepository;
    use crate::data::mosque_repository::{MosqueFilter, MosqueRepository};
    use crate::data::query::PageRequest;
    use crate::data::store::MemoryStore;

    fn seeded_repo() -> MemoryMosqueRepository {
        let store = Arc::new(MemoryStore::new());
        store.seed("admin@example.org").expect("seed should succeed");
        MemoryMosqueRepository::new(store)
    }

    #[tokio::test]
    async fn page_past_the_end_keeps_totals() {
        let repo = seeded_repo();

        let page = repo
            .list_mosques(
                MosqueFilter::default(),
                PageRequest::parse(Some("3"), Some("10")),
            )
            .await
            .expect("list should succeed");

        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.pagination.total_pages, 1);
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_previous);
    }

    #[tokio::test]
    async fn city_filter_is_exact_match() {
        let repo = seeded_repo();

        let page = repo
            .list_mosques(
                MosqueFilter {
                    city: Some("Dakar".to_string()),
                    ..MosqueFilter::default()
                },
                PageRequest::parse(None, None),
            )
            .await
            .expect("list should succeed");
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "Grande Mosquée de Dakar");

        let page = repo
            .list_mosques(
                MosqueFilter {
                    city: Some("dakar".to_string()),
                    ..MosqueFilter::default()
                },
                PageRequest::parse(None, None),
            )
            .await
            .expect("list should succeed");
        assert!(page.data.is_empty());
    }
}
