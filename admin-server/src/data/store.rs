use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::domain::content::{AssetKind, Content, ContentAsset, ContentStatus, ContentType};
use crate::domain::error::DomainError;
use crate::domain::mosque::{Mosque, MosqueStatus};
use crate::domain::tag::{Tag, TagType};
use crate::domain::teacher::{Teacher, TeacherStatus};
use crate::domain::theme::{Theme, slugify};
use crate::domain::user::{User, UserRole, UserStatus};

pub(crate) trait HasId {
    fn id(&self) -> i64;
}

macro_rules! impl_has_id {
    ($($entity:ty),* $(,)?) => {
        $(impl HasId for $entity {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

impl_has_id!(Content, Teacher, Mosque, Theme, Tag, User);

/// Ordered in-memory collection with its own id sequence. New items go to
/// the front so listings read most-recent-first; ids are never reused, even
/// after deletion.
#[derive(Debug)]
pub(crate) struct Collection<T> {
    items: Vec<T>,
    next_id: i64,
}

impl<T: HasId + Clone> Collection<T> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub(crate) fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let item = build(id);
        self.items.insert(0, item.clone());
        item
    }

    pub(crate) fn find(&self, id: i64) -> Option<T> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }

    pub(crate) fn update(&mut self, id: i64, apply: impl FnOnce(&mut T)) -> Option<T> {
        let item = self.items.iter_mut().find(|item| item.id() == id)?;
        apply(item);
        Some(item.clone())
    }

    pub(crate) fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }
}

pub(crate) fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, DomainError> {
    lock.read()
        .map_err(|_| DomainError::Unexpected("store lock poisoned".to_string()))
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, DomainError> {
    lock.write()
        .map_err(|_| DomainError::Unexpected("store lock poisoned".to_string()))
}

/// Process-wide dataset. Every collection guards itself, so unrelated
/// resources never contend on one lock.
#[derive(Debug)]
pub(crate) struct MemoryStore {
    pub(crate) contents: RwLock<Collection<Content>>,
    pub(crate) teachers: RwLock<Collection<Teacher>>,
    pub(crate) mosques: RwLock<Collection<Mosque>>,
    pub(crate) themes: RwLock<Collection<Theme>>,
    pub(crate) tags: RwLock<Collection<Tag>>,
    pub(crate) users: RwLock<Collection<User>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            contents: RwLock::new(Collection::new()),
            teachers: RwLock::new(Collection::new()),
            mosques: RwLock::new(Collection::new()),
            themes: RwLock::new(Collection::new()),
            tags: RwLock::new(Collection::new()),
            users: RwLock::new(Collection::new()),
        }
    }

    /// Loads the development fixture and returns the admin user record. The
    /// admin account mirrors the configured login so the console lists it
    /// like any other user.
    pub(crate) fn seed(&self, admin_email: &str) -> Result<User, DomainError> {
        let now = Utc::now();

        let diop_id = {
            let mut teachers = write(&self.teachers)?;
            let diop = teachers.insert_with(|id| Teacher {
                id,
                display_name: "Imam Mansour Diop".to_string(),
                bio: Some("Enseignant en tafsir et fiqh".to_string()),
                languages: vec!["fr".to_string(), "wo".to_string()],
                specializations: vec!["Tafsir".to_string(), "Fiqh".to_string()],
                links: Vec::new(),
                verified: true,
                status: TeacherStatus::Verified,
                verification_notes: None,
                nationality: None,
                profile_image_url: None,
                user_id: None,
                followers_count: 1240,
                total_content_count: 0,
                total_views: 0,
                created_at: now,
                updated_at: now,
            });
            teachers.insert_with(|id| Teacher {
                id,
                display_name: "Cheikh Ahmed Ba".to_string(),
                bio: Some("Cours de Aqida et Sira".to_string()),
                languages: vec!["fr".to_string(), "ar".to_string()],
                specializations: vec!["Aqida".to_string(), "Sira".to_string()],
                links: Vec::new(),
                verified: false,
                status: TeacherStatus::Pending,
                verification_notes: None,
                nationality: None,
                profile_image_url: None,
                user_id: None,
                followers_count: 320,
                total_content_count: 0,
                total_views: 0,
                created_at: now,
                updated_at: now,
            });
            diop.id
        };

        {
            let mut contents = write(&self.contents)?;
            let fixtures: [(&str, &str, ContentType, &str, AssetKind, &str, [i64; 5]); 3] = [
                (
                    "Introduction au Tafsir",
                    "Cours audio sur les bases du tafsir",
                    ContentType::Audio,
                    "fr",
                    AssetKind::AudioHigh,
                    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3",
                    [1500, 250, 80, 45, 0],
                ),
                (
                    "Fiqh de la prière",
                    "Vidéo explicative",
                    ContentType::Video,
                    "wo",
                    AssetKind::VideoHigh,
                    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
                    [2200, 120, 140, 70, 1],
                ),
                (
                    "Guide du Ramadan",
                    "Document PDF",
                    ContentType::Pdf,
                    "fr",
                    AssetKind::Pdf,
                    "https://www.w3.org/WAI/ER/tests/xhtml/testfiles/resources/pdf/dummy.pdf",
                    [300, 80, 25, 10, 0],
                ),
            ];
            for (title, description, content_type, lang, kind, url, counts) in fixtures {
                contents.insert_with(|id| Content {
                    id,
                    title: title.to_string(),
                    description: Some(description.to_string()),
                    content_type,
                    lang: lang.to_string(),
                    status: ContentStatus::Published,
                    teacher_id: Some(diop_id),
                    views_count: counts[0],
                    downloads_count: counts[1],
                    likes_count: counts[2],
                    favorites_count: counts[3],
                    reports_count: counts[4],
                    download_enabled: true,
                    assets: vec![ContentAsset {
                        kind,
                        url: url.to_string(),
                        is_default: true,
                    }],
                    published_at: Some(now),
                    created_at: now,
                    updated_at: now,
                });
            }
        }

        {
            let mut mosques = write(&self.mosques)?;
            for (name, city) in [("Grande Mosquée de Dakar", "Dakar"), ("Mosquée Al-Falah", "Thiaroye")] {
                mosques.insert_with(|id| Mosque {
                    id,
                    name: name.to_string(),
                    description: None,
                    address: None,
                    city: city.to_string(),
                    region: None,
                    country: "Sénégal".to_string(),
                    latitude: None,
                    longitude: None,
                    phone_number: None,
                    email: None,
                    website_url: None,
                    image_url: None,
                    imam_name: None,
                    capacity: None,
                    verified: false,
                    status: MosqueStatus::Active,
                    languages: vec!["fr".to_string()],
                    followers_count: 0,
                    content_count: 0,
                    created_at: now,
                    updated_at: now,
                });
            }
        }

        {
            let mut themes = write(&self.themes)?;
            for (order, name) in ["Tafsir", "Fiqh", "Aqida", "Sira", "Ramadan"].into_iter().enumerate() {
                themes.insert_with(|id| Theme {
                    id,
                    name: name.to_string(),
                    slug: slugify(name),
                    description: None,
                    parent_id: None,
                    display_order: order as i64,
                    icon_name: None,
                    color_code: None,
                    is_featured: order < 2,
                    is_active: true,
                    content_count: 0,
                    created_at: now,
                    updated_at: now,
                });
            }
        }

        {
            let mut tags = write(&self.tags)?;
            for (name, tag_type) in [
                ("coran", TagType::Topic),
                ("ramadan", TagType::Occasion),
                ("debutant", TagType::Difficulty),
                ("senegal", TagType::Place),
            ] {
                tags.insert_with(|id| Tag {
                    id,
                    name: name.to_string(),
                    slug: slugify(name),
                    description: None,
                    tag_type,
                    color_code: None,
                    is_featured: false,
                    is_active: true,
                    usage_count: 0,
                    created_at: now,
                    updated_at: now,
                });
            }
        }

        let mut users = write(&self.users)?;
        let admin = users.insert_with(|id| User {
            id,
            email: admin_email.to_string(),
            name: "Admin".to_string(),
            roles: vec![UserRole::Admin],
            lang: "fr".to_string(),
            country: None,
            status: UserStatus::Active,
            email_verified: true,
            profile_picture_url: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        });

        Ok(admin)
    }
}

#[cfg(test)]
mod tests {
    use super::{Collection, HasId, MemoryStore, read};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i64,
        label: String,
    }

    impl HasId for Item {
        fn id(&self) -> i64 {
            self.id
        }
    }

    fn label(label: &str) -> impl FnOnce(i64) -> Item + '_ {
        move |id| Item {
            id,
            label: label.to_string(),
        }
    }

    #[test]
    fn insert_allocates_sequential_ids_and_prepends() {
        let mut items = Collection::new();
        let a = items.insert_with(label("a"));
        let b = items.insert_with(label("b"));

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(items.items()[0].label, "b");
        assert_eq!(items.items()[1].label, "a");
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let mut items = Collection::new();
        let a = items.insert_with(label("a"));
        assert!(items.remove(a.id));
        assert!(!items.remove(a.id));

        let b = items.insert_with(label("b"));
        assert_eq!(b.id, 2);
        assert!(items.find(a.id).is_none());
    }

    #[test]
    fn update_mutates_in_place() {
        let mut items = Collection::new();
        let a = items.insert_with(label("a"));

        let updated = items
            .update(a.id, |item| item.label = "renamed".to_string())
            .expect("item should exist");
        assert_eq!(updated.id, a.id);
        assert_eq!(items.find(a.id).expect("item should exist").label, "renamed");
        assert!(items.update(99, |_| {}).is_none());
    }

    #[test]
    fn seed_loads_the_fixture_dataset() {
        let store = MemoryStore::new();
        let admin = store.seed("admin@example.org").expect("seed should succeed");
        assert_eq!(admin.email, "admin@example.org");

        let teachers = read(&store.teachers).expect("lock");
        assert_eq!(teachers.items().len(), 2);
        // front insertion: the pending teacher was seeded last
        assert_eq!(teachers.items()[0].display_name, "Cheikh Ahmed Ba");
        assert!(teachers.items()[1].verified);

        let contents = read(&store.contents).expect("lock");
        assert_eq!(contents.items().len(), 3);
        assert!(
            contents
                .items()
                .iter()
                .all(|content| content.teacher_id == Some(teachers.items()[1].id))
        );

        assert_eq!(read(&store.mosques).expect("lock").items().len(), 2);
        assert_eq!(read(&store.themes).expect("lock").items().len(), 5);
        assert_eq!(read(&store.tags).expect("lock").items().len(), 4);

        let users = read(&store.users).expect("lock");
        assert_eq!(users.items().len(), 1);
        assert_eq!(users.items()[0].email, "admin@example.org");
    }
}
