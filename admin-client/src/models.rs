use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Profil de la session courante, renvoyé par `/api/me`.
pub struct SessionUser {
    /// Identifiant du compte.
    pub id: i64,
    /// Adresse email de connexion.
    pub email: String,
    /// Nom affiché.
    pub name: String,
    /// Rôles du compte (`ADMIN`, `MODERATOR`, `TEACHER`, `USER`).
    pub roles: Vec<String>,
    /// Langue préférée.
    pub lang: String,
    /// Statut du compte (`ACTIVE`, `SUSPENDED`, ...).
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Contenu pédagogique (audio, vidéo, texte, PDF ou ebook).
pub struct Content {
    /// Identifiant du contenu.
    pub id: i64,
    /// Titre.
    pub title: String,
    /// Description libre.
    pub description: Option<String>,
    /// Type de contenu (`AUDIO`, `VIDEO`, `TEXT`, `PDF`, `EBOOK`).
    #[serde(rename = "type")]
    pub content_type: String,
    /// Langue du contenu.
    pub lang: String,
    /// Statut de modération (`DRAFT`, `PUBLISHED`, ...).
    pub status: String,
    /// Enseignant associé, le cas échéant.
    pub teacher_id: Option<i64>,
    /// Nombre de vues.
    pub views_count: i64,
    /// Nombre de téléchargements.
    pub downloads_count: i64,
    /// Téléchargement autorisé.
    pub download_enabled: bool,
    /// Date de publication, si publié.
    pub published_at: Option<DateTime<Utc>>,
    /// Date de création (UTC).
    pub created_at: DateTime<Utc>,
    /// Date de dernière modification (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Enseignant référencé par la plateforme.
pub struct Teacher {
    /// Identifiant de l'enseignant.
    pub id: i64,
    /// Nom public.
    pub display_name: String,
    /// Biographie.
    pub bio: Option<String>,
    /// Langues d'enseignement.
    pub languages: Vec<String>,
    /// Spécialités (tafsir, fiqh, ...).
    pub specializations: Vec<String>,
    /// Vérifié par l'équipe de modération.
    pub verified: bool,
    /// Statut de vérification (`PENDING`, `VERIFIED`, `REJECTED`, ...).
    pub status: String,
    /// Notes internes laissées lors d'un rejet.
    pub verification_notes: Option<String>,
    /// Nombre d'abonnés.
    pub followers_count: i64,
    /// Date de création (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Compte utilisateur de la plateforme.
pub struct User {
    /// Identifiant du compte.
    pub id: i64,
    /// Adresse email.
    pub email: String,
    /// Nom affiché.
    pub name: String,
    /// Rôles du compte.
    pub roles: Vec<String>,
    /// Langue préférée.
    pub lang: String,
    /// Pays déclaré.
    pub country: Option<String>,
    /// Statut (`ACTIVE`, `SUSPENDED`, ...).
    pub status: String,
    /// Email confirmé.
    pub email_verified: bool,
    /// Date de création (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Métadonnées de pagination jointes à chaque listing.
pub struct Pagination {
    /// Page courante (à partir de 1).
    pub page: u64,
    /// Taille de page demandée.
    pub size: u64,
    /// Nombre total d'éléments après filtres.
    pub total: u64,
    /// Nombre total de pages.
    pub total_pages: u64,
    /// Une page suivante existe.
    pub has_next: bool,
    /// Une page précédente existe.
    pub has_previous: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Page générique renvoyée par les listings de ressources.
pub struct Page<T> {
    /// Éléments de la page courante.
    pub data: Vec<T>,
    /// Métadonnées de pagination.
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Compteurs par type et par langue, joints au listing des contenus.
pub struct ContentFacets {
    /// Nombre de contenus par type.
    pub types: BTreeMap<String, u64>,
    /// Nombre de contenus par langue.
    pub langs: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Listing des contenus: page, pagination et facettes.
pub struct ContentPage {
    /// Contenus de la page courante.
    pub data: Vec<Content>,
    /// Métadonnées de pagination.
    pub pagination: Pagination,
    /// Facettes calculées sur l'ensemble filtré par le terme.
    pub facets: ContentFacets,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Chiffres agrégés du tableau de bord.
pub struct DashboardStats {
    /// Nombre total de contenus.
    pub total_contents: u64,
    /// Nombre total d'enseignants.
    pub total_teachers: u64,
    /// Nombre total de mosquées.
    pub total_mosques: u64,
    /// Nombre total de thèmes.
    pub total_themes: u64,
    /// Nombre total de tags.
    pub total_tags: u64,
    /// Nombre total de comptes.
    pub total_users: u64,
    /// Vues cumulées, tous contenus confondus.
    pub total_views: i64,
    /// Téléchargements cumulés.
    pub total_downloads: i64,
    /// Répartition des contenus par type.
    pub contents_by_type: BTreeMap<String, u64>,
    /// Répartition des contenus par statut.
    pub contents_by_status: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Résultats de la recherche transverse.
pub struct SearchResults {
    /// Contenus dont le titre ou la description contient le terme.
    pub contents: Vec<Content>,
    /// Enseignants dont le nom ou la biographie contient le terme.
    pub teachers: Vec<Teacher>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Suggestions de saisie pour la barre de recherche.
pub struct SearchSuggestions {
    /// Titres de contenus correspondants.
    pub content_titles: Vec<String>,
    /// Noms d'enseignants correspondants.
    pub teacher_names: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
/// Corps de création d'un contenu. Les champs absents reçoivent les valeurs
/// par défaut du serveur (type `AUDIO`, langue `fr`, statut `DRAFT`).
pub struct NewContent {
    /// Titre (obligatoire).
    pub title: String,
    /// Description libre.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Type de contenu.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Langue du contenu.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Statut initial.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Enseignant associé.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
    /// Téléchargement autorisé.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
/// Corps de mise à jour partielle d'un contenu. Seuls les champs renseignés
/// sont modifiés.
pub struct ContentUpdate {
    /// Nouveau titre.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Nouvelle description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Nouveau type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Nouvelle langue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Nouveau statut.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Nouvel enseignant associé.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
    /// Téléchargement autorisé.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Filtres du listing des contenus.
pub struct ContentQuery {
    /// Page demandée (à partir de 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Taille de page (1 à 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Terme de recherche (titre et description).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Filtre par type de contenu.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Filtre par langue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Filtre par statut.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Filtres du listing des enseignants.
pub struct TeacherQuery {
    /// Page demandée (à partir de 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Taille de page (1 à 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Terme de recherche (nom et biographie).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Filtre par état de vérification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Filtre par langue d'enseignement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Filtres du listing des comptes utilisateurs.
pub struct UserQuery {
    /// Page demandée (à partir de 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Taille de page (1 à 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Terme de recherche (nom et email).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Filtre par rôle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Filtre par statut de compte.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
