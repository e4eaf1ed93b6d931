//! Bibliothèque cliente HTTP pour la console d'administration.
//!
//! `AdminClient` enveloppe `reqwest` avec des modèles typés et conserve le
//! jeton de session obtenu via `login` : les opérations protégées le
//! présentent automatiquement en en-tête `Authorization`.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{AdminClientError, AdminClientResult};
pub use models::{
    Content, ContentFacets, ContentPage, ContentQuery, ContentUpdate, DashboardStats, NewContent,
    Page, Pagination, SearchResults, SearchSuggestions, SessionUser, Teacher, TeacherQuery, User,
    UserQuery,
};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Client typé de la console d'administration.
pub struct AdminClient {
    http: HttpClient,
    token: Option<String>,
}

impl AdminClient {
    /// Crée un client pointant vers l'URL de base du serveur,
    /// par exemple `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(base_url),
            token: None,
        }
    }

    /// Installe un jeton de session obtenu par un autre canal.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Renvoie le jeton de session courant, s'il existe.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Oublie le jeton de session courant sans appeler le serveur.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Ouvre une session administrateur et conserve le jeton émis.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> AdminClientResult<String> {
        let token = self.http.login(email, password, remember_me).await?;
        self.token = Some(token.clone());
        Ok(token)
    }

    /// Ferme la session côté serveur et oublie le jeton local, même si
    /// l'appel échoue.
    pub async fn logout(&mut self) -> AdminClientResult<bool> {
        let result = self.http.logout(self.token.as_deref()).await;
        self.token = None;
        result
    }

    /// Vérifie que le jeton courant est encore accepté par le serveur.
    pub async fn refresh(&self) -> AdminClientResult<bool> {
        self.http.refresh(self.require_token()?).await
    }

    /// Renvoie le profil de la session courante.
    pub async fn me(&self) -> AdminClientResult<SessionUser> {
        self.http.me(self.require_token()?).await
    }

    /// Liste les contenus avec filtres, pagination et facettes.
    pub async fn list_contents(&self, query: &ContentQuery) -> AdminClientResult<ContentPage> {
        self.http
            .list_contents(self.require_token()?, query)
            .await
    }

    /// Renvoie un contenu par identifiant.
    pub async fn get_content(&self, id: i64) -> AdminClientResult<Content> {
        self.http.get_content(self.require_token()?, id).await
    }

    /// Crée un contenu.
    pub async fn create_content(&self, body: &NewContent) -> AdminClientResult<Content> {
        self.http.create_content(self.require_token()?, body).await
    }

    /// Met à jour un contenu champ par champ.
    pub async fn update_content(
        &self,
        id: i64,
        body: &ContentUpdate,
    ) -> AdminClientResult<Content> {
        self.http
            .update_content(self.require_token()?, id, body)
            .await
    }

    /// Supprime un contenu.
    pub async fn delete_content(&self, id: i64) -> AdminClientResult<bool> {
        self.http.delete_content(self.require_token()?, id).await
    }

    /// Publie un contenu.
    pub async fn publish_content(&self, id: i64) -> AdminClientResult<Content> {
        self.http.publish_content(self.require_token()?, id).await
    }

    /// Retire un contenu de la publication (retour au statut approuvé).
    pub async fn unpublish_content(&self, id: i64) -> AdminClientResult<Content> {
        self.http
            .unpublish_content(self.require_token()?, id)
            .await
    }

    /// Liste les enseignants avec filtres et pagination.
    pub async fn list_teachers(&self, query: &TeacherQuery) -> AdminClientResult<Page<Teacher>> {
        self.http
            .list_teachers(self.require_token()?, query)
            .await
    }

    /// Marque un enseignant comme vérifié.
    pub async fn verify_teacher(&self, id: i64) -> AdminClientResult<Teacher> {
        self.http.verify_teacher(self.require_token()?, id).await
    }

    /// Rejette la vérification d'un enseignant, avec notes facultatives.
    pub async fn reject_teacher(
        &self,
        id: i64,
        notes: Option<&str>,
    ) -> AdminClientResult<Teacher> {
        self.http
            .reject_teacher(self.require_token()?, id, notes)
            .await
    }

    /// Liste les comptes utilisateurs avec filtres et pagination.
    pub async fn list_users(&self, query: &UserQuery) -> AdminClientResult<Page<User>> {
        self.http.list_users(self.require_token()?, query).await
    }

    /// Suspend un compte utilisateur.
    pub async fn suspend_user(&self, id: i64) -> AdminClientResult<User> {
        self.http.suspend_user(self.require_token()?, id).await
    }

    /// Réactive un compte utilisateur suspendu.
    pub async fn unsuspend_user(&self, id: i64) -> AdminClientResult<User> {
        self.http.unsuspend_user(self.require_token()?, id).await
    }

    /// Renvoie les chiffres agrégés du tableau de bord.
    pub async fn dashboard_stats(&self) -> AdminClientResult<DashboardStats> {
        self.http.dashboard_stats(self.require_token()?).await
    }

    /// Recherche transverse dans les contenus et les enseignants.
    pub async fn search(&self, term: &str, limit: Option<u32>) -> AdminClientResult<SearchResults> {
        self.http.search(self.require_token()?, term, limit).await
    }

    /// Suggestions de saisie pour la barre de recherche.
    pub async fn suggest(
        &self,
        term: &str,
        limit: Option<u32>,
    ) -> AdminClientResult<SearchSuggestions> {
        self.http.suggest(self.require_token()?, term, limit).await
    }

    fn require_token(&self) -> AdminClientResult<&str> {
        self.token.as_deref().ok_or(AdminClientError::Unauthorized)
    }
}
