use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{AdminClientError, AdminClientResult};
use crate::models::{
    Content, ContentPage, ContentQuery, ContentUpdate, DashboardStats, NewContent, Page,
    SearchResults, SearchSuggestions, SessionUser, Teacher, TeacherQuery, User, UserQuery,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequestDto<'a> {
    email: &'a str,
    password: &'a str,
    remember_me: bool,
}

#[derive(Debug, Serialize)]
struct RejectTeacherDto<'a> {
    notes: &'a str,
}

#[derive(Debug, Serialize)]
struct SearchQueryDto<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TokenDto {
    token: String,
}

#[derive(Debug, Deserialize)]
struct RefreshDto {
    ok: bool,
}

/// Enveloppe commune des réponses unitaires du serveur. Les listings
/// arrivent à plat (`data` + `pagination`), sans enveloppe.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    success: bool,
    message: String,
}

fn unwrap_envelope<T>(envelope: Envelope<T>) -> AdminClientResult<T> {
    if !envelope.success {
        return Err(AdminClientError::InvalidRequest(envelope.message));
    }
    envelope
        .data
        .ok_or_else(|| AdminClientError::InvalidRequest("réponse sans données".to_string()))
}

#[derive(Debug, Clone)]
/// Client HTTP bas niveau pour l'API d'administration.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Crée un client HTTP avec l'URL de base du serveur.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn builder(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let mut request = self.client.request(method, self.endpoint(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn decode_error(response: reqwest::Response) -> AdminClientError {
        let status = response.status();

        let message = match response.json::<Envelope<serde_json::Value>>().await {
            Ok(body) => Some(body.message),
            Err(_) => None,
        };
        AdminClientError::from_http_status(status, message)
    }

    async fn send<TRes>(&self, request: RequestBuilder) -> AdminClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(AdminClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(AdminClientError::from_reqwest)
    }

    async fn send_enveloped<TRes>(&self, request: RequestBuilder) -> AdminClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let envelope: Envelope<TRes> = self.send(request).await?;
        unwrap_envelope(envelope)
    }

    /// Ouvre une session et renvoie le jeton émis.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> AdminClientResult<String> {
        let payload = LoginRequestDto {
            email,
            password,
            remember_me,
        };
        let dto: TokenDto = self
            .send_enveloped(self.builder(Method::POST, "/api/auth/login", None).json(&payload))
            .await?;
        Ok(dto.token)
    }

    /// Ferme la session. Le serveur répond positivement même si le jeton
    /// est déjà invalide.
    pub async fn logout(&self, token: Option<&str>) -> AdminClientResult<bool> {
        self.send_enveloped(self.builder(Method::POST, "/api/auth/logout", token))
            .await
    }

    /// Vérifie que le jeton présenté est encore accepté.
    pub async fn refresh(&self, token: &str) -> AdminClientResult<bool> {
        let dto: RefreshDto = self
            .send_enveloped(self.builder(Method::POST, "/api/auth/refresh", Some(token)))
            .await?;
        Ok(dto.ok)
    }

    /// Renvoie le profil de la session courante.
    pub async fn me(&self, token: &str) -> AdminClientResult<SessionUser> {
        self.send_enveloped(self.builder(Method::GET, "/api/me", Some(token)))
            .await
    }

    /// Liste les contenus avec filtres, pagination et facettes.
    pub async fn list_contents(
        &self,
        token: &str,
        query: &ContentQuery,
    ) -> AdminClientResult<ContentPage> {
        self.send(
            self.builder(Method::GET, "/api/admin/contents", Some(token))
                .query(query),
        )
        .await
    }

    /// Renvoie un contenu par identifiant.
    pub async fn get_content(&self, token: &str, id: i64) -> AdminClientResult<Content> {
        self.send_enveloped(self.builder(Method::GET, &format!("/api/admin/contents/{id}"), Some(token)))
            .await
    }

    /// Crée un contenu.
    pub async fn create_content(
        &self,
        token: &str,
        body: &NewContent,
    ) -> AdminClientResult<Content> {
        self.send_enveloped(
            self.builder(Method::POST, "/api/admin/contents", Some(token))
                .json(body),
        )
        .await
    }

    /// Met à jour un contenu champ par champ.
    pub async fn update_content(
        &self,
        token: &str,
        id: i64,
        body: &ContentUpdate,
    ) -> AdminClientResult<Content> {
        self.send_enveloped(
            self.builder(Method::PUT, &format!("/api/admin/contents/{id}"), Some(token))
                .json(body),
        )
        .await
    }

    /// Supprime un contenu.
    pub async fn delete_content(&self, token: &str, id: i64) -> AdminClientResult<bool> {
        self.send_enveloped(self.builder(
            Method::DELETE,
            &format!("/api/admin/contents/{id}"),
            Some(token),
        ))
        .await
    }

    /// Publie un contenu.
    pub async fn publish_content(&self, token: &str, id: i64) -> AdminClientResult<Content> {
        self.send_enveloped(self.builder(
            Method::POST,
            &format!("/api/admin/contents/{id}/publish"),
            Some(token),
        ))
        .await
    }

    /// Retire un contenu de la publication.
    pub async fn unpublish_content(&self, token: &str, id: i64) -> AdminClientResult<Content> {
        self.send_enveloped(self.builder(
            Method::POST,
            &format!("/api/admin/contents/{id}/unpublish"),
            Some(token),
        ))
        .await
    }

    /// Liste les enseignants avec filtres et pagination.
    pub async fn list_teachers(
        &self,
        token: &str,
        query: &TeacherQuery,
    ) -> AdminClientResult<Page<Teacher>> {
        self.send(
            self.builder(Method::GET, "/api/admin/teachers", Some(token))
                .query(query),
        )
        .await
    }

    /// Marque un enseignant comme vérifié.
    pub async fn verify_teacher(&self, token: &str, id: i64) -> AdminClientResult<Teacher> {
        self.send_enveloped(self.builder(
            Method::POST,
            &format!("/api/admin/teachers/{id}/verify"),
            Some(token),
        ))
        .await
    }

    /// Rejette la vérification d'un enseignant, avec notes facultatives.
    pub async fn reject_teacher(
        &self,
        token: &str,
        id: i64,
        notes: Option<&str>,
    ) -> AdminClientResult<Teacher> {
        let request = self.builder(
            Method::POST,
            &format!("/api/admin/teachers/{id}/reject"),
            Some(token),
        );
        let request = match notes {
            Some(notes) => request.json(&RejectTeacherDto { notes }),
            None => request,
        };
        self.send_enveloped(request).await
    }

    /// Liste les comptes utilisateurs avec filtres et pagination.
    pub async fn list_users(
        &self,
        token: &str,
        query: &UserQuery,
    ) -> AdminClientResult<Page<User>> {
        self.send(
            self.builder(Method::GET, "/api/admin/users", Some(token))
                .query(query),
        )
        .await
    }

    /// Suspend un compte utilisateur.
    pub async fn suspend_user(&self, token: &str, id: i64) -> AdminClientResult<User> {
        self.send_enveloped(self.builder(
            Method::POST,
            &format!("/api/admin/users/{id}/suspend"),
            Some(token),
        ))
        .await
    }

    /// Réactive un compte utilisateur suspendu.
    pub async fn unsuspend_user(&self, token: &str, id: i64) -> AdminClientResult<User> {
        self.send_enveloped(self.builder(
            Method::POST,
            &format!("/api/admin/users/{id}/unsuspend"),
            Some(token),
        ))
        .await
    }

    /// Renvoie les chiffres agrégés du tableau de bord.
    pub async fn dashboard_stats(&self, token: &str) -> AdminClientResult<DashboardStats> {
        self.send_enveloped(self.builder(Method::GET, "/api/admin/dashboard/stats", Some(token)))
            .await
    }

    /// Recherche transverse dans les contenus et les enseignants.
    pub async fn search(
        &self,
        token: &str,
        term: &str,
        limit: Option<u32>,
    ) -> AdminClientResult<SearchResults> {
        let query = SearchQueryDto { q: term, limit };
        self.send_enveloped(
            self.builder(Method::GET, "/api/search", Some(token))
                .query(&query),
        )
        .await
    }

    /// Suggestions de saisie pour la barre de recherche.
    pub async fn suggest(
        &self,
        token: &str,
        term: &str,
        limit: Option<u32>,
    ) -> AdminClientResult<SearchSuggestions> {
        let query = SearchQueryDto { q: term, limit };
        self.send_enveloped(
            self.builder(Method::GET, "/api/search/suggest", Some(token))
                .query(&query),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:8080/");
        let full = client.endpoint("/api/admin/contents");
        assert_eq!(full, "http://localhost:8080/api/admin/contents");
    }

    #[test]
    fn content_query_serializes_only_set_fields() {
        let client = Client::new();
        let query = ContentQuery {
            page: Some(2),
            size: Some(10),
            content_type: Some("AUDIO".to_string()),
            ..ContentQuery::default()
        };
        let request = client
            .get("http://localhost:8080/api/admin/contents")
            .query(&query)
            .build()
            .expect("request must build");
        assert_eq!(request.url().query(), Some("page=2&size=10&type=AUDIO"));
    }

    #[test]
    fn success_envelope_yields_the_payload() {
        let envelope: Envelope<TokenDto> = serde_json::from_str(
            r#"{"data":{"token":"abc"},"success":true,"message":"OK","timestamp":"2025-06-01T10:00:00Z"}"#,
        )
        .expect("envelope must parse");

        let dto = unwrap_envelope(envelope).expect("success envelope must yield data");
        assert_eq!(dto.token, "abc");
    }

    #[test]
    fn failure_envelope_carries_the_server_message() {
        let envelope: Envelope<TokenDto> = serde_json::from_str(
            r#"{"data":null,"success":false,"message":"Introuvable","timestamp":"2025-06-01T10:00:00Z"}"#,
        )
        .expect("envelope must parse");

        let err = unwrap_envelope(envelope).expect_err("failure envelope must error");
        assert!(matches!(
            err,
            AdminClientError::InvalidRequest(message) if message == "Introuvable"
        ));
    }
}
