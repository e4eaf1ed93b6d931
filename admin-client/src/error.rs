use thiserror::Error;

#[derive(Debug, Error)]
/// Erreurs de la bibliothèque cliente `admin-client`.
pub enum AdminClientError {
    /// Erreur du transport HTTP (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentification requise (jeton absent, expiré ou révoqué).
    #[error("unauthorized")]
    Unauthorized,

    /// La ressource demandée n'existe pas.
    #[error("not found")]
    NotFound,

    /// Requête rejetée par le serveur (validation ou règle métier).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Résultat des opérations `admin-client`.
pub type AdminClientResult<T> = Result<T, AdminClientError>;

impl AdminClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::InvalidRequest(message)
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
