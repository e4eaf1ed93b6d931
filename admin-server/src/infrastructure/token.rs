use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::identity::SessionUser;

#[derive(Debug, Error)]
pub(crate) enum TokenError {
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    /// Every resolution failure collapses into this variant. Callers (and
    /// clients) cannot tell a bad signature from an expired or unknown
    /// token, which keeps the signing secret unprobeable.
    #[error("invalid credential")]
    Invalid,
}

/// Issues, resolves and revokes session credentials. `extended` selects the
/// remember-me lifetime over the standard one.
pub(crate) trait TokenService: Send + Sync {
    fn issue(&self, user: &SessionUser, extended: bool) -> Result<String, TokenError>;
    fn resolve(&self, token: &str) -> Result<SessionUser, TokenError>;
    fn revoke(&self, token: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenMode {
    Signed,
    Opaque,
}

impl TokenMode {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "signed" => Some(TokenMode::Signed),
            "opaque" => Some(TokenMode::Opaque),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
    user: SessionUser,
}

/// Self-contained HS256 tokens. The identity snapshot travels inside the
/// claims, frozen at issuance; nothing is kept server-side, so `revoke` is
/// a no-op and tokens stay live until expiry.
pub(crate) struct SignedTokens {
    secret: String,
    ttl_seconds: i64,
    ttl_extended_seconds: i64,
}

impl SignedTokens {
    pub(crate) fn new(secret: &str, ttl_seconds: i64, ttl_extended_seconds: i64) -> Self {
        Self {
            secret: secret.to_string(),
            ttl_seconds,
            ttl_extended_seconds,
        }
    }
}

impl TokenService for SignedTokens {
    fn issue(&self, user: &SessionUser, extended: bool) -> Result<String, TokenError> {
        let ttl = if extended {
            self.ttl_extended_seconds
        } else {
            self.ttl_seconds
        };
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl)).timestamp(),
            user: user.clone(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(TokenError::Encode)
    }

    fn resolve(&self, token: &str) -> Result<SessionUser, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // expiry is a hard boundary, no leeway
        validation.leeway = 0;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| TokenError::Invalid)?;

        Ok(data.claims.user)
    }

    fn revoke(&self, _token: &str) {}
}

#[derive(Debug, Clone)]
struct Session {
    user: SessionUser,
    expires_at: DateTime<Utc>,
}

/// Random 256-bit identifiers mapped to server-side sessions. Revocation is
/// immediate; the table lives in memory, so all sessions are lost on
/// restart. Expired entries are evicted when touched.
pub(crate) struct OpaqueTokens {
    ttl_seconds: i64,
    ttl_extended_seconds: i64,
    sessions: Mutex<HashMap<String, Session>>,
}

impl OpaqueTokens {
    pub(crate) fn new(ttl_seconds: i64, ttl_extended_seconds: i64) -> Self {
        Self {
            ttl_seconds,
            ttl_extended_seconds,
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl TokenService for OpaqueTokens {
    fn issue(&self, user: &SessionUser, extended: bool) -> Result<String, TokenError> {
        let ttl = if extended {
            self.ttl_extended_seconds
        } else {
            self.ttl_seconds
        };
        let token = random_token();
        let session = Session {
            user: user.clone(),
            expires_at: Utc::now() + Duration::seconds(ttl),
        };

        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.insert(token.clone(), session);
        Ok(token)
    }

    fn resolve(&self, token: &str) -> Result<SessionUser, TokenError> {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        match sessions.get(token) {
            Some(session) if session.expires_at > now => Ok(session.user.clone()),
            Some(_) => {
                sessions.remove(token);
                Err(TokenError::Invalid)
            }
            None => Err(TokenError::Invalid),
        }
    }

    fn revoke(&self, token: &str) {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.remove(token);
    }
}

fn random_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
