use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::domain::error::DomainError;
use crate::domain::identity::{LoginRequest, SessionUser};
use crate::infrastructure::token::TokenService;

#[derive(Debug, Clone)]
pub(crate) struct LoginResult {
    pub(crate) token: String,
}

/// Single-account authentication. The console has exactly one operator
/// login, configured through the environment and hashed once at startup;
/// session lifetime and revocation semantics belong to the token service.
pub(crate) struct AuthService {
    admin_email: String,
    admin_password_hash: String,
    admin: SessionUser,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(
        admin: SessionUser,
        admin_password: &str,
        tokens: Arc<dyn TokenService>,
    ) -> Result<Self, DomainError> {
        let admin_password_hash = Self::hash_password(admin_password)?;
        Ok(Self {
            admin_email: admin.email.clone(),
            admin_password_hash,
            admin,
            tokens,
        })
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<LoginResult, DomainError> {
        let req = req.validate()?;

        if req.email != self.admin_email {
            // keep the unknown-email path as slow as a real verification
            match Self::verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                Ok(()) | Err(DomainError::InvalidCredentials) => {}
                Err(err) => return Err(err),
            }
            return Err(DomainError::InvalidCredentials);
        }

        Self::verify_password(&req.password, &self.admin_password_hash)?;

        let token = self
            .tokens
            .issue(&self.admin, req.remember_me)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(LoginResult { token })
    }

    /// Best-effort: unknown tokens revoke to nothing, and the signed
    /// variant has nothing to revoke at all.
    pub(crate) fn logout(&self, token: &str) {
        self.tokens.revoke(token);
    }

    pub(crate) fn hash_password(raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::AuthService;
    use crate::domain::error::DomainError;
    use crate::domain::identity::{LoginRequest, SessionUser};
    use crate::domain::user::{UserRole, UserStatus};
    use crate::infrastructure::token::{TokenError, TokenService};

    #[derive(Default)]
    struct FakeTokens {
        issued_extended: Arc<Mutex<Option<bool>>>,
        revoked: Arc<Mutex<Option<String>>>,
    }

    impl TokenService for FakeTokens {
        fn issue(&self, _user: &SessionUser, extended: bool) -> Result<String, TokenError> {
            *self
                .issued_extended
                .lock()
                .expect("issued mutex poisoned") = Some(extended);
            Ok("fake-token".to_string())
        }

        fn resolve(&self, _token: &str) -> Result<SessionUser, TokenError> {
            Err(TokenError::Invalid)
        }

        fn revoke(&self, token: &str) {
            *self.revoked.lock().expect("revoked mutex poisoned") = Some(token.to_string());
        }
    }

    fn admin_snapshot() -> SessionUser {
        SessionUser::new(
            1,
            "admin@example.org",
            "Admin",
            vec![UserRole::Admin],
            "fr",
            UserStatus::Active,
        )
        .expect("snapshot must be valid")
    }

    fn service(tokens: Arc<FakeTokens>) -> AuthService {
        AuthService::new(admin_snapshot(), "correct-password", tokens)
            .expect("service must build")
    }

    fn login_req(email: &str, password: &str, remember_me: bool) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            remember_me,
        }
    }

    #[tokio::test]
    async fn login_returns_token_for_valid_credentials() {
        let tokens = Arc::new(FakeTokens::default());
        let service = service(tokens.clone());

        let result = service
            .login(login_req("  ADMIN@example.org ", "correct-password", false))
            .await
            .expect("login must succeed");

        assert_eq!(result.token, "fake-token");
        assert_eq!(
            *tokens.issued_extended.lock().expect("issued mutex poisoned"),
            Some(false)
        );
    }

    #[tokio::test]
    async fn remember_me_requests_an_extended_token() {
        let tokens = Arc::new(FakeTokens::default());
        let service = service(tokens.clone());

        service
            .login(login_req("admin@example.org", "correct-password", true))
            .await
            .expect("login must succeed");

        assert_eq!(
            *tokens.issued_extended.lock().expect("issued mutex poisoned"),
            Some(true)
        );
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_fail_alike() {
        let tokens = Arc::new(FakeTokens::default());
        let service = service(tokens.clone());

        let err = service
            .login(login_req("someone@example.org", "correct-password", false))
            .await
            .expect_err("unknown email must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));

        let err = service
            .login(login_req("admin@example.org", "wrong-password", false))
            .await
            .expect_err("wrong password must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));

        assert!(tokens.issued_extended.lock().expect("issued mutex poisoned").is_none());
    }

    #[tokio::test]
    async fn logout_revokes_the_presented_token() {
        let tokens = Arc::new(FakeTokens::default());
        let service = service(tokens.clone());

        service.logout("session-to-drop");

        assert_eq!(
            tokens.revoked.lock().expect("revoked mutex poisoned").as_deref(),
            Some("session-to-drop")
        );
    }
}
