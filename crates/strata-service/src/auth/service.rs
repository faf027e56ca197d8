//! Authentication flows.

use std::sync::Arc;

use chrono::Duration;
use tracing::info;
use uuid::Uuid;

use strata_auth::jwt::JwtEncoder;
use strata_auth::password::PasswordHasher;
use strata_core::bridge::dispatch;
use strata_core::error::{AppError, LogLevel};
use strata_core::result::AppResult;
use strata_core::validation::validate;
use strata_database::repositories::AuthStore;
use strata_entity::user::{NewRefreshToken, User};

use super::model::{
    LoginModel, ProgrammaticModel, ProgrammaticTokenResponse, RefreshModel, TokenResponse,
};

pub const USER_NOT_FOUND: &str = "user is not found";
pub const PROGRAMMATIC_USER_NOT_FOUND: &str = "programmatic user is not found";

/// Issues tokens for interactive and programmatic users.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AuthStore>,
    encoder: Arc<JwtEncoder>,
    hasher: Arc<PasswordHasher>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        store: Arc<dyn AuthStore>,
        encoder: Arc<JwtEncoder>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            store,
            encoder,
            hasher,
        }
    }

    /// Logs in with username and password.
    ///
    /// Rejected input is reported at info level; it is the caller's mistake.
    pub async fn login(&self, model: LoginModel) -> AppResult<TokenResponse> {
        validate(&model).map_err(|e| e.with_level(LogLevel::Info))?;

        let user = self
            .find_by_credentials(model.user_name, &model.password)
            .await?
            .filter(User::can_login)
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        self.issue_token_pair(&user).await
    }

    /// Exchanges a live refresh token for a new access token and a new
    /// refresh token. The presented refresh token stays valid.
    pub async fn get_access_token(&self, model: RefreshModel) -> AppResult<TokenResponse> {
        validate(&model)?;

        let store = self.store.clone();
        let found = dispatch(async move {
            store.find_by_refresh_token(&model.refresh_token).await
        })
        .await?;
        let user = found
            .filter(User::can_login)
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        self.issue_token_pair(&user).await
    }

    /// Issues a long-lived token for a programmatic user.
    pub async fn get_programmatic_access_token(
        &self,
        model: ProgrammaticModel,
    ) -> AppResult<ProgrammaticTokenResponse> {
        validate(&model)?;

        let user = self
            .find_by_credentials(model.user_name, &model.password)
            .await?
            .filter(User::can_login_programmatically)
            .ok_or_else(|| AppError::not_found(PROGRAMMATIC_USER_NOT_FOUND))?;

        let jwt_token = self.encoder.encode_with_ttl(
            user.id,
            &user.username,
            user.email_or_empty(),
            Duration::days(i64::from(model.expiry_days)),
        )?;

        info!(
            user_id = user.id,
            expiry_days = model.expiry_days,
            "Issued programmatic token"
        );
        Ok(ProgrammaticTokenResponse { jwt_token })
    }

    async fn find_by_credentials(
        &self,
        user_name: String,
        password: &str,
    ) -> AppResult<Option<User>> {
        let password_hash = self.hasher.hash_password(password);
        let store = self.store.clone();
        dispatch(async move { store.find_by_credentials(&user_name, &password_hash).await }).await
    }

    async fn issue_token_pair(&self, user: &User) -> AppResult<TokenResponse> {
        let refresh_token = Uuid::new_v4().to_string();
        let record = NewRefreshToken {
            user_id: user.id,
            refresh_token: refresh_token.clone(),
        };
        let store = self.store.clone();
        dispatch(async move { store.add_refresh_token(&record).await }).await?;

        let jwt_token = self.encoder.encode_access_token(
            user.id,
            &user.username,
            user.email_or_empty(),
        )?;

        Ok(TokenResponse {
            jwt_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use strata_auth::jwt::JwtDecoder;
    use strata_core::config::auth::AuthConfig;
    use strata_core::error::ErrorKind;

    use super::*;

    #[derive(Default)]
    struct FakeStore {
        users: Vec<(User, String)>,
        tokens: Mutex<Vec<NewRefreshToken>>,
    }

    #[async_trait]
    impl AuthStore for FakeStore {
        async fn find_by_credentials(
            &self,
            username: &str,
            password_hash: &str,
        ) -> AppResult<Option<User>> {
            Ok(self
                .users
                .iter()
                .find(|(u, hash)| u.username == username && hash == password_hash)
                .map(|(u, _)| u.clone()))
        }

        async fn find_by_refresh_token(&self, refresh_token: &str) -> AppResult<Option<User>> {
            let owner = self
                .tokens
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.refresh_token == refresh_token)
                .map(|t| t.user_id);
            Ok(owner.and_then(|id| {
                self.users
                    .iter()
                    .find(|(u, _)| u.id == id)
                    .map(|(u, _)| u.clone())
            }))
        }

        async fn add_refresh_token(&self, token: &NewRefreshToken) -> AppResult<()> {
            self.tokens.lock().unwrap().push(token.clone());
            Ok(())
        }
    }

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".into(),
            issuer: "Strata".into(),
            access_token_ttl_minutes: 30,
            refresh_token_ttl_days: 30,
        }
    }

    fn user(id: i64, name: &str, is_active: bool, is_programmatic: bool) -> (User, String) {
        (
            User {
                id,
                username: name.into(),
                email: Some(format!("{name}@example.com")),
                is_active,
                is_programmatic,
            },
            PasswordHasher::new().hash_password("pass"),
        )
    }

    fn service() -> (AuthService, Arc<FakeStore>) {
        let store = Arc::new(FakeStore {
            users: vec![
                user(1, "active", true, false),
                user(2, "inactive", false, false),
                user(3, "bot", true, true),
                user(4, "dead-bot", false, true),
            ],
            ..Default::default()
        });
        let service = AuthService::new(
            store.clone(),
            Arc::new(JwtEncoder::new(&config())),
            Arc::new(PasswordHasher::new()),
        );
        (service, store)
    }

    fn login(name: &str, password: &str) -> LoginModel {
        LoginModel {
            user_name: name.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_login_active_user() {
        let (service, store) = service();
        let response = service.login(login("active", "pass")).await.unwrap();

        let claims = JwtDecoder::new(&config()).decode(&response.jwt_token).unwrap();
        assert_eq!(claims.user_id(), 1);
        assert_eq!(claims.username, "active");
        assert_eq!(claims.email, "active@example.com");
        assert_eq!(claims.exp - claims.iat, 30 * 60);

        let tokens = store.tokens.lock().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].refresh_token, response.refresh_token);
        assert!(Uuid::parse_str(&response.refresh_token).is_ok());
    }

    #[tokio::test]
    async fn test_login_rejects_inactive_programmatic_and_unknown() {
        let (service, store) = service();
        let attempts = [("inactive", "pass"), ("bot", "pass"), ("active", "wrong")];
        for (name, password) in attempts {
            let err = service.login(login(name, password)).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::NotFound);
            assert_eq!(err.message, USER_NOT_FOUND);
            assert_eq!(err.log_level(), LogLevel::Error);
        }
        assert!(store.tokens.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_validation_is_info() {
        let (service, _) = service();
        let err = service.login(login("", "")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.log_level(), LogLevel::Info);
    }

    #[tokio::test]
    async fn test_refresh_keeps_old_token_valid() {
        let (service, store) = service();
        let first = service.login(login("active", "pass")).await.unwrap();

        let second = service
            .get_access_token(RefreshModel {
                refresh_token: first.refresh_token.clone(),
            })
            .await
            .unwrap();
        assert_ne!(second.refresh_token, first.refresh_token);

        let third = service
            .get_access_token(RefreshModel {
                refresh_token: first.refresh_token.clone(),
            })
            .await
            .unwrap();
        assert_ne!(third.refresh_token, second.refresh_token);
        assert_eq!(store.tokens.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_refresh_unknown_token() {
        let (service, _) = service();
        let err = service
            .get_access_token(RefreshModel {
                refresh_token: "nope".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message, USER_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_programmatic_token_expiry() {
        let (service, store) = service();
        let response = service
            .get_programmatic_access_token(ProgrammaticModel {
                user_name: "bot".into(),
                password: "pass".into(),
                expiry_days: 10,
            })
            .await
            .unwrap();

        let claims = JwtDecoder::new(&config()).decode(&response.jwt_token).unwrap();
        let expected = (Utc::now() + Duration::days(10)).timestamp();
        assert!((claims.exp - expected).abs() <= 5);
        assert_eq!(claims.user_id(), 3);
        assert!(store.tokens.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_programmatic_requires_active_programmatic_user() {
        let (service, _) = service();
        for name in ["active", "dead-bot"] {
            let err = service
                .get_programmatic_access_token(ProgrammaticModel {
                    user_name: name.into(),
                    password: "pass".into(),
                    expiry_days: 1,
                })
                .await
                .unwrap_err();
            assert_eq!(err.message, PROGRAMMATIC_USER_NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_programmatic_zero_expiry_is_invalid() {
        let (service, _) = service();
        let err = service
            .get_programmatic_access_token(ProgrammaticModel {
                user_name: "bot".into(),
                password: "pass".into(),
                expiry_days: 0,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
