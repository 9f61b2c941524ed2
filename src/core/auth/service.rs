//! Authentication service
//!
//! Provides business logic for user registration and login. Coordinates
//! between the user repository, session repository, and JWT service.
//! Logout is handled entirely at the HTTP layer (cookie removal) and writes
//! nothing server-side.

use crate::core::auth::jwt::{JwtError, JwtService};
use crate::core::db::models::User;
use crate::core::db::repositories::{
    SessionRepository, SessionRepositoryError, UserRepository, UserRepositoryError,
};

/// Authentication service error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Wrong password and unknown username collapse into this one variant
    /// so the API cannot be used to enumerate usernames.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("Username and password required")]
    MissingFields,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<UserRepositoryError> for AuthError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::UsernameAlreadyExists => AuthError::UsernameAlreadyExists,
            _ => AuthError::InternalError(err.to_string()),
        }
    }
}

impl From<SessionRepositoryError> for AuthError {
    fn from(err: SessionRepositoryError) -> Self {
        AuthError::InternalError(err.to_string())
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        AuthError::InternalError(err.to_string())
    }
}

/// Registration request data
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Login request data
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login result: the token for cookie delivery plus the user
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub username: String,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    session_repo: SessionRepository,
    jwt_service: JwtService,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(
        user_repo: UserRepository,
        session_repo: SessionRepository,
        jwt_service: JwtService,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            jwt_service,
        }
    }

    /// Reject empty or whitespace-only username/password
    fn validate_fields(username: &str, password: &str) -> Result<(), AuthError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(AuthError::MissingFields);
        }
        Ok(())
    }

    /// Register a new user.
    ///
    /// The password is bcrypt-hashed before storage; the new account always
    /// gets role `customer` and the default seed balance. The returned user
    /// is only used for logging; no secret material leaves this function.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        Self::validate_fields(&request.username, &request.password)?;

        let user = self
            .user_repo
            .create(
                &request.username,
                &request.password,
                request.email.as_deref(),
                request.phone.as_deref(),
            )
            .await?;

        Ok(user)
    }

    /// Login an existing user.
    ///
    /// On success, issues a signed session token and persists an audit
    /// record of it. The token is returned for cookie delivery.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, AuthError> {
        Self::validate_fields(&request.username, &request.password)?;

        let user = self
            .user_repo
            .authenticate(&request.username, &request.password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let (token, expires_at) = self.jwt_service.issue(&user.username, user.role)?;

        // Audit record only; validation never reads it back.
        self.session_repo
            .create(user.id, &token, expires_at)
            .await?;

        Ok(LoginOutcome {
            token,
            username: user.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Field Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_fields_ok() {
        assert!(AuthService::validate_fields("alice", "p@ss1234").is_ok());
    }

    #[test]
    fn test_validate_fields_empty_username() {
        assert!(matches!(
            AuthService::validate_fields("", "password"),
            Err(AuthError::MissingFields)
        ));
    }

    #[test]
    fn test_validate_fields_empty_password() {
        assert!(matches!(
            AuthService::validate_fields("alice", ""),
            Err(AuthError::MissingFields)
        ));
    }

    #[test]
    fn test_validate_fields_whitespace_only() {
        assert!(matches!(
            AuthService::validate_fields("   ", "password"),
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            AuthService::validate_fields("alice", "\t\n"),
            Err(AuthError::MissingFields)
        ));
    }

    // ========================================================================
    // Error Conversion Tests
    // ========================================================================

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            format!("{}", AuthError::InvalidCredentials),
            "Invalid username or password"
        );
        assert_eq!(
            format!("{}", AuthError::UsernameAlreadyExists),
            "Username already exists"
        );
        assert_eq!(
            format!("{}", AuthError::MissingFields),
            "Username and password required"
        );
    }

    #[test]
    fn test_auth_error_from_user_repository_error() {
        let err: AuthError = UserRepositoryError::UsernameAlreadyExists.into();
        assert!(matches!(err, AuthError::UsernameAlreadyExists));

        // Everything else is internal; no detail classes leak upward
        let err: AuthError = UserRepositoryError::NotFound.into();
        assert!(matches!(err, AuthError::InternalError(_)));
    }

    #[test]
    fn test_auth_error_from_session_repository_error() {
        let err: AuthError = SessionRepositoryError::NotFound.into();
        assert!(matches!(err, AuthError::InternalError(_)));
    }

    #[test]
    fn test_auth_error_from_jwt_error() {
        let err: AuthError = JwtError::MissingSecret.into();
        assert!(matches!(err, AuthError::InternalError(_)));
    }

    // ========================================================================
    // Request Deserialization Tests
    // ========================================================================

    #[test]
    fn test_register_request_deserialization() {
        let json = r#"{
            "username": "alice",
            "password": "p@ss1234",
            "email": "alice@example.com",
            "phone": "555-0100"
        }"#;

        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username, "alice");
        assert_eq!(request.password, "p@ss1234");
        assert_eq!(request.email.as_deref(), Some("alice@example.com"));
        assert_eq!(request.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_register_request_optional_fields_default_to_none() {
        let json = r#"{"username": "alice", "password": "p@ss1234"}"#;

        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert!(request.email.is_none());
        assert!(request.phone.is_none());
    }

    #[test]
    fn test_login_request_deserialization() {
        let json = r#"{"username": "alice", "password": "p@ss1234"}"#;

        let request: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username, "alice");
        assert_eq!(request.password, "p@ss1234");
    }

    // ========================================================================
    // Integration Tests (require database)
    // ========================================================================

    #[tokio::test]
    #[ignore = "requires running MySQL database"]
    async fn test_register_then_login_yields_token_with_matching_identity() {
        let (service, jwt, pool) = create_test_service().await;
        let username = format!("svc_{}", uuid::Uuid::new_v4().simple());

        let user = service
            .register(RegisterRequest {
                username: username.clone(),
                password: "p@ss1234".to_string(),
                email: None,
                phone: None,
            })
            .await
            .unwrap();

        let outcome = service
            .login(LoginRequest {
                username: username.clone(),
                password: "p@ss1234".to_string(),
            })
            .await
            .unwrap();

        let claims = jwt.validate(&outcome.token).unwrap();
        assert_eq!(claims.sub, username);

        // An audit row exists for the issued token
        let session_repo = SessionRepository::new(pool.clone());
        assert!(
            session_repo
                .find_by_token(&outcome.token)
                .await
                .unwrap()
                .is_some()
        );

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user.id)
            .execute(&pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    #[ignore = "requires running MySQL database"]
    async fn test_login_wrong_password_and_unknown_user_are_identical() {
        let (service, _jwt, pool) = create_test_service().await;
        let username = format!("svc_{}", uuid::Uuid::new_v4().simple());

        let user = service
            .register(RegisterRequest {
                username: username.clone(),
                password: "p@ss1234".to_string(),
                email: None,
                phone: None,
            })
            .await
            .unwrap();

        let wrong_password = service
            .login(LoginRequest {
                username: username.clone(),
                password: "wrong".to_string(),
            })
            .await;
        let unknown_user = service
            .login(LoginRequest {
                username: "nobody_here".to_string(),
                password: "p@ss1234".to_string(),
            })
            .await;

        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
        assert!(matches!(unknown_user, Err(AuthError::InvalidCredentials)));

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user.id)
            .execute(&pool)
            .await
            .unwrap();
    }

    async fn create_test_service() -> (AuthService, JwtService, sqlx::MySqlPool) {
        use crate::core::auth::jwt::JwtConfig;
        use crate::core::db::pool::{DbConfig, create_pool, init_schema};

        let config = DbConfig::from_env().expect("DB_* vars must be set for tests");
        let pool = create_pool(&config).await.expect("Failed to create test pool");
        init_schema(&pool).await.expect("Failed to init schema");

        let jwt = JwtService::new(JwtConfig::new("test_secret_key_for_service_tests"));
        let service = AuthService::new(
            UserRepository::new(pool.clone()),
            SessionRepository::new(pool.clone()),
            jwt.clone(),
        );

        (service, jwt, pool)
    }
}
