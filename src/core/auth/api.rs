//! Auth API endpoints
//!
//! Provides REST API endpoints for authentication:
//! - POST /api/register - Register a new account
//! - POST /api/login - Login and receive the session cookie
//! - POST /api/logout - Clear the session cookie
//!
//! The session token travels as an HttpOnly cookie named `token`; its
//! attributes (Secure, SameSite) depend on the environment mode.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use std::sync::Arc;

use crate::core::auth::middleware::SESSION_COOKIE;
use crate::core::auth::service::{AuthError, AuthService, LoginRequest, RegisterRequest};

/// Auth API state
#[derive(Clone)]
pub struct AuthApiState {
    pub auth_service: AuthService,
    /// Controls Secure/SameSite cookie attributes
    pub production: bool,
    /// Cookie max-age in seconds, matching token expiry
    pub cookie_max_age_secs: i64,
}

/// Standard response body for auth operations
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>, redirect: Option<&str>) -> Self {
        Self {
            success: true,
            message: message.into(),
            redirect: redirect.map(str::to_string),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            redirect: None,
        }
    }
}

/// Convert AuthError to an API response
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::MissingFields => (StatusCode::BAD_REQUEST, self.to_string()),
            AuthError::UsernameAlreadyExists => (StatusCode::BAD_REQUEST, self.to_string()),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            AuthError::InternalError(detail) => {
                // Full detail stays server-side
                tracing::error!("auth internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };

        (status, Json(ApiMessage::err(message))).into_response()
    }
}

/// Build the session cookie delivered on successful login
fn session_cookie(token: String, max_age_secs: i64, production: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_secure(production);
    cookie.set_same_site(if production {
        SameSite::None
    } else {
        SameSite::Strict
    });
    cookie.set_max_age(time::Duration::seconds(max_age_secs));
    cookie.set_path("/");
    cookie
}

/// Build the removal cookie used by logout
fn clear_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie
}

/// Create the auth API router
pub fn auth_api_router(state: AuthApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/register", post(register_handler))
        .route("/api/login", post(login_handler))
        .route("/api/logout", post(logout_handler))
        .with_state(state)
}

/// POST /api/register
async fn register_handler(
    State(state): State<Arc<AuthApiState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiMessage>), AuthError> {
    tracing::info!("Registration attempt for username: {}", request.username);

    let user = state.auth_service.register(request).await?;

    tracing::info!("User registered successfully: {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(ApiMessage::ok(
            "Registration successful. Please login.",
            Some("/login"),
        )),
    ))
}

/// POST /api/login
async fn login_handler(
    State(state): State<Arc<AuthApiState>>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiMessage>), AuthError> {
    tracing::info!("Login attempt for username: {}", request.username);

    let outcome = state.auth_service.login(request).await?;

    tracing::info!("User logged in successfully: {}", outcome.username);

    let jar = jar.add(session_cookie(
        outcome.token,
        state.cookie_max_age_secs,
        state.production,
    ));

    Ok((
        jar,
        Json(ApiMessage::ok("Login successful", Some("/dashboard"))),
    ))
}

/// POST /api/logout
///
/// Clears the client-held cookie only; the server-side session record is
/// left alone. Idempotent — safe to call with no active session.
async fn logout_handler(jar: CookieJar) -> (CookieJar, Json<ApiMessage>) {
    let jar = jar.remove(clear_cookie());

    (jar, Json(ApiMessage::ok("Logged out", None)))
}
