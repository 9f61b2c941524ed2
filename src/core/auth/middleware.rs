//! Session validation middleware
//!
//! Verifies the `token` cookie on every protected request and attaches the
//! authenticated identity to the request extensions. Every verification
//! failure (missing cookie, malformed token, bad signature, expired claim)
//! produces one uniform 401 body so callers cannot distinguish the reasons.

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::core::auth::jwt::JwtService;
use crate::core::db::models::Role;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Authenticated identity attached to the request by `require_auth`
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
}

#[derive(Serialize)]
struct UnauthorizedBody {
    success: bool,
    message: &'static str,
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(UnauthorizedBody {
            success: false,
            message: "Authentication required",
        }),
    )
        .into_response()
}

/// Middleware guarding protected routes.
///
/// Validation is signature + expiry only; the session store is never
/// consulted here.
pub async fn require_auth(
    State(jwt): State<JwtService>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return unauthorized();
    };

    let claims = match jwt.validate(cookie.value()) {
        Ok(claims) => claims,
        Err(_) => return unauthorized(),
    };

    request.extensions_mut().insert(AuthUser {
        username: claims.sub,
        role: claims.role,
    });

    next.run(request).await
}
