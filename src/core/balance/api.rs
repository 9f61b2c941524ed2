//! Balance API endpoint
//!
//! GET /api/balance — returns the authenticated user's balance. Sits behind
//! the session validation middleware; the handler trusts the identity the
//! middleware attached and only hits the store for the row itself.

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;

use crate::core::auth::api::ApiMessage;
use crate::core::auth::jwt::JwtService;
use crate::core::auth::middleware::{AuthUser, require_auth};
use crate::core::db::models::BalanceResponse;
use crate::core::db::repositories::{UserRepository, UserRepositoryError};

/// Balance API state
#[derive(Clone)]
pub struct BalanceApiState {
    pub user_repo: UserRepository,
}

/// Balance endpoint error
#[derive(Debug, thiserror::Error)]
pub enum BalanceError {
    /// The session was valid but the user row no longer exists. Allowed
    /// inconsistency: sessions are never invalidated when a row is deleted
    /// out-of-band.
    #[error("User not found")]
    UserNotFound,

    #[error("Failed to fetch balance")]
    Internal(#[from] UserRepositoryError),
}

impl IntoResponse for BalanceError {
    fn into_response(self) -> Response {
        let status = match &self {
            BalanceError::UserNotFound => StatusCode::NOT_FOUND,
            BalanceError::Internal(detail) => {
                tracing::error!("balance lookup failed: {}", detail);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ApiMessage::err(self.to_string()))).into_response()
    }
}

/// Create the balance API router, guarded by session validation
pub fn balance_api_router(state: BalanceApiState, jwt: JwtService) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/balance", get(balance_handler))
        .route_layer(middleware::from_fn_with_state(jwt, require_auth))
        .with_state(state)
}

/// GET /api/balance
async fn balance_handler(
    State(state): State<Arc<BalanceApiState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<BalanceResponse>, BalanceError> {
    let row = state
        .user_repo
        .find_by_username(&user.username)
        .await?
        .ok_or(BalanceError::UserNotFound)?;

    Ok(Json(BalanceResponse {
        success: true,
        balance: row.balance,
        username: row.username,
    }))
}
