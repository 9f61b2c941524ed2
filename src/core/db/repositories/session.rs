//! Session repository for issued-token audit records
//!
//! Every token the issuer hands out gets one row here. Tokens are stored as
//! SHA-256 hashes; the raw token never touches durable storage. Request
//! validation is signature-only and does not read this table — the rows
//! support audit and a future deny-list.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::MySqlPool;

use crate::core::db::models::Session;

/// Session repository error types
#[derive(Debug, thiserror::Error)]
pub enum SessionRepositoryError {
    #[error("Session not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Session repository for database operations
#[derive(Clone)]
pub struct SessionRepository {
    pool: MySqlPool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Hash a token using SHA-256
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        let result = hasher.finalize();
        hex::encode(result)
    }

    /// Record an issued token for a user
    pub async fn create(
        &self,
        user_id: i64,
        raw_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, SessionRepositoryError> {
        let token_hash = Self::hash_token(raw_token);

        let result = sqlx::query(
            r#"
            INSERT INTO sessions (user_id, token_hash, expires_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;

        self.find_by_id(id)
            .await?
            .ok_or(SessionRepositoryError::NotFound)
    }

    /// Find a session by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Session>, SessionRepositoryError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, token_hash, expires_at, created_at
            FROM sessions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Find a session by raw token (will be hashed for lookup)
    pub async fn find_by_token(
        &self,
        raw_token: &str,
    ) -> Result<Option<Session>, SessionRepositoryError> {
        let token_hash = Self::hash_token(raw_token);

        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, token_hash, expires_at, created_at
            FROM sessions
            WHERE token_hash = ?
            "#,
        )
        .bind(&token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Delete rows whose expiry has passed. Nothing schedules this; it is an
    /// operator maintenance action.
    pub async fn cleanup_expired(&self) -> Result<u64, SessionRepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
