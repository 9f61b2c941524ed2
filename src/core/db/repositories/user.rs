//! User repository for database operations
//!
//! Provides account creation and lookup with secure password hashing using
//! bcrypt.

use sqlx::MySqlPool;

use crate::core::db::models::User;

/// Cost factor for bcrypt hashing
const BCRYPT_COST: u32 = 10;

/// User repository error types
#[derive(Debug, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User not found")]
    NotFound,

    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: MySqlPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Hash a password using bcrypt with automatic salt generation
    pub fn hash_password(password: &str) -> Result<String, UserRepositoryError> {
        bcrypt::hash(password, BCRYPT_COST)
            .map_err(|e| UserRepositoryError::HashingError(e.to_string()))
    }

    /// Verify a password against a bcrypt hash.
    ///
    /// A mismatch returns `Ok(false)`; only a malformed hash is an error.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, UserRepositoryError> {
        bcrypt::verify(password, hash).map_err(|e| UserRepositoryError::HashingError(e.to_string()))
    }

    /// Create a new user with a plain text password (will be hashed).
    ///
    /// Role is always `customer` and balance takes the schema default seed.
    pub async fn create(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<User, UserRepositoryError> {
        let password_hash = Self::hash_password(password)?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, phone, role)
            VALUES (?, ?, ?, ?, 'customer')
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(&password_hash)
        .bind(phone)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The UNIQUE constraint on username is the source of truth for
            // duplicates; map its violation instead of pre-checking.
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                UserRepositoryError::UsernameAlreadyExists
            } else {
                UserRepositoryError::DatabaseError(e)
            }
        })?;

        let id = result.last_insert_id() as i64;

        self.find_by_id(id)
            .await?
            .ok_or(UserRepositoryError::NotFound)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserRepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, balance, phone, role
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by username
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, balance, phone, role
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Authenticate a user by username and password.
    ///
    /// Returns the user if credentials are valid, None otherwise. An unknown
    /// username and a wrong password are indistinguishable to the caller.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let user = match self.find_by_username(username).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        let is_valid = Self::verify_password(password, &user.password_hash)?;

        if is_valid { Ok(Some(user)) } else { Ok(None) }
    }

    /// Delete a user by ID (test cleanup; no API surface deletes users)
    pub async fn delete(&self, id: i64) -> Result<bool, UserRepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
