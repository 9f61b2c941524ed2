//! Database module for Kodbank
//!
//! This module provides database connectivity, models, and repositories
//! for persistent storage using MySQL and SQLx.

pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used items
pub use models::*;
pub use pool::{DbConfig, DbError, create_pool, health_check, init_schema};
pub use repositories::{
    SessionRepository, SessionRepositoryError, UserRepository, UserRepositoryError,
};

// Re-export sqlx types that might be needed
pub use sqlx::MySqlPool;
