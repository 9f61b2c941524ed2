//! Database models for Kodbank
//!
//! This module defines the database entity structs that map to MySQL tables.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// User Model
// ============================================================================

/// User role; every registered account starts as a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Manager,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Manager => write!(f, "manager"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub phone: Option<String>,
    pub role: Role,
}

/// Balance lookup result (for API responses)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub success: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub username: String,
}

// ============================================================================
// Session Model
// ============================================================================

/// Audit record for an issued session token.
///
/// One row per token ever issued. Request validation is signature-only and
/// never reads this table; the rows exist for audit and a future deny-list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
