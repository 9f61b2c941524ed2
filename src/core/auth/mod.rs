//! Authentication module for Kodbank
//!
//! This module provides authentication functionality including:
//! - JWT session token issuance and validation
//! - User registration and login
//! - Cookie-based session middleware for protected routes
//! - REST API endpoints for auth operations

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod service;

pub use api::{AuthApiState, auth_api_router};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{AuthUser, require_auth};
pub use service::{AuthError, AuthService, LoginRequest, RegisterRequest};
