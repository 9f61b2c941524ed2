//! Kodbank - minimal banking demo API
//!
//! User registration and login with bcrypt-hashed passwords, JWT session
//! cookies, a balance lookup endpoint, and a chat proxy to a hosted
//! completion API.

pub mod core;
