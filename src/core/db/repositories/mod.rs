//! Database repositories for Kodbank
//!
//! Repositories encapsulate data access logic and provide a clean API for
//! business logic to interact with the database.

pub mod session;
pub mod user;

pub use session::{SessionRepository, SessionRepositoryError};
pub use user::{UserRepository, UserRepositoryError};
