//! Balance lookup for authenticated users

pub mod api;

pub use api::{BalanceApiState, balance_api_router};
