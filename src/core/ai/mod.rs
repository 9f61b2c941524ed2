//! Chat proxy to the hosted completion API
//!
//! Forwards a user message to an OpenAI-compatible completion endpoint with
//! one bounded retry on transient unavailability, and maps upstream failure
//! classes to user-facing messages.

pub mod api;
pub mod client;
pub mod config;

pub use api::{ChatApiState, chat_api_router};
pub use client::{ChatClient, ChatError, RetryPolicy};
pub use config::ChatConfig;
