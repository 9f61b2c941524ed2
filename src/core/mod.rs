//! Core business logic for the Kodbank API

pub mod ai;
pub mod auth;
pub mod balance;
pub mod config;
pub mod db;
