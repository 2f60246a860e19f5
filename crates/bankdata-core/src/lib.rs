//! Core library for the bankdata command-line client.
//!
//! This crate holds everything that does not touch the terminal:
//!
//! - `config`: the user-supplied configuration file
//! - `auth`: persisted account state and the token lifecycle
//! - `api`: the HTTP client for the bank account data API
//! - `models`: typed records for each endpoint's response
//! - `utils`: formatting helpers shared by front ends

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{AccountState, AuthError, AuthState, Authenticator};
pub use config::Config;
