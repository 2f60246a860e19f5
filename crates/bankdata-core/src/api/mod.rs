//! REST API client module for the GoCardless bank account data service.
//!
//! This module provides the `ApiClient` for issuing and refreshing tokens,
//! browsing institutions, creating requisitions, and reading account
//! balances and transactions.
//!
//! Data endpoints use bearer authentication with the short-lived access
//! token; see `crate::auth` for how that token is kept valid.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
