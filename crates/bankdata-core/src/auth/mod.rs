//! Authentication module for keeping the client logged in across runs.
//!
//! This module provides:
//! - `AccountState`: the persisted token pair and linked identifiers
//! - `Authenticator`: the access → refresh → reissue fallback that makes
//!   sure the access token is usable before any data command runs
//!
//! Nothing is cached in memory between invocations. Every run re-derives
//! token validity from the account file and the API.

pub mod authenticator;
pub mod session;

pub use authenticator::{AuthError, AuthState, Authenticator, Transition};
pub use session::AccountState;
