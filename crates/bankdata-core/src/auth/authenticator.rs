use thiserror::Error;
use tracing::{debug, info};

use crate::api::{ApiClient, ApiError};
use crate::config::Config;

use super::AccountState;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication failed, could not obtain new tokens: {0}")]
    Exhausted(#[source] ApiError),
}

/// The tiers tried, in order, to end up with a usable access token.
/// Each tier is one API call and is attempted at most once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Probe the API with the stored access token
    CheckAccess,
    /// Trade the stored refresh token for a new access token
    Refresh,
    /// Request a whole new token pair with the user secrets
    Reissue,
}

/// Where the chain goes after a tier's attempt. Failures carry their error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<E> {
    Authenticated,
    Next(AuthState, E),
    Exhausted(E),
}

impl AuthState {
    pub fn on_result<E>(self, result: Result<(), E>) -> Transition<E> {
        match (self, result) {
            (_, Ok(())) => Transition::Authenticated,
            (AuthState::CheckAccess, Err(e)) => Transition::Next(AuthState::Refresh, e),
            (AuthState::Refresh, Err(e)) => Transition::Next(AuthState::Reissue, e),
            (AuthState::Reissue, Err(e)) => Transition::Exhausted(e),
        }
    }
}

/// Keeps `AccountState` holding a valid access token.
pub struct Authenticator<'a> {
    client: &'a ApiClient,
    secret_id: &'a str,
    secret_key: &'a str,
}

impl<'a> Authenticator<'a> {
    pub fn new(client: &'a ApiClient, config: &'a Config) -> Self {
        Self {
            client,
            secret_id: &config.secret_id,
            secret_key: &config.secret_key,
        }
    }

    /// Walk the fallback chain until a tier succeeds.
    ///
    /// Returns the tier that produced the valid token. The account is
    /// mutated in place and only by a successful refresh or reissue; on
    /// `AuthError::Exhausted` it is left exactly as it was.
    pub async fn ensure_valid(&self, account: &mut AccountState) -> Result<AuthState, AuthError> {
        let mut state = AuthState::CheckAccess;
        loop {
            let result = self.attempt(state, account).await;
            match state.on_result(result) {
                Transition::Authenticated => {
                    info!(tier = ?state, "Access token valid");
                    return Ok(state);
                }
                Transition::Next(next, error) => {
                    info!(tier = ?state, error = %error, "Tier failed, falling back");
                    state = next;
                }
                Transition::Exhausted(error) => return Err(AuthError::Exhausted(error)),
            }
        }
    }

    async fn attempt(&self, state: AuthState, account: &mut AccountState) -> Result<(), ApiError> {
        match state {
            AuthState::CheckAccess => {
                let access = account.access().ok_or(ApiError::MissingToken)?;
                self.client
                    .with_token(access.to_string())
                    .probe_access()
                    .await
            }
            AuthState::Refresh => {
                let refresh = account.refresh().ok_or(ApiError::MissingToken)?;
                let refreshed = self.client.refresh_access(refresh).await?;
                account.access_token = Some(refreshed.access);
                debug!("Access token refreshed");
                Ok(())
            }
            AuthState::Reissue => {
                let pair = self
                    .client
                    .new_tokens(self.secret_id, self.secret_key)
                    .await?;
                account.access_token = Some(pair.access);
                account.refresh_token = Some(pair.refresh);
                debug!("Access and refresh tokens created");
                Ok(())
            }
        }
    }
}
