//! One invocation of the client: load state, authenticate, run the
//! requested command, persist state.

use std::io::Write;

use anyhow::Result;
use bankdata_core::{AccountState, ApiClient, AuthError, Authenticator, Config};
use tracing::debug;

use crate::cli::Request;
use crate::commands;

/// How the invocation ended. The account file has been saved in every case.
#[derive(Debug)]
pub enum Outcome {
    Completed,
    /// The command failed; the process still exits normally.
    CommandFailed(anyhow::Error),
    /// No tier of the authenticator produced a valid token.
    AuthFailed(AuthError),
}

pub struct App {
    client: ApiClient,
    config: Config,
}

impl App {
    pub fn new(client: ApiClient, config: Config) -> Self {
        Self { client, config }
    }

    pub async fn run<W: Write>(&self, request: Request, out: &mut W) -> Result<Outcome> {
        let path = &self.config.account_file_path;
        let mut account = AccountState::load(path)?;

        let outcome = self.authenticate_and_dispatch(&mut account, request, out).await;

        account.save(path)?;
        Ok(outcome)
    }

    async fn authenticate_and_dispatch<W: Write>(
        &self,
        account: &mut AccountState,
        request: Request,
        out: &mut W,
    ) -> Outcome {
        let authenticator = Authenticator::new(&self.client, &self.config);
        match authenticator.ensure_valid(account).await {
            Ok(tier) => debug!(tier = ?tier, "Authenticated"),
            Err(e) => return Outcome::AuthFailed(e),
        }

        let mut client = self.client.clone();
        if let Some(token) = account.access() {
            client.set_token(token.to_string());
        }

        match commands::dispatch(&client, &self.config, account, request, out).await {
            Ok(()) => Outcome::Completed,
            Err(e) => {
                debug!(error = %e, "Command failed");
                Outcome::CommandFailed(e)
            }
        }
    }
}
