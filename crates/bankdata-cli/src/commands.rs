//! Command handlers.
//!
//! Each handler makes its API call(s) with an already-authenticated
//! client, writes the result to `out`, and may record one identifier in
//! the account state. Errors are returned to the caller, which reports
//! them without treating them as authentication failures.

use std::io::Write;

use anyhow::{bail, Context, Result};
use bankdata_core::{AccountState, ApiClient, Config};
use chrono::Utc;
use tracing::{debug, info};

use crate::cli::Request;
use crate::output::{balance_line, institution_lines, transaction_lines};

pub async fn dispatch<W: Write>(
    client: &ApiClient,
    config: &Config,
    account: &mut AccountState,
    request: Request,
    out: &mut W,
) -> Result<()> {
    match request {
        Request::Banks { country } => banks(client, &country, out).await,
        Request::Link { institution_id } => link(client, config, account, &institution_id, out).await,
        Request::Accounts => accounts(client, account, out).await,
        Request::List { count } => list(client, account, count, out).await,
        Request::Balance => balance(client, account, out).await,
    }
}

pub async fn banks<W: Write>(client: &ApiClient, country: &str, out: &mut W) -> Result<()> {
    let banks = client
        .fetch_institutions(country)
        .await
        .with_context(|| format!("Could not list banks for country {:?}", country))?;
    debug!(country, count = banks.len(), "Institutions fetched");

    for line in institution_lines(&banks) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

pub async fn link<W: Write>(
    client: &ApiClient,
    config: &Config,
    account: &mut AccountState,
    institution_id: &str,
    out: &mut W,
) -> Result<()> {
    let reference = format!("bankdata-{}", Utc::now().format("%Y%m%d%H%M%S%3f"));
    let requisition = client
        .create_requisition(institution_id, &config.redirect_url, &reference)
        .await
        .with_context(|| format!("Could not create a link to {}", institution_id))?;
    info!(requisition = %requisition.id, institution_id, "Requisition created");

    account.requisition_id = Some(requisition.id.clone());
    // Accounts of the previous requisition are no longer reachable.
    account.linked_account_id = None;

    writeln!(out, "Requisition {} created", requisition.id)?;
    writeln!(out, "Open this link to authorize: {}", requisition.link)?;
    Ok(())
}

pub async fn accounts<W: Write>(client: &ApiClient, account: &mut AccountState, out: &mut W) -> Result<()> {
    let Some(requisition_id) = account.requisition_id.clone() else {
        bail!("No bank linked yet, run `bankdata link <institution_id>` first");
    };
    let detail = client
        .fetch_requisition(&requisition_id)
        .await
        .context("Could not fetch linked accounts")?;

    writeln!(out, "Institution: {}", detail.institution_id)?;
    let Some(first) = detail.accounts.first() else {
        writeln!(out, "No accounts yet. Has the link been authorized?")?;
        return Ok(());
    };
    account.linked_account_id = Some(first.clone());

    for id in &detail.accounts {
        if id == first {
            writeln!(out, "{} (linked)", id)?;
        } else {
            writeln!(out, "{}", id)?;
        }
    }
    Ok(())
}

fn linked_account(account: &AccountState) -> Result<&str> {
    match account.linked_account_id.as_deref() {
        Some(id) => Ok(id),
        None => bail!("No linked account, run `bankdata accounts` first"),
    }
}

pub async fn list<W: Write>(client: &ApiClient, account: &AccountState, count: usize, out: &mut W) -> Result<()> {
    let account_id = linked_account(account)?;
    let transactions = client
        .fetch_transactions(account_id)
        .await
        .context("Could not fetch transactions")?;
    let shown = &transactions[..count.min(transactions.len())];
    debug!(total = transactions.len(), shown = shown.len(), "Transactions fetched");

    let balance = client
        .fetch_balance(account_id)
        .await
        .context("Could not fetch balance")?;

    for line in transaction_lines(shown) {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", balance_line(&balance))?;
    Ok(())
}

pub async fn balance<W: Write>(client: &ApiClient, account: &AccountState, out: &mut W) -> Result<()> {
    let account_id = linked_account(account)?;
    let balance = client
        .fetch_balance(account_id)
        .await
        .context("Could not fetch balance")?;
    writeln!(out, "{}", balance_line(&balance))?;
    Ok(())
}
