//! API client for the GoCardless bank account data REST API.
//!
//! This module provides the `ApiClient` struct for token management and
//! authenticated reads of institutions, requisitions, balances and
//! transactions.

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{
    AgreementsPage, Balance, BalancesResponse, Institution, NewRequisition, RefreshRequest,
    RefreshResponse, RefreshedAccess, Requisition, RequisitionDetail, RequisitionDetailResponse,
    RequisitionResponse, TokenPair, TokenPairResponse, TokenRequest, Transaction,
    TransactionsResponse,
};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL for all API endpoints
pub const API_BASE_URL: &str = "https://bankaccountdata.gocardless.com/api/v2";

const USER_AGENT: &str = concat!("bankdata/", env!("CARGO_PKG_VERSION"));

/// API client for the bank account data service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the production API
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a client against another base URL (a sandbox or local stub)
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::MissingToken)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<T, ApiError> {
        let response = Self::check_response(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            debug!(url = url, error = %e, "Response did not match expected shape");
            ApiError::InvalidResponse(format!("{}: {}", url, e))
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(self.bearer()?)
            .query(query)
            .send()
            .await?;
        debug!(url = %url, status = %response.status(), "GET");
        Self::parse(response, &url).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        authenticated: bool,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let mut request = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(body);
        if authenticated {
            request = request.bearer_auth(self.bearer()?);
        }
        let response = request.send().await?;
        debug!(url = %url, status = %response.status(), "POST");
        Self::parse(response, &url).await
    }

    // ===== Token Lifecycle =====

    /// Issue a brand-new access/refresh pair from the user secrets
    pub async fn new_tokens(&self, secret_id: &str, secret_key: &str) -> Result<TokenPair, ApiError> {
        let body = TokenRequest {
            secret_id,
            secret_key,
        };
        let response: TokenPairResponse = self.post("token/new/", &body, false).await?;
        response.validate()
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh_access(&self, refresh: &str) -> Result<RefreshedAccess, ApiError> {
        let body = RefreshRequest { refresh };
        let response: RefreshResponse = self.post("token/refresh/", &body, false).await?;
        response.validate()
    }

    /// Cheapest authenticated call available: one page of one agreement.
    /// Succeeds only if the current access token is accepted.
    pub async fn probe_access(&self) -> Result<(), ApiError> {
        let page: AgreementsPage = self
            .get("agreements/enduser/", &[("limit", "1"), ("offset", "1")])
            .await?;
        page.validate().map(|_| ())
    }

    // ===== Data Fetching Methods =====

    /// List the institutions available in a country (ISO 3166 alpha-2 code)
    pub async fn fetch_institutions(&self, country: &str) -> Result<Vec<Institution>, ApiError> {
        self.get("institutions/", &[("country", country)]).await
    }

    /// Create a requisition linking the given institution
    pub async fn create_requisition(
        &self,
        institution_id: &str,
        redirect: &str,
        reference: &str,
    ) -> Result<Requisition, ApiError> {
        let body = NewRequisition {
            redirect,
            institution_id,
            reference,
        };
        let response: RequisitionResponse = self.post("requisitions/", &body, true).await?;
        response.validate()
    }

    /// Fetch a requisition and the accounts it grants access to
    pub async fn fetch_requisition(&self, requisition_id: &str) -> Result<RequisitionDetail, ApiError> {
        let path = format!("requisitions/{}", requisition_id);
        let response: RequisitionDetailResponse = self.get(&path, &[]).await?;
        response.validate()
    }

    /// Fetch the current balance of an account
    pub async fn fetch_balance(&self, account_id: &str) -> Result<Balance, ApiError> {
        let path = format!("accounts/{}/balances/", account_id);
        let response: BalancesResponse = self.get(&path, &[]).await?;
        response.validate()
    }

    /// Fetch booked transactions of an account, newest first
    pub async fn fetch_transactions(&self, account_id: &str) -> Result<Vec<Transaction>, ApiError> {
        let path = format!("accounts/{}/transactions/", account_id);
        let response: TransactionsResponse = self.get(&path, &[]).await?;
        response.validate()
    }
}

// ============================================================================
// Tests
// ============================================================================
