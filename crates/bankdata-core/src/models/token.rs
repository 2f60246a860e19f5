use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Body for `token/new/`.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub secret_id: &'a str,
    pub secret_key: &'a str,
}

/// Body for `token/refresh/`.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenPairResponse {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

/// A freshly issued access/refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPairResponse {
    pub fn validate(self) -> Result<TokenPair, ApiError> {
        Ok(TokenPair {
            access: self.access.ok_or(ApiError::MissingField("access"))?,
            refresh: self.refresh.ok_or(ApiError::MissingField("refresh"))?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: Option<String>,
}

/// A new access token obtained from a refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedAccess {
    pub access: String,
}

impl RefreshResponse {
    pub fn validate(self) -> Result<RefreshedAccess, ApiError> {
        Ok(RefreshedAccess {
            access: self.access.ok_or(ApiError::MissingField("access"))?,
        })
    }
}

/// One page of end-user agreements. Only used to probe token validity,
/// so the entries themselves are left untyped.
#[derive(Debug, Deserialize)]
pub struct AgreementsPage {
    pub results: Option<Vec<serde_json::Value>>,
}

impl AgreementsPage {
    pub fn validate(self) -> Result<Vec<serde_json::Value>, ApiError> {
        self.results.ok_or(ApiError::MissingField("results"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pair_requires_both_tokens() {
        let full: TokenPairResponse =
            serde_json::from_str(r#"{"access": "a", "refresh": "r", "access_expires": 86400}"#)
                .unwrap();
        assert_eq!(
            full.validate().unwrap(),
            TokenPair {
                access: "a".to_string(),
                refresh: "r".to_string()
            }
        );

        let partial: TokenPairResponse = serde_json::from_str(r#"{"access": "a"}"#).unwrap();
        assert!(matches!(
            partial.validate(),
            Err(ApiError::MissingField("refresh"))
        ));
    }

    #[test]
    fn test_agreements_page_without_results_is_rejected() {
        let page: AgreementsPage =
            serde_json::from_str(r#"{"summary": "Invalid token", "status_code": 401}"#).unwrap();
        assert!(matches!(page.validate(), Err(ApiError::MissingField("results"))));
    }
}
