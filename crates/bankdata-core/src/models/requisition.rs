use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Body for `requisitions/`.
#[derive(Debug, Serialize)]
pub struct NewRequisition<'a> {
    pub redirect: &'a str,
    pub institution_id: &'a str,
    pub reference: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct RequisitionResponse {
    pub id: Option<String>,
    pub link: Option<String>,
}

/// A newly created requisition and the URL the user must visit to authorize it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requisition {
    pub id: String,
    pub link: String,
}

impl RequisitionResponse {
    pub fn validate(self) -> Result<Requisition, ApiError> {
        Ok(Requisition {
            id: self.id.ok_or(ApiError::MissingField("id"))?,
            link: self.link.ok_or(ApiError::MissingField("link"))?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RequisitionDetailResponse {
    pub institution_id: Option<String>,
    pub accounts: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequisitionDetail {
    pub institution_id: String,
    pub accounts: Vec<String>,
}

impl RequisitionDetailResponse {
    pub fn validate(self) -> Result<RequisitionDetail, ApiError> {
        Ok(RequisitionDetail {
            institution_id: self
                .institution_id
                .ok_or(ApiError::MissingField("institution_id"))?,
            accounts: self.accounts.ok_or(ApiError::MissingField("accounts"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requisition_detail_keeps_account_order() {
        let raw = r#"{
            "id": "req-1",
            "status": "LN",
            "institution_id": "SANDBOXFINANCE_SFIN0000",
            "accounts": ["acc-1", "acc-2"]
        }"#;
        let detail = serde_json::from_str::<RequisitionDetailResponse>(raw)
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(detail.institution_id, "SANDBOXFINANCE_SFIN0000");
        assert_eq!(detail.accounts, vec!["acc-1", "acc-2"]);
    }

    #[test]
    fn test_requisition_without_link_is_rejected() {
        let resp: RequisitionResponse = serde_json::from_str(r#"{"id": "req-1"}"#).unwrap();
        assert!(matches!(resp.validate(), Err(ApiError::MissingField("link"))));
    }
}
