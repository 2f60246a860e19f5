use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::ApiError;

/// Amount/currency pair as the API sends it. Amounts are decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct MoneyWire {
    pub amount: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyWire {
    pub fn validate(self) -> Result<Money, ApiError> {
        let raw = self.amount.ok_or(ApiError::MissingField("amount"))?;
        let amount = Decimal::from_str(raw.trim())
            .map_err(|e| ApiError::InvalidResponse(format!("Bad amount {:?}: {}", raw, e)))?;
        Ok(Money {
            amount,
            currency: self.currency.ok_or(ApiError::MissingField("currency"))?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct BalancesResponse {
    pub balances: Option<Vec<BalanceEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct BalanceEntry {
    #[serde(rename = "balanceAmount")]
    pub balance_amount: Option<MoneyWire>,
}

/// The current balance of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub money: Money,
}

impl BalancesResponse {
    /// The first reported balance is taken as the current one.
    pub fn validate(self) -> Result<Balance, ApiError> {
        let entry = self
            .balances
            .ok_or(ApiError::MissingField("balances"))?
            .into_iter()
            .next()
            .ok_or(ApiError::MissingField("balances[0]"))?;
        Ok(Balance {
            money: entry
                .balance_amount
                .ok_or(ApiError::MissingField("balanceAmount"))?
                .validate()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_balance_is_current() {
        let raw = r#"{"balances": [
            {"balanceAmount": {"amount": "1234.5", "currency": "EUR"}, "balanceType": "expected"},
            {"balanceAmount": {"amount": "1000.00", "currency": "EUR"}, "balanceType": "interimAvailable"}
        ]}"#;
        let balance = serde_json::from_str::<BalancesResponse>(raw)
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(balance.money.amount, Decimal::new(12345, 1));
        assert_eq!(balance.money.currency, "EUR");
    }

    #[test]
    fn test_empty_balances_is_rejected() {
        let resp: BalancesResponse = serde_json::from_str(r#"{"balances": []}"#).unwrap();
        assert!(matches!(
            resp.validate(),
            Err(ApiError::MissingField("balances[0]"))
        ));
    }

    #[test]
    fn test_unparseable_amount_is_invalid() {
        let wire = MoneyWire {
            amount: Some("twelve".to_string()),
            currency: Some("EUR".to_string()),
        };
        assert!(matches!(wire.validate(), Err(ApiError::InvalidResponse(_))));
    }
}
