use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::api::ApiError;

use super::account::{Money, MoneyWire};

#[derive(Debug, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Option<TransactionBuckets>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionBuckets {
    pub booked: Option<Vec<TransactionWire>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountReference {
    pub iban: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionWire {
    #[serde(rename = "transactionAmount")]
    pub transaction_amount: Option<MoneyWire>,
    #[serde(rename = "bookingDate")]
    pub booking_date: Option<String>,
    #[serde(rename = "debtorName")]
    pub debtor_name: Option<String>,
    #[serde(rename = "debtorAccount")]
    pub debtor_account: Option<AccountReference>,
    #[serde(rename = "creditorName")]
    pub creditor_name: Option<String>,
    #[serde(rename = "creditorAccount")]
    pub creditor_account: Option<AccountReference>,
    #[serde(rename = "remittanceInformationUnstructured")]
    pub remittance_information_unstructured: Option<String>,
}

/// A booked transaction, reduced to what the client displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub booking_date: NaiveDate,
    pub amount: Money,
    /// Debtor or creditor name, or the free-text remittance note.
    pub counterparty: Option<String>,
    pub counterparty_iban: Option<String>,
}

impl Transaction {
    /// `(year, month)` of the booking date, used to group output.
    pub fn month(&self) -> (i32, u32) {
        (self.booking_date.year(), self.booking_date.month())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl TransactionWire {
    pub fn validate(self) -> Result<Transaction, ApiError> {
        let raw_date = self
            .booking_date
            .ok_or(ApiError::MissingField("bookingDate"))?;
        let booking_date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d").map_err(|e| {
            ApiError::InvalidResponse(format!("Bad booking date {:?}: {}", raw_date, e))
        })?;
        let amount = self
            .transaction_amount
            .ok_or(ApiError::MissingField("transactionAmount"))?
            .validate()?;

        let counterparty = non_empty(self.debtor_name)
            .or_else(|| non_empty(self.creditor_name))
            .or_else(|| non_empty(self.remittance_information_unstructured));
        let counterparty_iban = self
            .debtor_account
            .and_then(|a| non_empty(a.iban))
            .or_else(|| self.creditor_account.and_then(|a| non_empty(a.iban)));

        Ok(Transaction {
            booking_date,
            amount,
            counterparty,
            counterparty_iban,
        })
    }
}

impl TransactionsResponse {
    /// Booked transactions in the order the API returned them (newest first).
    pub fn validate(self) -> Result<Vec<Transaction>, ApiError> {
        self.transactions
            .ok_or(ApiError::MissingField("transactions"))?
            .booked
            .ok_or(ApiError::MissingField("booked"))?
            .into_iter()
            .map(TransactionWire::validate)
            .collect()
    }
}
