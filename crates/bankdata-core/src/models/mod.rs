//! Data models for the bank account data API.
//!
//! Each endpoint's wire response is parsed into a record whose fields are
//! all optional, then validated into a domain type. A missing field turns
//! into `ApiError::MissingField` at that boundary so callers never probe
//! raw JSON.
//!
//! - `TokenPair`, `RefreshedAccess`, `AgreementsPage`: token lifecycle
//! - `Institution`: banks available in a country
//! - `Requisition`, `RequisitionDetail`: bank-linking authorizations
//! - `Balance`, `Money`: account balances
//! - `Transaction`: booked account transactions

pub mod account;
pub mod institution;
pub mod requisition;
pub mod token;
pub mod transaction;

pub use account::{Balance, BalancesResponse, Money, MoneyWire};
pub use institution::Institution;
pub use requisition::{
    NewRequisition, Requisition, RequisitionDetail, RequisitionDetailResponse, RequisitionResponse,
};
pub use token::{
    AgreementsPage, RefreshRequest, RefreshResponse, RefreshedAccess, TokenPair, TokenPairResponse,
    TokenRequest,
};
pub use transaction::{Transaction, TransactionsResponse};
