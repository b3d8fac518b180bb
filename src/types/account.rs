//! Connected accounts
//!
//! `accounts`, `account`

use super::common::{Address, Metadata};
use crate::form::StripeDate;
use crate::GatewayError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether an account belongs to a person or a business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalEntityType {
    Individual,
    Company,
}

/// The person or business behind an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalEntity {
    #[serde(rename = "type")]
    pub kind: Option<LegalEntityType>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub business_name: Option<String>,
    pub address: Option<Address>,
    /// Date of birth, sent as `dob[day]`, `dob[month]`, `dob[year]`
    #[serde(default, deserialize_with = "crate::form::optional_date")]
    pub dob: Option<StripeDate>,
}

/// Record of the account holder accepting the terms of service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TosAcceptance {
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub date: Option<DateTime<Utc>>,
    pub ip: Option<String>,
}

/// Secret and publishable keys of a managed account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountKeys {
    pub secret: Option<String>,
    pub publishable: Option<String>,
}

/// An account as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: String,
    pub object: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub managed: bool,
    pub business_name: Option<String>,
    pub default_currency: Option<String>,
    pub currencies_supported: Vec<String>,
    pub charges_enabled: bool,
    pub transfers_enabled: bool,
    pub details_submitted: bool,
    pub legal_entity: Option<LegalEntity>,
    pub tos_acceptance: Option<TosAcceptance>,
    /// Present only in the response to creating a managed account
    pub keys: Option<AccountKeys>,
    pub metadata: Metadata,
}

/// Create a connected account
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAccount {
    pub country: Option<String>,
    pub email: Option<String>,
    /// Whether the platform manages the account on the holder's behalf
    pub managed: Option<bool>,
    pub business_name: Option<String>,
    pub default_currency: Option<String>,
    pub legal_entity: Option<LegalEntity>,
    pub tos_acceptance: Option<TosAcceptance>,
    pub metadata: Metadata,
}

impl CreateAccount {
    fn check(&self) -> crate::Result<()> {
        if self.managed == Some(true) && self.country.is_none() {
            return Err(GatewayError::validation(
                "a managed account needs a country",
            ));
        }
        if self.managed != Some(true) && self.email.is_none() {
            return Err(GatewayError::validation(
                "a standalone account needs an email",
            ));
        }
        Ok(())
    }
}

/// Fetch the account the API key belongs to
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GetAccount;

crate::api_request!(CreateAccount => Account, POST "accounts", check);
crate::api_request!(GetAccount => Account, GET "account");
