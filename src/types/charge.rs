//! Charges and refunds
//!
//! `charges`, `charges/{id}`, `charges/{id}/refund`, `charges/{id}/capture`

use super::card::{Card, NewCard};
use super::common::{list_or_vec, Metadata, Pagination};
use crate::response::ListEnvelope;
use crate::GatewayError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A charge as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Charge {
    pub id: String,
    pub object: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    pub livemode: bool,
    pub amount: i64,
    pub amount_refunded: i64,
    pub currency: Option<String>,
    pub captured: bool,
    pub paid: bool,
    pub refunded: bool,
    #[serde(deserialize_with = "list_or_vec")]
    pub refunds: ListEnvelope<Refund>,
    /// Card charged, as reported by older API versions
    pub card: Option<Card>,
    /// Card charged, as reported by newer API versions
    pub source: Option<Card>,
    pub customer: Option<String>,
    pub invoice: Option<String>,
    pub description: Option<String>,
    pub failure_code: Option<String>,
    pub failure_message: Option<String>,
    pub balance_transaction: Option<String>,
    pub receipt_email: Option<String>,
    pub statement_description: Option<String>,
    pub metadata: Metadata,
}

impl Charge {
    /// Card charged under whichever key the API version reports it
    pub fn charged_card(&self) -> Option<&Card> {
        self.card.as_ref().or(self.source.as_ref())
    }
}

/// A refund as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Refund {
    pub id: String,
    pub object: Option<String>,
    pub amount: i64,
    pub currency: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    pub charge: Option<String>,
    pub balance_transaction: Option<String>,
    pub reason: Option<String>,
    pub metadata: Metadata,
}

/// Create a charge against a customer or a card token
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCharge {
    /// Amount in the currency's smallest unit
    pub amount: i64,
    pub currency: String,
    pub customer: Option<String>,
    /// Card token or card id
    pub card: Option<String>,
    pub description: Option<String>,
    /// `false` authorizes only; capture later with [`CaptureCharge`]
    pub capture: Option<bool>,
    pub application_fee: Option<i64>,
    pub receipt_email: Option<String>,
    pub statement_description: Option<String>,
    pub metadata: Metadata,
}

impl CreateCharge {
    fn check(&self) -> crate::Result<()> {
        if self.amount <= 0 {
            return Err(GatewayError::validation("amount must be positive"));
        }
        if self.currency.trim().is_empty() {
            return Err(GatewayError::validation("currency is required"));
        }
        if self.customer.is_none() && self.card.is_none() {
            return Err(GatewayError::validation(
                "a charge needs a customer or a card",
            ));
        }
        Ok(())
    }
}

/// Create a charge from raw card details
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCardCharge {
    pub amount: i64,
    pub currency: String,
    pub card: NewCard,
    pub description: Option<String>,
    pub capture: Option<bool>,
    pub receipt_email: Option<String>,
    pub metadata: Metadata,
}

impl CreateCardCharge {
    fn check(&self) -> crate::Result<()> {
        if self.amount <= 0 {
            return Err(GatewayError::validation("amount must be positive"));
        }
        if self.currency.trim().is_empty() {
            return Err(GatewayError::validation("currency is required"));
        }
        self.card.check()
    }
}

/// Fetch a charge
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetCharge {
    pub id: String,
}

/// Update the description or metadata of a charge
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCharge {
    pub id: String,
    pub description: Option<String>,
    pub metadata: Metadata,
}

/// List charges, optionally for one customer
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetCharges {
    pub customer: Option<String>,
    #[serde(flatten)]
    pub page: Pagination,
}

impl GetCharges {
    fn check(&self) -> crate::Result<()> {
        self.page.check()
    }
}

/// Refund a charge, in full unless `amount` is set
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefundCharge {
    pub id: String,
    pub amount: Option<i64>,
    pub refund_application_fee: Option<bool>,
    pub metadata: Metadata,
}

impl RefundCharge {
    fn check(&self) -> crate::Result<()> {
        match self.amount {
            Some(amount) if amount <= 0 => {
                Err(GatewayError::validation("refund amount must be positive"))
            }
            _ => Ok(()),
        }
    }
}

/// Capture a charge created with `capture = false`
#[derive(Debug, Clone, Default, Serialize)]
pub struct CaptureCharge {
    pub id: String,
    pub amount: Option<i64>,
    pub application_fee: Option<i64>,
    pub receipt_email: Option<String>,
}

crate::api_request!(CreateCharge => Charge, POST "charges", check);
crate::api_request!(CreateCardCharge => Charge, POST "charges", check);
crate::api_request!(GetCharge => Charge, GET "charges/{id}");
crate::api_request!(UpdateCharge => Charge, POST "charges/{id}");
crate::api_request!(GetCharges => ListEnvelope<Charge>, GET "charges", check);
crate::api_request!(RefundCharge => Charge, POST "charges/{id}/refund", check);
crate::api_request!(CaptureCharge => Charge, POST "charges/{id}/capture");
