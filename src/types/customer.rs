//! Customers
//!
//! `customers`, `customers/{id}`

use super::card::{Card, NewCard};
use super::common::{list_or_vec, DeletedRef, Metadata, Pagination};
use super::subscription::Subscription;
use crate::response::ListEnvelope;
use crate::GatewayError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub id: String,
    pub object: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    pub livemode: bool,
    pub email: Option<String>,
    pub description: Option<String>,
    pub account_balance: i64,
    pub currency: Option<String>,
    pub delinquent: bool,
    /// Default card id as reported by older API versions
    pub default_card: Option<String>,
    /// Default card id as reported by newer API versions
    pub default_source: Option<String>,
    /// Stored cards as reported by older API versions
    #[serde(deserialize_with = "list_or_vec")]
    pub cards: ListEnvelope<Card>,
    /// Stored cards as reported by newer API versions
    #[serde(deserialize_with = "list_or_vec")]
    pub sources: ListEnvelope<Card>,
    pub subscription: Option<Subscription>,
    pub metadata: Metadata,
}

impl Customer {
    /// Stored cards under whichever key the API version reports them
    pub fn stored_cards(&self) -> &ListEnvelope<Card> {
        if self.cards.is_empty() && !self.sources.is_empty() {
            &self.sources
        } else {
            &self.cards
        }
    }

    /// Id of the default card under whichever key the API version reports it
    pub fn default_card_id(&self) -> Option<&str> {
        self.default_card
            .as_deref()
            .or(self.default_source.as_deref())
    }
}

/// Create a customer, optionally with an inline card
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCustomer {
    pub account_balance: Option<i64>,
    pub card: Option<NewCard>,
    pub coupon: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub plan: Option<String>,
    pub quantity: Option<u32>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub trial_end: Option<DateTime<Utc>>,
    pub metadata: Metadata,
}

impl CreateCustomer {
    fn check(&self) -> crate::Result<()> {
        if let Some(card) = &self.card {
            card.check()?;
        }
        if self.quantity.is_some() && self.plan.is_none() {
            return Err(GatewayError::validation("quantity requires a plan"));
        }
        Ok(())
    }
}

/// Create a customer from a previously created card token
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCustomerWithToken {
    pub account_balance: Option<i64>,
    /// Token id, e.g. `tok_...`
    pub card: Option<String>,
    pub coupon: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub plan: Option<String>,
    pub quantity: Option<u32>,
    pub metadata: Metadata,
}

/// Fetch a customer
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetCustomer {
    pub id: String,
}

/// Update a customer. Fields left `None` are not changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCustomer {
    pub id: String,
    pub account_balance: Option<i64>,
    pub card: Option<NewCard>,
    pub coupon: Option<String>,
    pub default_card: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub metadata: Metadata,
}

impl UpdateCustomer {
    fn check(&self) -> crate::Result<()> {
        match &self.card {
            Some(card) => card.check(),
            None => Ok(()),
        }
    }
}

/// Delete a customer
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteCustomer {
    pub id: String,
}

/// List customers
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetCustomers {
    #[serde(flatten)]
    pub page: Pagination,
}

impl GetCustomers {
    fn check(&self) -> crate::Result<()> {
        self.page.check()
    }
}

crate::api_request!(CreateCustomer => Customer, POST "customers", check);
crate::api_request!(CreateCustomerWithToken => Customer, POST "customers");
crate::api_request!(GetCustomer => Customer, GET "customers/{id}");
crate::api_request!(UpdateCustomer => Customer, POST "customers/{id}", check);
crate::api_request!(DeleteCustomer => DeletedRef, DELETE "customers/{id}");
crate::api_request!(GetCustomers => ListEnvelope<Customer>, GET "customers", check);
