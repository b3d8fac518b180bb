//! Cards attached to customers
//!
//! `customers/{customer_id}/cards`

use super::common::{DeletedRef, Metadata, Pagination};
use crate::response::ListEnvelope;
use crate::GatewayError;
use serde::{Deserialize, Serialize};

/// A stored card as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    pub id: String,
    pub object: Option<String>,
    pub last4: Option<String>,
    pub brand: Option<String>,
    pub funding: Option<String>,
    pub exp_month: Option<u32>,
    pub exp_year: Option<i32>,
    pub fingerprint: Option<String>,
    pub country: Option<String>,
    pub name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub address_zip: Option<String>,
    pub address_country: Option<String>,
    pub cvc_check: Option<String>,
    pub address_line1_check: Option<String>,
    pub address_zip_check: Option<String>,
    pub customer: Option<String>,
    pub metadata: Metadata,
}

/// Raw card details sent when creating a card, token, customer or charge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewCard {
    pub number: String,
    pub exp_month: u32,
    pub exp_year: i32,
    pub cvc: Option<String>,
    pub name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub address_zip: Option<String>,
    pub address_country: Option<String>,
}

impl NewCard {
    pub fn new(number: impl Into<String>, exp_month: u32, exp_year: i32) -> Self {
        Self {
            number: number.into(),
            exp_month,
            exp_year,
            ..Default::default()
        }
    }

    pub(crate) fn check(&self) -> crate::Result<()> {
        if self.number.trim().is_empty() {
            return Err(GatewayError::validation("card number is required"));
        }
        if !(1..=12).contains(&self.exp_month) {
            return Err(GatewayError::validation(format!(
                "card exp_month must be 1-12, got {}",
                self.exp_month
            )));
        }
        if self.exp_year <= 0 {
            return Err(GatewayError::validation("card exp_year is required"));
        }
        Ok(())
    }
}

/// Add a card to a customer
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCard {
    pub customer_id: String,
    pub card: NewCard,
}

impl CreateCard {
    fn check(&self) -> crate::Result<()> {
        self.card.check()
    }
}

/// Fetch one of a customer's cards
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetCard {
    pub customer_id: String,
    pub card_id: String,
}

/// Update the holder details of a stored card
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCard {
    pub customer_id: String,
    pub card_id: String,
    pub name: Option<String>,
    pub exp_month: Option<u32>,
    pub exp_year: Option<i32>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub address_zip: Option<String>,
    pub address_country: Option<String>,
}

/// Remove a card from a customer
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteCard {
    pub customer_id: String,
    pub card_id: String,
}

/// List a customer's cards
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetCards {
    pub customer_id: String,
    #[serde(flatten)]
    pub page: Pagination,
}

impl GetCards {
    fn check(&self) -> crate::Result<()> {
        self.page.check()
    }
}

crate::api_request!(CreateCard => Card, POST "customers/{customer_id}/cards", check);
crate::api_request!(GetCard => Card, GET "customers/{customer_id}/cards/{card_id}");
crate::api_request!(UpdateCard => Card, POST "customers/{customer_id}/cards/{card_id}");
crate::api_request!(DeleteCard => DeletedRef, DELETE "customers/{customer_id}/cards/{card_id}");
crate::api_request!(GetCards => ListEnvelope<Card>, GET "customers/{customer_id}/cards", check);
