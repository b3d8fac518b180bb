//! Single-use card tokens
//!
//! `tokens`, `tokens/{id}`

use super::card::{Card, NewCard};
use crate::GatewayError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A token as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Token {
    pub id: String,
    pub object: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    pub livemode: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub used: bool,
    pub card: Option<Card>,
}

/// Tokenize a card, either from raw details or from a customer's stored
/// card (for use on a connected account)
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateToken {
    pub card: Option<NewCard>,
    pub customer: Option<String>,
}

impl CreateToken {
    fn check(&self) -> crate::Result<()> {
        match (&self.card, &self.customer) {
            (Some(card), None) => card.check(),
            (None, Some(customer)) if !customer.trim().is_empty() => Ok(()),
            _ => Err(GatewayError::validation(
                "a token needs either card details or a customer",
            )),
        }
    }
}

/// Fetch a token
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetToken {
    pub id: String,
}

crate::api_request!(CreateToken => Token, POST "tokens", check);
crate::api_request!(GetToken => Token, GET "tokens/{id}");
