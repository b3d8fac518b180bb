//! Subscription plans
//!
//! `plans`, `plans/{id}`

use super::common::{DeletedRef, Metadata, Pagination};
use crate::response::ListEnvelope;
use crate::GatewayError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Billing frequency of a plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanInterval {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

/// A plan as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    pub id: String,
    pub object: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    pub livemode: bool,
    pub name: Option<String>,
    pub amount: i64,
    pub currency: Option<String>,
    pub interval: PlanInterval,
    pub interval_count: Option<u32>,
    pub trial_period_days: Option<u32>,
    pub statement_description: Option<String>,
    pub metadata: Metadata,
}

/// Create a plan
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatePlan {
    /// Caller-chosen identifier
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub interval: PlanInterval,
    pub interval_count: Option<u32>,
    pub name: String,
    pub trial_period_days: Option<u32>,
    pub statement_description: Option<String>,
    pub metadata: Metadata,
}

impl CreatePlan {
    fn check(&self) -> crate::Result<()> {
        if self.id.trim().is_empty() {
            return Err(GatewayError::validation("plan id is required"));
        }
        if self.name.trim().is_empty() {
            return Err(GatewayError::validation("plan name is required"));
        }
        if self.currency.trim().is_empty() {
            return Err(GatewayError::validation("currency is required"));
        }
        if self.amount < 0 {
            return Err(GatewayError::validation("plan amount cannot be negative"));
        }
        Ok(())
    }
}

/// Fetch a plan
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetPlan {
    pub id: String,
}

/// Update a plan's display fields; pricing is immutable
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePlan {
    pub id: String,
    pub name: Option<String>,
    pub statement_description: Option<String>,
    pub metadata: Metadata,
}

/// Delete a plan
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeletePlan {
    pub id: String,
}

/// List plans
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetPlans {
    #[serde(flatten)]
    pub page: Pagination,
}

impl GetPlans {
    fn check(&self) -> crate::Result<()> {
        self.page.check()
    }
}

crate::api_request!(CreatePlan => Plan, POST "plans", check);
crate::api_request!(GetPlan => Plan, GET "plans/{id}");
crate::api_request!(UpdatePlan => Plan, POST "plans/{id}");
crate::api_request!(DeletePlan => DeletedRef, DELETE "plans/{id}");
crate::api_request!(GetPlans => ListEnvelope<Plan>, GET "plans", check);
