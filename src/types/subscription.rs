//! A customer's subscription to a plan
//!
//! `customers/{customer_id}/subscription`

use super::common::Metadata;
use super::plan::Plan;
use crate::GatewayError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a subscription
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Trialing,
    Active,
    PastDue,
    Canceled,
    Unpaid,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A subscription as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    pub id: String,
    pub object: Option<String>,
    pub customer: Option<String>,
    pub plan: Option<Plan>,
    pub quantity: Option<u32>,
    pub status: SubscriptionStatus,
    pub cancel_at_period_end: bool,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub start: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub current_period_start: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub current_period_end: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub trial_start: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub trial_end: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub canceled_at: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub ended_at: Option<DateTime<Utc>>,
    pub application_fee_percent: Option<f64>,
    pub metadata: Metadata,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            SubscriptionStatus::Active | SubscriptionStatus::Trialing
        )
    }
}

/// Subscribe a customer to a plan, replacing any current subscription
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscribeCustomer {
    pub customer_id: String,
    pub plan: String,
    pub coupon: Option<String>,
    pub prorate: Option<bool>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub trial_end: Option<DateTime<Utc>>,
    /// Card token to charge instead of the default card
    pub card: Option<String>,
    pub quantity: Option<u32>,
    pub application_fee_percent: Option<f64>,
    pub metadata: Metadata,
}

impl SubscribeCustomer {
    fn check(&self) -> crate::Result<()> {
        if self.plan.trim().is_empty() {
            return Err(GatewayError::validation("plan is required"));
        }
        if let Some(percent) = self.application_fee_percent {
            if !(0.0..=100.0).contains(&percent) {
                return Err(GatewayError::validation(
                    "application_fee_percent must be between 0 and 100",
                ));
            }
        }
        Ok(())
    }
}

/// Cancel a customer's subscription, now or at the end of the period
#[derive(Debug, Clone, Default, Serialize)]
pub struct CancelSubscription {
    pub customer_id: String,
    pub at_period_end: Option<bool>,
}

crate::api_request!(SubscribeCustomer => Subscription, POST "customers/{customer_id}/subscription", check);
crate::api_request!(CancelSubscription => Subscription, DELETE "customers/{customer_id}/subscription");
