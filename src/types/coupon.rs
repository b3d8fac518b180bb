//! Discount coupons
//!
//! `coupons`, `coupons/{id}`

use super::common::{DeletedRef, Metadata, Pagination};
use crate::response::ListEnvelope;
use crate::GatewayError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How long a coupon keeps applying once redeemed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponDuration {
    Forever,
    #[default]
    Once,
    Repeating,
}

/// A coupon as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coupon {
    pub id: String,
    pub object: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    pub livemode: bool,
    pub duration: CouponDuration,
    pub duration_in_months: Option<u32>,
    pub amount_off: Option<i64>,
    pub percent_off: Option<u32>,
    pub currency: Option<String>,
    pub max_redemptions: Option<u32>,
    pub times_redeemed: u32,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub redeem_by: Option<DateTime<Utc>>,
    pub valid: bool,
    pub metadata: Metadata,
}

/// Create a coupon. Exactly one of `amount_off` and `percent_off` is set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCoupon {
    /// Caller-chosen code; generated by the API when omitted
    pub id: Option<String>,
    pub duration: CouponDuration,
    pub duration_in_months: Option<u32>,
    pub amount_off: Option<i64>,
    pub percent_off: Option<u32>,
    pub currency: Option<String>,
    pub max_redemptions: Option<u32>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub redeem_by: Option<DateTime<Utc>>,
    pub metadata: Metadata,
}

impl CreateCoupon {
    fn check(&self) -> crate::Result<()> {
        match (self.amount_off, self.percent_off) {
            (Some(_), Some(_)) | (None, None) => {
                return Err(GatewayError::validation(
                    "exactly one of amount_off and percent_off must be set",
                ))
            }
            (Some(amount), None) => {
                if amount <= 0 {
                    return Err(GatewayError::validation("amount_off must be positive"));
                }
                if self.currency.is_none() {
                    return Err(GatewayError::validation("amount_off requires a currency"));
                }
            }
            (None, Some(percent)) => {
                if !(1..=100).contains(&percent) {
                    return Err(GatewayError::validation(
                        "percent_off must be between 1 and 100",
                    ));
                }
            }
        }

        match (self.duration, self.duration_in_months) {
            (CouponDuration::Repeating, None) => Err(GatewayError::validation(
                "a repeating coupon needs duration_in_months",
            )),
            (CouponDuration::Forever | CouponDuration::Once, Some(_)) => Err(
                GatewayError::validation("duration_in_months only applies to repeating coupons"),
            ),
            _ => Ok(()),
        }
    }
}

/// Fetch a coupon
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetCoupon {
    pub id: String,
}

/// Update a coupon's metadata; discount terms are immutable
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCoupon {
    pub id: String,
    pub metadata: Metadata,
}

/// Delete a coupon; existing redemptions keep their discount
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteCoupon {
    pub id: String,
}

/// List coupons
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetCoupons {
    #[serde(flatten)]
    pub page: Pagination,
}

impl GetCoupons {
    fn check(&self) -> crate::Result<()> {
        self.page.check()
    }
}

crate::api_request!(CreateCoupon => Coupon, POST "coupons", check);
crate::api_request!(GetCoupon => Coupon, GET "coupons/{id}");
crate::api_request!(UpdateCoupon => Coupon, POST "coupons/{id}");
crate::api_request!(DeleteCoupon => DeletedRef, DELETE "coupons/{id}");
crate::api_request!(GetCoupons => ListEnvelope<Coupon>, GET "coupons", check);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::prepare;

    #[test]
    fn test_repeating_percent_coupon() {
        let route = prepare(&CreateCoupon {
            id: Some("SPRING".into()),
            duration: CouponDuration::Repeating,
            duration_in_months: Some(3),
            percent_off: Some(25),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            route.params,
            vec![
                ("id".to_string(), "SPRING".to_string()),
                ("duration".to_string(), "repeating".to_string()),
                ("duration_in_months".to_string(), "3".to_string()),
                ("percent_off".to_string(), "25".to_string()),
            ]
        );
    }

    #[test]
    fn test_coupon_discount_rules() {
        let both = CreateCoupon {
            amount_off: Some(500),
            percent_off: Some(10),
            currency: Some("usd".into()),
            ..Default::default()
        };
        assert!(prepare(&both).is_err());
        assert!(prepare(&CreateCoupon::default()).is_err());

        let no_currency = CreateCoupon {
            amount_off: Some(500),
            ..Default::default()
        };
        assert!(prepare(&no_currency).is_err());

        let fixed = CreateCoupon {
            currency: Some("usd".into()),
            ..no_currency
        };
        assert!(prepare(&fixed).is_ok());
    }

    #[test]
    fn test_coupon_duration_rules() {
        let repeating = CreateCoupon {
            duration: CouponDuration::Repeating,
            percent_off: Some(10),
            ..Default::default()
        };
        assert!(prepare(&repeating).is_err());

        let once_with_months = CreateCoupon {
            duration_in_months: Some(2),
            percent_off: Some(10),
            ..Default::default()
        };
        assert!(prepare(&once_with_months).is_err());
    }

    #[test]
    fn test_update_coupon_sends_metadata_only() {
        let route = prepare(&UpdateCoupon {
            id: "SPRING".into(),
            metadata: [("campaign".to_string(), "2015".to_string())].into(),
        })
        .unwrap();
        assert_eq!(route.path, "coupons/SPRING");
        assert_eq!(
            route.params,
            vec![("metadata[campaign]".to_string(), "2015".to_string())]
        );
    }

    #[test]
    fn test_coupon_decodes_redeem_by() {
        let coupon: Coupon = serde_json::from_str(
            r#"{"id":"SPRING","duration":"forever","percent_off":25,"redeem_by":1400000000,"valid":true}"#,
        )
        .unwrap();
        assert_eq!(coupon.duration, CouponDuration::Forever);
        assert_eq!(coupon.redeem_by.unwrap().timestamp(), 1_400_000_000);
        assert!(coupon.valid);
    }
}
