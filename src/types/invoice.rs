//! Invoices and their line items
//!
//! `invoices`, `invoices/{id}`, `invoices/{id}/pay`, `invoices/upcoming`

use super::common::{list_or_vec, Metadata, Pagination};
use super::plan::Plan;
use crate::response::ListEnvelope;
use crate::GatewayError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Billing period covered by a line item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Period {
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub start: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub end: Option<DateTime<Utc>>,
}

/// One line of an invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceLineItem {
    pub id: String,
    pub object: Option<String>,
    /// `subscription` or `invoiceitem`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: i64,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub proration: bool,
    pub quantity: Option<u32>,
    pub period: Period,
    pub plan: Option<Plan>,
    pub metadata: Metadata,
}

/// An invoice as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    /// Empty for an upcoming invoice, which is not stored yet
    pub id: String,
    pub object: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub date: Option<DateTime<Utc>>,
    pub livemode: bool,
    pub customer: Option<String>,
    pub subscription: Option<String>,
    pub charge: Option<String>,
    pub currency: Option<String>,
    pub subtotal: i64,
    pub total: i64,
    pub amount_due: i64,
    pub starting_balance: i64,
    pub ending_balance: Option<i64>,
    pub attempted: bool,
    pub attempt_count: u32,
    pub closed: bool,
    pub paid: bool,
    pub forgiven: bool,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub period_start: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub period_end: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub next_payment_attempt: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "list_or_vec")]
    pub lines: ListEnvelope<InvoiceLineItem>,
    pub description: Option<String>,
    pub statement_description: Option<String>,
    pub metadata: Metadata,
}

/// Invoice a customer's pending invoice items now
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateInvoice {
    pub customer: String,
    pub subscription: Option<String>,
    pub application_fee: Option<i64>,
    pub description: Option<String>,
    pub statement_description: Option<String>,
    pub metadata: Metadata,
}

impl CreateInvoice {
    fn check(&self) -> crate::Result<()> {
        if self.customer.trim().is_empty() {
            return Err(GatewayError::validation("customer is required"));
        }
        Ok(())
    }
}

/// Fetch an invoice
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetInvoice {
    pub id: String,
}

/// Attempt payment of an open invoice now
#[derive(Debug, Clone, Default, Serialize)]
pub struct PayInvoice {
    pub id: String,
}

/// List invoices, optionally for one customer
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetInvoices {
    pub customer: Option<String>,
    #[serde(flatten)]
    pub page: Pagination,
}

impl GetInvoices {
    fn check(&self) -> crate::Result<()> {
        self.page.check()
    }
}

/// Preview the next invoice of a customer
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetUpcomingInvoice {
    pub customer: String,
    pub subscription: Option<String>,
}

impl GetUpcomingInvoice {
    fn check(&self) -> crate::Result<()> {
        if self.customer.trim().is_empty() {
            return Err(GatewayError::validation("customer is required"));
        }
        Ok(())
    }
}

crate::api_request!(CreateInvoice => Invoice, POST "invoices", check);
crate::api_request!(GetInvoice => Invoice, GET "invoices/{id}");
crate::api_request!(PayInvoice => Invoice, POST "invoices/{id}/pay");
crate::api_request!(GetInvoices => ListEnvelope<Invoice>, GET "invoices", check);
crate::api_request!(GetUpcomingInvoice => Invoice, GET "invoices/upcoming", check);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::prepare;
    use crate::route::Verb;

    #[test]
    fn test_upcoming_invoice_is_get_with_customer_query() {
        let route = prepare(&GetUpcomingInvoice {
            customer: "cus_1".into(),
            subscription: None,
        })
        .unwrap();

        assert_eq!(route.verb, Verb::Get);
        assert_eq!(route.path, "invoices/upcoming");
        assert_eq!(route.params, vec![("customer".to_string(), "cus_1".to_string())]);

        assert!(prepare(&GetUpcomingInvoice::default()).is_err());
    }

    #[test]
    fn test_pay_invoice_route() {
        let route = prepare(&PayInvoice { id: "in_1".into() }).unwrap();
        assert_eq!(route.verb, Verb::Post);
        assert_eq!(route.path, "invoices/in_1/pay");
        assert_eq!(route.body().as_deref(), Some(""));
    }

    #[test]
    fn test_invoice_decodes_lines() {
        let invoice: Invoice = serde_json::from_str(
            r#"{
                "id": "in_1", "object": "invoice", "customer": "cus_1", "date": 1400000000,
                "paid": true, "closed": true, "amount_due": 2000, "total": 2000, "subtotal": 2000,
                "lines": {
                    "object": "list", "count": 1, "has_more": false,
                    "data": [{
                        "id": "sub_1", "type": "subscription", "amount": 2000, "currency": "usd",
                        "period": {"start": 1400000000, "end": 1402592000},
                        "plan": {"id": "gold", "amount": 2000, "interval": "month"}
                    }]
                }
            }"#,
        )
        .unwrap();

        assert!(invoice.paid);
        assert_eq!(invoice.lines.total_count, Some(1));
        let line = &invoice.lines.data[0];
        assert_eq!(line.kind.as_deref(), Some("subscription"));
        assert_eq!(line.period.end.unwrap().timestamp(), 1_402_592_000);
        assert_eq!(line.plan.as_ref().unwrap().id, "gold");
    }
}
