//! Request and response shapes for each API resource
//!
//! These are plain data. Each request type is tied to its verb, path and
//! response type with [`api_request!`](crate::api_request); everything else
//! happens in the gateway core.

mod account;
mod card;
mod charge;
mod common;
mod coupon;
mod customer;
mod invoice;
mod plan;
mod subscription;
mod token;

pub use account::*;
pub use card::*;
pub use charge::*;
pub use common::*;
pub use coupon::*;
pub use customer::*;
pub use invoice::*;
pub use plan::*;
pub use subscription::*;
pub use token::*;

use crate::response::HasId;

macro_rules! impl_has_id {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl HasId for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

impl_has_id!(
    Account,
    Card,
    Charge,
    Coupon,
    Customer,
    Invoice,
    InvoiceLineItem,
    Plan,
    Refund,
    Subscription,
);
