//! # stripe-gateway - typed client for the Stripe REST API
//!
//! Each API operation is a plain request type tied at compile time to its
//! HTTP verb, path template and response type. The [`StripeGateway`] turns a
//! request into a form-encoded HTTP call, authenticates it with the secret
//! key, and returns the typed response or a structured [`ApiError`].
//!
//! ```no_run
//! use stripe_gateway::types::{CreateCharge, GetCharge};
//! use stripe_gateway::StripeGateway;
//!
//! # async fn run() -> stripe_gateway::Result<()> {
//! let gateway = StripeGateway::new("sk_test_...")?;
//!
//! let charge = gateway
//!     .post(&CreateCharge {
//!         amount: 100,
//!         currency: "usd".into(),
//!         customer: Some("cus_...".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let same = gateway.get(&GetCharge { id: charge.id }).await?;
//! assert_eq!(same.amount, 100);
//! # Ok(())
//! # }
//! ```
//!
//! ## Blocking calls
//!
//! `get_blocking`, `post_blocking`, `delete_blocking` and `send_blocking`
//! serve synchronous callers. They refuse to run on a thread that is inside
//! a tokio runtime and return [`GatewayError::Config`] instead; async code
//! uses the async methods.

pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod request;
pub mod response;
pub mod route;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use config::GatewayConfig;
pub use error::{ApiError, ErrorKind, GatewayError, Result};
pub use form::StripeDate;
pub use gateway::StripeGateway;
pub use request::{ApiRequest, DeleteRequest, GetRequest, PostRequest};
pub use response::{HasId, ListEnvelope};
pub use route::Verb;

/// Current version of this library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
