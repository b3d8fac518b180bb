//! Request declarations
//!
//! Every request type states, at compile time, its verb, its path template
//! and the response type it produces. The [`api_request!`](crate::api_request)
//! macro writes that association in one line:
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use stripe_gateway::api_request;
//!
//! #[derive(Serialize)]
//! pub struct GetWidget {
//!     pub id: String,
//! }
//!
//! #[derive(Deserialize)]
//! pub struct Widget {
//!     pub id: String,
//! }
//!
//! api_request!(GetWidget => Widget, GET "widgets/{id}");
//! ```

use crate::form::{self, FormFields};
use crate::route::{self, ResolvedRoute, Verb};
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A typed request with a statically associated response type
pub trait ApiRequest: Serialize {
    /// What a successful call returns
    type Response: DeserializeOwned;

    /// Verb the request is always sent with
    const VERB: Verb;

    /// Path template relative to the API base
    const PATH: &'static str;

    /// Local checks run before anything is encoded or sent
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Requests sent with GET
pub trait GetRequest: ApiRequest {}

/// Requests sent with POST
pub trait PostRequest: ApiRequest {}

/// Requests sent with DELETE
pub trait DeleteRequest: ApiRequest {}

/// Validate, encode and route a request. Pure: performs no I/O.
pub fn prepare<R: ApiRequest>(request: &R) -> Result<ResolvedRoute> {
    request.validate()?;
    let fields: FormFields = form::encode(request)?;
    route::resolve(R::PATH, R::VERB, fields)
}

/// Declare the verb, path and response type of a request type.
///
/// A trailing method name routes [`ApiRequest::validate`] to an inherent
/// method of the request: `api_request!(A => B, POST "a", check);`
#[macro_export]
macro_rules! api_request {
    ($req:ty => $resp:ty, GET $path:literal $(, $check:ident)?) => {
        $crate::api_request!(@impl $req, $resp, Get, GetRequest, $path $(, $check)?);
    };
    ($req:ty => $resp:ty, POST $path:literal $(, $check:ident)?) => {
        $crate::api_request!(@impl $req, $resp, Post, PostRequest, $path $(, $check)?);
    };
    ($req:ty => $resp:ty, DELETE $path:literal $(, $check:ident)?) => {
        $crate::api_request!(@impl $req, $resp, Delete, DeleteRequest, $path $(, $check)?);
    };
    (@impl $req:ty, $resp:ty, $verb:ident, $marker:ident, $path:literal) => {
        impl $crate::request::ApiRequest for $req {
            type Response = $resp;
            const VERB: $crate::route::Verb = $crate::route::Verb::$verb;
            const PATH: &'static str = $path;
        }

        impl $crate::request::$marker for $req {}
    };
    (@impl $req:ty, $resp:ty, $verb:ident, $marker:ident, $path:literal, $check:ident) => {
        impl $crate::request::ApiRequest for $req {
            type Response = $resp;
            const VERB: $crate::route::Verb = $crate::route::Verb::$verb;
            const PATH: &'static str = $path;

            fn validate(&self) -> $crate::Result<()> {
                self.$check()
            }
        }

        impl $crate::request::$marker for $req {}
    };
}
