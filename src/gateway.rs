//! Gateway facade: the single authenticated entry point
//!
//! Every call runs the same pipeline: validate, encode and route the request
//! (pure), execute it (the only blocking or suspending step), then
//! materialize the typed response or translate the remote error. The async
//! and blocking entry points differ only in which client executes the call.

use crate::config::GatewayConfig;
use crate::request::{self, ApiRequest, DeleteRequest, GetRequest, PostRequest};
use crate::response::materialize;
use crate::transport::{self, PreparedCall, RawResponse};
use crate::{GatewayError, Result};
use http::HeaderMap;
use serde::de::DeserializeOwned;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};
use url::Url;

/// Typed gateway to the Stripe API.
///
/// Holds only immutable state, so one instance (or its clones) can serve any
/// number of concurrent callers.
#[derive(Clone)]
pub struct StripeGateway {
    config: Arc<GatewayConfig>,
    base: Url,
    headers: HeaderMap,
    client: reqwest::Client,
    /// Built on first blocking call and shared by clones
    blocking: Arc<OnceLock<reqwest::blocking::Client>>,
}

impl std::fmt::Debug for StripeGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeGateway")
            .field("config", &self.config)
            .field("base", &self.base.as_str())
            .finish()
    }
}

impl StripeGateway {
    /// Create a gateway for the given secret key with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GatewayConfig::new(api_key))
    }

    /// Create a gateway from an explicit configuration
    pub fn with_config(config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let base = config.base()?;
        let headers = transport::default_headers(&config)?;
        let client = transport::build_client(&config)?;

        Ok(Self {
            config: Arc::new(config),
            base,
            headers,
            client,
            blocking: Arc::new(OnceLock::new()),
        })
    }

    /// Create a gateway configured from the environment
    pub fn from_env() -> Result<Self> {
        Self::with_config(GatewayConfig::from_env()?)
    }

    /// The configuration this gateway was built with
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Resolve a request into the call that would be sent, without sending it
    pub fn prepare<R: ApiRequest>(&self, request: &R) -> Result<PreparedCall> {
        let route = request::prepare(request)?;
        PreparedCall::new(&route, &self.base)
    }

    /// Send any request with its declared verb
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response> {
        let call = self.prepare(request)?;
        debug!(verb = %call.verb, path = call.url.path(), "Dispatching request");

        let outcome = transport::execute(&self.client, &self.headers, &call).await;
        finish(&call, outcome)
    }

    /// Blocking form of [`send`](Self::send).
    ///
    /// Returns [`GatewayError::Config`] when called from inside a tokio
    /// runtime (including `spawn_blocking` threads); use the async methods
    /// there.
    pub fn send_blocking<R: ApiRequest>(&self, request: &R) -> Result<R::Response> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(GatewayError::config(
                "blocking calls cannot run inside an async runtime; use the async methods",
            ));
        }

        let call = self.prepare(request)?;
        debug!(verb = %call.verb, path = call.url.path(), "Dispatching blocking request");

        let client = self.blocking_client()?;
        let outcome = transport::execute_blocking(client, &self.headers, &call);
        finish(&call, outcome)
    }

    /// Fetch a resource or collection
    pub async fn get<R: GetRequest>(&self, request: &R) -> Result<R::Response> {
        self.send(request).await
    }

    /// Create or update a resource, or trigger an action on it
    pub async fn post<R: PostRequest>(&self, request: &R) -> Result<R::Response> {
        self.send(request).await
    }

    /// Delete or cancel a resource
    pub async fn delete<R: DeleteRequest>(&self, request: &R) -> Result<R::Response> {
        self.send(request).await
    }

    /// Blocking form of [`get`](Self::get)
    pub fn get_blocking<R: GetRequest>(&self, request: &R) -> Result<R::Response> {
        self.send_blocking(request)
    }

    /// Blocking form of [`post`](Self::post)
    pub fn post_blocking<R: PostRequest>(&self, request: &R) -> Result<R::Response> {
        self.send_blocking(request)
    }

    /// Blocking form of [`delete`](Self::delete)
    pub fn delete_blocking<R: DeleteRequest>(&self, request: &R) -> Result<R::Response> {
        self.send_blocking(request)
    }

    fn blocking_client(&self) -> Result<&reqwest::blocking::Client> {
        if let Some(client) = self.blocking.get() {
            return Ok(client);
        }
        let client = transport::build_blocking_client(&self.config)?;
        Ok(self.blocking.get_or_init(|| client))
    }
}

fn finish<T: DeserializeOwned>(call: &PreparedCall, outcome: Result<RawResponse>) -> Result<T> {
    let raw = match outcome {
        Ok(raw) => raw,
        Err(err) => {
            warn!(verb = %call.verb, path = call.url.path(), error = %err, "Transport failure");
            return Err(err);
        }
    };

    if !raw.is_success() {
        warn!(
            verb = %call.verb,
            path = call.url.path(),
            status = raw.status.as_u16(),
            "Request rejected"
        );
    }

    materialize(raw)
}
