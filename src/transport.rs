//! HTTP execution, async and blocking
//!
//! Both paths take the same [`PreparedCall`] and the same header set and
//! return the same [`RawResponse`]; only the client driving the socket
//! differs. Nothing here retries.

use crate::config::GatewayConfig;
use crate::route::{ResolvedRoute, Verb};
use crate::{GatewayError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::StatusCode;
use url::Url;

/// Content type of every request body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Header pinning the API version
pub const API_VERSION_HEADER: &str = "stripe-version";

/// A fully resolved call: everything the transport needs, nothing more
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCall {
    pub verb: Verb,
    pub url: Url,
    /// Form body; present only for verbs that send one
    pub body: Option<String>,
}

impl PreparedCall {
    /// Place a resolved route under the API base
    pub fn new(route: &ResolvedRoute, base: &Url) -> Result<Self> {
        Ok(Self {
            verb: route.verb,
            url: route.url(base)?,
            body: route.body(),
        })
    }
}

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// `Authorization` value for HTTP basic auth: the key as username, no password
pub fn basic_auth_value(api_key: &str) -> Result<HeaderValue> {
    let token = STANDARD.encode(format!("{}:", api_key));
    let mut value = HeaderValue::from_str(&format!("Basic {}", token))
        .map_err(|e| GatewayError::config(format!("Invalid API key: {}", e)))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Headers attached to every call made with `config`
pub fn default_headers(config: &GatewayConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, basic_auth_value(&config.api_key)?);

    if let Some(version) = &config.api_version {
        let value = HeaderValue::from_str(version)
            .map_err(|e| GatewayError::config(format!("Invalid API version: {}", e)))?;
        headers.insert(HeaderName::from_static(API_VERSION_HEADER), value);
    }

    Ok(headers)
}

/// Build the async client for `config`
pub fn build_client(config: &GatewayConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| GatewayError::config(format!("Failed to create HTTP client: {}", e)))
}

/// Build the blocking client for `config`.
///
/// Must not be called from inside an async runtime.
pub fn build_blocking_client(config: &GatewayConfig) -> Result<reqwest::blocking::Client> {
    let mut builder = reqwest::blocking::Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| GatewayError::config(format!("Failed to create HTTP client: {}", e)))
}

/// Execute a call on the async client
pub async fn execute(
    client: &reqwest::Client,
    headers: &HeaderMap,
    call: &PreparedCall,
) -> Result<RawResponse> {
    let mut request = client
        .request(call.verb.method(), call.url.clone())
        .headers(headers.clone());

    if let Some(body) = &call.body {
        request = request
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body.clone());
    }

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    Ok(RawResponse { status, body })
}

/// Execute a call on the blocking client
pub fn execute_blocking(
    client: &reqwest::blocking::Client,
    headers: &HeaderMap,
    call: &PreparedCall,
) -> Result<RawResponse> {
    let mut request = client
        .request(call.verb.method(), call.url.clone())
        .headers(headers.clone());

    if let Some(body) = &call.body {
        request = request
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body.clone());
    }

    let response = request.send()?;
    let status = response.status();
    let body = response.text()?;

    Ok(RawResponse { status, body })
}
