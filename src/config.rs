//! Gateway configuration

use crate::{GatewayError, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1/";

/// Environment variable holding the secret key
pub const ENV_SECRET_KEY: &str = "STRIPE_SECRET_KEY";
/// Environment variable overriding the API base URL
pub const ENV_API_BASE: &str = "STRIPE_API_BASE";
/// Environment variable pinning the API version header
pub const ENV_API_VERSION: &str = "STRIPE_API_VERSION";

/// Immutable settings shared by every call a gateway makes
#[derive(Clone)]
pub struct GatewayConfig {
    /// Secret key, sent as the basic-auth username
    pub api_key: String,
    /// Base URL all resource paths are joined onto
    pub base_url: String,
    /// Per-request timeout; transport default when unset
    pub timeout: Option<Duration>,
    /// Value of the `Stripe-Version` header
    pub api_version: Option<String>,
    /// User agent sent with every request
    pub user_agent: String,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("api_version", &self.api_version)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl GatewayConfig {
    /// Create a config for the given secret key with default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: None,
            api_version: None,
            user_agent: format!("stripe-gateway/{}", crate::VERSION),
        }
    }

    /// Build a config from `STRIPE_SECRET_KEY`, `STRIPE_API_BASE` and
    /// `STRIPE_API_VERSION`
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(ENV_SECRET_KEY)
            .map_err(|_| GatewayError::config(format!("{} must be set", ENV_SECRET_KEY)))?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = env::var(ENV_API_BASE) {
            config = config.with_base_url(base_url);
        }
        if let Ok(version) = env::var(ENV_API_VERSION) {
            config = config.with_api_version(version);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(GatewayError::config("API key cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(GatewayError::config(
                "Base URL must start with http:// or https://",
            ));
        }

        Url::parse(&self.base_url)
            .map_err(|e| GatewayError::config(format!("Invalid base URL: {}", e)))?;

        Ok(())
    }

    /// Parsed base URL, always ending in `/` so relative paths join under it
    pub fn base(&self) -> Result<Url> {
        let mut raw = self.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|e| GatewayError::config(format!("Invalid base URL: {}", e)))
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Pin the API version
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
