//! Error types for the Stripe gateway
//!
//! Every failure reaches the caller as one of three kinds:
//!
//! - **local** ([`GatewayError::Validation`], [`GatewayError::MissingPathParameter`],
//!   [`GatewayError::Config`]): raised before any network call
//! - **transport** ([`GatewayError::Transport`]): no response was obtained
//! - **remote** ([`GatewayError::Api`]): the API answered with a non-2xx status
//!
//! Remote rejections carry an [`ApiError`] built by [`translate`] from the
//! API's error envelope.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Longest slice of an unparseable error body kept on the [`ApiError`]
const BODY_PREVIEW_LIMIT: usize = 512;

/// Main error type for gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Request value failed local validation
    #[error("Invalid request: {message}")]
    Validation { message: String },

    /// Path template placeholder had no matching field
    #[error("Missing path parameter '{name}' for route {template}")]
    MissingPathParameter { name: String, template: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// No HTTP response was obtained (connect, DNS, timeout, reset)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API rejected the request with a non-2xx status
    #[error("{0}")]
    Api(ApiError),

    /// A 2xx body did not match the expected response type
    #[error("Failed to decode {status} response: {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    /// Request value could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GatewayError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing path parameter error
    pub fn missing_path_parameter(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self::MissingPathParameter {
            name: name.into(),
            template: template.into(),
        }
    }

    /// HTTP status of the response, when one was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(err) => Some(err.status),
            Self::Decode { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// The structured remote error, if this is a remote rejection
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the API answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(err) if err.status == StatusCode::NOT_FOUND)
    }

    /// Whether no response was obtained at all
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether the failure was raised locally before any network call
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::MissingPathParameter { .. }
                | Self::Config { .. }
                | Self::Serialization(_)
        )
    }
}

/// Category of a remote error, as reported in the envelope's `type` field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ApiError,
    ApiConnectionError,
    AuthenticationError,
    CardError,
    IdempotencyError,
    InvalidRequestError,
    RateLimitError,
    /// Category missing or not recognised
    #[default]
    #[serde(other)]
    Unknown,
}

impl ErrorKind {
    /// Wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ApiError => "api_error",
            ErrorKind::ApiConnectionError => "api_connection_error",
            ErrorKind::AuthenticationError => "authentication_error",
            ErrorKind::CardError => "card_error",
            ErrorKind::IdempotencyError => "idempotency_error",
            ErrorKind::InvalidRequestError => "invalid_request_error",
            ErrorKind::RateLimitError => "rate_limit_error",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote error envelope: `{"error": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Body of the remote error envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type", default)]
    pub kind: ErrorKind,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
    #[serde(default)]
    pub decline_code: Option<String>,
    #[serde(default)]
    pub charge: Option<String>,
}

/// A remote rejection: HTTP status plus the remote error taxonomy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status of the response
    pub status: StatusCode,
    /// Remote error category
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
    /// Application error code (e.g. `resource_missing`, `card_declined`)
    pub code: Option<String>,
    /// Offending request field
    pub param: Option<String>,
    /// Issuer decline reason for card errors
    pub decline_code: Option<String>,
    /// Charge the error relates to
    pub charge: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "API error {} ({}): {}",
            self.status.as_u16(),
            self.kind,
            self.message
        )?;
        if let Some(param) = &self.param {
            write!(f, " [param: {}]", param)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for GatewayError {
    fn from(err: ApiError) -> Self {
        GatewayError::Api(err)
    }
}

/// Turn a non-2xx status and its raw body into a [`GatewayError::Api`].
///
/// Never fails: a body that is not an error envelope still yields an
/// `ApiError` with the status set and a generic message.
pub fn translate(status: StatusCode, body: &str) -> GatewayError {
    let error = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let ErrorBody {
                kind,
                message,
                code,
                param,
                decline_code,
                charge,
            } = envelope.error;
            ApiError {
                status,
                kind,
                message: message.unwrap_or_else(|| generic_message(status)),
                code,
                param,
                decline_code,
                charge,
            }
        }
        Err(_) => ApiError {
            status,
            kind: ErrorKind::Unknown,
            message: unparsed_message(status, body),
            code: None,
            param: None,
            decline_code: None,
            charge: None,
        },
    };
    GatewayError::Api(error)
}

fn generic_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}

fn unparsed_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return generic_message(status);
    }
    let preview: String = body.chars().take(BODY_PREVIEW_LIMIT).collect();
    format!("{}: {}", generic_message(status), preview)
}
