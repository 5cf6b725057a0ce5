//! Typed error hierarchy for the ninjarmm crate.
//!
//! Every failure a caller can observe is one `RmmError` variant, and each
//! variant corresponds to one stage of a call:
//!
//! - credential lookup and the OAuth2 token exchange (`AuthConfig`,
//!   `AuthHttp`, `AuthResponse`);
//! - the dispatcher's own stages (`DispatchAuth`, `PayloadEncode`,
//!   `QueryEncode`, `Transport`, `Api`, `ResponseDecode`);
//! - argument checks done by resource functions before any request is
//!   sent (`InvalidInput`).
//!
//! Nothing here is fatal. All variants are ordinary return values and the
//! retry/abort decision stays with the caller.

use reqwest::StatusCode;

/// Unified error type for all ninjarmm library operations.
///
/// The `#[source]` attribute on inner errors enables `Error::source()`
/// chaining, so a log line can print the full cause chain.
#[derive(Debug, thiserror::Error)]
pub enum RmmError {
    /// No client ID / secret available for the token exchange: none were
    /// passed in and none are remembered from an earlier login.
    #[error("authentication not configured: {0}")]
    AuthConfig(String),

    /// The token endpoint answered with something other than `200 OK`.
    ///
    /// `body` is the raw response text; NinjaOne puts the OAuth error code
    /// (`invalid_client`, `invalid_scope`, ...) there.
    #[error("token request failed with status {status}: {body}")]
    AuthHttp {
        /// Status returned by `/ws/oauth/token`.
        status: StatusCode,
        /// Raw response body, empty if it could not be read.
        body: String,
    },

    /// The token endpoint answered `200 OK` but the payload is unusable:
    /// not JSON, empty `access_token`, or zero `expires_in`.
    #[error("invalid token response: {message}")]
    AuthResponse {
        /// What was wrong with the payload.
        message: String,
        /// Decode error, when the body was not valid JSON.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authentication failed while preparing an API call. The inner error
    /// is one of the `Auth*` variants (or a transport failure while talking
    /// to the token endpoint).
    #[error("not authenticated: {0}")]
    DispatchAuth(#[source] Box<RmmError>),

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    PayloadEncode(#[source] serde_json::Error),

    /// An options record could not be encoded as a query string.
    #[error("failed to encode query string: {0}")]
    QueryEncode(#[from] serde_urlencoded::ser::Error),

    /// Network-level failure: DNS, TCP, TLS, the one-minute timeout, or a
    /// failure while reading a response body.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a status outside `200..=299`.
    #[error("API error {status}: {body}")]
    Api {
        /// The HTTP status code returned by the API.
        status: StatusCode,
        /// The raw response body text.
        body: String,
    },

    /// A 2xx response body did not match the expected JSON shape.
    #[error("failed to decode response body: {0}")]
    ResponseDecode(#[source] serde_json::Error),

    /// A resource function rejected its arguments before sending anything
    /// (e.g. an update without an ID).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl RmmError {
    /// Returns the HTTP status carried by `Api` and `AuthHttp`, looking
    /// through `DispatchAuth`.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RmmError::Api { status, .. } | RmmError::AuthHttp { status, .. } => Some(*status),
            RmmError::DispatchAuth(inner) => inner.status(),
            RmmError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, RmmError>;
