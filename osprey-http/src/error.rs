//! Transport-level error types.

use osprey::{GatewayError, ValidationError, WireError};
use url::Url;

/// Errors surfaced by [`GatewayClient`](crate::GatewayClient) calls.
///
/// Every failure propagates to the caller; nothing is retried or
/// swallowed. The variants mirror the taxonomy of the SDK: local
/// validation, transport, wire protocol, and gateway-reported business
/// errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The endpoint URL could not be parsed.
    #[error("invalid endpoint URL {url:?}")]
    Endpoint {
        /// The rejected URL text.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// Local argument validation failed, before any network access.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The request timed out at the transport layer.
    #[error("request to {url} timed out")]
    TimedOut {
        /// The endpoint the request was sent to.
        url: Url,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The transport failed below the HTTP layer (DNS, TLS, connection).
    #[error("network error talking to {url}")]
    Network {
        /// The endpoint the request was sent to.
        url: Url,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be read as text.
    #[error("failed to read response body from {url}")]
    BodyRead {
        /// The endpoint the response came from.
        url: Url,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body violated the gateway's wire format.
    #[error("protocol error: {0}")]
    Protocol(#[from] WireError),

    /// The gateway reported a business error.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ClientError {
    /// Returns the gateway error, when the failure was gateway-reported.
    #[must_use]
    pub const fn as_gateway(&self) -> Option<&GatewayError> {
        match self {
            Self::Gateway(err) => Some(err),
            _ => None,
        }
    }
}
