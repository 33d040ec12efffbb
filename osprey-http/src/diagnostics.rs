//! Per-call diagnostic snapshot.

use osprey::{DecodedResponse, RequestParameters};
use std::net::SocketAddr;
use std::time::Duration;

/// Snapshot of a client's most recent request/response exchange.
///
/// Exactly one snapshot exists per client; every call overwrites it,
/// including calls that fail in transport. It is a diagnostic aid, not a
/// history log. Fields that a failed exchange never produced (a response
/// body on a connection error, say) are `None`.
#[derive(Debug, Clone)]
pub struct LastExchange {
    /// The parameter set actually sent, credentials included.
    pub request: RequestParameters,
    /// Raw response body, when one was received.
    pub raw_body: Option<String>,
    /// Remote peer address, when the transport exposed one. Best-effort:
    /// absence never fails a call.
    pub peer_addr: Option<SocketAddr>,
    /// Decoded response, when the body parsed cleanly.
    pub decoded: Option<DecodedResponse>,
    /// Wall-clock duration of the exchange.
    pub elapsed: Duration,
}
