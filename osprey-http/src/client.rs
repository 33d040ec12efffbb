//! Asynchronous client for the gateway's form-encoded API.
//!
//! [`GatewayClient`] owns the connection-level concerns of a merchant
//! integration: the endpoint URL, the merchant credentials, and a reused
//! `reqwest` connection pool. Each call is one HTTPS POST with a
//! form-encoded parameter set; the response is decoded from the gateway's
//! line-oriented format and either returned as a success mapping or
//! classified into the SDK's error taxonomy.
//!
//! ## Contract
//!
//! - Credentials are injected into every request, overwriting any
//!   caller-supplied `apiToken` / `merchantId`.
//! - Transport failures are distinguished into timeout and network kinds
//!   and never retried; retry policy belongs to the caller.
//! - A call succeeds only when the HTTP status is `200 OK` **and** the
//!   decoded `ERROR_MESSAGE` field equals the success token; anything
//!   else fails with a classified error.
//! - The [`LastExchange`] snapshot is overwritten on every call,
//!   including failed ones, before the call returns.

use http::StatusCode;
use osprey::ops::Operation;
use osprey::params::{API_TOKEN, MERCHANT_ID};
use osprey::{DecodedResponse, GatewayError, RequestParameters, ValidationError, wire};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use url::Url;

use crate::diagnostics::LastExchange;
use crate::error::ClientError;

/// `User-Agent` sent with every request, identifying the SDK and version.
pub const USER_AGENT: &str = concat!("osprey-http/", env!("CARGO_PKG_VERSION"));

/// Client for the Osprey payment gateway.
///
/// Cloning is cheap and clones share the underlying connection pool and
/// [`LastExchange`] snapshot; they are the same logical client. For an
/// independent snapshot, construct a second client.
#[derive(Clone)]
pub struct GatewayClient {
    /// Gateway endpoint. Immutable after construction.
    endpoint: Url,
    /// Merchant API token, injected into every request.
    api_token: String,
    /// Merchant identifier, injected into every request.
    merchant_id: String,
    /// Shared reqwest HTTP client.
    client: reqwest::Client,
    /// Optional per-request timeout.
    timeout: Option<Duration>,
    /// Log exchanges at `info` instead of `debug`.
    verbose: bool,
    /// Most recent exchange snapshot.
    last_exchange: Arc<Mutex<Option<LastExchange>>>,
}

impl fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("merchant_id", &self.merchant_id)
            .field("api_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl GatewayClient {
    /// Creates a client for the given endpoint and merchant credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingApiToken`] /
    /// [`ValidationError::MissingMerchantId`] when a credential is empty.
    pub fn new(
        endpoint: Url,
        api_token: impl Into<String>,
        merchant_id: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(ValidationError::MissingApiToken.into());
        }
        let merchant_id = merchant_id.into();
        if merchant_id.trim().is_empty() {
            return Err(ValidationError::MissingMerchantId.into());
        }
        Ok(Self {
            endpoint,
            api_token,
            merchant_id,
            client: reqwest::Client::new(),
            timeout: None,
            verbose: false,
            last_exchange: Arc::new(Mutex::new(None)),
        })
    }

    /// Parses `endpoint` and creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Endpoint`] when the URL does not parse, or
    /// a validation error when a credential is empty.
    pub fn from_endpoint(
        endpoint: &str,
        api_token: impl Into<String>,
        merchant_id: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let url = Url::parse(endpoint).map_err(|source| ClientError::Endpoint {
            url: endpoint.to_owned(),
            source,
        })?;
        Self::new(url, api_token, merchant_id)
    }

    /// Sets a timeout applied to each request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Logs request/response events at `info` level instead of `debug`.
    ///
    /// Affects only log verbosity, never call behavior.
    #[must_use]
    pub const fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns the configured endpoint.
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the merchant identifier.
    #[must_use]
    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Returns the configured per-request timeout, if any.
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns a snapshot of the most recent exchange, if any call has
    /// been made. Overwritten by every call, including failed ones.
    pub async fn last_exchange(&self) -> Option<LastExchange> {
        self.last_exchange.lock().await.clone()
    }

    /// Validates and submits a typed operation.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on validation, transport, protocol, or
    /// gateway failure.
    pub async fn submit<O: Operation>(&self, operation: O) -> Result<DecodedResponse, ClientError> {
        self.execute(operation.into_params()?).await
    }

    /// Executes one gateway call with the given parameter set.
    ///
    /// Injects the merchant credentials (overwriting any caller-supplied
    /// `apiToken` / `merchantId`), performs exactly one network round
    /// trip, and records the [`LastExchange`] snapshot before returning.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, protocol, or gateway failure.
    pub async fn execute(
        &self,
        mut params: RequestParameters,
    ) -> Result<DecodedResponse, ClientError> {
        params.insert(API_TOKEN, self.api_token.as_str());
        params.insert(MERCHANT_ID, self.merchant_id.as_str());
        self.log_request(&params);

        let start = Instant::now();
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .form(&params);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => {
                let err = if source.is_timeout() {
                    ClientError::TimedOut {
                        url: self.endpoint.clone(),
                        source,
                    }
                } else {
                    ClientError::Network {
                        url: self.endpoint.clone(),
                        source,
                    }
                };
                tracing::error!(error = %err, "gateway transport failed");
                self.record(params, None, None, None, start.elapsed()).await;
                return Err(err);
            }
        };

        let status = response.status();
        // Best-effort diagnostic; absence never fails the call.
        let peer_addr = response.remote_addr();
        let raw_body = match response.text().await {
            Ok(body) => body,
            Err(source) => {
                let err = ClientError::BodyRead {
                    url: self.endpoint.clone(),
                    source,
                };
                tracing::error!(error = %err, "gateway transport failed");
                self.record(params, None, peer_addr, None, start.elapsed())
                    .await;
                return Err(err);
            }
        };
        let elapsed = start.elapsed();
        self.log_response(status, elapsed, &raw_body);

        let decoded = match wire::decode(&raw_body) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::error!(error = %err, "gateway response violated the wire format");
                self.record(params, Some(raw_body), peer_addr, None, elapsed)
                    .await;
                return Err(err.into());
            }
        };

        let succeeded = status == StatusCode::OK && decoded.is_success();
        self.record(
            params,
            Some(raw_body),
            peer_addr,
            Some(decoded.clone()),
            elapsed,
        )
        .await;

        if succeeded {
            Ok(decoded)
        } else {
            let err = GatewayError::classify(&decoded);
            tracing::warn!(code = err.code(), %status, "gateway call failed");
            Err(err.into())
        }
    }

    async fn record(
        &self,
        request: RequestParameters,
        raw_body: Option<String>,
        peer_addr: Option<std::net::SocketAddr>,
        decoded: Option<DecodedResponse>,
        elapsed: Duration,
    ) {
        *self.last_exchange.lock().await = Some(LastExchange {
            request,
            raw_body,
            peer_addr,
            decoded,
            elapsed,
        });
    }

    fn log_request(&self, params: &RequestParameters) {
        if self.verbose {
            tracing::info!(endpoint = %self.endpoint, ?params, "gateway request");
        } else {
            tracing::debug!(endpoint = %self.endpoint, ?params, "gateway request");
        }
    }

    fn log_response(&self, status: StatusCode, elapsed: Duration, body: &str) {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if self.verbose {
            tracing::info!(%status, elapsed_ms, body, "gateway response");
        } else {
            tracing::debug!(%status, elapsed_ms, body, "gateway response");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osprey::{ParamValue, WireError};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GatewayClient {
        GatewayClient::from_endpoint(&server.uri(), "token-1", "M123").unwrap()
    }

    async fn mount_response(server: &MockServer, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    #[test]
    fn construction_requires_credentials() {
        let err = GatewayClient::from_endpoint("http://localhost/", "", "M123").unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::MissingApiToken)
        ));

        let err = GatewayClient::from_endpoint("http://localhost/", "token-1", " ").unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::MissingMerchantId)
        ));
    }

    #[test]
    fn construction_rejects_unparseable_endpoints() {
        let err = GatewayClient::from_endpoint("not a url", "token-1", "M123").unwrap_err();
        assert!(matches!(err, ClientError::Endpoint { .. }));
    }

    #[test]
    fn debug_redacts_the_api_token() {
        let client =
            GatewayClient::from_endpoint("http://localhost/", "secret-token", "M123").unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("M123"));
    }

    #[tokio::test]
    async fn execute_injects_and_overwrites_credentials() {
        let server = MockServer::start().await;
        mount_response(&server, 200, "ERROR_MESSAGE=SUCCESS\n").await;
        let client = client_for(&server);

        let mut params = RequestParameters::new("void");
        params.insert(API_TOKEN, "caller-supplied");
        params.insert(MERCHANT_ID, "caller-supplied");
        client.execute(params).await.unwrap();

        let exchange = client.last_exchange().await.unwrap();
        assert_eq!(
            exchange.request.get(API_TOKEN),
            Some(&ParamValue::from("token-1"))
        );
        assert_eq!(
            exchange.request.get(MERCHANT_ID),
            Some(&ParamValue::from("M123"))
        );
    }

    #[tokio::test]
    async fn gateway_error_is_classified() {
        let server = MockServer::start().await;
        mount_response(
            &server,
            200,
            "ERROR_MESSAGE=C005_DECLINED\nDEBUG_MESSAGE=Do not honour\n",
        )
        .await;
        let client = client_for(&server);

        let err = client
            .execute(RequestParameters::new("singlePurchase"))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_gateway(),
            Some(&GatewayError::Declined("Do not honour".to_owned()))
        );
    }

    #[tokio::test]
    async fn non_ok_status_fails_even_with_success_body() {
        let server = MockServer::start().await;
        mount_response(&server, 500, "ERROR_MESSAGE=SUCCESS\n").await;
        let client = client_for(&server);

        let err = client
            .execute(RequestParameters::new("void"))
            .await
            .unwrap_err();
        match err {
            ClientError::Gateway(GatewayError::Generic { code, .. }) => {
                assert_eq!(code, "SUCCESS");
            }
            other => panic!("expected a classified gateway error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_protocol_error() {
        let server = MockServer::start().await;
        mount_response(&server, 200, "garbage").await;
        let client = client_for(&server);

        let err = client
            .execute(RequestParameters::new("void"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Protocol(WireError::MissingSeparator { index: 0, .. })
        ));

        // The snapshot still captures the raw body for diagnostics.
        let exchange = client.last_exchange().await.unwrap();
        assert_eq!(exchange.raw_body.as_deref(), Some("garbage"));
        assert!(exchange.decoded.is_none());
    }

    #[tokio::test]
    async fn last_exchange_is_overwritten_by_failed_calls() {
        let server = MockServer::start().await;
        mount_response(&server, 200, "ERROR_MESSAGE=SUCCESS\nTRANSACTIONID=1\n").await;
        let client = client_for(&server);
        client
            .execute(RequestParameters::new("singlePurchase"))
            .await
            .unwrap();

        server.reset().await;
        mount_response(&server, 200, "ERROR_MESSAGE=C005_DECLINED\nDEBUG_MESSAGE=no\n").await;
        let _ = client
            .execute(RequestParameters::new("singlePurchase"))
            .await
            .unwrap_err();

        let exchange = client.last_exchange().await.unwrap();
        let decoded = exchange.decoded.unwrap();
        assert_eq!(decoded.status(), Some("C005_DECLINED"));
    }

    #[tokio::test]
    async fn connection_failure_is_a_network_error_and_still_recorded() {
        // Discard port; nothing listens there.
        let client = GatewayClient::from_endpoint("http://127.0.0.1:9/", "token-1", "M123")
            .unwrap()
            .with_timeout(Duration::from_secs(2));

        let err = client
            .execute(RequestParameters::new("void"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Network { .. }));

        let exchange = client.last_exchange().await.unwrap();
        assert!(exchange.raw_body.is_none());
        assert!(exchange.decoded.is_none());
        assert_eq!(
            exchange.request.get(API_TOKEN),
            Some(&ParamValue::from("token-1"))
        );
    }

    #[tokio::test]
    async fn slow_response_is_a_timeout_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("ERROR_MESSAGE=SUCCESS\n")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;
        let client = client_for(&server).with_timeout(Duration::from_millis(50));

        let err = client
            .execute(RequestParameters::new("void"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::TimedOut { .. }));
    }

    #[tokio::test]
    async fn identical_calls_issue_independent_round_trips() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ERROR_MESSAGE=SUCCESS\n"))
            .expect(2)
            .mount(&server)
            .await;
        let client = client_for(&server);

        client
            .execute(RequestParameters::new("void"))
            .await
            .unwrap();
        client
            .execute(RequestParameters::new("void"))
            .await
            .unwrap();
    }
}
