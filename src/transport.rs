//! HTTP transport used by [`GenieClient`](crate::client::GenieClient) to talk to the gateway.
//!
//! The client never performs I/O itself: it describes each call as a [`TransportRequest`]
//! and hands it to a [`Transport`]. The default implementation, [`ReqwestTransport`],
//! is backed by `reqwest` and a small middleware stack. Any other implementation
//! (a test double, a recording proxy, ...) can be plugged in with
//! [`GenieClient::set_transport`](crate::client::GenieClient::set_transport).

use crate::{
    error::TransportError,
    middlewares::{
        error_handling::ErrorHandlingMiddleware, inject_user_agent::InjectUserAgentMiddleware,
    },
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Method, StatusCode, Url,
};
use reqwest_middleware::ClientWithMiddleware;
use reqwest_tracing::TracingMiddleware;
use serde_json::Value;
use std::{
    fmt::{Debug, Formatter},
    time::Duration,
};

/// Timeout applied to every request unless overridden in [`TransportOptions`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A single HTTP exchange, described as plain data.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// JSON body, if any. `GET` requests never carry one.
    pub json: Option<Value>,
}

/// Raw response returned by a [`Transport`].
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Capability to execute one HTTP request and return its response.
///
/// Implementations decide which status codes count as failures. [`ReqwestTransport`]
/// reports every non-2xx response as [`TransportError::Status`].
#[async_trait]
pub trait Transport: Debug + Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Tuning knobs for the default [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct TransportOptions {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    proxy: Option<Url>,
    headers: HeaderMap,
    user_agent: Option<HeaderValue>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            connect_timeout: None,
            proxy: None,
            headers: HeaderMap::new(),
            user_agent: None,
        }
    }
}

impl TransportOptions {
    /// Sets the total request timeout.
    ///
    /// Defaults to 30 seconds. Use `None` to disable it.
    pub fn with_timeout(mut self, timeout: impl Into<Option<Duration>>) -> Self {
        self.timeout = timeout.into();
        self
    }

    /// Sets the timeout for the connect phase only.
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }

    /// Routes all traffic through the given proxy.
    pub fn with_proxy(mut self, proxy: Url) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Adds a header to every outgoing request.
    ///
    /// `Content-Type`, `Accept` and `Authorization` are always set by the client
    /// and take precedence over headers configured here.
    pub fn with_header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Overrides the default `User-Agent` (`geniebiz-connect/<version>`).
    pub fn with_user_agent(mut self, user_agent: HeaderValue) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Default [`Transport`] built on `reqwest`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: ClientWithMiddleware,
}

impl ReqwestTransport {
    /// Builds a new `reqwest` client configured with the given options.
    pub fn new(options: TransportOptions) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().default_headers(options.headers);

        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(connect_timeout) = options.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        if let Some(proxy) = options.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self::with_middlewares(builder.build()?, options.user_agent))
    }

    /// Wraps an already configured `reqwest` client.
    ///
    /// Timeouts and proxies are whatever the given client was built with.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self::with_middlewares(client, None)
    }

    fn with_middlewares(client: reqwest::Client, user_agent: Option<HeaderValue>) -> Self {
        let user_agent_middleware = match user_agent {
            Some(user_agent) => InjectUserAgentMiddleware::with_user_agent(user_agent),
            None => InjectUserAgentMiddleware::new(),
        };

        let client = reqwest_middleware::ClientBuilder::new(client)
            .with(TracingMiddleware::default())
            .with(user_agent_middleware)
            .with(ErrorHandlingMiddleware)
            .build();

        Self { client }
    }
}

impl Debug for ReqwestTransport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(ref json) = request.json {
            let body = serde_json::to_vec(json).map_err(|e| TransportError::Other(e.into()))?;
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse { status, body })
    }
}
