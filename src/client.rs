//! Module containing the main Genie API client.

use crate::{
    apis::{transactions::TransactionsApi, GenieClientInner},
    common::{PRODUCTION_URL, SANDBOX_URL},
    error::Error,
    pagination::Pagination,
    transport::{ReqwestTransport, Transport, TransportOptions},
};
use reqwest::Url;
use secrecy::{ExposeSecret, Secret};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr, sync::Arc};

/// Genie environment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum Mode {
    /// UAT environment at `https://api.uat.geniebiz.lk/public/`.
    Sandbox,
    /// Live environment at `https://api.geniebiz.lk/public/`.
    #[default]
    Production,
}

impl Mode {
    /// Base URL all endpoints are appended to.
    pub fn base_url(&self) -> &'static str {
        match self {
            Mode::Sandbox => SANDBOX_URL,
            Mode::Production => PRODUCTION_URL,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Sandbox => "sandbox",
            Mode::Production => "production",
        })
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("sandbox") {
            Ok(Mode::Sandbox)
        } else if s.eq_ignore_ascii_case("production") {
            Ok(Mode::Production)
        } else {
            Err(Error::Configuration(format!(
                "unknown mode {:?}, expected \"sandbox\" or \"production\"",
                s
            )))
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Settings fixed when the client is built.
#[derive(Debug, Clone)]
pub(crate) struct ClientConfig {
    pub(crate) api_key: Secret<String>,
    pub(crate) application_id: String,
    pub(crate) mode: Mode,
    pub(crate) base_url: Url,
}

/// Client for Genie Business Connect APIs.
///
/// Clones share the same configuration and transport.
#[derive(Debug, Clone)]
pub struct GenieClient {
    /// Transactions APIs client.
    pub transactions: TransactionsApi,
    inner: Arc<GenieClientInner>,
}

impl GenieClient {
    /// Value of the `apiVersion` field added to every `POST` body.
    pub const API_VERSION: &'static str = "2.0";
    /// Value of the `appVersion` field added to every `POST` body.
    pub const APP_VERSION: &'static str = "geniebiz-connect-rust";
    /// Value of the `signMethod` field added to every `POST` body.
    ///
    /// Only the identifier is sent, requests are not signed.
    pub const SIGN_METHOD: &'static str = "sha1";

    /// Builds a new [`GenieClient`](crate::client::GenieClient) with the default transport configuration.
    pub fn new(
        api_key: impl Into<String>,
        application_id: impl Into<String>,
        mode: Mode,
    ) -> Result<GenieClient, Error> {
        GenieClientBuilder::new(api_key, application_id)
            .with_mode(mode)
            .build()
    }

    /// Returns a new builder to configure a new [`GenieClient`](crate::client::GenieClient).
    pub fn builder(
        api_key: impl Into<String>,
        application_id: impl Into<String>,
    ) -> GenieClientBuilder {
        GenieClientBuilder::new(api_key, application_id)
    }

    /// Replaces the transport used by this client, its clones and its API handles.
    ///
    /// Calls already in flight complete on the previous transport.
    pub fn set_transport(&self, transport: impl Transport + 'static) {
        self.inner.set_transport(Arc::new(transport));
    }

    /// Sends a `GET` request to `endpoint`, relative to the base URL.
    ///
    /// Only the `page` key of `pagination` is forwarded, as a query parameter.
    #[tracing::instrument(name = "GET", skip(self), fields(mode = %self.inner.config.mode))]
    pub async fn get(&self, endpoint: &str, pagination: &Pagination) -> Result<Value, Error> {
        self.inner.get(endpoint, pagination).await
    }

    /// Sends a `POST` request to `endpoint`, relative to the base URL, with `payload` as JSON body.
    ///
    /// `apiVersion`, `appVersion` and `signMethod` are always set on the payload,
    /// replacing any value provided by the caller.
    #[tracing::instrument(name = "POST", skip(self, payload), fields(mode = %self.inner.config.mode))]
    pub async fn post(&self, endpoint: &str, payload: Map<String, Value>) -> Result<Value, Error> {
        self.inner.post(endpoint, payload).await
    }

    /// API key sent verbatim in the `Authorization` header.
    pub fn api_key(&self) -> &Secret<String> {
        &self.inner.config.api_key
    }

    /// Application identifier the client was built with.
    pub fn application_id(&self) -> &str {
        &self.inner.config.application_id
    }

    /// Environment selected at build time.
    pub fn mode(&self) -> Mode {
        self.inner.config.mode
    }

    /// Base URL derived from [`mode`](Self::mode), ending with `/public/`.
    pub fn base_url(&self) -> &Url {
        &self.inner.config.base_url
    }
}

#[derive(Debug)]
enum TransportSource {
    Options(TransportOptions),
    HttpClient(reqwest::Client),
    Custom(Arc<dyn Transport>),
}

/// Builder for a [`GenieClient`](crate::client::GenieClient).
#[derive(Debug)]
pub struct GenieClientBuilder {
    api_key: Secret<String>,
    application_id: String,
    mode: Mode,
    transport: TransportSource,
}

impl GenieClientBuilder {
    /// Creates a new builder to configure a [`GenieClient`](crate::client::GenieClient).
    pub fn new(api_key: impl Into<String>, application_id: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            application_id: application_id.into(),
            mode: Mode::default(),
            transport: TransportSource::Options(TransportOptions::default()),
        }
    }

    /// Consumes the builder and builds a new [`GenieClient`](crate::client::GenieClient).
    pub fn build(self) -> Result<GenieClient, Error> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(Error::Configuration("API key must not be empty".to_string()));
        }

        let base_url = Url::parse(self.mode.base_url())
            .map_err(|e| Error::Configuration(format!("invalid base URL: {}", e)))?;

        let transport: Arc<dyn Transport> = match self.transport {
            TransportSource::Options(options) => Arc::new(ReqwestTransport::new(options)?),
            TransportSource::HttpClient(client) => Arc::new(ReqwestTransport::from_client(client)),
            TransportSource::Custom(transport) => transport,
        };

        let config = ClientConfig {
            api_key: self.api_key,
            application_id: self.application_id,
            mode: self.mode,
            base_url,
        };

        tracing::debug!(mode = %config.mode, "Built Genie client");

        let inner = Arc::new(GenieClientInner::new(config, transport)?);

        Ok(GenieClient {
            transactions: TransactionsApi::new(inner.clone()),
            inner,
        })
    }

    /// Selects the environment. Defaults to [`Mode::Production`](crate::client::Mode).
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Configures the default `reqwest` transport.
    pub fn with_transport_options(mut self, options: TransportOptions) -> Self {
        self.transport = TransportSource::Options(options);
        self
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.transport = TransportSource::HttpClient(client);
        self
    }

    /// Uses a custom [`Transport`](crate::transport::Transport) instead of `reqwest`.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = TransportSource::Custom(Arc::new(transport));
        self
    }
}
