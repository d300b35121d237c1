//! Clients for the various Genie APIs.

use crate::{
    client::{ClientConfig, GenieClient},
    common::{API_VERSION_FIELD, APP_VERSION_FIELD, JSON_CONTENT_TYPE, SIGN_METHOD_FIELD},
    error::{DecodeError, Error},
    pagination::{self, Pagination},
    transport::{Transport, TransportRequest},
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method, Url,
};
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use std::{
    fmt::{Debug, Formatter},
    sync::{Arc, PoisonError, RwLock},
};

pub mod transactions;

pub(crate) struct GenieClientInner {
    pub(crate) config: ClientConfig,
    headers: HeaderMap,
    transport: RwLock<Arc<dyn Transport>>,
}

impl GenieClientInner {
    pub(crate) fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, Error> {
        // The key is sent verbatim, without any `Bearer` prefix
        let mut authorization = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| {
                Error::Configuration("API key is not a valid HTTP header value".to_string())
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(AUTHORIZATION, authorization);

        Ok(Self {
            config,
            headers,
            transport: RwLock::new(transport),
        })
    }

    /// Returns the transport currently in use.
    ///
    /// The lock is only held while cloning the `Arc`, never across an await point.
    pub(crate) fn transport(&self) -> Arc<dyn Transport> {
        self.transport
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_transport(&self, transport: Arc<dyn Transport>) {
        *self
            .transport
            .write()
            .unwrap_or_else(PoisonError::into_inner) = transport;
    }

    pub(crate) async fn get(&self, endpoint: &str, pagination: &Pagination) -> Result<Value, Error> {
        let url = self.url(endpoint, Some(pagination))?;

        self.dispatch(Method::GET, url, None).await
    }

    pub(crate) async fn post(
        &self,
        endpoint: &str,
        mut payload: Map<String, Value>,
    ) -> Result<Value, Error> {
        // Protocol fields always win over whatever the caller put in the payload
        payload.insert(API_VERSION_FIELD.to_string(), GenieClient::API_VERSION.into());
        payload.insert(APP_VERSION_FIELD.to_string(), GenieClient::APP_VERSION.into());
        payload.insert(SIGN_METHOD_FIELD.to_string(), GenieClient::SIGN_METHOD.into());

        let url = self.url(endpoint, None)?;

        self.dispatch(Method::POST, url, Some(Value::Object(payload)))
            .await
    }

    fn url(&self, endpoint: &str, pagination: Option<&Pagination>) -> Result<Url, Error> {
        let relative = endpoint.strip_prefix('/').unwrap_or(endpoint);
        let mut url = format!("{}{}", self.config.base_url, relative);

        if let Some(pagination) = pagination {
            url = pagination::apply(url, pagination);
        }

        let invalid = |reason: &str, source| Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
            source,
        };

        let url = Url::parse(&url).map_err(|e| invalid("not a valid URL", Some(e)))?;

        // Dot segments are resolved by the parser and may climb out of the base path
        let base = &self.config.base_url;
        if url.host_str() != base.host_str() || !url.path().starts_with(base.path()) {
            return Err(invalid("resolves outside of the base URL", None));
        }

        // A fragment would swallow the query string and is never sent anyway
        if url.fragment().is_some() {
            return Err(invalid("fragments are not allowed", None));
        }

        Ok(url)
    }

    async fn dispatch(&self, method: Method, url: Url, json: Option<Value>) -> Result<Value, Error> {
        let request = TransportRequest {
            method,
            url,
            headers: self.headers.clone(),
            json,
        };

        let response = self.transport().send(request).await?;

        decode(&response.body)
    }
}

impl Debug for GenieClientInner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenieClientInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Parses a response body into an untyped JSON value.
///
/// Anything that is not a complete JSON document, an empty body included, is an error.
pub(crate) fn decode(body: &[u8]) -> Result<Value, Error> {
    serde_json::from_slice(body).map_err(|source| {
        tracing::debug!("Failed to decode response body: {}", source);

        DecodeError {
            body: String::from_utf8_lossy(body).into_owned(),
            source,
        }
        .into()
    })
}
