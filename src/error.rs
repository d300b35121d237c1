//! Standard errors used by all functions in the crate.

use std::fmt;

/// Error collecting all possible failures of the Genie client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The HTTP exchange itself failed. Nothing was decoded.
    #[error("Request failed: {0}")]
    Transport(#[from] TransportError),
    /// The server answered, but the body was not valid JSON.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The endpoint could not be turned into a URL under the base path.
    #[error("Invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        endpoint: String,
        reason: String,
        #[source]
        source: Option<url::ParseError>,
    },
    /// The client was built with invalid settings.
    #[error("Invalid client configuration: {0}")]
    Configuration(String),
}

/// Failure of the underlying HTTP transport.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// Reqwest error (connection refused, TLS, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The server returned a non-success status code.
    #[error("{0}")]
    Status(#[from] ApiError),
    /// Catch-all variant for middleware and custom transport failures.
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<reqwest_middleware::Error> for TransportError {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => TransportError::Http(e),
            reqwest_middleware::Error::Middleware(e) => e
                .downcast::<TransportError>()
                .unwrap_or_else(TransportError::Other),
        }
    }
}

impl From<TransportError> for reqwest_middleware::Error {
    fn from(e: TransportError) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        Error::Transport(e.into())
    }
}

/// Non-success HTTP response returned by a Genie API endpoint.
#[derive(thiserror::Error, Debug)]
pub struct ApiError {
    /// HTTP status returned by the server.
    pub status: u16,
    /// Concise description of the error.
    ///
    /// Taken from the `message` or `error` field of a JSON body when present,
    /// otherwise the canonical reason phrase of the status code.
    pub message: String,
    /// Raw response body, lossily decoded as UTF-8.
    pub body: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Genie HTTP error {}: {}", self.status, self.message)?;

        if !self.body.is_empty() && self.body != self.message {
            write!(f, "\nResponse body: {}", self.body)?;
        }

        Ok(())
    }
}

/// The response body could not be parsed as JSON.
#[derive(thiserror::Error, Debug)]
#[error("Invalid JSON response from Genie API: {source}")]
pub struct DecodeError {
    /// Raw response body, lossily decoded as UTF-8.
    pub body: String,
    #[source]
    pub source: serde_json::Error,
}
