//! Rust client for the [Genie Business](https://www.geniebiz.lk) Connect APIs.
//!
//! The client is deliberately thin: it attaches the authentication headers, adds the
//! protocol fields expected by the gateway to every `POST` body and decodes JSON
//! responses into a [`serde_json::Value`]. Request and response payloads are not
//! modelled; they are passed through as-is.
//!
//! # Usage
//!
//! ## Initialize a new `GenieClient`
//!
//! Create a new [`GenieClient`](crate::client::GenieClient) with the API key and
//! application ID from the Genie Business merchant portal.
//!
//! ```rust,no_run
//! # use geniebiz_connect::{GenieClient, Mode, Error};
//! # fn main() -> Result<(), Error> {
//! let genie = GenieClient::new("my-api-key", "my-application-id", Mode::Sandbox)?;
//! # Ok(())
//! # }
//! ```
//!
//! By default, a `GenieClient` built through [`GenieClient::builder`](crate::client::GenieClient::builder)
//! connects to the production environment. Transport settings such as timeouts or proxies
//! are set through [`TransportOptions`](crate::transport::TransportOptions):
//!
//! ```rust,no_run
//! # use geniebiz_connect::{GenieClient, Mode, Error, transport::TransportOptions};
//! # use std::time::Duration;
//! # fn main() -> Result<(), Error> {
//! let genie = GenieClient::builder("my-api-key", "my-application-id")
//!     .with_mode(Mode::Sandbox)
//!     .with_transport_options(TransportOptions::default().with_timeout(Duration::from_secs(10)))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Create a transaction
//!
//! ```rust,no_run
//! # use geniebiz_connect::{GenieClient, Error};
//! # use serde_json::json;
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let genie: GenieClient = unreachable!();
//! #
//! let payload = json!({
//!     "amount": 1000,
//!     "currency": "LKR",
//!     "redirectUrl": "https://my.shop/return"
//! });
//!
//! let res = genie
//!     .transactions
//!     .create(payload.as_object().cloned().unwrap_or_default())
//!     .await?;
//!
//! println!("Created transaction: {}", res);
//! # Ok(())
//! # }
//! ```
//!
//! ## Call any endpoint
//!
//! ```rust,no_run
//! # use geniebiz_connect::{GenieClient, Error, pagination};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let genie: GenieClient = unreachable!();
//! #
//! let second_page = genie.get("transactions", &pagination::page(2)).await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub mod client;
mod common;
pub mod error;
mod middlewares;
pub mod pagination;
pub mod transport;

pub use client::{GenieClient, GenieClientBuilder, Mode};
pub use error::Error;
