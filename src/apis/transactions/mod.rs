//! APIs related to transactions.
//!
//! Transaction payloads and responses are passed through as opaque JSON.

mod api;

pub use api::TransactionsApi;
