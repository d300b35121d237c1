use crate::{apis::GenieClientInner, pagination::Pagination, Error};
use serde_json::{Map, Value};
use std::sync::Arc;
use urlencoding::encode;

static TRANSACTIONS_ENDPOINT: &str = "transactions";

/// Genie transactions APIs client.
#[derive(Clone, Debug)]
pub struct TransactionsApi {
    inner: Arc<GenieClientInner>,
}

impl TransactionsApi {
    pub(crate) fn new(inner: Arc<GenieClientInner>) -> Self {
        Self { inner }
    }

    /// Creates a new transaction.
    ///
    /// The protocol fields (`apiVersion`, `appVersion`, `signMethod`) are added to the payload.
    #[tracing::instrument(name = "Create Transaction", skip(self, payload))]
    pub async fn create(&self, payload: Map<String, Value>) -> Result<Value, Error> {
        self.inner.post(TRANSACTIONS_ENDPOINT, payload).await
    }

    /// Lists transactions, one page at a time.
    #[tracing::instrument(name = "List Transactions", skip(self))]
    pub async fn list(&self, pagination: &Pagination) -> Result<Value, Error> {
        self.inner.get(TRANSACTIONS_ENDPOINT, pagination).await
    }

    /// Gets the details of an existing transaction.
    ///
    /// Targets `transactions/{id}`. The gateway only documents the collection
    /// endpoint, so this route is assumed rather than confirmed. Use
    /// [`GenieClient::get`](crate::client::GenieClient::get) if your account exposes a different path.
    #[tracing::instrument(name = "Get Transaction by ID", skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Value, Error> {
        self.inner
            .get(
                &format!("{}/{}", TRANSACTIONS_ENDPOINT, encode(id)),
                &Pagination::new(),
            )
            .await
    }
}
