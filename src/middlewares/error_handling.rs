use crate::error::{ApiError, TransportError};
use async_trait::async_trait;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Reqwest middleware which turns non-success responses returned from Genie APIs
/// into [`TransportError::Status`](crate::error::TransportError)s.
pub struct ErrorHandlingMiddleware;

#[async_trait]
impl Middleware for ErrorHandlingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let response = next.run(req, extensions).await?;

        if !response.status().is_success() {
            let status = response.status();
            let bytes = response.bytes().await?;

            tracing::debug!("Failed HTTP request. Status code: {}", status);

            let body = String::from_utf8_lossy(&bytes).into_owned();
            let message = serde_json::from_slice::<ErrorResponse>(&bytes)
                .ok()
                .and_then(ErrorResponse::into_message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown Error")
                        .to_string()
                });

            return Err(TransportError::Status(ApiError {
                status: status.as_u16(),
                message,
                body,
            })
            .into());
        }

        Ok(response)
    }
}

/// Shape of the JSON error bodies returned by the gateway. Both fields are optional
/// since the format is not the same across endpoints.
#[derive(serde::Deserialize, Debug)]
struct ErrorResponse {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}
