//! Transmission of a validated order to the intake endpoint.

use async_trait::async_trait;
use moos_core::OrderSubmission;
use serde::Deserialize;

/// Error type for order transmission failures.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The request never produced a usable response.
    #[error("Order request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Order rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Sends one validated order. Called at most once per submit attempt.
#[async_trait]
pub trait OrderSender: Send + Sync {
    async fn send_order(&self, order: &OrderSubmission) -> Result<(), SendError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Posts orders as JSON to `{base_url}/api/order`.
#[derive(Debug, Clone)]
pub struct HttpOrderSender {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpOrderSender {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/order", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OrderSender for HttpOrderSender {
    async fn send_order(&self, order: &OrderSubmission) -> Result<(), SendError> {
        let response = self.client.post(&self.endpoint).json(order).send().await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "Order accepted");
            return Ok(());
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };
        tracing::warn!(status = status.as_u16(), %message, "Order rejected");

        Err(SendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
