//! Mail relay abstraction and its SMTP implementation.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use crate::config::MailConfig;
use crate::error::MailError;
use crate::message::OutboundEmail;

/// Outbound mail delivery service shared by all requests.
///
/// Implementations must be safe to call concurrently; any connection reuse
/// is their own concern.
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// Deliver one message. No retries.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;

    /// Open a connection to the relay and check that it answers.
    async fn verify(&self) -> Result<(), MailError>;
}

// ---------------------------------------------------------------------------
// SmtpRelay
// ---------------------------------------------------------------------------

/// `lettre` SMTP transport built once from [`MailConfig`].
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpRelay {
    /// Build the transport. Port 465 wraps the connection in TLS from the
    /// start; any other port upgrades with STARTTLS when the relay offers it.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let host = config.smtp_host.as_deref().ok_or(MailError::NotConfigured)?;

        let tls_parameters = TlsParameters::new(host.to_string())?;
        let tls = if config.implicit_tls() {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(config.smtp_port)
            .tls(tls)
            .timeout(Some(config.timeout));

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = email.to_message()?;
        let response = self.transport.send(message).await?;

        tracing::debug!(
            code = %response.code(),
            to = %email.to,
            "Relay accepted message"
        );
        Ok(())
    }

    async fn verify(&self) -> Result<(), MailError> {
        if self.transport.test_connection().await? {
            Ok(())
        } else {
            Err(MailError::NotResponding)
        }
    }
}

// ---------------------------------------------------------------------------
// UnconfiguredRelay
// ---------------------------------------------------------------------------

/// Relay used when `SMTP_HOST` is not set. Every call fails.
pub struct UnconfiguredRelay;

#[async_trait]
impl MailRelay for UnconfiguredRelay {
    async fn send(&self, _email: &OutboundEmail) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }

    async fn verify(&self) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}

/// Pick the relay implementation for a configuration.
pub fn relay_from_config(config: &MailConfig) -> Result<Arc<dyn MailRelay>, MailError> {
    if config.smtp_host.is_none() {
        tracing::warn!("SMTP_HOST not set, order emails will fail until it is configured");
        return Ok(Arc::new(UnconfiguredRelay));
    }
    Ok(Arc::new(SmtpRelay::new(config)?))
}
