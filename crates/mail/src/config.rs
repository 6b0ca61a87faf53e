use std::fmt;
use std::time::Duration;

/// Default SMTP port (implicit TLS).
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Port on which the relay expects TLS from the first byte.
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// Default connection and per-command timeout for the relay.
pub const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 15;

/// Configuration for the outbound mail relay.
///
/// The configured user doubles as the mailbox orders are sent from and to.
#[derive(Clone)]
pub struct MailConfig {
    /// SMTP server hostname. `None` leaves the relay unconfigured.
    pub smtp_host: Option<String>,
    /// SMTP server port (defaults to 465).
    pub smtp_port: u16,
    /// SMTP login, also the order mailbox address.
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    /// Bound on connecting to and talking with the relay.
    pub timeout: Duration,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// Empty values are treated as unset.
    ///
    /// | Variable            | Default |
    /// |---------------------|---------|
    /// | `SMTP_HOST`         | none    |
    /// | `SMTP_PORT`         | `465`   |
    /// | `SMTP_USER`         | none    |
    /// | `SMTP_PASSWORD`     | none    |
    /// | `SMTP_TIMEOUT_SECS` | `15`    |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let smtp_port = match var("SMTP_PORT").map(|p| p.trim().parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(e)) => {
                tracing::warn!(error = %e, default = DEFAULT_SMTP_PORT, "Invalid SMTP_PORT, using default");
                DEFAULT_SMTP_PORT
            }
            None => DEFAULT_SMTP_PORT,
        };

        let timeout_secs = match var("SMTP_TIMEOUT_SECS").map(|t| t.trim().parse::<u64>()) {
            Some(Ok(secs)) => secs,
            Some(Err(e)) => {
                tracing::warn!(
                    error = %e,
                    default = DEFAULT_SMTP_TIMEOUT_SECS,
                    "Invalid SMTP_TIMEOUT_SECS, using default"
                );
                DEFAULT_SMTP_TIMEOUT_SECS
            }
            None => DEFAULT_SMTP_TIMEOUT_SECS,
        };

        Self {
            smtp_host: var("SMTP_HOST"),
            smtp_port,
            smtp_user: var("SMTP_USER"),
            smtp_password: var("SMTP_PASSWORD"),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Whether the connection is TLS-wrapped from the start (port 465).
    pub fn implicit_tls(&self) -> bool {
        self.smtp_port == IMPLICIT_TLS_PORT
    }

    /// Address orders are sent from and delivered to.
    pub fn mailbox(&self) -> Option<&str> {
        self.smtp_user.as_deref()
    }

    /// Log the effective settings. The password is never printed.
    pub fn log_summary(&self) {
        tracing::info!(
            host = self.smtp_host.as_deref().unwrap_or("NOT SET"),
            port = self.smtp_port,
            secure = self.implicit_tls(),
            user = self.smtp_user.as_deref().unwrap_or("NOT SET"),
            "SMTP relay configured"
        );
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_password", &self.smtp_password.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
