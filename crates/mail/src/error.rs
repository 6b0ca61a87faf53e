/// Error type for mail relay failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// No `SMTP_HOST` was configured.
    #[error("SMTP relay is not configured")]
    NotConfigured,

    /// SMTP transport-level failure (authentication, connection, timeout, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The sender or recipient address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// The relay accepted the connection but did not answer the NOOP probe.
    #[error("SMTP relay did not respond to connection check")]
    NotResponding,
}

impl MailError {
    /// Short classification used in diagnostic logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MailError::NotConfigured => "not_configured",
            MailError::Address(_) => "address",
            MailError::Build(_) => "build",
            MailError::NotResponding => "not_responding",
            MailError::Transport(e) if e.is_timeout() => "timeout",
            MailError::Transport(e) if e.is_permanent() => "permanent_response",
            MailError::Transport(e) if e.is_transient() => "transient_response",
            MailError::Transport(e) if e.is_response() => "response",
            MailError::Transport(e) if e.is_client() => "client",
            MailError::Transport(_) => "connection",
        }
    }

    /// SMTP reply code from the relay, when the failure carried one.
    pub fn smtp_code(&self) -> Option<String> {
        match self {
            MailError::Transport(e) => e.status().map(|code| code.to_string()),
            _ => None,
        }
    }

    /// Full `source()` chain, outermost first.
    pub fn chain(&self) -> String {
        let mut parts = vec![self.to_string()];
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            parts.push(err.to_string());
            source = err.source();
        }
        parts.join(": ")
    }

    /// Emit an error-level record with every diagnostic detail available.
    pub fn log(&self, context: &str) {
        let smtp_code = self.smtp_code();
        tracing::error!(
            context,
            kind = self.kind(),
            smtp_code = smtp_code.as_deref().unwrap_or("none"),
            error = %self,
            chain = %self.chain(),
            "Mail relay failure"
        );
    }
}
