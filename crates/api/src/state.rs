use std::sync::Arc;

use moos_mail::{MailConfig, MailRelay};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Everything inside is read-only after startup, so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Relay settings, used for the order mailbox and diagnostics.
    pub mail_config: Arc<MailConfig>,
    /// Outbound mail relay shared by all requests.
    pub relay: Arc<dyn MailRelay>,
}
