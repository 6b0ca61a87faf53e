//! Outbound mail for MOOS orders.
//!
//! - [`MailConfig`]: relay settings read once from the environment.
//! - [`OutboundEmail`]: the notification composed for one order.
//! - [`MailRelay`]: the dispatch seam; [`SmtpRelay`] is the `lettre`
//!   implementation and [`UnconfiguredRelay`] stands in when no host is set.
//! - [`MailError`]: relay failures with diagnostic accessors for logging.

pub mod config;
pub mod error;
pub mod message;
pub mod relay;

pub use config::MailConfig;
pub use error::MailError;
pub use message::OutboundEmail;
pub use relay::{relay_from_config, MailRelay, SmtpRelay, UnconfiguredRelay};
