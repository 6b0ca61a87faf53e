//! Client side of the MOOS order flow.
//!
//! [`OrderForm`] holds what the visitor typed, gates submission on
//! [`moos_core::validate`], and hands a validated snapshot to an
//! [`OrderSender`]. [`HttpOrderSender`] posts it to `/api/order`.

pub mod form;
pub mod sender;

pub use form::{FormPhase, OrderForm, SubmitError};
pub use sender::{HttpOrderSender, OrderSender, SendError};
