//! Domain model for MOOS order submissions.
//!
//! - [`order`]: the order entity, its fields, and the server-side wire payload.
//! - [`validation`]: synchronous field rules applied before an order is sent.
//! - [`error`]: the shared [`CoreError`](error::CoreError) type.

pub mod error;
pub mod order;
pub mod validation;

pub use order::{FieldPresence, Order, OrderField, OrderRequest, OrderSubmission};
pub use validation::{validate, FieldError, FieldErrorCode, ValidationReport};
