//! Handler for order intake.
//!
//! The server only checks that the required fields are present; format
//! rules are enforced by the client before it sends anything.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use moos_core::{FieldPresence, OrderRequest};
use moos_mail::OutboundEmail;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OrderAccepted {
    pub success: bool,
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// POST /api/order
// ---------------------------------------------------------------------------

/// Relay one order to the configured mailbox.
///
/// A body that is not a JSON order object is treated as having no fields.
pub async fn submit_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> AppResult<Json<OrderAccepted>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable order body");
            return Err(AppError::MissingFields(FieldPresence::NONE));
        }
    };

    let order = request.into_order().map_err(AppError::MissingFields)?;

    tracing::info!(
        name = %order.name,
        email = %order.email,
        phone = %order.phone,
        "New order received"
    );

    let mailbox = state.mail_config.mailbox().unwrap_or_default();
    let email = OutboundEmail::for_order(&order, mailbox);
    state.relay.send(&email).await?;

    tracing::info!(name = %order.name, "Order email sent");

    Ok(Json(OrderAccepted {
        success: true,
        message: "Order submitted successfully",
    }))
}
