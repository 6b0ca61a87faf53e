use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use moos_core::FieldPresence;
use moos_mail::MailError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce `{ "error": message }` bodies. Relay
/// details are logged here and never reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// `name`, `phone` or `email` was absent or empty.
    #[error("Missing required fields")]
    MissingFields(FieldPresence),

    /// The mail relay failed to accept the order email.
    #[error("Failed to send email: {0}")]
    Mail(#[from] MailError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingFields(presence) => {
                tracing::warn!(
                    name = presence.name,
                    phone = presence.phone,
                    email = presence.email,
                    "Order rejected: missing required fields"
                );
                (StatusCode::BAD_REQUEST, "Missing required fields")
            }
            AppError::Mail(err) => {
                err.log("order");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to send email")
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
