use axum::extract::State;
use axum::{routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

const SET: &str = "set";
const NOT_SET: &str = "NOT SET";

/// Liveness response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
}

/// Which relay settings are present. Values themselves are never reported.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpConfigPresence {
    pub host: &'static str,
    pub port: u16,
    pub user: &'static str,
    pub password: &'static str,
    pub session_secret: &'static str,
}

#[derive(Serialize)]
pub struct SmtpStatus {
    pub config: SmtpConfigPresence,
    /// `connected` or `error: <message>`.
    pub connection: String,
}

#[derive(Serialize)]
pub struct SmtpHealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub smtp: SmtpStatus,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn presence(set: bool) -> &'static str {
    if set {
        SET
    } else {
        NOT_SET
    }
}

/// GET /api/health -- process liveness.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: now(),
    })
}

/// GET /api/health/smtp -- relay configuration presence and connectivity.
async fn smtp_health_check(State(state): State<AppState>) -> Json<SmtpHealthResponse> {
    let mail = &state.mail_config;
    let config = SmtpConfigPresence {
        host: presence(mail.smtp_host.is_some()),
        port: mail.smtp_port,
        user: presence(mail.smtp_user.is_some()),
        password: presence(mail.smtp_password.is_some()),
        session_secret: presence(state.config.session_secret_set),
    };

    let connection = match state.relay.verify().await {
        Ok(()) => "connected".to_string(),
        Err(err) => {
            err.log("smtp_diagnostics");
            format!("error: {err}")
        }
    };

    Json(SmtpHealthResponse {
        status: "ok",
        timestamp: now(),
        smtp: SmtpStatus { config, connection },
    })
}

/// Mount health check routes (nested under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/smtp", get(smtp_health_check))
}
