#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tower::ServiceExt;

use moos_api::config::ServerConfig;
use moos_api::router::build_app_router;
use moos_api::state::AppState;
use moos_mail::{MailConfig, MailError, MailRelay, OutboundEmail, SmtpRelay};

pub const MAILBOX: &str = "orders@moos.example";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5000".to_string()],
        request_timeout_secs: 30,
        session_secret_set: false,
    }
}

/// Relay settings with every value set. Host and port are only used by
/// [`smtp_app`] and [`fake_smtp_app`].
pub fn test_mail_config(host: &str, port: u16) -> MailConfig {
    MailConfig {
        smtp_host: Some(host.to_string()),
        smtp_port: port,
        smtp_user: Some(MAILBOX.to_string()),
        smtp_password: Some("s3cr3t-password".to_string()),
        timeout: Duration::from_secs(2),
    }
}

/// Build the full application router around the given relay.
pub fn build_test_app(relay: Arc<dyn MailRelay>, mail_config: MailConfig) -> Router {
    build_test_app_with(relay, mail_config, test_config())
}

pub fn build_test_app_with(
    relay: Arc<dyn MailRelay>,
    mail_config: MailConfig,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
        mail_config: Arc::new(mail_config),
        relay,
    };
    build_app_router(state, &config)
}

/// App backed by a [`RecordingRelay`].
pub fn recording_app() -> (Router, Arc<RecordingRelay>) {
    let relay = Arc::new(RecordingRelay::default());
    let app = build_test_app(relay.clone(), test_mail_config("smtp.moos.example", 465));
    (app, relay)
}

/// App backed by a real SMTP relay pointed at `host:port`.
pub fn smtp_app(host: &str, port: u16) -> Router {
    let mail_config = test_mail_config(host, port);
    let relay = Arc::new(SmtpRelay::new(&mail_config).expect("relay builds"));
    build_test_app(relay, mail_config)
}

/// App backed by a real SMTP relay talking to a [`FakeSmtpServer`]. The fake
/// offers no AUTH, so the password is left unset.
pub fn fake_smtp_app(server: &FakeSmtpServer) -> Router {
    let mut mail_config = test_mail_config("127.0.0.1", server.port);
    mail_config.smtp_password = None;
    let relay = Arc::new(SmtpRelay::new(&mail_config).expect("relay builds"));
    build_test_app(relay, mail_config)
}

/// A port nothing listens on.
pub const CLOSED_PORT: u16 = 1;

// ---------------------------------------------------------------------------
// Recording relay
// ---------------------------------------------------------------------------

/// In-memory relay that records every email and can be told to fail.
#[derive(Default)]
pub struct RecordingRelay {
    sent: Mutex<Vec<OutboundEmail>>,
    failing: bool,
}

impl RecordingRelay {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailRelay for RecordingRelay {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        if self.failing {
            return Err(MailError::NotResponding);
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }

    async fn verify(&self) -> Result<(), MailError> {
        if self.failing {
            return Err(MailError::NotResponding);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fake SMTP server
// ---------------------------------------------------------------------------

/// Minimal plaintext SMTP responder on an ephemeral port. Accepts every
/// command and stores the DATA section of each message.
pub struct FakeSmtpServer {
    pub port: u16,
    messages: Arc<Mutex<Vec<String>>>,
}

impl FakeSmtpServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let messages = Arc::new(Mutex::new(Vec::new()));

        let store = Arc::clone(&messages);
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let _ = handle_smtp_session(socket, store).await;
                });
            }
        });

        Self { port, messages }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

async fn handle_smtp_session(
    socket: tokio::net::TcpStream,
    store: Arc<Mutex<Vec<String>>>,
) -> io::Result<()> {
    let (read, mut write) = socket.into_split();
    let mut lines = BufReader::new(read).lines();

    write.write_all(b"220 fake.smtp ESMTP ready\r\n").await?;

    while let Some(line) = lines.next_line().await? {
        let verb = line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase();

        match verb.as_str() {
            "EHLO" | "HELO" => write.write_all(b"250 fake.smtp\r\n").await?,
            "MAIL" | "RCPT" | "RSET" | "NOOP" => write.write_all(b"250 OK\r\n").await?,
            "DATA" => {
                write.write_all(b"354 End data with <CR><LF>.<CR><LF>\r\n").await?;
                let mut data = String::new();
                while let Some(body_line) = lines.next_line().await? {
                    if body_line == "." {
                        break;
                    }
                    data.push_str(&body_line);
                    data.push('\n');
                }
                store.lock().unwrap().push(data);
                write.write_all(b"250 OK queued\r\n").await?;
            }
            "QUIT" => {
                write.write_all(b"221 Bye\r\n").await?;
                break;
            }
            _ => write.write_all(b"502 Command not implemented\r\n").await?,
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------

/// Shared buffer that collects formatted log output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's tracing output into a buffer until the guard drops.
pub fn capture_logs() -> (tracing::subscriber::DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    (tracing::subscriber::set_default(subscriber), buffer)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, "application/json", body.to_string()).await
}

pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: impl Into<String>,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}
