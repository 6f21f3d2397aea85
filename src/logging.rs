//! Logging configuration for SafeHaven
//!
//! Structured logging setup with appropriate levels and formatting.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::models::alert_session::AlertPhase;

/// Output format of the log stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(log_level: &str) -> String {
    format!("safehaven={log_level},tower_http={log_level},axum::rejection=trace")
}

/// Initialize the application logging system.
///
/// `RUST_LOG` wins over `log_level`. Calling this twice is harmless.
pub fn init_logging(log_level: &str, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match format {
        LogFormat::Json => registry.with(json_layer()).try_init(),
        LogFormat::Pretty => registry.with(console_layer()).try_init(),
    };

    if result.is_ok() {
        tracing::info!(format = %format, "Logging system initialized");
    }
}

/// JSON logging layer for production
fn json_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
}

/// Console logging layer for development
fn console_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_ansi(true)
}

/// Create a span for SOS session operations
#[macro_export]
macro_rules! alert_span {
    ($operation:expr, $session_id:expr) => {
        tracing::info_span!(
            "alert_operation",
            operation = %$operation,
            session_id = %$session_id,
            phase = tracing::field::Empty,
            remaining_seconds = tracing::field::Empty,
        )
    };
}

/// Log application startup
pub fn log_startup() {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git_commit = option_env!("GIT_COMMIT").unwrap_or("unknown"),
        "SafeHaven starting up"
    );
}

/// Log an SOS phase change
pub fn log_alert_transition(session_id: &str, from: AlertPhase, to: AlertPhase) {
    let span = alert_span!("transition", session_id);
    span.record("phase", tracing::field::display(to));
    let _guard = span.enter();

    if to == AlertPhase::Active {
        tracing::warn!(from = %from, to = %to, "SOS alert activated");
    } else {
        tracing::info!(from = %from, to = %to, "SOS phase changed");
    }
}

/// Log one second of the SOS countdown
pub fn log_alert_countdown(session_id: &str, remaining_seconds: u32) {
    let span = alert_span!("countdown", session_id);
    span.record("phase", tracing::field::display(AlertPhase::CountingDown));
    span.record("remaining_seconds", remaining_seconds);
    let _guard = span.enter();

    tracing::debug!("SOS countdown tick");
}

/// Log notification delivery
pub fn log_notification_delivery(kind: &str, title: &str, success: bool) {
    if success {
        tracing::info!(kind = %kind, title = %title, "Notification delivered");
    } else {
        tracing::warn!(kind = %kind, title = %title, "Notification delivery failed");
    }
}

/// Log a placeholder action that a production build would hand to the OS
/// (dialer, SMS, browser, location services)
pub fn log_placeholder_action(action: &str, target: &str) {
    tracing::info!(action = %action, target = %target, "Placeholder action requested");
}

/// Log WebSocket connection established
pub fn log_websocket_connected(connection_id: &str) {
    tracing::info!(connection_id = %connection_id, "WebSocket connection established");
}

/// Log WebSocket connection closed
pub fn log_websocket_disconnected(connection_id: &str, reason: &str) {
    tracing::info!(
        connection_id = %connection_id,
        reason = %reason,
        "WebSocket connection closed"
    );
}

/// Log error with context
pub fn log_error(error: &str, context: &str, session_id: Option<&str>) {
    tracing::error!(
        error = %error,
        context = %context,
        session_id = ?session_id,
        "Application error occurred"
    );
}

/// Log warning with context
pub fn log_warning(warning: &str, context: &str, session_id: Option<&str>) {
    tracing::warn!(
        warning = %warning,
        context = %context,
        session_id = ?session_id,
        "Application warning"
    );
}
