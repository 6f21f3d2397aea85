//! API module for SafeHaven
//!
//! Contains all REST API endpoints, the WebSocket feed and routing.

pub mod alert;
pub mod check_in;
pub mod contacts;
pub mod location;
pub mod notifications;
pub mod profile;
pub mod resources;

use std::sync::Arc;

use axum::{http::header, http::HeaderValue, http::Method, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{Config, ConfigError};
use crate::error::{AppError, AppResult};
use crate::services::{
    AlertController, AlertSettings, BroadcastNotificationSink, CheckInService, ContactService,
    FanoutNotificationSink, LocationService, NotificationSink, ProfileService, ResourceService,
    TimerSource, TokioTimerSource, TracingNotificationSink,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub alerts: AlertController,
    pub check_ins: CheckInService,
    pub contacts: ContactService,
    pub location: LocationService,
    pub profile: ProfileService,
    pub resources: ResourceService,
    pub notifications: BroadcastNotificationSink,
}

impl AppState {
    /// Build production state: tokio timers, notifications to the log and to
    /// WebSocket subscribers
    pub fn new(config: &Config) -> AppResult<Self> {
        let notifications =
            BroadcastNotificationSink::new(config.broadcast_capacity, config.notification_history);

        Self::with_parts(
            config.alert_settings(),
            Arc::new(TokioTimerSource::new()),
            notifications,
        )
    }

    /// Build state from explicit parts
    pub fn with_parts(
        settings: AlertSettings,
        timers: Arc<dyn TimerSource>,
        notifications: BroadcastNotificationSink,
    ) -> AppResult<Self> {
        let sink: Arc<dyn NotificationSink> = Arc::new(
            FanoutNotificationSink::default()
                .with(Arc::new(TracingNotificationSink))
                .with(Arc::new(notifications.clone())),
        );

        Ok(Self {
            alerts: AlertController::new(settings, sink.clone(), timers)?,
            check_ins: CheckInService::new(sink.clone()),
            contacts: ContactService::new(sink.clone()),
            location: LocationService::new(sink.clone()),
            profile: ProfileService::new(sink.clone()),
            resources: ResourceService::new(sink),
            notifications,
        })
    }
}

/// Routes without middleware
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/sos", alert::routes())
        .nest("/api/check-ins", check_in::routes())
        .nest("/api/contacts", contacts::routes())
        .nest("/api/location", location::routes())
        .nest("/api/profile", profile::routes())
        .nest("/api/resources", resources::routes())
        .nest("/api/notifications", notifications::routes())
        .route("/ws", get(notifications::websocket))
        .route("/api/health", get(health_check))
}

/// Full application router with tracing and CORS
pub fn create_router(state: AppState, config: &Config) -> AppResult<Router> {
    Ok(routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.cors_origins)?),
        )
        .with_state(state))
}

fn cors_layer(origins: &[String]) -> AppResult<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() {
        return Ok(cors.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| AppError::Config(ConfigError::InvalidCorsOrigin(origin.clone())))
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(cors.allow_origin(AllowOrigin::list(origins)))
}

async fn health_check() -> &'static str {
    "OK"
}
