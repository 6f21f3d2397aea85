//! SafeHaven backend
//!
//! Hosts the SOS alert controller behind a small HTTP/WebSocket API, along
//! with the in-memory check-in, contact, location, profile and crisis
//! resource directories used by the mobile client.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use api::{create_router, AppState};
pub use config::{Config, ConfigError};
pub use error::{AppError, AppResult};
