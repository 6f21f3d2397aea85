//! Services module for SafeHaven
//!
//! Contains all business logic and service implementations.

pub mod alert_controller;
pub mod check_in_service;
pub mod contact_service;
pub mod directory_error;
pub mod location_service;
pub mod notification_sink;
pub mod profile_service;
pub mod resource_service;
pub mod timer_source;

// Re-export commonly used services
pub use alert_controller::{AlertController, AlertSettings, AlertSnapshot, CountdownCancelNotice};
pub use check_in_service::CheckInService;
pub use contact_service::ContactService;
pub use directory_error::DirectoryError;
pub use location_service::LocationService;
pub use notification_sink::{
    BroadcastNotificationSink, FanoutNotificationSink, NotificationSink,
    RecordingNotificationSink, TracingNotificationSink,
};
pub use profile_service::ProfileService;
pub use resource_service::ResourceService;
pub use timer_source::{ManualTimerSource, TimerHandle, TimerSource, TokioTimerSource};
