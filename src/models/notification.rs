//! Notification Model
//!
//! User-facing confirmation and result messages. In the mobile client these
//! surface as modal dialogs; here they are values handed to a notification
//! sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Notification types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    SosActivated,
    SosDeactivated,
    SosCountdownCancelled,
    CheckInRecorded,
    ScheduleUpdated,
    LocationSharingStarted,
    LocationSharingStopped,
    LocationShared,
    ContactCall,
    ContactMessage,
    ContactRemoved,
    ResourceCall,
    ResourceWebsite,
    PreferencesUpdated,
}

impl NotificationKind {
    /// Dialog title for this notification type
    pub fn title(&self) -> &'static str {
        match self {
            NotificationKind::SosActivated => "SOS Activated",
            NotificationKind::SosDeactivated => "SOS Deactivated",
            NotificationKind::SosCountdownCancelled => "SOS Cancelled",
            NotificationKind::CheckInRecorded => "Check-in Successful",
            NotificationKind::ScheduleUpdated => "Schedule Updated",
            NotificationKind::LocationSharingStarted => "Location Sharing Started",
            NotificationKind::LocationSharingStopped => "Location Sharing Stopped",
            NotificationKind::LocationShared => "Location Shared",
            NotificationKind::ContactCall => "Call Contact",
            NotificationKind::ContactMessage => "Send Message",
            NotificationKind::ContactRemoved => "Contact Removed",
            NotificationKind::ResourceCall => "Calling...",
            NotificationKind::ResourceWebsite => "Opening...",
            NotificationKind::PreferencesUpdated => "Preferences Updated",
        }
    }

    /// Whether this notification belongs to the SOS lifecycle
    pub fn is_sos(&self) -> bool {
        matches!(
            self,
            NotificationKind::SosActivated
                | NotificationKind::SosDeactivated
                | NotificationKind::SosCountdownCancelled
        )
    }
}

/// A single user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a notification with the default title for its kind
    pub fn new(kind: NotificationKind, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: kind.title().to_string(),
            body: body.into(),
            created_at: Utc::now(),
        }
    }

    pub fn sos_activated() -> Self {
        Self::new(
            NotificationKind::SosActivated,
            "Emergency services have been notified. Your location is being shared with emergency contacts.",
        )
    }

    pub fn sos_deactivated() -> Self {
        Self::new(
            NotificationKind::SosDeactivated,
            "Emergency alert has been cancelled.",
        )
    }

    pub fn sos_countdown_cancelled() -> Self {
        Self::new(
            NotificationKind::SosCountdownCancelled,
            "The SOS countdown was cancelled before an alert was sent.",
        )
    }
}

/// Notification delivery errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    #[error("Notification delivery failed: {0}")]
    DeliveryFailed(String),
}
