//! Check-in Model
//!
//! Safety check-in records and the automatic check-in schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Location recorded for a check-in made from the app
pub const CURRENT_LOCATION: &str = "Current Location";

/// Check-in status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CheckInStatus {
    Completed,
    Missed,
    Pending,
}

/// One safety check-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: String,

    /// Display time, e.g. "02:00 PM"
    pub time: String,

    pub status: CheckInStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl CheckIn {
    /// Create a completed check-in stamped at `at`
    pub fn completed_at(at: DateTime<Utc>, location: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            time: format_check_in_time(at),
            status: CheckInStatus::Completed,
            location: Some(location.into()),
        }
    }

    fn fixture(id: &str, time: &str, status: CheckInStatus, location: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            time: time.to_string(),
            status,
            location: location.map(str::to_string),
        }
    }
}

/// Automatic check-in schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInSchedule {
    pub is_active: bool,
    pub next_check_in: String,
}

impl Default for CheckInSchedule {
    fn default() -> Self {
        Self {
            is_active: true,
            next_check_in: "2:00 PM".to_string(),
        }
    }
}

/// Format a timestamp as "hh:mm AM/PM"
pub fn format_check_in_time(at: DateTime<Utc>) -> String {
    at.format("%I:%M %p").to_string()
}

/// History shown on first launch, newest first
pub fn seed_history() -> Vec<CheckIn> {
    vec![
        CheckIn::fixture("1", "12:00 PM", CheckInStatus::Completed, Some("Home")),
        CheckIn::fixture("2", "10:00 AM", CheckInStatus::Completed, Some("Office")),
        CheckIn::fixture("3", "8:00 AM", CheckInStatus::Missed, None),
    ]
}
