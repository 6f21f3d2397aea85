//! Location Model
//!
//! Current position and the recipients it is being shared with.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Last known position of the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub accuracy: String,
}

impl Default for LocationFix {
    fn default() -> Self {
        Self {
            latitude: 40.7128,
            longitude: -74.0060,
            address: "123 Main St, New York, NY 10001".to_string(),
            accuracy: "±3 meters".to_string(),
        }
    }
}

/// Delivery state of a shared location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShareStatus {
    Delivered,
    Received,
}

/// A contact the location was shared with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRecipient {
    pub name: String,
    pub status: ShareStatus,
    pub time: String,
}

/// Everything the location screen renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStatus {
    pub is_sharing: bool,
    pub is_online: bool,
    pub current_location: LocationFix,
    pub shared_with: Vec<ShareRecipient>,
}

impl Default for LocationStatus {
    fn default() -> Self {
        Self {
            is_sharing: false,
            is_online: true,
            current_location: LocationFix::default(),
            shared_with: vec![
                ShareRecipient {
                    name: "Mom".to_string(),
                    status: ShareStatus::Received,
                    time: "2 minutes ago".to_string(),
                },
                ShareRecipient {
                    name: "John Smith".to_string(),
                    status: ShareStatus::Delivered,
                    time: "5 minutes ago".to_string(),
                },
            ],
        }
    }
}
