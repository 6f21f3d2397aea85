//! Location Service
//!
//! Location sharing toggle and one-off shares. The position itself is a
//! fixture; real geolocation belongs to the device.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::logging;
use crate::models::location::LocationStatus;
use crate::models::notification::{Notification, NotificationKind};
use crate::services::notification_sink::{self, NotificationSink};

#[derive(Clone)]
pub struct LocationService {
    status: Arc<RwLock<LocationStatus>>,
    sink: Arc<dyn NotificationSink>,
}

impl LocationService {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            status: Arc::new(RwLock::new(LocationStatus::default())),
            sink,
        }
    }

    pub async fn status(&self) -> LocationStatus {
        self.status.read().await.clone()
    }

    /// Start or stop continuous sharing.
    ///
    /// Starting confirms with a notification. Stopping is silent because the
    /// client asks for confirmation before it calls this.
    pub async fn toggle_sharing(&self) -> LocationStatus {
        let status = {
            let mut status = self.status.write().await;
            status.is_sharing = !status.is_sharing;
            status.clone()
        };

        tracing::info!(sharing = status.is_sharing, "Location sharing toggled");
        if status.is_sharing {
            notification_sink::deliver(
                self.sink.as_ref(),
                &Notification::new(
                    NotificationKind::LocationSharingStarted,
                    "Your location is now being shared with your emergency contacts.",
                ),
            );
        }

        status
    }

    /// Send the current position once
    pub async fn share_once(&self) -> LocationStatus {
        let status = self.status().await;
        logging::log_placeholder_action("share_location", &status.current_location.address);

        notification_sink::deliver(
            self.sink.as_ref(),
            &Notification::new(
                NotificationKind::LocationShared,
                "Your current location has been sent to your emergency contacts.",
            ),
        );

        status
    }
}
