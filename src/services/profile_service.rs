//! Profile Service

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::notification::{Notification, NotificationKind};
use crate::models::profile::UserProfile;
use crate::services::notification_sink::{self, NotificationSink};

#[derive(Clone)]
pub struct ProfileService {
    profile: Arc<RwLock<UserProfile>>,
    sink: Arc<dyn NotificationSink>,
}

impl ProfileService {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            profile: Arc::new(RwLock::new(UserProfile::default())),
            sink,
        }
    }

    pub async fn profile(&self) -> UserProfile {
        self.profile.read().await.clone()
    }

    /// Flip the emergency alert and reminder notification preference
    pub async fn toggle_notifications(&self) -> UserProfile {
        let profile = {
            let mut profile = self.profile.write().await;
            profile.notifications_enabled = !profile.notifications_enabled;
            profile.clone()
        };

        let body = if profile.notifications_enabled {
            "Emergency alerts and check-in reminders are on."
        } else {
            "Emergency alerts and check-in reminders are off."
        };
        notification_sink::deliver(
            self.sink.as_ref(),
            &Notification::new(NotificationKind::PreferencesUpdated, body),
        );

        profile
    }
}
