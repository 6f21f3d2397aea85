//! Check-in Service
//!
//! Safety check-in history and the automatic check-in schedule.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::check_in::{self, CheckIn, CheckInSchedule, CURRENT_LOCATION};
use crate::models::notification::{Notification, NotificationKind};
use crate::services::notification_sink::{self, NotificationSink};

const SCHEDULE_ENABLED: &str =
    "Automatic check-ins have been enabled. Your emergency contacts will receive regular updates.";
const SCHEDULE_DISABLED: &str = "Automatic check-ins have been disabled. Your emergency contacts will not receive scheduled updates.";

/// Check-in log seeded with the first-launch history
#[derive(Clone)]
pub struct CheckInService {
    history: Arc<RwLock<Vec<CheckIn>>>,
    schedule: Arc<RwLock<CheckInSchedule>>,
    sink: Arc<dyn NotificationSink>,
}

impl CheckInService {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_history(check_in::seed_history(), sink)
    }

    pub fn with_history(history: Vec<CheckIn>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            history: Arc::new(RwLock::new(history)),
            schedule: Arc::new(RwLock::new(CheckInSchedule::default())),
            sink,
        }
    }

    /// Check-ins, newest first
    pub async fn history(&self) -> Vec<CheckIn> {
        self.history.read().await.clone()
    }

    pub async fn schedule(&self) -> CheckInSchedule {
        self.schedule.read().await.clone()
    }

    /// Record a completed check-in at the current location
    pub async fn check_in(&self) -> CheckIn {
        let record = CheckIn::completed_at(Utc::now(), CURRENT_LOCATION);
        self.history.write().await.insert(0, record.clone());

        tracing::info!(check_in_id = %record.id, time = %record.time, "Check-in recorded");
        notification_sink::deliver(
            self.sink.as_ref(),
            &Notification::new(
                NotificationKind::CheckInRecorded,
                "Your safety check-in has been recorded and shared with your emergency contacts.",
            ),
        );

        record
    }

    /// Flip the automatic schedule on or off
    pub async fn toggle_schedule(&self) -> CheckInSchedule {
        let schedule = {
            let mut schedule = self.schedule.write().await;
            schedule.is_active = !schedule.is_active;
            schedule.clone()
        };

        tracing::info!(active = schedule.is_active, "Check-in schedule updated");
        let body = if schedule.is_active {
            SCHEDULE_ENABLED
        } else {
            SCHEDULE_DISABLED
        };
        notification_sink::deliver(
            self.sink.as_ref(),
            &Notification::new(NotificationKind::ScheduleUpdated, body),
        );

        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::check_in::CheckInStatus;
    use crate::services::notification_sink::RecordingNotificationSink;

    #[tokio::test]
    async fn test_check_in_prepends_record() {
        let sink = RecordingNotificationSink::new();
        let service = CheckInService::new(Arc::new(sink.clone()));

        let record = service.check_in().await;
        let history = service.history().await;

        assert_eq!(history.len(), 4);
        assert_eq!(history[0], record);
        assert_eq!(record.status, CheckInStatus::Completed);
        assert_eq!(sink.titles(), vec!["Check-in Successful"]);
    }

    #[tokio::test]
    async fn test_toggle_schedule_messages() {
        let sink = RecordingNotificationSink::new();
        let service = CheckInService::new(Arc::new(sink.clone()));
        assert!(service.schedule().await.is_active);

        let schedule = service.toggle_schedule().await;
        assert!(!schedule.is_active);

        let schedule = service.toggle_schedule().await;
        assert!(schedule.is_active);

        let bodies: Vec<_> = sink.notifications().into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec![SCHEDULE_DISABLED, SCHEDULE_ENABLED]);
    }
}
