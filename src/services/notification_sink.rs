//! Notification Sinks
//!
//! Destinations for user-facing messages. Delivery is fire-and-forget from
//! the caller's point of view: a failed delivery is logged, never retried,
//! and never undoes the state change that produced it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;

use crate::logging;
use crate::models::notification::{Notification, NotificationError};

/// Trait for delivering notifications to the user
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Deliver a notification and log the outcome; errors are swallowed
pub fn deliver(sink: &dyn NotificationSink, notification: &Notification) {
    let kind = notification.kind.to_string();
    match sink.notify(notification) {
        Ok(()) => logging::log_notification_delivery(&kind, &notification.title, true),
        Err(err) => {
            logging::log_notification_delivery(&kind, &notification.title, false);
            logging::log_warning(&err.to_string(), "notification delivery", None);
        }
    }
}

/// Sink that publishes to a broadcast channel and keeps a bounded history
#[derive(Debug, Clone)]
pub struct BroadcastNotificationSink {
    sender: broadcast::Sender<Notification>,
    history: Arc<Mutex<VecDeque<Notification>>>,
    history_limit: usize,
}

impl BroadcastNotificationSink {
    pub fn new(capacity: usize, history_limit: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));

        Self {
            sender,
            history: Arc::new(Mutex::new(VecDeque::with_capacity(history_limit))),
            history_limit,
        }
    }

    /// Receive every notification published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Most recent notifications, newest first
    pub fn recent(&self) -> Vec<Notification> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .cloned()
            .collect()
    }

    fn remember(&self, notification: &Notification) {
        if self.history_limit == 0 {
            return;
        }

        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        while history.len() >= self.history_limit {
            history.pop_front();
        }
        history.push_back(notification.clone());
    }
}

impl NotificationSink for BroadcastNotificationSink {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.remember(notification);

        // No subscriber is fine: the history still has it
        let _ = self.sender.send(notification.clone());
        Ok(())
    }
}

/// Sink that writes notifications to the log
#[derive(Debug, Clone, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        tracing::info!(
            kind = %notification.kind,
            title = %notification.title,
            body = %notification.body,
            "Notification"
        );
        Ok(())
    }
}

/// Sink that delivers to several sinks in order
#[derive(Clone, Default)]
pub struct FanoutNotificationSink {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl FanoutNotificationSink {
    pub fn new(sinks: Vec<Arc<dyn NotificationSink>>) -> Self {
        Self { sinks }
    }

    pub fn with(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl NotificationSink for FanoutNotificationSink {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        let mut first_error = None;

        for sink in &self.sinks {
            if let Err(err) = sink.notify(notification) {
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Sink that records notifications for assertions; can be told to fail
#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationSink {
    received: Arc<Mutex<Vec<Notification>>>,
    failing: Arc<Mutex<bool>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every delivery from now on (still records the attempt)
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap_or_else(PoisonError::into_inner) = failing;
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.notifications().into_iter().map(|n| n.title).collect()
    }

    pub fn count(&self) -> usize {
        self.received.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn clear(&self) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());

        if *self.failing.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(NotificationError::DeliveryFailed(
                "dialog could not be shown".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notification::NotificationKind;

    #[test]
    fn test_broadcast_history_is_bounded() {
        let sink = BroadcastNotificationSink::new(8, 2);

        for body in ["one", "two", "three"] {
            sink.notify(&Notification::new(NotificationKind::CheckInRecorded, body))
                .unwrap();
        }

        let recent: Vec<_> = sink.recent().into_iter().map(|n| n.body).collect();
        assert_eq!(recent, vec!["three", "two"]);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_subscribers() {
        let sink = BroadcastNotificationSink::new(8, 8);
        let mut receiver = sink.subscribe();

        sink.notify(&Notification::sos_activated()).unwrap();

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.kind, NotificationKind::SosActivated);
    }

    #[test]
    fn test_broadcast_without_subscribers_succeeds() {
        let sink = BroadcastNotificationSink::new(8, 8);
        assert!(sink.notify(&Notification::sos_deactivated()).is_ok());
        assert_eq!(sink.recent().len(), 1);
    }

    #[test]
    fn test_fanout_attempts_every_sink() {
        let failing = RecordingNotificationSink::new();
        failing.set_failing(true);
        let healthy = RecordingNotificationSink::new();

        let fanout = FanoutNotificationSink::new(vec![Arc::new(failing.clone())])
            .with(Arc::new(healthy.clone()));

        let result = fanout.notify(&Notification::sos_activated());
        assert!(matches!(result, Err(NotificationError::DeliveryFailed(_))));
        assert_eq!(failing.count(), 1);
        assert_eq!(healthy.count(), 1);
    }

    #[test]
    fn test_deliver_swallows_errors() {
        let sink = RecordingNotificationSink::new();
        sink.set_failing(true);

        deliver(&sink, &Notification::sos_activated());
        assert_eq!(sink.titles(), vec!["SOS Activated"]);
    }
}
