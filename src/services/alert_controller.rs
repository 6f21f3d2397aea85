//! Alert Controller
//!
//! Drives the SOS trigger: idle -> countdown -> active -> idle. A press
//! starts a short grace countdown so an accidental tap can be undone before
//! anything irreversible happens.
//!
//! The session and its timer handle sit behind one mutex. Ticks from the
//! timer carry the id of the session that started them and are dropped if
//! that session is no longer counting down, so a tick already in flight
//! when the user cancels can never resume or activate the alert.
//!
//! Snapshots and notifications are published before the mutex is released,
//! so watchers and sinks see changes in the order they happened. Sinks must
//! not call back into the controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tokio::sync::watch;
use uuid::Uuid;

use crate::logging;
use crate::models::alert_session::{
    validate_countdown, AlertPhase, AlertSession, AlertSessionError, TickOutcome,
    DEFAULT_COUNTDOWN_SECONDS,
};
use crate::models::notification::Notification;
use crate::services::notification_sink::{self, NotificationSink};
use crate::services::timer_source::{TickCallback, TimerHandle, TimerSource};

/// What to tell the user when a countdown is cancelled before activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CountdownCancelNotice {
    /// Reuse the "SOS Deactivated" notice, as the mobile client always has
    #[default]
    Deactivated,
    /// Send a distinct "SOS Cancelled" notice
    CountdownCancelled,
}

/// Alert controller settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSettings {
    pub countdown_seconds: u32,
    pub tick_interval: Duration,
    pub cancel_notice: CountdownCancelNotice,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            tick_interval: Duration::from_secs(1),
            cancel_notice: CountdownCancelNotice::default(),
        }
    }
}

/// Alert state for API responses and the trigger surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSnapshot {
    pub session_id: Option<Uuid>,
    pub phase: AlertPhase,
    pub remaining_seconds: u32,
    /// "SOS" or the remaining countdown digit
    pub label: String,
    pub is_active: bool,
    pub triggered_at: Option<DateTime<Utc>>,
    pub activated_at: Option<DateTime<Utc>>,
}

impl From<&AlertSession> for AlertSnapshot {
    fn from(session: &AlertSession) -> Self {
        Self {
            session_id: session.id,
            phase: session.phase,
            remaining_seconds: session.remaining_seconds,
            label: session.button_label(),
            is_active: session.is_active(),
            triggered_at: session.triggered_at,
            activated_at: session.activated_at,
        }
    }
}

struct ControllerState {
    session: AlertSession,
    timer: Option<Box<dyn TimerHandle>>,
}

impl ControllerState {
    fn stop_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }

    /// Session invariants, plus: a timer runs exactly while counting down
    fn check_invariants(&self) -> Result<(), AlertSessionError> {
        self.session.check_invariants()?;

        if self.timer.is_some() != (self.session.phase == AlertPhase::CountingDown) {
            return Err(AlertSessionError::TimerMismatch {
                phase: self.session.phase,
                running: self.timer.is_some(),
            });
        }

        Ok(())
    }
}

struct Shared {
    state: Mutex<ControllerState>,
    sink: Arc<dyn NotificationSink>,
    timers: Arc<dyn TimerSource>,
    settings: AlertSettings,
    snapshots: watch::Sender<AlertSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance the countdown. With `expected` set, only the named session
    /// may be advanced.
    fn advance(&self, expected: Option<Uuid>) -> AlertSnapshot {
        let mut state = self.lock();

        if expected.is_some() && state.session.id != expected {
            tracing::debug!(stale_session = ?expected, "Dropping tick for finished SOS session");
            return AlertSnapshot::from(&state.session);
        }

        let session_id = session_label(&state.session);
        let notification = match state.session.advance() {
            TickOutcome::Ignored => return AlertSnapshot::from(&state.session),
            TickOutcome::Counted(remaining) => {
                logging::log_alert_countdown(&session_id, remaining);
                None
            }
            TickOutcome::Activated => {
                state.stop_timer();
                logging::log_alert_transition(
                    &session_id,
                    AlertPhase::CountingDown,
                    AlertPhase::Active,
                );
                Some(Notification::sos_activated())
            }
        };

        self.publish(&state, notification)
    }

    /// Publish the current state. Callers hold the controller lock.
    fn publish(&self, state: &ControllerState, notification: Option<Notification>) -> AlertSnapshot {
        debug_assert!(state.check_invariants().is_ok());

        let snapshot = AlertSnapshot::from(&state.session);
        self.snapshots.send_replace(snapshot.clone());

        if let Some(notification) = notification {
            notification_sink::deliver(self.sink.as_ref(), &notification);
        }

        snapshot
    }
}

/// Owner of the single SOS session
#[derive(Clone)]
pub struct AlertController {
    shared: Arc<Shared>,
}

impl AlertController {
    /// Create an idle controller
    pub fn new(
        settings: AlertSettings,
        sink: Arc<dyn NotificationSink>,
        timers: Arc<dyn TimerSource>,
    ) -> Result<Self, AlertSessionError> {
        validate_countdown(settings.countdown_seconds)?;

        let session = AlertSession::new();
        let (snapshots, _) = watch::channel(AlertSnapshot::from(&session));

        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ControllerState {
                    session,
                    timer: None,
                }),
                sink,
                timers,
                settings,
                snapshots,
            }),
        })
    }

    pub fn settings(&self) -> &AlertSettings {
        &self.shared.settings
    }

    /// Current alert state
    pub fn snapshot(&self) -> AlertSnapshot {
        AlertSnapshot::from(&self.shared.lock().session)
    }

    /// Watch every state change
    pub fn subscribe(&self) -> watch::Receiver<AlertSnapshot> {
        self.shared.snapshots.subscribe()
    }

    /// Handle a press of the SOS trigger.
    ///
    /// Idle starts the countdown without a notification. A press during the
    /// countdown or while active returns to idle and notifies.
    pub fn trigger(&self) -> AlertSnapshot {
        let mut state = self.shared.lock();
        let session_id = session_label(&state.session);

        let notification = match state.session.phase {
            AlertPhase::Idle => {
                self.start_countdown(&mut state);
                None
            }
            AlertPhase::CountingDown => {
                state.stop_timer();
                state.session.reset();
                logging::log_alert_transition(
                    &session_id,
                    AlertPhase::CountingDown,
                    AlertPhase::Idle,
                );
                Some(match self.shared.settings.cancel_notice {
                    CountdownCancelNotice::Deactivated => Notification::sos_deactivated(),
                    CountdownCancelNotice::CountdownCancelled => {
                        Notification::sos_countdown_cancelled()
                    }
                })
            }
            AlertPhase::Active => {
                state.stop_timer();
                state.session.reset();
                logging::log_alert_transition(&session_id, AlertPhase::Active, AlertPhase::Idle);
                Some(Notification::sos_deactivated())
            }
        };

        self.shared.publish(&state, notification)
    }

    /// Advance the countdown by one second; a no-op unless counting down
    pub fn tick(&self) -> AlertSnapshot {
        self.shared.advance(None)
    }

    /// Stop any countdown and return to idle without notifying
    pub fn shutdown(&self) {
        let mut state = self.shared.lock();
        state.stop_timer();
        state.session.reset();
        self.shared.publish(&state, None);
    }

    /// Check the session and timer invariants against the current state
    pub fn check_invariants(&self) -> Result<(), AlertSessionError> {
        self.shared.lock().check_invariants()
    }

    fn start_countdown(&self, state: &mut ControllerState) {
        // Never leave two timers running
        state.stop_timer();

        let session_id = match state
            .session
            .begin_countdown(self.shared.settings.countdown_seconds)
        {
            Ok(id) => id,
            Err(err) => {
                logging::log_error(&err.to_string(), "start SOS countdown", None);
                return;
            }
        };

        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let on_tick: TickCallback = Arc::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.advance(Some(session_id));
            }
        });

        state.timer = Some(
            self.shared
                .timers
                .start(self.shared.settings.tick_interval, on_tick),
        );

        logging::log_alert_transition(
            &session_id.to_string(),
            AlertPhase::Idle,
            AlertPhase::CountingDown,
        );
    }
}

fn session_label(session: &AlertSession) -> String {
    session
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notification_sink::RecordingNotificationSink;
    use crate::services::timer_source::ManualTimerSource;
    use std::str::FromStr;

    fn controller() -> (AlertController, RecordingNotificationSink, ManualTimerSource) {
        let sink = RecordingNotificationSink::new();
        let timers = ManualTimerSource::new();
        let controller = AlertController::new(
            AlertSettings::default(),
            Arc::new(sink.clone()),
            Arc::new(timers.clone()),
        )
        .unwrap();
        (controller, sink, timers)
    }

    #[test]
    fn test_rejects_zero_countdown() {
        let settings = AlertSettings {
            countdown_seconds: 0,
            ..AlertSettings::default()
        };
        let result = AlertController::new(
            settings,
            Arc::new(RecordingNotificationSink::new()),
            Arc::new(ManualTimerSource::new()),
        );
        assert!(matches!(result, Err(AlertSessionError::InvalidCountdown(0))));
    }

    #[test]
    fn test_trigger_starts_countdown_with_timer() {
        let (controller, sink, timers) = controller();

        let snapshot = controller.trigger();
        assert_eq!(snapshot.phase, AlertPhase::CountingDown);
        assert_eq!(snapshot.remaining_seconds, 3);
        assert_eq!(snapshot.label, "3");
        assert_eq!(sink.count(), 0);
        assert_eq!(timers.live_count(), 1);
        assert_eq!(timers.last_period(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_timer_ticks_activate_alert() {
        let (controller, sink, timers) = controller();
        controller.trigger();

        timers.fire_times(3);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.phase, AlertPhase::Active);
        assert!(snapshot.is_active);
        assert_eq!(snapshot.label, "SOS");
        assert_eq!(sink.titles(), vec!["SOS Activated"]);
        assert!(timers.all_cancelled());
    }

    #[test]
    fn test_stale_tick_is_dropped() {
        let (controller, sink, timers) = controller();
        controller.trigger();

        // Keep a copy of the first session's callback alive past cancellation
        let stale = {
            let snapshot = controller.snapshot();
            let weak = Arc::downgrade(&controller.shared);
            let id = snapshot.session_id.unwrap();
            move || {
                if let Some(shared) = weak.upgrade() {
                    shared.advance(Some(id));
                }
            }
        };

        controller.trigger();
        controller.trigger();
        sink.clear();

        stale();
        stale();
        stale();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.phase, AlertPhase::CountingDown);
        assert_eq!(snapshot.remaining_seconds, 3);
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_distinct_cancel_notice() {
        let sink = RecordingNotificationSink::new();
        let controller = AlertController::new(
            AlertSettings {
                cancel_notice: CountdownCancelNotice::CountdownCancelled,
                ..AlertSettings::default()
            },
            Arc::new(sink.clone()),
            Arc::new(ManualTimerSource::new()),
        )
        .unwrap();

        controller.trigger();
        controller.trigger();

        assert_eq!(sink.titles(), vec!["SOS Cancelled"]);
    }

    #[test]
    fn test_invariants_hold_after_each_transition() {
        let (controller, _, timers) = controller();
        assert_eq!(controller.check_invariants(), Ok(()));

        controller.trigger();
        assert_eq!(controller.check_invariants(), Ok(()));

        timers.fire_times(3);
        assert_eq!(controller.check_invariants(), Ok(()));

        controller.trigger();
        assert_eq!(controller.check_invariants(), Ok(()));
    }

    #[test]
    fn test_timer_without_countdown_is_reported() {
        let (controller, _, timers) = controller();
        let stray = timers.start(Duration::from_secs(1), Arc::new(|| {}));
        controller.shared.lock().timer = Some(stray);

        assert!(matches!(
            controller.check_invariants(),
            Err(AlertSessionError::TimerMismatch { running: true, .. })
        ));
    }

    #[test]
    fn test_watch_and_sink_agree_after_activation() {
        let (controller, sink, timers) = controller();
        let updates = controller.subscribe();
        controller.trigger();
        timers.fire_times(3);

        assert!(updates.borrow().is_active);
        assert_eq!(sink.titles(), vec!["SOS Activated"]);
        assert_eq!(*updates.borrow(), controller.snapshot());
    }

    #[test]
    fn test_shutdown_is_silent() {
        let (controller, sink, timers) = controller();
        controller.trigger();
        controller.shutdown();

        assert_eq!(controller.snapshot().phase, AlertPhase::Idle);
        assert!(timers.all_cancelled());
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_subscribers_see_transitions() {
        let (controller, _, _) = controller();
        let receiver = controller.subscribe();

        controller.trigger();
        assert_eq!(receiver.borrow().phase, AlertPhase::CountingDown);

        controller.tick();
        assert_eq!(receiver.borrow().remaining_seconds, 2);
    }

    #[test]
    fn test_cancel_notice_parsing() {
        assert_eq!(
            CountdownCancelNotice::from_str("countdown-cancelled").unwrap(),
            CountdownCancelNotice::CountdownCancelled
        );
        assert_eq!(CountdownCancelNotice::Deactivated.to_string(), "deactivated");
    }
}
