//! Alert Session Model
//!
//! Represents one SOS session: the grace countdown that follows a trigger
//! press and the active alert that follows it. Transitions here are pure;
//! timers and notifications are owned by the alert controller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Default grace period between trigger press and activation
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 3;

/// Upper bound accepted for a configured countdown
pub const MAX_COUNTDOWN_SECONDS: u32 = 60;

/// Label shown on the trigger while no countdown is running
pub const IDLE_LABEL: &str = "SOS";

/// Lifecycle phase of the SOS trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "camelCase")]
pub enum AlertPhase {
    #[default]
    Idle,
    CountingDown,
    Active,
}

/// Result of advancing a session by one second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session was not counting down; nothing changed
    Ignored,
    /// Countdown moved on and this many seconds remain
    Counted(u32),
    /// Countdown reached zero and the alert is now active
    Activated,
}

/// One SOS session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlertSession {
    /// Identifier of the current session, assigned on entry to the countdown
    pub id: Option<Uuid>,

    pub phase: AlertPhase,

    /// Seconds left before activation; zero outside the countdown
    pub remaining_seconds: u32,

    /// When the trigger was pressed
    pub triggered_at: Option<DateTime<Utc>>,

    /// When the countdown completed
    pub activated_at: Option<DateTime<Utc>>,
}

impl AlertSession {
    /// Create an idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the countdown with a fresh session id and return that id
    pub fn begin_countdown(&mut self, seconds: u32) -> Result<Uuid, AlertSessionError> {
        validate_countdown(seconds)?;

        if self.phase != AlertPhase::Idle {
            return Err(AlertSessionError::InvalidTransition {
                from: self.phase,
                to: AlertPhase::CountingDown,
            });
        }

        let id = Uuid::new_v4();
        *self = Self {
            id: Some(id),
            phase: AlertPhase::CountingDown,
            remaining_seconds: seconds,
            triggered_at: Some(Utc::now()),
            activated_at: None,
        };

        Ok(id)
    }

    /// Advance the countdown by one second
    pub fn advance(&mut self) -> TickOutcome {
        if self.phase != AlertPhase::CountingDown {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return TickOutcome::Counted(self.remaining_seconds);
        }

        self.phase = AlertPhase::Active;
        self.activated_at = Some(Utc::now());
        TickOutcome::Activated
    }

    /// Return to idle, discarding the session
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the alert has been raised
    pub fn is_active(&self) -> bool {
        self.phase == AlertPhase::Active
    }

    /// Text rendered on the trigger: the remaining digit or "SOS"
    pub fn button_label(&self) -> String {
        if self.remaining_seconds > 0 {
            self.remaining_seconds.to_string()
        } else {
            IDLE_LABEL.to_string()
        }
    }

    /// Check that `remaining_seconds > 0` exactly when counting down
    pub fn check_invariants(&self) -> Result<(), AlertSessionError> {
        let counting = self.phase == AlertPhase::CountingDown;
        if counting != (self.remaining_seconds > 0) {
            return Err(AlertSessionError::InconsistentCountdown {
                phase: self.phase,
                remaining_seconds: self.remaining_seconds,
            });
        }

        if self.phase != AlertPhase::Idle && self.id.is_none() {
            return Err(AlertSessionError::MissingSessionId(self.phase));
        }

        Ok(())
    }
}

/// Validate a configured countdown length
pub fn validate_countdown(seconds: u32) -> Result<(), AlertSessionError> {
    if seconds == 0 || seconds > MAX_COUNTDOWN_SECONDS {
        return Err(AlertSessionError::InvalidCountdown(seconds));
    }
    Ok(())
}

/// Alert session errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlertSessionError {
    #[error("Countdown of {0} seconds is invalid (must be 1-60 seconds)")]
    InvalidCountdown(u32),

    #[error("Cannot move alert session from {from} to {to}")]
    InvalidTransition { from: AlertPhase, to: AlertPhase },

    #[error("Alert session in {phase} has {remaining_seconds} seconds remaining")]
    InconsistentCountdown {
        phase: AlertPhase,
        remaining_seconds: u32,
    },

    #[error("Alert session in {0} has no session id")]
    MissingSessionId(AlertPhase),

    #[error("Alert session in {phase} with countdown timer running: {running}")]
    TimerMismatch { phase: AlertPhase, running: bool },
}
