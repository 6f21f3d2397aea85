//! Timer Source Trait and Implementations
//!
//! Supplies the repeating once-per-second callback that drives the SOS
//! countdown. Every started timer hands back a handle that the owner must
//! cancel on exit from the countdown.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Callback invoked on every timer period
pub type TickCallback = Arc<dyn Fn() + Send + Sync>;

/// Handle to a running timer
pub trait TimerHandle: Send {
    /// Stop the timer; no callback is delivered after this returns
    fn cancel(&mut self);

    fn is_cancelled(&self) -> bool;
}

/// Trait for starting repeating timers
pub trait TimerSource: Send + Sync {
    /// Start a timer that calls `on_tick` once per `period`, first call one
    /// period from now
    fn start(&self, period: Duration, on_tick: TickCallback) -> Box<dyn TimerHandle>;
}

/// Timer source backed by the tokio runtime
#[derive(Debug, Clone, Default)]
pub struct TokioTimerSource;

impl TokioTimerSource {
    pub fn new() -> Self {
        Self
    }
}

impl TimerSource for TokioTimerSource {
    fn start(&self, period: Duration, on_tick: TickCallback) -> Box<dyn TimerHandle> {
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                on_tick();
            }
        });

        Box::new(TokioTimerHandle {
            task: Some(task),
        })
    }
}

/// Handle for a timer spawned on tokio
#[derive(Debug)]
pub struct TokioTimerHandle {
    task: Option<JoinHandle<()>>,
}

impl TimerHandle for TokioTimerHandle {
    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn is_cancelled(&self) -> bool {
        self.task.is_none()
    }
}

impl Drop for TokioTimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Default)]
struct ManualTimer {
    on_tick: Option<TickCallback>,
    period: Duration,
}

/// Deterministic timer source for tests: ticks are delivered only by `fire()`
#[derive(Clone, Default)]
pub struct ManualTimerSource {
    timers: Arc<Mutex<Vec<ManualTimer>>>,
}

impl ManualTimerSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one tick to every live timer, returning how many fired
    pub fn fire(&self) -> usize {
        // Callbacks run outside the lock so they may start or cancel timers
        let callbacks: Vec<TickCallback> = self
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(|timer| timer.on_tick.clone())
            .collect();

        for callback in &callbacks {
            callback();
        }

        callbacks.len()
    }

    /// Fire `count` ticks in a row
    pub fn fire_times(&self, count: usize) {
        for _ in 0..count {
            self.fire();
        }
    }

    /// Number of timers ever started
    pub fn started_count(&self) -> usize {
        self.lock().len()
    }

    /// Number of timers not yet cancelled
    pub fn live_count(&self) -> usize {
        self.lock().iter().filter(|t| t.on_tick.is_some()).count()
    }

    /// Whether every started timer has been cancelled
    pub fn all_cancelled(&self) -> bool {
        self.live_count() == 0
    }

    /// Period requested by the most recent timer
    pub fn last_period(&self) -> Option<Duration> {
        self.lock().last().map(|t| t.period)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ManualTimer>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TimerSource for ManualTimerSource {
    fn start(&self, period: Duration, on_tick: TickCallback) -> Box<dyn TimerHandle> {
        let mut timers = self.lock();
        timers.push(ManualTimer {
            on_tick: Some(on_tick),
            period,
        });

        Box::new(ManualTimerHandle {
            timers: self.timers.clone(),
            index: timers.len() - 1,
            cancelled: false,
        })
    }
}

/// Handle returned by `ManualTimerSource`
pub struct ManualTimerHandle {
    timers: Arc<Mutex<Vec<ManualTimer>>>,
    index: usize,
    cancelled: bool,
}

impl TimerHandle for ManualTimerHandle {
    fn cancel(&mut self) {
        let mut timers = self.timers.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = timers.get_mut(self.index) {
            timer.on_tick = None;
        }
        self.cancelled = true;
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
