//! Application state for the focus screen.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::warn;

use crate::features::focus::{
    Clock, FocusMachine, FocusService, PhaseChange, RecordSink, SystemClock, TimerState,
};
use crate::features::notify::{Toast, ToastQueue};

/// How long a toast stays in the status bar.
const TOAST_TTL_SECS: i64 = 5;

/// What the screen reports once it closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Focus intervals saved while the screen was open
    pub recorded_intervals: u32,
    /// Intervals completed today, including earlier sessions
    pub today_count: usize,
}

/// Application state.
pub struct App<S: RecordSink, C: Clock = SystemClock> {
    service: FocusService<S, C>,
    toasts: ToastQueue,
    /// When the next one-second tick is due while running.
    next_tick_at: Option<DateTime<Utc>>,
    /// Intervals completed today.
    pub today_count: usize,
    /// Focus intervals saved from this screen.
    pub recorded_intervals: u32,
    /// Whether the key help overlay is shown.
    pub show_help: bool,
}

impl<S: RecordSink, C: Clock> App<S, C> {
    /// Create a new app around a focus service.
    pub fn new(service: FocusService<S, C>, toasts: ToastQueue) -> Self {
        let today_count = service.today_count().unwrap_or_else(|e| {
            warn!(error = %e, "could not count today's intervals");
            0
        });

        Self {
            service,
            toasts,
            next_tick_at: None,
            today_count,
            recorded_intervals: 0,
            show_help: false,
        }
    }

    /// Current timer snapshot.
    pub const fn state(&self) -> &TimerState {
        self.service.state()
    }

    /// The focus state machine.
    pub const fn machine(&self) -> &FocusMachine<C> {
        self.service.machine()
    }

    /// Newest toast that has not expired.
    pub fn latest_toast(&self) -> Option<Toast> {
        self.toasts.latest(self.now(), Duration::seconds(TOAST_TTL_SECS))
    }

    /// Start or pause.
    pub fn toggle(&mut self) {
        self.service.toggle();
    }

    /// Skip the current phase.
    pub fn skip(&mut self) {
        if let Some(change) = self.service.skip() {
            self.on_phase_change(&change);
        }
    }

    /// Back to idle.
    pub fn reset(&mut self) {
        self.service.reset();
        self.next_tick_at = None;
    }

    /// Show or hide the key help.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Fire a due auto-resume and one tick for each whole second elapsed.
    ///
    /// An auto-resumed phase counts its seconds from the resume deadline, so
    /// the delay is not added on top of the phase length.
    pub fn update(&mut self) {
        let now = self.now();
        let resume_at = self.service.machine().auto_resume_at();
        if self.service.poll() {
            self.next_tick_at = resume_at;
        }

        while self.service.state().is_running {
            let due = *self
                .next_tick_at
                .get_or_insert_with(|| now + Duration::seconds(1));
            if now < due {
                break;
            }
            self.next_tick_at = Some(due + Duration::seconds(1));
            if let Some(change) = self.service.tick() {
                self.on_phase_change(&change);
            }
        }

        if !self.service.state().is_running {
            self.next_tick_at = None;
        }

        self.toasts.prune(now, Duration::seconds(TOAST_TTL_SECS));
    }

    /// Summary for the caller once the screen closes.
    pub const fn summary(&self) -> SessionSummary {
        SessionSummary {
            recorded_intervals: self.recorded_intervals,
            today_count: self.today_count,
        }
    }

    fn on_phase_change(&mut self, change: &PhaseChange) {
        if !change.saved {
            return;
        }
        self.recorded_intervals += 1;
        match self.service.today_count() {
            Ok(count) => self.today_count = count,
            Err(e) => warn!(error = %e, "could not count today's intervals"),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.service.machine().clock().now()
    }
}
