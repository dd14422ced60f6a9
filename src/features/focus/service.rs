//! Long-lived focus session owned by the host application.
//!
//! [`FocusService`] wraps the state machine and performs its side effects:
//! completed intervals go to the [`RecordSink`], phase changes ring the
//! [`PhaseSignal`], and persistence failures become error toasts. A failed
//! save never rolls back the transition.

use chrono::{Local, TimeZone};
use tracing::{info, warn};

use super::clock::{Clock, SystemClock};
use super::machine::{FocusMachine, Phase, TimerState, Transition};
use super::record::RecordSink;
use super::report::completed_on_day;
use super::signal::PhaseSignal;
use crate::error::StudyError;
use crate::features::notify::{Notifier, Toast};

/// A transition after the service has handled it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseChange {
    /// What the machine did
    pub transition: Transition,
    /// Whether a completed focus interval reached the sink
    pub saved: bool,
}

/// Focus timer plus its collaborators.
pub struct FocusService<S: RecordSink, C: Clock = SystemClock> {
    machine: FocusMachine<C>,
    sink: S,
    signal: Box<dyn PhaseSignal>,
    notifier: Box<dyn Notifier>,
}

impl<S: RecordSink, C: Clock> FocusService<S, C> {
    /// Wire a machine to its collaborators.
    pub fn new(
        machine: FocusMachine<C>,
        sink: S,
        signal: Box<dyn PhaseSignal>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            machine,
            sink,
            signal,
            notifier,
        }
    }

    /// Current timer snapshot.
    #[must_use]
    pub const fn state(&self) -> &TimerState {
        self.machine.state()
    }

    /// The underlying state machine.
    #[must_use]
    pub const fn machine(&self) -> &FocusMachine<C> {
        &self.machine
    }

    /// The record sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Start or resume.
    pub fn start(&mut self) -> bool {
        self.machine.start()
    }

    /// Pause, cancelling any pending auto-resume.
    pub fn pause(&mut self) -> bool {
        self.machine.pause()
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self) {
        if self.machine.state().is_running {
            self.machine.pause();
        } else {
            self.machine.start();
        }
    }

    /// Back to idle; in-progress focus time is dropped.
    pub fn reset(&mut self) {
        let was_focus = self.machine.state().phase == Phase::Focus;
        self.machine.reset();
        if was_focus {
            self.notify(Toast::info(
                "Timer reset; unfinished focus time was not recorded",
            ));
        }
    }

    /// End the current phase now (only while running).
    pub fn skip(&mut self) -> Option<PhaseChange> {
        let transition = self.machine.skip()?;
        Some(self.handle_transition(transition))
    }

    /// Advance one second.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        let transition = self.machine.tick()?;
        Some(self.handle_transition(transition))
    }

    /// Fire a due auto-resume. Returns true if the timer resumed.
    pub fn poll(&mut self) -> bool {
        self.machine.poll()
    }

    /// Intervals completed today in local time.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be read.
    pub fn today_count(&self) -> Result<usize, StudyError> {
        self.completed_today_in(&Local)
    }

    /// Intervals completed on the machine clock's current day in `tz`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be read.
    pub fn completed_today_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<usize, StudyError> {
        let now = self.machine.clock().now().with_timezone(tz);
        completed_on_day(&self.sink, &now)
    }

    fn handle_transition(&mut self, transition: Transition) -> PhaseChange {
        self.signal.phase_ended(transition.ended, transition.next);

        let mut saved = false;
        if let Some(record) = &transition.record {
            let mut record = record.clone();
            match self.sink.save(&mut record) {
                Ok(()) => {
                    saved = true;
                    info!(
                        id = ?record.id,
                        seconds = record.duration_seconds(),
                        "focus interval saved"
                    );
                }
                Err(e) => {
                    warn!(error = %e, "failed to save focus interval");
                    self.notify(Toast::error(format!("Could not save focus interval: {e}")));
                }
            }
        }

        let minutes = self.machine.config().duration_of(transition.next) / 60;
        let message = format!(
            "{} finished. {} ({minutes} min) is up next",
            transition.ended, transition.next
        );
        self.notify(if saved {
            Toast::success(message)
        } else {
            Toast::info(message)
        });

        PhaseChange { transition, saved }
    }

    /// Send a toast stamped with the machine clock.
    fn notify(&mut self, toast: Toast) {
        let now = self.machine.clock().now();
        self.notifier.notify(toast.at(now));
    }
}
