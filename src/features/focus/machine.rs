//! Pomodoro phase state machine.
//!
//! The machine owns the phase cycle (idle → focus → short/long break →
//! focus → …) and nothing else. It never performs I/O: completing a focus
//! phase hands a [`CompletedFocusRecord`] back to the caller inside a
//! [`Transition`], and the caller decides what to do with it.
//!
//! After every expiry the next phase starts paused and resumes on its own
//! once `auto_resume_delay` has passed. The pending resume is a stored
//! deadline, so `pause` or `reset` inside the window cancels it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::record::CompletedFocusRecord;
use crate::error::StudyError;

/// Delay before the next phase starts after an expiry.
pub const DEFAULT_AUTO_RESUME_DELAY_SECS: i64 = 1;

/// Timer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not started, or reset
    Idle,
    /// Working
    Focus,
    /// Break between focus intervals
    ShortBreak,
    /// Break after every Nth focus interval
    LongBreak,
}

impl Phase {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Focus => "Focus",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Check if this is a break phase.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Durations for one timer run.
///
/// Deserializing goes through [`SessionConfig::new`], so a loaded value is
/// always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionConfig")]
pub struct SessionConfig {
    focus_duration_seconds: u32,
    short_break_duration_seconds: u32,
    long_break_duration_seconds: u32,
    intervals_before_long_break: u32,
}

impl SessionConfig {
    /// Validate and build a session configuration.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::InvalidConfig` if any duration is zero or
    /// `intervals_before_long_break` is zero.
    pub fn new(
        focus_duration_seconds: u32,
        short_break_duration_seconds: u32,
        long_break_duration_seconds: u32,
        intervals_before_long_break: u32,
    ) -> Result<Self, StudyError> {
        let checks = [
            ("focus duration", focus_duration_seconds),
            ("short break duration", short_break_duration_seconds),
            ("long break duration", long_break_duration_seconds),
        ];
        for (name, seconds) in checks {
            if seconds == 0 {
                return Err(StudyError::InvalidConfig(format!(
                    "{name} must be greater than zero"
                )));
            }
        }
        if intervals_before_long_break == 0 {
            return Err(StudyError::InvalidConfig(
                "intervals before long break must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            focus_duration_seconds,
            short_break_duration_seconds,
            long_break_duration_seconds,
            intervals_before_long_break,
        })
    }

    /// Focus phase length in seconds.
    #[must_use]
    pub const fn focus_duration_seconds(&self) -> u32 {
        self.focus_duration_seconds
    }

    /// Short break length in seconds.
    #[must_use]
    pub const fn short_break_duration_seconds(&self) -> u32 {
        self.short_break_duration_seconds
    }

    /// Long break length in seconds.
    #[must_use]
    pub const fn long_break_duration_seconds(&self) -> u32 {
        self.long_break_duration_seconds
    }

    /// Focus intervals per long break.
    #[must_use]
    pub const fn intervals_before_long_break(&self) -> u32 {
        self.intervals_before_long_break
    }

    /// Configured length of `phase` in seconds (0 for idle).
    #[must_use]
    pub const fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Idle => 0,
            Phase::Focus => self.focus_duration_seconds,
            Phase::ShortBreak => self.short_break_duration_seconds,
            Phase::LongBreak => self.long_break_duration_seconds,
        }
    }
}

#[derive(Deserialize)]
struct RawSessionConfig {
    focus_duration_seconds: u32,
    short_break_duration_seconds: u32,
    long_break_duration_seconds: u32,
    intervals_before_long_break: u32,
}

impl TryFrom<RawSessionConfig> for SessionConfig {
    type Error = StudyError;

    fn try_from(raw: RawSessionConfig) -> Result<Self, Self::Error> {
        Self::new(
            raw.focus_duration_seconds,
            raw.short_break_duration_seconds,
            raw.long_break_duration_seconds,
            raw.intervals_before_long_break,
        )
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            focus_duration_seconds: 25 * 60,
            short_break_duration_seconds: 5 * 60,
            long_break_duration_seconds: 15 * 60,
            intervals_before_long_break: 4,
        }
    }
}

/// Snapshot of the timer, read by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current phase
    pub phase: Phase,
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Focus phases completed since the last reset
    pub completed_interval_count: u32,
    /// Whether ticks count down
    pub is_running: bool,
    /// When the current focus phase began (only while in focus)
    pub current_focus_started_at: Option<DateTime<Utc>>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            remaining_seconds: 0,
            completed_interval_count: 0,
            is_running: false,
            current_focus_started_at: None,
        }
    }
}

/// Result of a phase expiring, naturally or by skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Phase that just ended
    pub ended: Phase,
    /// Phase that now begins
    pub next: Phase,
    /// Record to persist when a focus phase ended
    pub record: Option<CompletedFocusRecord>,
}

/// The focus session state machine.
#[derive(Debug)]
pub struct FocusMachine<C: Clock = SystemClock> {
    config: SessionConfig,
    state: TimerState,
    clock: C,
    auto_resume_delay: Duration,
    auto_resume_at: Option<DateTime<Utc>>,
}

impl<C: Clock> FocusMachine<C> {
    /// Create an idle machine.
    #[must_use]
    pub fn new(config: SessionConfig, clock: C) -> Self {
        Self {
            config,
            state: TimerState::default(),
            clock,
            auto_resume_delay: Duration::seconds(DEFAULT_AUTO_RESUME_DELAY_SECS),
            auto_resume_at: None,
        }
    }

    /// Set how long the machine waits before starting the next phase.
    ///
    /// A zero delay starts the next phase immediately.
    #[must_use]
    pub fn with_auto_resume_delay(mut self, delay: Duration) -> Self {
        self.auto_resume_delay = delay.max(Duration::zero());
        self
    }

    /// Current snapshot.
    #[must_use]
    pub const fn state(&self) -> &TimerState {
        &self.state
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The machine's clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Deadline of a pending auto-resume, if any.
    #[must_use]
    pub const fn auto_resume_at(&self) -> Option<DateTime<Utc>> {
        self.auto_resume_at
    }

    /// Start from idle, or resume a paused phase.
    ///
    /// Resuming a focus phase keeps its original start time. Returns false
    /// when already running.
    pub fn start(&mut self) -> bool {
        if self.state.phase == Phase::Idle {
            self.state.phase = Phase::Focus;
            self.state.remaining_seconds = self.config.focus_duration_seconds;
            self.state.current_focus_started_at = Some(self.clock.now());
            self.state.is_running = true;
            self.auto_resume_at = None;
            debug!("focus started");
            return true;
        }

        if self.state.is_running {
            return false;
        }

        self.state.is_running = true;
        self.auto_resume_at = None;
        debug!(phase = %self.state.phase, "resumed");
        true
    }

    /// Stop counting down. Cancels a pending auto-resume.
    ///
    /// Returns true if anything changed.
    pub fn pause(&mut self) -> bool {
        let changed = self.state.is_running || self.auto_resume_at.is_some();
        self.state.is_running = false;
        self.auto_resume_at = None;
        if changed {
            debug!(phase = %self.state.phase, "paused");
        }
        changed
    }

    /// Return to idle, discarding any in-progress focus time.
    pub fn reset(&mut self) {
        self.state = TimerState::default();
        self.auto_resume_at = None;
        debug!("reset");
    }

    /// Fire a pending auto-resume if its deadline has passed.
    ///
    /// Returns true if the timer resumed.
    pub fn poll(&mut self) -> bool {
        match self.auto_resume_at {
            Some(deadline) if self.clock.now() >= deadline => {
                self.auto_resume_at = None;
                self.state.is_running = true;
                debug!(phase = %self.state.phase, "auto-resumed");
                true
            }
            _ => false,
        }
    }

    /// Advance one second.
    pub fn tick(&mut self) -> Option<Transition> {
        self.poll();

        if !self.state.is_running || self.state.phase == Phase::Idle {
            return None;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds == 0 {
            self.expire()
        } else {
            None
        }
    }

    /// End the current phase now. Ignored unless running.
    pub fn skip(&mut self) -> Option<Transition> {
        if !self.state.is_running {
            return None;
        }
        self.expire()
    }

    /// Break that will follow the current focus interval.
    #[must_use]
    pub const fn next_break_kind(&self) -> Phase {
        if (self.state.completed_interval_count + 1) % self.config.intervals_before_long_break == 0
        {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }

    /// Focus intervals left before the next long break, counting the current one.
    #[must_use]
    pub const fn intervals_until_long_break(&self) -> u32 {
        let n = self.config.intervals_before_long_break;
        n - self.state.completed_interval_count % n
    }

    /// Fraction of the current phase that has elapsed (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.config.duration_of(self.state.phase);
        if total == 0 {
            return 0.0;
        }
        1.0 - f64::from(self.state.remaining_seconds) / f64::from(total)
    }

    fn expire(&mut self) -> Option<Transition> {
        let now = self.clock.now();
        let ended = self.state.phase;

        let (next, record) = match ended {
            Phase::Idle => return None,
            Phase::Focus => {
                let started_at = self.state.current_focus_started_at.take().unwrap_or(now);
                self.state.completed_interval_count += 1;
                let next = if self.state.completed_interval_count
                    % self.config.intervals_before_long_break
                    == 0
                {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                };
                let record = CompletedFocusRecord::new(started_at, now);
                if record.is_none() {
                    debug!("zero-length focus interval, no record");
                }
                (next, record)
            }
            Phase::ShortBreak | Phase::LongBreak => {
                self.state.current_focus_started_at = Some(now);
                (Phase::Focus, None)
            }
        };

        self.state.phase = next;
        self.state.remaining_seconds = self.config.duration_of(next);
        self.state.is_running = false;

        if self.auto_resume_delay <= Duration::zero() {
            self.state.is_running = true;
            self.auto_resume_at = None;
        } else {
            self.auto_resume_at = Some(now + self.auto_resume_delay);
        }

        debug!(
            %ended,
            %next,
            completed = self.state.completed_interval_count,
            "phase expired"
        );

        Some(Transition {
            ended,
            next,
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::clock::ManualClock;
    use chrono::TimeZone;

    fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
    }

    fn scenario_config() -> SessionConfig {
        SessionConfig::new(1500, 300, 900, 4).unwrap()
    }

    fn machine(config: SessionConfig) -> FocusMachine<ManualClock> {
        FocusMachine::new(config, ManualClock::new(start_time()))
            .with_auto_resume_delay(Duration::zero())
    }

    fn tick_secs(m: &mut FocusMachine<ManualClock>, ticks: u32) -> Vec<Transition> {
        let mut transitions = Vec::new();
        for _ in 0..ticks {
            m.clock().advance_secs(1);
            if let Some(t) = m.tick() {
                transitions.push(t);
            }
        }
        transitions
    }

    fn tick_until_transition(m: &mut FocusMachine<ManualClock>) -> Transition {
        loop {
            m.clock().advance_secs(1);
            if let Some(t) = m.tick() {
                return t;
            }
        }
    }

    #[test]
    fn test_session_config_rejects_zero_values() {
        assert!(SessionConfig::new(0, 300, 900, 4).is_err());
        assert!(SessionConfig::new(1500, 0, 900, 4).is_err());
        assert!(SessionConfig::new(1500, 300, 0, 4).is_err());
        assert!(matches!(
            SessionConfig::new(1500, 300, 900, 0),
            Err(StudyError::InvalidConfig(_))
        ));
        assert!(SessionConfig::new(1, 1, 1, 1).is_ok());
    }

    #[test]
    fn test_session_config_deserialize_validates() {
        let zero_intervals = r#"{
            "focus_duration_seconds": 1500,
            "short_break_duration_seconds": 300,
            "long_break_duration_seconds": 900,
            "intervals_before_long_break": 0
        }"#;
        let err = serde_json::from_str::<SessionConfig>(zero_intervals).unwrap_err();
        assert!(err.to_string().contains("intervals before long break"));

        let json = serde_json::to_string(&scenario_config()).unwrap();
        let config: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, scenario_config());
    }

    #[test]
    fn test_session_config_duration_of() {
        let config = scenario_config();
        assert_eq!(config.duration_of(Phase::Idle), 0);
        assert_eq!(config.duration_of(Phase::Focus), 1500);
        assert_eq!(config.duration_of(Phase::ShortBreak), 300);
        assert_eq!(config.duration_of(Phase::LongBreak), 900);
    }

    #[test]
    fn test_new_machine_is_idle() {
        let m = machine(scenario_config());
        assert_eq!(m.state(), &TimerState::default());
        assert_eq!(m.state().phase, Phase::Idle);
        assert_eq!(m.state().remaining_seconds, 0);
    }

    #[test]
    fn test_start_from_idle() {
        let mut m = machine(scenario_config());
        assert!(m.start());

        let state = m.state();
        assert_eq!(state.phase, Phase::Focus);
        assert_eq!(state.remaining_seconds, 1500);
        assert!(state.is_running);
        assert_eq!(state.current_focus_started_at, Some(start_time()));
    }

    #[test]
    fn test_tick_is_noop_when_idle_or_paused() {
        let mut m = machine(scenario_config());
        assert!(m.tick().is_none());
        assert_eq!(m.state().remaining_seconds, 0);

        m.start();
        m.pause();
        tick_secs(&mut m, 10);
        assert_eq!(m.state().remaining_seconds, 1500);
    }

    #[test]
    fn test_resume_preserves_focus_start() {
        let mut m = machine(scenario_config());
        m.start();
        tick_secs(&mut m, 100);
        m.pause();
        m.clock().advance_secs(600);
        assert!(m.start());

        assert_eq!(m.state().current_focus_started_at, Some(start_time()));
        assert_eq!(m.state().remaining_seconds, 1400);
    }

    // P5
    #[test]
    fn test_pause_and_start_are_idempotent() {
        let mut m = machine(scenario_config());
        m.start();
        tick_secs(&mut m, 5);

        assert!(m.pause());
        let once = m.state().clone();
        assert!(!m.pause());
        assert_eq!(m.state(), &once);

        assert!(m.start());
        let running = m.state().clone();
        assert!(!m.start());
        assert_eq!(m.state(), &running);
    }

    // Scenario A
    #[test]
    fn test_first_focus_expires_into_short_break() {
        let mut m = machine(scenario_config());
        m.start();

        let transitions = tick_secs(&mut m, 1500);

        assert_eq!(transitions.len(), 1);
        assert_eq!(m.state().phase, Phase::ShortBreak);
        assert_eq!(m.state().remaining_seconds, 300);
        assert_eq!(m.state().completed_interval_count, 1);
        assert!(m.state().current_focus_started_at.is_none());

        let record = transitions[0].record.as_ref().unwrap();
        assert_eq!(record.duration_seconds(), 1500);
        assert_eq!(record.started_at, start_time());
    }

    // Scenario B
    #[test]
    fn test_fourth_break_is_long() {
        let mut m = machine(scenario_config());
        m.start();

        let mut breaks = Vec::new();
        for _ in 0..4 {
            let focus_end = tick_until_transition(&mut m);
            assert_eq!(focus_end.ended, Phase::Focus);
            breaks.push(focus_end.next);
            if breaks.len() < 4 {
                let break_end = tick_until_transition(&mut m);
                assert_eq!(break_end.next, Phase::Focus);
            }
        }

        assert_eq!(
            breaks,
            vec![
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak
            ]
        );
        assert_eq!(m.state().phase, Phase::LongBreak);
        assert_eq!(m.state().remaining_seconds, 900);
        assert_eq!(m.state().completed_interval_count, 4);
    }

    // P1
    #[test]
    fn test_phase_cycle_order() {
        let config = SessionConfig::new(3, 2, 5, 3).unwrap();
        let mut m = machine(config);
        m.start();

        let mut phases = vec![m.state().phase];
        while phases.len() < 6 {
            let t = tick_until_transition(&mut m);
            phases.push(t.next);
        }

        assert_eq!(
            phases,
            vec![
                Phase::Focus,
                Phase::ShortBreak,
                Phase::Focus,
                Phase::ShortBreak,
                Phase::Focus,
                Phase::LongBreak
            ]
        );
    }

    #[test]
    fn test_single_interval_config_always_long_break() {
        let config = SessionConfig::new(2, 1, 3, 1).unwrap();
        let mut m = machine(config);
        m.start();

        for _ in 0..3 {
            assert_eq!(tick_until_transition(&mut m).next, Phase::LongBreak);
            assert_eq!(tick_until_transition(&mut m).next, Phase::Focus);
        }
    }

    // P2, P3
    #[test]
    fn test_one_record_per_focus_completion() {
        let config = SessionConfig::new(60, 10, 20, 2).unwrap();
        let mut m = machine(config);
        m.start();

        let transitions = tick_secs(&mut m, 60 + 10 + 60 + 20 + 60);
        let records: Vec<_> = transitions.iter().filter_map(|t| t.record.clone()).collect();

        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.duration_seconds(), 60);
        }
        for t in &transitions {
            assert_eq!(t.record.is_some(), t.ended == Phase::Focus);
        }

        assert_eq!(m.state().completed_interval_count, 3);
    }

    #[test]
    fn test_counter_increments_by_one_per_focus() {
        let config = SessionConfig::new(5, 3, 4, 4).unwrap();
        let mut m = machine(config);
        m.start();

        let mut previous = 0;
        for _ in 0..200 {
            m.clock().advance_secs(1);
            let t = m.tick();
            let count = m.state().completed_interval_count;
            match t {
                Some(Transition {
                    ended: Phase::Focus,
                    ..
                }) => assert_eq!(count, previous + 1),
                _ => assert_eq!(count, previous),
            }
            previous = count;
        }
    }

    // P4
    #[test]
    fn test_remaining_within_phase_bounds() {
        let config = SessionConfig::new(7, 3, 11, 2).unwrap();
        let mut m = FocusMachine::new(config, ManualClock::new(start_time()));
        m.start();

        for i in 0..500 {
            m.clock().advance_secs(1);
            if i % 37 == 0 {
                m.skip();
            }
            m.tick();
            let state = m.state();
            assert!(state.remaining_seconds <= config.duration_of(state.phase));
            assert!(state.remaining_seconds <= 11);
            assert_eq!(
                state.current_focus_started_at.is_some(),
                state.phase == Phase::Focus
            );
        }
    }

    // Scenario C
    #[test]
    fn test_reset_mid_focus_discards_interval() {
        let mut m = machine(scenario_config());
        m.start();
        let transitions = tick_secs(&mut m, 10);
        m.reset();

        assert!(transitions.is_empty());
        assert_eq!(m.state().phase, Phase::Idle);
        assert_eq!(m.state().completed_interval_count, 0);
        assert_eq!(m.state().remaining_seconds, 0);
        assert!(!m.state().is_running);
        assert!(m.state().current_focus_started_at.is_none());
    }

    #[test]
    fn test_reset_clears_counter() {
        let config = SessionConfig::new(2, 2, 2, 4).unwrap();
        let mut m = machine(config);
        m.start();
        tick_secs(&mut m, 2);
        assert_eq!(m.state().completed_interval_count, 1);

        m.reset();
        assert_eq!(m.state().completed_interval_count, 0);
    }

    // Scenario D
    #[test]
    fn test_skip_mid_focus_records_elapsed_time() {
        let mut m = machine(scenario_config());
        m.start();
        tick_secs(&mut m, 700);
        assert_eq!(m.state().remaining_seconds, 800);

        let t = m.skip().unwrap();

        assert_eq!(t.ended, Phase::Focus);
        assert_eq!(t.next, Phase::ShortBreak);
        assert_eq!(t.record.unwrap().duration_seconds(), 700);
        assert_eq!(m.state().remaining_seconds, 300);
        assert_eq!(m.state().completed_interval_count, 1);
    }

    #[test]
    fn test_skip_ignored_when_not_running() {
        let mut m = machine(scenario_config());
        assert!(m.skip().is_none());

        m.start();
        m.pause();
        assert!(m.skip().is_none());
        assert_eq!(m.state().phase, Phase::Focus);
    }

    #[test]
    fn test_skip_break_starts_focus() {
        let mut m = machine(scenario_config());
        m.start();
        tick_secs(&mut m, 1500);
        m.clock().advance_secs(20);

        let t = m.skip().unwrap();
        assert_eq!(t.ended, Phase::ShortBreak);
        assert_eq!(t.next, Phase::Focus);
        assert!(t.record.is_none());
        assert_eq!(m.state().current_focus_started_at, Some(m.clock().now()));
    }

    #[test]
    fn test_skip_at_same_instant_has_no_record() {
        let mut m = machine(scenario_config());
        m.start();
        let t = m.skip().unwrap();
        assert!(t.record.is_none());
        assert_eq!(m.state().completed_interval_count, 1);
    }

    #[test]
    fn test_auto_resume_after_delay() {
        let config = SessionConfig::new(3, 5, 5, 4).unwrap();
        let mut m = FocusMachine::new(config, ManualClock::new(start_time()));
        m.start();
        tick_secs(&mut m, 3);

        assert_eq!(m.state().phase, Phase::ShortBreak);
        assert!(!m.state().is_running);
        assert!(m.auto_resume_at().is_some());
        assert!(!m.poll());

        m.clock().advance_secs(1);
        assert!(m.poll());
        assert!(m.state().is_running);
        assert!(m.auto_resume_at().is_none());
    }

    #[test]
    fn test_tick_fires_due_auto_resume() {
        let config = SessionConfig::new(3, 5, 5, 4).unwrap();
        let mut m = FocusMachine::new(config, ManualClock::new(start_time()));
        m.start();
        tick_secs(&mut m, 3);

        tick_secs(&mut m, 1);
        assert!(m.state().is_running);
        assert_eq!(m.state().remaining_seconds, 4);
    }

    #[test]
    fn test_pause_cancels_pending_auto_resume() {
        let config = SessionConfig::new(3, 5, 5, 4).unwrap();
        let mut m = FocusMachine::new(config, ManualClock::new(start_time()));
        m.start();
        tick_secs(&mut m, 3);

        assert!(m.pause());
        m.clock().advance_secs(5);
        assert!(!m.poll());
        assert!(!m.state().is_running);
        assert_eq!(m.state().remaining_seconds, 5);
    }

    #[test]
    fn test_reset_cancels_pending_auto_resume() {
        let config = SessionConfig::new(3, 5, 5, 4).unwrap();
        let mut m = FocusMachine::new(config, ManualClock::new(start_time()));
        m.start();
        tick_secs(&mut m, 3);

        m.reset();
        m.clock().advance_secs(5);
        assert!(!m.poll());
        assert_eq!(m.state().phase, Phase::Idle);
        assert!(!m.state().is_running);
    }

    #[test]
    fn test_start_during_pending_resumes_immediately() {
        let config = SessionConfig::new(3, 5, 5, 4).unwrap();
        let mut m = FocusMachine::new(config, ManualClock::new(start_time()));
        m.start();
        tick_secs(&mut m, 3);

        assert!(m.start());
        assert!(m.state().is_running);
        assert!(m.auto_resume_at().is_none());
    }

    #[test]
    fn test_next_break_kind() {
        let config = SessionConfig::new(1, 1, 1, 3).unwrap();
        let mut m = machine(config);
        m.start();

        assert_eq!(m.next_break_kind(), Phase::ShortBreak);
        assert_eq!(m.intervals_until_long_break(), 3);

        tick_until_transition(&mut m);
        tick_until_transition(&mut m);
        assert_eq!(m.next_break_kind(), Phase::ShortBreak);
        assert_eq!(m.intervals_until_long_break(), 2);

        tick_until_transition(&mut m);
        tick_until_transition(&mut m);
        assert_eq!(m.next_break_kind(), Phase::LongBreak);
        assert_eq!(m.intervals_until_long_break(), 1);
    }

    #[test]
    fn test_progress() {
        let config = SessionConfig::new(100, 10, 10, 4).unwrap();
        let mut m = machine(config);
        assert_eq!(m.progress(), 0.0);

        m.start();
        tick_secs(&mut m, 50);
        assert!((m.progress() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_system_clock_ticks_count_down() {
        let mut m = FocusMachine::new(scenario_config(), SystemClock);
        m.start();
        for _ in 0..10 {
            assert!(m.tick().is_none());
        }
        assert_eq!(m.state().remaining_seconds, 1490);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::ShortBreak.to_string(), "Short Break");
        assert!(Phase::LongBreak.is_break());
        assert!(!Phase::Focus.is_break());
    }
}
