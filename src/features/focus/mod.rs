//! Pomodoro focus timer.
//!
//! The timer cycles focus, short break and long break phases:
//! - [`FocusMachine`] holds the pure state machine, driven by one tick per second
//! - [`FocusService`] wires it to record storage, the phase-end cue and toasts
//! - [`FocusReport`] summarises the stored history

pub mod clock;
pub mod format;
pub mod machine;
pub mod record;
pub mod report;
pub mod service;
pub mod signal;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use format::{format_clock, format_duration, parse_duration};
pub use machine::{FocusMachine, Phase, SessionConfig, TimerState, Transition};
pub use record::{CompletedFocusRecord, MemoryRecords, RecordSink};
pub use report::{FocusReport, ReportPeriod};
pub use service::{FocusService, PhaseChange};
pub use signal::{PhaseSignal, Silent, TerminalBell};
pub use storage::FocusStorage;
