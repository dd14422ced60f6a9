//! "Phase ended" cue for the presentation layer.

use std::io::Write;

use super::machine::Phase;

/// Receives a cue every time a phase ends.
///
/// Carries no durable payload; implementations play a sound, flash the
/// screen, or do nothing.
pub trait PhaseSignal {
    /// A phase just ended and `next` begins.
    fn phase_ended(&mut self, ended: Phase, next: Phase);
}

/// Rings the terminal bell.
#[derive(Debug, Clone, Copy)]
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl PhaseSignal for TerminalBell {
    fn phase_ended(&mut self, ended: Phase, next: Phase) {
        tracing::debug!(%ended, %next, bell = self.enabled, "phase ended");
        if !self.enabled {
            return;
        }
        let mut stdout = std::io::stdout();
        // bell errors are ignored
        let _ = stdout.write_all(b"\x07").and_then(|()| stdout.flush());
    }
}

/// Ignores every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl PhaseSignal for Silent {
    fn phase_ended(&mut self, _ended: Phase, _next: Phase) {}
}
