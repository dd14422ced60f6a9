//! Event handling for the focus screen.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::StudyError;

/// How long to wait for input before the loop turns over.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or pause the timer.
    Toggle,
    /// End the current phase now.
    Skip,
    /// Return to idle.
    Reset,
    /// Show or hide key help.
    Help,
}

/// Map a key press to an action.
#[must_use]
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
        KeyCode::Char('s') => Some(Action::Skip),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}

/// Wait briefly for a terminal event.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn next_action() -> Result<Option<Action>, StudyError> {
    if !event::poll(POLL_INTERVAL)
        .map_err(|e| StudyError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    match event::read().map_err(|e| StudyError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) => Ok(action_for(key)),
        _ => Ok(None),
    }
}
