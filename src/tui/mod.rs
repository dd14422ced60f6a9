//! Terminal focus screen.
//!
//! Full-screen Pomodoro timer built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, SessionSummary};

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::StudyError;
use crate::features::focus::{Clock, FocusService, RecordSink};
use crate::features::notify::ToastQueue;

/// Run the focus screen until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal fails to initialize or draw.
pub fn run<S: RecordSink, C: Clock>(
    service: FocusService<S, C>,
    toasts: ToastQueue,
) -> Result<SessionSummary, StudyError> {
    enable_raw_mode()
        .map_err(|e| StudyError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(StudyError::Terminal(format!("Failed to setup terminal: {e}")));
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            disable_raw_mode().ok();
            execute!(io::stdout(), LeaveAlternateScreen).ok();
            return Err(StudyError::Terminal(format!("Failed to create terminal: {e}")));
        }
    };

    let mut app = App::new(service, toasts);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.map(|()| app.summary())
}

/// Run the main application loop.
fn run_app<B: Backend, S: RecordSink, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<S, C>,
) -> Result<(), StudyError> {
    loop {
        app.update();

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| StudyError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::next_action()? {
            match action {
                event::Action::Quit => break,
                event::Action::Toggle => app.toggle(),
                event::Action::Skip => app.skip(),
                event::Action::Reset => app.reset(),
                event::Action::Help => app.toggle_help(),
            }
        }
    }

    Ok(())
}
