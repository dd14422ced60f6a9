//! UI rendering for the focus screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::features::focus::{format_clock, Clock, Phase, RecordSink};
use crate::features::notify::ToastLevel;
use crate::tui::app::App;

const KEY_HINTS: &str = "space:start/pause | s:skip | r:reset | ?:help | q:quit";

/// Render the application UI.
pub fn render<S: RecordSink, C: Clock>(frame: &mut Frame<'_>, app: &App<S, C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(7),    // Timer
            Constraint::Length(3), // Progress
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_timer(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        render_help(frame);
    }
}

const fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Idle => Color::Gray,
        Phase::Focus => Color::Red,
        Phase::ShortBreak => Color::Green,
        Phase::LongBreak => Color::Blue,
    }
}

fn render_header<S: RecordSink, C: Clock>(frame: &mut Frame<'_>, app: &App<S, C>, area: Rect) {
    let state = app.state();
    let status = if state.is_running {
        ""
    } else if state.phase == Phase::Idle {
        " (ready)"
    } else {
        " (paused)"
    };
    let title = format!(" {}{status} ", state.phase);

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(phase_color(state.phase))
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(phase_color(state.phase))),
        );

    frame.render_widget(header, area);
}

fn render_timer<S: RecordSink, C: Clock>(frame: &mut Frame<'_>, app: &App<S, C>, area: Rect) {
    let state = app.state();
    let machine = app.machine();
    let config = machine.config();

    let remaining = if state.phase == Phase::Idle {
        config.focus_duration_seconds()
    } else {
        state.remaining_seconds
    };

    let cycle = config.intervals_before_long_break();
    let done = cycle - machine.intervals_until_long_break();
    let dots: String = (0..cycle)
        .map(|i| if i < done { '●' } else { '○' })
        .flat_map(|c| [c, ' '])
        .collect();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format_clock(remaining),
            Style::default()
                .fg(phase_color(state.phase))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(dots.trim_end().to_string(), Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "Next break: {}  |  Completed today: {}",
            machine.next_break_kind(),
            app.today_count
        )),
    ];

    let timer = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(timer, area);
}

fn render_progress<S: RecordSink, C: Clock>(frame: &mut Frame<'_>, app: &App<S, C>, area: Rect) {
    let state = app.state();
    let ratio = if state.phase == Phase::Idle {
        0.0
    } else {
        app.machine().progress().clamp(0.0, 1.0)
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(phase_color(state.phase)))
        .ratio(ratio);

    frame.render_widget(gauge, area);
}

fn render_status_bar<S: RecordSink, C: Clock>(
    frame: &mut Frame<'_>,
    app: &App<S, C>,
    area: Rect,
) {
    let status = match app.latest_toast() {
        Some(toast) => {
            let color = match toast.level {
                ToastLevel::Info => Color::Cyan,
                ToastLevel::Success => Color::Green,
                ToastLevel::Warning => Color::Yellow,
                ToastLevel::Error => Color::Red,
            };
            Paragraph::new(toast.to_string()).style(Style::default().fg(color))
        }
        None => Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::DarkGray)),
    };

    frame.render_widget(status, area);
}

fn render_help(frame: &mut Frame<'_>) {
    let area = centered_rect(40, 9, frame.area());
    let lines = vec![
        Line::from("space  start / pause"),
        Line::from("s      skip to next phase"),
        Line::from("r      reset to idle"),
        Line::from("?      toggle this help"),
        Line::from("q      quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Unfinished focus time is not recorded",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
