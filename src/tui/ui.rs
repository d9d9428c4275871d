//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::features::stopwatch::{format_elapsed, LapStats};
use crate::storage::BlobStore;
use crate::tui::app::{App, HELP};

/// Render the application UI.
pub fn render<B: BlobStore>(frame: &mut Frame<'_>, app: &App<B>) {
    // Create layout: clock, laps and history, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Clock
            Constraint::Min(0),    // Laps | History
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_clock(frame, app, chunks[0]);
    render_laps(frame, app, panes[0]);
    render_history(frame, app, panes[1]);
    render_status_bar(frame, app, chunks[2]);
}

/// Render the elapsed time and current split.
fn render_clock<B: BlobStore>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let engine = app.stopwatch.engine();
    let (state, color) = if engine.is_running() {
        ("RUNNING", Color::Green)
    } else {
        ("PAUSED", Color::Yellow)
    };

    let lines = vec![
        Line::from(Span::styled(
            format_elapsed(engine.elapsed_ms()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(state, Style::default().fg(color)),
            Span::styled(
                format!("  split {}", format_elapsed(engine.current_split_ms())),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let clock = Paragraph::new(lines).centered().block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" lapwatch "),
    );

    frame.render_widget(clock, area);
}

/// Render the current run's laps, most recent first.
fn render_laps<B: BlobStore>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let engine = app.stopwatch.engine();
    let stats = LapStats::of(engine.laps());

    let items: Vec<ListItem<'_>> = engine
        .laps_newest_first()
        .map(|lap| {
            let badges = stats.badges(lap);
            let mut spans = vec![
                Span::raw(format!("#{:<3} ", lap.sequence)),
                Span::styled(
                    format_elapsed(lap.split_ms),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", format_elapsed(lap.cumulative_ms)),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if badges.fastest {
                spans.push(Span::styled("  fastest", Style::default().fg(Color::Green)));
            }
            if badges.slowest {
                spans.push(Span::styled("  slowest", Style::default().fg(Color::Red)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Laps ({}) ", engine.laps().len())),
    );

    frame.render_widget(list, area);
}

/// Render saved sessions, most recent first.
fn render_history<B: BlobStore>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let history = app.stopwatch.history();

    let items: Vec<ListItem<'_>> = history
        .newest_first()
        .map(|session| {
            let mut spans = vec![
                Span::styled(
                    session
                        .recorded_at_local()
                        .format("%m-%d %H:%M ")
                        .to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format_elapsed(session.total_elapsed_ms()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ];
            if !session.laps().is_empty() {
                spans.push(Span::styled(
                    format!("  {} laps", session.laps().len()),
                    Style::default().fg(Color::Blue),
                ));
            }
            if let Some(best) = session.lap_stats().fastest() {
                spans.push(Span::styled(
                    format!("  best {}", format_elapsed(best)),
                    Style::default().fg(Color::Green),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" History ({}) ", history.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if !history.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the status bar.
fn render_status_bar<B: BlobStore>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP);
    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
