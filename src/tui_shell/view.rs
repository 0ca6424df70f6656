//! Rendering: a pure projection of (registry, edit session, selection).

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::model::FileRecord;
use crate::panel::EditSession;

use super::app::App;

pub(super) fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let now = OffsetDateTime::now_utc();
    let session = app.panel.session();

    let items: Vec<ListItem> = app
        .panel
        .registry()
        .records()
        .iter()
        .map(|r| ListItem::new(row_text(r, session, now)))
        .collect();

    let title = Line::from(vec![
        Span::styled("filedock", Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            app.panel.service().remote().base_url.clone(),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(format!("  {} files", app.panel.registry().len())),
    ]);

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !app.panel.registry().is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let prompt = if let Some(input) = &app.upload_input {
        Line::from(vec![
            Span::styled("upload path: ", Style::default().fg(Color::Cyan)),
            Span::raw(input.buf.clone()),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ])
    } else if let Some(session) = session {
        Line::from(vec![
            Span::styled("renaming: ", Style::default().fg(Color::Cyan)),
            Span::raw(session.draft_name().to_string()),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ])
    } else {
        Line::from(Span::raw(""))
    };
    frame.render_widget(
        Paragraph::new(prompt).block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );

    let hints = if app.upload_input.is_some() {
        "enter upload  esc cancel"
    } else if session.is_some() {
        "type to edit  enter commit  up/down edit another row"
    } else {
        "up/down select  enter/e rename  u upload  d delete  r refresh  q quit"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))),
        chunks[2],
    );
}

/// One registry row. A row mid-edit shows the draft in place of the name.
pub(super) fn row_text(
    record: &FileRecord,
    session: Option<&EditSession>,
    now: OffsetDateTime,
) -> String {
    let name = match session {
        Some(s) if s.target_id() == &record.id => format!("{}▏", s.draft_name()),
        _ => record.name.clone(),
    };
    format!(
        "{:<42} {:>10}  {}",
        name,
        format_size(record.size),
        fmt_age(&record.last_modified, now)
    )
}

pub(super) fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

pub(super) fn fmt_age(ts: &str, now: OffsetDateTime) -> String {
    let Ok(parsed) = OffsetDateTime::parse(ts, &Rfc3339) else {
        return ts.to_string();
    };
    let secs = (now - parsed).whole_seconds().max(0);
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}
