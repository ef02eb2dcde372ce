//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the active view using `ratatui`. The list widget is
//! fed only the rows inside the viewport; which rows those are is decided by
//! the view's cursor, not by the widget.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, InputMode};
use crate::config::Settings;

const HINTS: &[(&str, &str)] = &[
    ("j/k", "move"),
    ("/", "search"),
    ("f", "filter"),
    ("space", "select"),
    ("a", "add"),
    ("tab", "views"),
    ("q", "quit"),
];

fn hints_text() -> String {
    HINTS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// The status line: pending input, the last message, then list totals.
fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();
    match app.input_mode {
        InputMode::Search => parts.push(format!("/{}", app.input)),
        InputMode::Filter => parts.push(format!("filter: {}", app.input)),
        InputMode::Normal => {}
    }
    if let Some(msg) = &app.status {
        parts.push(msg.clone());
    }
    if let Some(summary) = app.summary() {
        parts.push(summary);
    }
    parts.join(" • ")
}

/// Render the entire UI into `frame`.
///
/// The list area's height is handed back to the active view first, so the
/// viewport offset used for drawing matches the rows actually shown.
pub fn draw(frame: &mut Frame, app: &mut App, settings: &Settings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tracklist ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let list_height = chunks[1].height.saturating_sub(2) as usize;
    let view = app.active_view_mut();
    view.set_height(list_height);

    let offset = view.offset();
    let end = (offset + list_height).min(view.len());
    let columns = &settings.list.columns;
    let sep = settings.list.column_separator.as_str();
    let items: Vec<ListItem> = (offset..end)
        .filter_map(|i| view.row(i, columns, sep))
        .map(|row| {
            let mark = if row.selected { "* " } else { "  " };
            let item = ListItem::new(format!("{mark}{}", row.text));
            if row.selected {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let title = format!(" {} ", view.title());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(view.cursor().map(|c| c.saturating_sub(offset)));
    frame.render_stateful_widget(list, chunks[1], &mut state);

    let status = Paragraph::new(status_text(app))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[2]);

    let footer = Paragraph::new(hints_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{View, ViewKind};
    use crate::library::Record;
    use crate::songlist::SongList;
    use ratatui::{Terminal, backend::TestBackend};

    fn app_with(n: usize) -> App {
        let mut list = SongList::new();
        list.load((0..n).map(|i| {
            let mut r = Record::new(format!("{i:02}.ogg"));
            r.title = format!("Song {i}");
            r.time = Some(30);
            r
        }));
        App::new(vec![View::songs(ViewKind::Playlist, "Queue", list)])
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn draw_sizes_viewport_and_shows_rows_from_offset() {
        let mut app = app_with(30);
        let settings = Settings::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal.draw(|f| draw(f, &mut app, &settings)).unwrap();
        // 20 rows minus header, status and footer boxes, minus list borders.
        assert_eq!(app.active_view().height(), 9);

        app.active_view_mut().set_cursor(20);
        terminal.draw(|f| draw(f, &mut app, &settings)).unwrap();
        let text = screen(&terminal);
        assert!(text.contains(">   Song 20 | 0:30"));
        assert!(!text.contains("Song 5 "));
        assert!(text.contains("30 / 30 (15m 00s)"));
    }

    #[test]
    fn status_shows_pending_search_input() {
        let mut app = app_with(3);
        app.begin_search();
        app.push_input('s');
        assert!(status_text(&app).starts_with("/s • "));
    }
}
