use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, InputMode, ViewKind};
use crate::config;
use crate::library::Field;
use crate::ui;

/// Key bindings as shown in the bindings view.
pub const BINDINGS: &[(&str, &str)] = &[
    ("j/k", "cursor down/up"),
    ("ctrl-d/u", "scroll half a page down/up"),
    ("ctrl-e/y", "scroll one row down/up"),
    ("pgdn/pgup", "scroll a page down/up"),
    ("gg/G", "top/bottom"),
    ("/", "search as you type"),
    ("n/N", "next/previous search hit"),
    ("f", "add a filter"),
    ("F", "remove the last filter"),
    ("esc", "remove every filter"),
    ("]/[", "next/previous artist"),
    ("}/{", "next/previous album"),
    ("space", "toggle selection"),
    ("v", "select records by the same artist"),
    ("V", "clear the selection"),
    ("a", "add selection to the playlist"),
    ("d", "remove selection"),
    ("o", "sort by the configured keys"),
    ("S", "shuffle"),
    ("m", "cycle scroll mode"),
    ("w", "save view as a new playlist"),
    ("tab/backtab", "next/previous view"),
    ("enter", "open view (window list)"),
    ("q", "quit"),
];

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: handles input and redraws when something
/// changed. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if app.wants_redraw() {
            terminal.draw(|f| ui::draw(f, app, settings))?;
            app.clear_redraw();
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, settings, app, state) {
                        break;
                    }
                }
                Event::Resize(..) => app.mark_redraw(),
                _ => {}
            }
        }
    }

    Ok(())
}

fn scroll(app: &mut App, delta: isize) {
    if !app.active_view_mut().scroll(delta) {
        app.set_status("cannot scroll further");
    }
}

fn handle_input_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.commit_input(),
        KeyCode::Backspace => app.pop_input(),
        KeyCode::Char(c) if !c.is_control() && !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.push_input(c)
        }
        _ => {}
    }
}

/// Apply one key press. Returns `true` when the app should quit.
pub fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> bool {
    if app.input_mode != InputMode::Normal {
        state.pending_gg = false;
        handle_input_key(key, app);
        return false;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }
    app.clear_status();

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let page = app.active_view().height().max(1) as isize;
    let half = (page / 2).max(1);

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('d') if ctrl => scroll(app, half),
        KeyCode::Char('u') if ctrl => scroll(app, -half),
        KeyCode::Char('e') if ctrl => scroll(app, 1),
        KeyCode::Char('y') if ctrl => scroll(app, -1),
        KeyCode::PageDown => scroll(app, page),
        KeyCode::PageUp => scroll(app, -page),
        KeyCode::Char('j') | KeyCode::Down => {
            app.active_view_mut().move_cursor(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.active_view_mut().move_cursor(-1);
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.active_view_mut().set_cursor(0);
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            let view = app.active_view_mut();
            let last = view.len().saturating_sub(1);
            view.set_cursor(last);
        }
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Char('n') => app.repeat_search(false),
        KeyCode::Char('N') => app.repeat_search(true),
        KeyCode::Char('f') => app.begin_filter(),
        KeyCode::Char('F') => app.pop_filter(),
        KeyCode::Esc => app.clear_filters(),
        KeyCode::Char(']') => app.jump_group(Field::Artist, true),
        KeyCode::Char('[') => app.jump_group(Field::Artist, false),
        KeyCode::Char('}') => app.jump_group(Field::Album, true),
        KeyCode::Char('{') => app.jump_group(Field::Album, false),
        KeyCode::Char(' ') => app.toggle_select(),
        KeyCode::Char('v') => app.select_same(Field::Artist),
        KeyCode::Char('V') => app.deselect_all(),
        KeyCode::Char('a') => app.add_to_playlist(),
        KeyCode::Char('d') => app.remove_selected(),
        KeyCode::Char('o') => app.sort_active(&settings.list.sort),
        KeyCode::Char('S') => app.shuffle_active(),
        KeyCode::Char('m') => app.cycle_scroll_mode(),
        KeyCode::Char('w') => app.save_view_as_playlist(),
        KeyCode::Tab => app.next_view(),
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Enter => {
            let view = app.active_view();
            if view.kind() == ViewKind::Windows {
                if let Some(i) = view.cursor() {
                    app.activate(i);
                }
            }
        }
        other => debug!(key = ?other, "unbound key"),
    }

    false
}
