use super::*;
use crate::cursor::ScrollMode;
use crate::library::{Field, Record};
use crate::songlist::SongList;

fn rec(file: &str, artist: &str, title: &str) -> Record {
    let mut r = Record::new(file);
    r.artist = artist.into();
    r.title = title.into();
    r.time = Some(60);
    r
}

fn library() -> View {
    let mut list = SongList::new();
    list.load(vec![
        rec("01.ogg", "Coltrane", "Naima"),
        rec("02.ogg", "Coltrane", "Equinox"),
        rec("03.ogg", "Davis", "So What"),
        rec("04.ogg", "Davis", "Blue in Green"),
        rec("05.ogg", "Evans", "Peace Piece"),
    ]);
    list.set_read_only(true);
    View::songs(ViewKind::Library, "Library", list)
}

/// Views: 0 = playlist, 1 = library, 2 = windows.
fn app() -> App {
    let mut app = App::new(vec![
        View::songs(ViewKind::Playlist, "Playlist", SongList::new()),
        library(),
    ]);
    app.activate(1);
    app
}

fn titles(view: &View) -> Vec<String> {
    view.list()
        .map(|l| l.iter().map(|r| r.title.clone()).collect())
        .unwrap_or_default()
}

fn cursor_title(app: &App) -> String {
    app.active_view()
        .list()
        .and_then(|l| l.cursor_record())
        .map(|r| r.title.clone())
        .unwrap_or_default()
}

#[test]
fn new_appends_window_list_naming_every_view() {
    let app = app();
    assert_eq!(app.views().len(), 3);
    let windows = &app.views()[2];
    assert_eq!(windows.kind(), ViewKind::Windows);
    assert_eq!(windows.len(), 3);
    let first = windows.row(0, &[], "").unwrap();
    assert_eq!(first.text, "Playlist (playlist)");
}

#[test]
fn view_switching_wraps_both_ways() {
    let mut app = app();
    app.next_view();
    assert_eq!(app.active_index(), 2);
    app.next_view();
    assert_eq!(app.active_index(), 0);
    app.prev_view();
    assert_eq!(app.active_index(), 2);
    assert!(!app.activate(9));
    assert_eq!(app.active_index(), 2);
}

#[test]
fn add_view_goes_before_window_list_and_keeps_active_view() {
    let mut app = app();
    app.activate(2);
    let at = app.add_view(View::songs(ViewKind::Playlist, "Extra", SongList::new()));
    assert_eq!(at, 2);
    assert_eq!(app.active_view().kind(), ViewKind::Windows);
    assert_eq!(app.active_view().len(), 4);
}

#[test]
fn row_views_share_cursor_behavior() {
    let mut app = app();
    app.activate(2);
    let view = app.active_view_mut();
    view.set_height(2);
    assert_eq!(view.cursor(), Some(0));
    assert!(view.move_cursor(2));
    assert_eq!(view.cursor(), Some(2));
    assert_eq!(view.offset(), 1);
    assert!(!view.move_cursor(1));
    view.set_scroll_mode(ScrollMode::Centered);
    assert_eq!(view.scroll_mode(), ScrollMode::Centered);
    assert!(view.list().is_none());
}

#[test]
fn incremental_search_follows_input_and_cancel_restores_cursor() {
    let mut app = app();
    app.begin_search();
    assert_eq!(app.input_mode, InputMode::Search);
    app.push_input('s');
    assert_eq!(cursor_title(&app), "So What");
    app.push_input('o');
    app.push_input(' ');
    assert_eq!(cursor_title(&app), "So What");
    app.pop_input();
    app.pop_input();
    app.pop_input();
    assert_eq!(cursor_title(&app), "Naima");

    app.push_input('p');
    assert_eq!(cursor_title(&app), "Peace Piece");
    app.cancel_input();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(cursor_title(&app), "Naima");
}

#[test]
fn committed_search_can_be_repeated() {
    let mut app = app();
    app.begin_search();
    for c in "coltrane".chars() {
        app.push_input(c);
    }
    app.commit_input();
    assert_eq!(cursor_title(&app), "Naima");

    app.repeat_search(false);
    assert_eq!(cursor_title(&app), "Equinox");
    app.repeat_search(false);
    assert_eq!(cursor_title(&app), "Naima");
    app.repeat_search(true);
    assert_eq!(cursor_title(&app), "Equinox");
}

#[test]
fn failed_search_reports_not_found() {
    let mut app = app();
    app.begin_search();
    app.push_input('z');
    assert_eq!(app.status.as_deref(), Some("pattern not found"));
    assert_eq!(cursor_title(&app), "Naima");
}

#[test]
fn filter_input_adds_and_pops_filters() {
    let mut app = app();
    app.begin_filter();
    for c in "davis".chars() {
        app.push_input(c);
    }
    app.commit_input();
    assert_eq!(titles(app.active_view()), vec!["So What", "Blue in Green"]);

    app.pop_filter();
    assert_eq!(app.active_view().len(), 5);
    app.pop_filter();
    assert_eq!(app.status.as_deref(), Some("pattern not found"));
}

#[test]
fn invalid_regex_filter_is_refused() {
    let mut app = app();
    app.active_view_mut().list_mut().unwrap().set_regex(true);
    app.begin_filter();
    app.push_input('(');
    app.commit_input();
    assert_eq!(app.active_view().list().unwrap().filter_count(), 0);
    assert!(app.status.as_deref().unwrap().starts_with("invalid pattern"));
}

#[test]
fn add_to_playlist_drains_selection_into_detached_copies() {
    let mut app = app();
    {
        let list = app.active_view_mut().list_mut().unwrap();
        list.set_selected(1, true);
        list.set_selected(3, true);
    }
    app.add_to_playlist();

    let library = app.active_view().list().unwrap();
    assert_eq!(library.selection_count(), 0);
    let playlist = &app.views()[0];
    assert_eq!(titles(playlist), vec!["Equinox", "Blue in Green"]);
    assert!(playlist.list().unwrap().iter().all(|r| r.pos.is_none() && !r.selected));
    assert_eq!(app.status.as_deref(), Some("added 2 to playlist"));
}

#[test]
fn add_to_playlist_without_selection_copies_cursor_record() {
    let mut app = app();
    app.active_view_mut().set_cursor(2);
    app.add_to_playlist();
    assert_eq!(titles(&app.views()[0]), vec!["So What"]);
}

#[test]
fn add_to_playlist_creates_a_playlist_when_missing() {
    let mut app = App::new(vec![library()]);
    app.add_to_playlist();
    let i = app.find_view(ViewKind::Playlist).unwrap();
    assert_eq!(titles(&app.views()[i]), vec!["Naima"]);
    assert_eq!(app.active_view().kind(), ViewKind::Library);
}

#[test]
fn removing_from_read_only_library_only_reports() {
    let mut app = app();
    app.remove_selected();
    assert_eq!(app.status.as_deref(), Some("list is read-only"));
    assert_eq!(app.active_view().len(), 5);
}

#[test]
fn remove_selected_edits_playlist() {
    let mut app = app();
    app.select_same(Field::Artist);
    app.add_to_playlist();
    app.activate(0);
    assert_eq!(titles(app.active_view()), vec!["Naima", "Equinox"]);

    app.active_view_mut().list_mut().unwrap().set_selected(0, true);
    app.remove_selected();
    assert_eq!(titles(app.active_view()), vec!["Equinox"]);
    app.remove_selected();
    assert!(app.active_view().is_empty());
}

#[test]
fn save_view_copies_visible_records_to_new_playlist() {
    let mut app = app();
    app.active_view_mut().list_mut().unwrap().add_filter("evans", crate::library::FieldMask::ARTIST);
    app.save_view_as_playlist();

    let saved = app
        .views()
        .iter()
        .rfind(|v| v.kind() == ViewKind::Playlist)
        .unwrap();
    assert_eq!(titles(saved), vec!["Peace Piece"]);
    assert!(!saved.list().unwrap().is_read_only());
    assert_eq!(app.active_view().kind(), ViewKind::Library);
    assert_eq!(app.find_view(ViewKind::Windows), Some(3));
}

#[test]
fn jump_group_walks_artist_runs() {
    let mut app = app();
    app.jump_group(Field::Artist, true);
    assert_eq!(cursor_title(&app), "So What");
    app.jump_group(Field::Artist, true);
    assert_eq!(cursor_title(&app), "Peace Piece");
    app.jump_group(Field::Artist, false);
    assert_eq!(cursor_title(&app), "So What");
    app.jump_group(Field::Artist, false);
    assert_eq!(cursor_title(&app), "Naima");
}

#[test]
fn cycle_scroll_mode_reports_new_mode() {
    let mut app = app();
    app.cycle_scroll_mode();
    assert_eq!(app.active_view().scroll_mode(), ScrollMode::Centered);
    assert_eq!(app.status.as_deref(), Some("scroll mode: centered"));
}

#[test]
fn summary_lists_counts_selection_and_filters() {
    let mut app = app();
    app.toggle_select();
    assert_eq!(cursor_title(&app), "Equinox");
    app.active_view_mut().list_mut().unwrap().add_filter("a", crate::library::FieldMask::TITLE);
    assert_eq!(
        app.summary().unwrap(),
        "3 / 5 (5m 00s) | 1 selected (1m 00s) | 1 filters | normal"
    );
}

#[test]
fn redraw_is_cleared_for_every_list() {
    let mut app = app();
    assert!(app.wants_redraw());
    app.clear_redraw();
    assert!(!app.wants_redraw());
    app.active_view_mut().move_cursor(1);
    assert!(app.wants_redraw());
}
