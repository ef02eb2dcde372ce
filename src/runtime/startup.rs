use std::path::Path;

use tracing::info;

use crate::app::{App, ListDefaults, View, ViewKind};
use crate::config::{self, ScrollModeSetting};
use crate::cursor::ScrollMode;
use crate::library::scan;

use super::event_loop::BINDINGS;

/// List defaults from the `[list]` settings.
pub fn list_defaults(settings: &config::ListSettings) -> ListDefaults {
    ListDefaults {
        scroll_mode: match settings.scroll_mode {
            ScrollModeSetting::Normal => ScrollMode::Normal,
            ScrollModeSetting::Centered => ScrollMode::Centered,
            ScrollModeSetting::Relative => ScrollMode::Relative,
        },
        scrolloff: settings.scrolloff,
        wrap: settings.wrap,
        regex: settings.regex_search,
        case_sensitive_sort: settings.case_sensitive_sort,
    }
}

/// Build the initial views: the scanned library, an empty playlist and the
/// key binding list. The window list is added by `App::new`.
pub fn build_app(dir: &Path, settings: &config::Settings) -> App {
    let defaults = list_defaults(&settings.list);

    let records = scan(dir, &settings.library);
    info!(dir = %dir.display(), records = records.len(), "scanned library");

    let mut library = defaults.new_list();
    library.load(records);
    let keys: Vec<&str> = settings.list.sort.iter().map(String::as_str).collect();
    library.sort(&keys);
    library.set_read_only(true);

    let bindings = BINDINGS
        .iter()
        .map(|(keys, action)| format!("{keys:<12}{action}"))
        .collect();

    let mut app = App::new(vec![
        View::songs(ViewKind::Library, "Library", library),
        View::songs(ViewKind::Playlist, "Playlist", defaults.new_list()),
        View::rows(ViewKind::Bindings, "Bindings", bindings),
    ]);
    app.set_defaults(defaults);
    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn build_app_loads_sorted_read_only_library() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.mp3", "a.mp3", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let mut settings = Settings::default();
        settings.list.scroll_mode = ScrollModeSetting::Relative;
        settings.list.sort = vec!["file".to_string()];

        let app = build_app(dir.path(), &settings);
        let kinds: Vec<ViewKind> = app.views().iter().map(View::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViewKind::Library,
                ViewKind::Playlist,
                ViewKind::Bindings,
                ViewKind::Windows
            ]
        );

        let library = app.views()[0].list().unwrap();
        assert!(library.is_read_only());
        let files: Vec<&str> = library.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files, vec!["a.mp3", "b.mp3"]);
        assert!(
            app.views()
                .iter()
                .all(|v| v.scroll_mode() == ScrollMode::Relative)
        );
        assert_eq!(app.views()[2].len(), BINDINGS.len());
    }
}
