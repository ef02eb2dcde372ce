//! Application model types: `View`, `ViewKind` and `App`.
//!
//! Every view shares the same cursor and viewport behavior. Track views carry
//! a `SongList`; the window list and the key binding list are plain rows.

use crate::cursor::{Cursor, ScrollMode};
use crate::library::{Field, Record, row_from_fields};
use crate::songlist::SongList;

/// The role a view plays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Playlist,
    Library,
    Windows,
    Bindings,
}

impl ViewKind {
    pub fn name(self) -> &'static str {
        match self {
            ViewKind::Playlist => "playlist",
            ViewKind::Library => "library",
            ViewKind::Windows => "windows",
            ViewKind::Bindings => "bindings",
        }
    }
}

/// What a view shows.
#[derive(Debug)]
pub enum ViewContent {
    Songs(SongList),
    Rows { rows: Vec<String>, cursor: Cursor },
}

/// One line of a view as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub text: String,
    pub selected: bool,
}

#[derive(Debug)]
pub struct View {
    kind: ViewKind,
    title: String,
    content: ViewContent,
}

impl View {
    /// A track view over `list`.
    pub fn songs(kind: ViewKind, title: impl Into<String>, list: SongList) -> Self {
        Self {
            kind,
            title: title.into(),
            content: ViewContent::Songs(list),
        }
    }

    /// A plain row view.
    pub fn rows(kind: ViewKind, title: impl Into<String>, rows: Vec<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            content: ViewContent::Rows {
                rows,
                cursor: Cursor::new(),
            },
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &ViewContent {
        &self.content
    }

    /// The song list, for views that have one.
    pub fn list(&self) -> Option<&SongList> {
        match &self.content {
            ViewContent::Songs(list) => Some(list),
            ViewContent::Rows { .. } => None,
        }
    }

    pub fn list_mut(&mut self) -> Option<&mut SongList> {
        match &mut self.content {
            ViewContent::Songs(list) => Some(list),
            ViewContent::Rows { .. } => None,
        }
    }

    /// Replace the rows of a row view; track views are left alone.
    pub fn set_rows(&mut self, new_rows: Vec<String>) {
        if let ViewContent::Rows { rows, cursor } = &mut self.content {
            *rows = new_rows;
            cursor.clamp(rows.len());
        }
    }

    pub fn len(&self) -> usize {
        match &self.content {
            ViewContent::Songs(list) => list.len(),
            ViewContent::Rows { rows, .. } => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row `index` rendered with `columns` joined by `sep`.
    pub fn row(&self, index: usize, columns: &[Field], sep: &str) -> Option<Row> {
        match &self.content {
            ViewContent::Songs(list) => list.record_at(index).map(|r: &Record| Row {
                text: row_from_fields(r, columns, sep),
                selected: r.selected,
            }),
            ViewContent::Rows { rows, .. } => rows.get(index).map(|text| Row {
                text: text.clone(),
                selected: false,
            }),
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        match &self.content {
            ViewContent::Songs(list) => list.cursor(),
            ViewContent::Rows { rows, cursor } => cursor.position(rows.len()),
        }
    }

    pub fn offset(&self) -> usize {
        match &self.content {
            ViewContent::Songs(list) => list.viewport_offset(),
            ViewContent::Rows { rows, cursor } => cursor.offset(rows.len()),
        }
    }

    pub fn height(&self) -> usize {
        match &self.content {
            ViewContent::Songs(list) => list.viewport_height(),
            ViewContent::Rows { cursor, .. } => cursor.height(),
        }
    }

    pub fn set_height(&mut self, height: usize) {
        match &mut self.content {
            ViewContent::Songs(list) => list.set_viewport_height(height),
            ViewContent::Rows { rows, cursor } => cursor.set_height(height, rows.len()),
        }
    }

    pub fn scroll_mode(&self) -> ScrollMode {
        match &self.content {
            ViewContent::Songs(list) => list.scroll_mode(),
            ViewContent::Rows { cursor, .. } => cursor.mode(),
        }
    }

    pub fn set_scroll_mode(&mut self, mode: ScrollMode) {
        match &mut self.content {
            ViewContent::Songs(list) => list.set_scroll_mode(mode),
            ViewContent::Rows { rows, cursor } => cursor.set_mode(mode, rows.len()),
        }
    }

    pub fn set_scrolloff(&mut self, scrolloff: usize) {
        match &mut self.content {
            ViewContent::Songs(list) => list.set_scrolloff(scrolloff),
            ViewContent::Rows { rows, cursor } => cursor.set_scrolloff(scrolloff, rows.len()),
        }
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        match &mut self.content {
            ViewContent::Songs(list) => list.set_wrap(wrap),
            ViewContent::Rows { cursor, .. } => cursor.set_wrap(wrap),
        }
    }

    pub fn move_cursor(&mut self, delta: isize) -> bool {
        match &mut self.content {
            ViewContent::Songs(list) => list.move_cursor(delta),
            ViewContent::Rows { rows, cursor } => cursor.move_by(delta, rows.len()),
        }
    }

    pub fn set_cursor(&mut self, index: usize) -> bool {
        match &mut self.content {
            ViewContent::Songs(list) => list.set_cursor(index),
            ViewContent::Rows { rows, cursor } => cursor.set(index, rows.len()),
        }
    }

    pub fn scroll(&mut self, delta: isize) -> bool {
        match &mut self.content {
            ViewContent::Songs(list) => list.scroll(delta),
            ViewContent::Rows { rows, cursor } => cursor.scroll(delta, rows.len()),
        }
    }
}

/// Behavior given to every list the app creates.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ListDefaults {
    pub scroll_mode: ScrollMode,
    pub scrolloff: usize,
    pub wrap: bool,
    pub regex: bool,
    pub case_sensitive_sort: bool,
}

impl ListDefaults {
    /// An empty song list with these match and sort settings.
    pub fn new_list(&self) -> SongList {
        let mut list = SongList::new();
        list.set_regex(self.regex);
        list.set_case_sensitive_sort(self.case_sensitive_sort);
        list
    }

    /// Give `view` these scrolling settings.
    pub fn apply(&self, view: &mut View) {
        view.set_scroll_mode(self.scroll_mode);
        view.set_scrolloff(self.scrolloff);
        view.set_wrap(self.wrap);
    }
}

/// What typed characters currently feed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Incremental type-ahead search.
    Search,
    /// A new filter pattern for the active view.
    Filter,
}

/// The main application model.
pub struct App {
    views: Vec<View>,
    active: usize,

    pub status: Option<String>,
    pub input_mode: InputMode,
    pub input: String,
    pub(super) search_origin: Option<usize>,
    pub(super) last_search: Option<String>,

    defaults: ListDefaults,
    redraw: bool,
}

impl App {
    /// Create a new `App` over `views`, adding a window list when missing.
    pub fn new(mut views: Vec<View>) -> Self {
        if !views.iter().any(|v| v.kind == ViewKind::Windows) {
            views.push(View::rows(ViewKind::Windows, "Windows", Vec::new()));
        }
        let mut app = Self {
            views,
            active: 0,
            status: None,
            input_mode: InputMode::Normal,
            input: String::new(),
            search_origin: None,
            last_search: None,
            defaults: ListDefaults::default(),
            redraw: true,
        };
        app.refresh_windows();
        app
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn views_mut(&mut self) -> &mut [View] {
        &mut self.views
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_view(&self) -> &View {
        &self.views[self.active]
    }

    pub fn active_view_mut(&mut self) -> &mut View {
        &mut self.views[self.active]
    }

    /// Switch to view `index`. Out of range indices are ignored.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.views.len() {
            return false;
        }
        if self.active != index {
            self.active = index;
            self.input_mode = InputMode::Normal;
            self.input.clear();
            self.redraw = true;
        }
        true
    }

    pub fn next_view(&mut self) {
        self.activate((self.active + 1) % self.views.len());
    }

    pub fn prev_view(&mut self) {
        let n = self.views.len();
        self.activate((self.active + n - 1) % n);
    }

    pub fn defaults(&self) -> ListDefaults {
        self.defaults
    }

    /// Replace the list defaults and apply their scrolling settings to every view.
    pub fn set_defaults(&mut self, defaults: ListDefaults) {
        self.defaults = defaults;
        for view in &mut self.views {
            defaults.apply(view);
        }
        self.redraw = true;
    }

    /// Index of the first view of `kind`.
    pub fn find_view(&self, kind: ViewKind) -> Option<usize> {
        self.views.iter().position(|v| v.kind == kind)
    }

    /// Add a view in front of the window list and return its index.
    pub fn add_view(&mut self, mut view: View) -> usize {
        self.defaults.apply(&mut view);
        let at = self.find_view(ViewKind::Windows).unwrap_or(self.views.len());
        self.views.insert(at, view);
        if self.active >= at {
            self.active += 1;
        }
        self.refresh_windows();
        at
    }

    /// Rebuild the rows of the window list from the current views.
    pub fn refresh_windows(&mut self) {
        let titles: Vec<String> = self
            .views
            .iter()
            .map(|v| format!("{} ({})", v.title, v.kind.name()))
            .collect();
        for view in self.views.iter_mut().filter(|v| v.kind == ViewKind::Windows) {
            view.set_rows(titles.clone());
        }
        self.redraw = true;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
        self.redraw = true;
    }

    pub fn clear_status(&mut self) {
        if self.status.take().is_some() {
            self.redraw = true;
        }
    }

    pub fn mark_redraw(&mut self) {
        self.redraw = true;
    }

    /// Whether anything on screen may have changed since the last draw.
    pub fn wants_redraw(&self) -> bool {
        self.redraw
            || self
                .active_view()
                .list()
                .is_some_and(SongList::wants_redraw)
    }

    pub fn clear_redraw(&mut self) {
        self.redraw = false;
        for list in self.views.iter_mut().filter_map(View::list_mut) {
            list.clear_redraw();
        }
    }
}
