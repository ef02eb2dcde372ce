//! List commands bound to keys: search, filter, selection, playlist edits.
//!
//! Failures never abort; they end up in the status line.

use tracing::{debug, info};

use super::model::{App, InputMode, View, ViewKind};
use crate::cursor::ScrollMode;
use crate::error::ListError;
use crate::library::{Field, FieldMask, Record, format_total};
use crate::songlist::{SelectAction, SongList};

impl App {
    fn active_list_mut(&mut self) -> Result<&mut SongList, ListError> {
        self.active_view_mut().list_mut().ok_or(ListError::NotFound)
    }

    fn report(&mut self, result: Result<String, ListError>) {
        match result {
            Ok(msg) => self.set_status(msg),
            Err(e) => {
                debug!("command failed: {e}");
                self.set_status(e.to_string());
            }
        }
    }

    /// Start incremental search from the current cursor position.
    pub fn begin_search(&mut self) {
        self.search_origin = self.active_view().cursor();
        self.input_mode = InputMode::Search;
        self.input.clear();
        self.mark_redraw();
    }

    pub fn begin_filter(&mut self) {
        if self.active_view().list().is_none() {
            self.set_status("no filter on this view");
            return;
        }
        self.input_mode = InputMode::Filter;
        self.input.clear();
        self.mark_redraw();
    }

    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
        self.input_changed();
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
        self.input_changed();
    }

    /// Re-run the type-ahead search from where it started.
    fn input_changed(&mut self) {
        self.mark_redraw();
        if self.input_mode != InputMode::Search {
            return;
        }
        let origin = self.search_origin.unwrap_or(0);
        let pattern = self.input.clone();
        let Ok(list) = self.active_list_mut() else {
            return;
        };
        list.set_cursor(origin);
        if pattern.is_empty() {
            return;
        }
        let result = list.search(&pattern, false, false);
        if let Err(e) = result {
            self.set_status(e.to_string());
        } else {
            self.clear_status();
        }
    }

    /// Finish the current input: keep the search hit or install the filter.
    pub fn commit_input(&mut self) {
        let pattern = std::mem::take(&mut self.input);
        match std::mem::take(&mut self.input_mode) {
            InputMode::Normal => {}
            InputMode::Search => {
                if !pattern.is_empty() {
                    self.last_search = Some(pattern);
                }
                self.search_origin = None;
            }
            InputMode::Filter => self.add_filter(&pattern),
        }
        self.mark_redraw();
    }

    /// Abandon the current input; a search puts the cursor back.
    pub fn cancel_input(&mut self) {
        if self.input_mode == InputMode::Search {
            if let Some(origin) = self.search_origin.take() {
                if let Some(list) = self.active_view_mut().list_mut() {
                    list.set_cursor(origin);
                }
            }
        }
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.mark_redraw();
    }

    /// Jump to the next (or previous) hit of the last committed search.
    pub fn repeat_search(&mut self, backwards: bool) {
        let Some(pattern) = self.last_search.clone() else {
            self.set_status("no previous search");
            return;
        };
        let result = self
            .active_list_mut()
            .and_then(|list| list.search(&pattern, backwards, true))
            .map(|i| format!("/{pattern} at {}", i + 1));
        self.report(result);
    }

    fn add_filter(&mut self, pattern: &str) {
        let result = self.active_list_mut().and_then(|list| {
            list.check_pattern(pattern)?;
            list.add_filter(pattern, FieldMask::ALL);
            Ok(format!("filter `{pattern}`: {} shown", list.len()))
        });
        self.report(result);
    }

    pub fn pop_filter(&mut self) {
        let result = self.active_list_mut().and_then(|list| {
            let filter = list.pop_filter().ok_or(ListError::NotFound)?;
            Ok(format!("removed filter `{}`", filter.pattern()))
        });
        self.report(result);
    }

    pub fn clear_filters(&mut self) {
        if let Some(list) = self.active_view_mut().list_mut() {
            list.clear_filters();
        }
    }

    /// Move to the start of the next or previous run of `field` values.
    pub fn jump_group(&mut self, field: Field, forward: bool) {
        let Some(list) = self.active_view_mut().list_mut() else {
            return;
        };
        let target = if forward {
            list.next_of(field)
        } else {
            list.prev_of(field)
        };
        match target {
            Some(i) => {
                list.set_cursor(i);
            }
            None => self.set_status(format!("no other {field}")),
        }
    }

    pub fn cycle_scroll_mode(&mut self) {
        let view = self.active_view_mut();
        let mode: ScrollMode = view.scroll_mode().cycle();
        view.set_scroll_mode(mode);
        self.set_status(format!("scroll mode: {}", mode.name()));
    }

    /// Toggle the selection of the cursor record and step down.
    pub fn toggle_select(&mut self) {
        let Some(list) = self.active_view_mut().list_mut() else {
            return;
        };
        if let Some(i) = list.cursor() {
            list.select(i, SelectAction::Toggle);
            list.move_cursor(1);
        }
    }

    /// Select every record sharing the cursor record's `field` value.
    pub fn select_same(&mut self, field: Field) {
        let result = self.active_list_mut().and_then(|list| {
            let value = list
                .cursor_record()
                .ok_or(ListError::NotFound)?
                .field(field)
                .into_owned();
            let n = list.select_matching(&value, field.mask(), 0, SelectAction::Select);
            Ok(format!("selected {n} more by {field}"))
        });
        self.report(result);
    }

    pub fn deselect_all(&mut self) {
        if let Some(list) = self.active_view_mut().list_mut() {
            list.select_all(SelectAction::Deselect);
        }
    }

    /// Index of the first playlist view, creating one when there is none.
    fn playlist_index(&mut self) -> usize {
        match self.find_view(ViewKind::Playlist) {
            Some(i) => i,
            None => {
                let list = self.defaults().new_list();
                self.add_view(View::songs(ViewKind::Playlist, "Playlist", list))
            }
        }
    }

    /// Copy the selected records, or the cursor record, to the playlist.
    ///
    /// The selection is drained as it is copied.
    pub fn add_to_playlist(&mut self) {
        let Some(list) = self.active_view_mut().list_mut() else {
            return;
        };
        list.reset_selection_iterators();
        let mut picked: Vec<Record> = Vec::new();
        while let Some(record) = list.pop_next_selected() {
            picked.push(record.detached());
        }

        let target = self.playlist_index();
        let result = match self.views_mut()[target].list_mut() {
            Some(playlist) => picked
                .into_iter()
                .try_fold(0usize, |n, r| playlist.append(r).map(|_| n + 1))
                .map(|n| format!("added {n} to playlist")),
            None => Err(ListError::NotFound),
        };
        self.report(result);
    }

    /// Remove the selected records, or the cursor record, from the active list.
    pub fn remove_selected(&mut self) {
        let result = self.active_list_mut().and_then(|list| {
            if list.is_read_only() {
                return Err(ListError::ReadOnly);
            }
            list.reset_selection_iterators();
            let mut doomed = Vec::new();
            while let Some(i) = list.next_selected_index() {
                doomed.push(i);
            }
            for &i in doomed.iter().rev() {
                list.remove_at(i)?;
            }
            Ok(format!("removed {}", doomed.len()))
        });
        self.report(result);
    }

    /// Save the active view's visible records as a new playlist.
    pub fn save_view_as_playlist(&mut self) {
        let Some(source) = self.active_view().list() else {
            self.set_status("nothing to save");
            return;
        };
        let mut copy = self.defaults().new_list();
        copy.copy_from(source);
        let n = copy.len();
        let title = format!("Playlist {}", self.views().len());
        info!(records = n, title = %title, "saved view as playlist");
        self.add_view(View::songs(ViewKind::Playlist, title.clone(), copy));
        self.set_status(format!("saved {n} records as {title}"));
    }

    /// Sort the active list by `keys`.
    pub fn sort_active(&mut self, keys: &[String]) {
        if let Some(list) = self.active_view_mut().list_mut() {
            let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
            list.sort(&keys);
        }
    }

    pub fn shuffle_active(&mut self) {
        if let Some(list) = self.active_view_mut().list_mut() {
            list.shuffle();
        }
    }

    /// Summary of the active list for the status bar.
    pub fn summary(&self) -> Option<String> {
        let list = self.active_view().list()?;
        let mut parts = vec![format!(
            "{} / {} ({})",
            list.len(),
            list.canonical_len(),
            format_total(list.total_duration())
        )];
        if list.selection_count() > 0 {
            parts.push(format!(
                "{} selected ({})",
                list.selection_count(),
                format_total(list.selection_duration())
            ));
        }
        if list.filter_count() > 0 {
            parts.push(format!("{} filters", list.filter_count()));
        }
        parts.push(list.scroll_mode().name().to_string());
        Some(parts.join(" | "))
    }
}
