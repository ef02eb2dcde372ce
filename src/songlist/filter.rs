use tracing::debug;

use crate::error::ListError;
use crate::library::{FieldMask, Record};
use crate::matcher::Matcher;

use super::SongList;

/// Identifies one active filter for later removal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FilterHandle(u64);

/// A stored pattern and the fields it is tested against.
#[derive(Debug, Clone)]
pub struct Filter {
    handle: FilterHandle,
    pattern: String,
    mask: FieldMask,
    matcher: Matcher,
}

impl Filter {
    pub fn handle(&self) -> FilterHandle {
        self.handle
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn mask(&self) -> FieldMask {
        self.mask
    }

    fn accepts(&self, record: &Record) -> bool {
        self.matcher.matches(record, self.mask)
    }
}

impl SongList {
    /// Add a filter; all filters must pass for a record to stay visible.
    pub fn add_filter(&mut self, pattern: &str, mask: FieldMask) -> FilterHandle {
        let handle = FilterHandle(self.next_filter);
        self.next_filter += 1;
        self.filters.push(Filter {
            handle,
            pattern: pattern.to_string(),
            mask,
            matcher: Matcher::new(pattern, self.base_flags()),
        });
        let was_empty = self.visible.is_empty();
        self.rebuild_visible(was_empty);
        handle
    }

    /// Whether `pattern` compiles under this list's match settings.
    ///
    /// An invalid pattern can still be added as a filter; it hides everything.
    pub fn check_pattern(&self, pattern: &str) -> Result<(), ListError> {
        Matcher::check(pattern, self.base_flags())
    }

    /// Remove the filter identified by `handle`. Returns `false` if it is not
    /// active.
    pub fn remove_filter(&mut self, handle: FilterHandle) -> bool {
        let Some(i) = self.filters.iter().position(|f| f.handle == handle) else {
            return false;
        };
        self.filters.remove(i);
        let was_empty = self.visible.is_empty();
        self.rebuild_visible(was_empty);
        true
    }

    /// Remove the most recently added filter.
    pub fn pop_filter(&mut self) -> Option<Filter> {
        let filter = self.filters.pop()?;
        let was_empty = self.visible.is_empty();
        self.rebuild_visible(was_empty);
        Some(filter)
    }

    /// Remove every filter; all records become visible again.
    pub fn clear_filters(&mut self) {
        if self.filters.is_empty() {
            return;
        }
        self.filters.clear();
        let was_empty = self.visible.is_empty();
        self.rebuild_visible(was_empty);
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub(super) fn passes_filters(&self, record: &Record) -> bool {
        self.filters.iter().all(|f| f.accepts(record))
    }

    /// Recompute the visible sequence from the canonical one.
    ///
    /// Selected records that end up hidden are deselected.
    pub(super) fn rebuild_visible(&mut self, was_empty: bool) {
        let mut visible = Vec::with_capacity(self.records.len());
        let mut dropped = 0usize;
        for (ci, record) in self.records.iter_mut().enumerate() {
            if self.filters.iter().all(|f| f.accepts(record)) {
                visible.push(ci);
            } else if record.selected {
                record.selected = false;
                self.selection_count = self.selection_count.saturating_sub(1);
                self.selection_duration = self
                    .selection_duration
                    .saturating_sub(record.time.unwrap_or(0));
                dropped += 1;
            }
        }
        debug!(
            filters = self.filters.len(),
            visible = visible.len(),
            total = self.records.len(),
            deselected = dropped,
            "rebuilt visible list"
        );
        self.visible = visible;
        self.structure_changed(was_empty);
    }
}
