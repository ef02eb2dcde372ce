//! The filtered song list behind every track view.
//!
//! A `SongList` owns the canonical sequence of records and derives a visible
//! sequence from it: the records passing every active filter, in canonical
//! order. The visible sequence holds canonical indices, never copies.
//! Duration and selection totals are kept up to date incrementally.
//!
//! Filtering lives in `filter`, searching and group navigation in `search`,
//! selection bookkeeping in `selection` and ordering in `sort`.

mod filter;
mod search;
mod selection;
mod sort;

pub use filter::{Filter, FilterHandle};
pub use selection::SelectAction;

use rand::{rng, seq::SliceRandom};
use tracing::debug;

use crate::cursor::{Cursor, ScrollMode};
use crate::error::ListError;
use crate::library::Record;
use crate::matcher::MatchFlags;

use selection::SelIter;

/// A canonical record sequence with its filtered view, cursor and totals.
#[derive(Debug, Default)]
pub struct SongList {
    records: Vec<Record>,
    visible: Vec<usize>,

    filters: Vec<Filter>,
    next_filter: u64,

    total_duration: u64,
    selection_count: usize,
    selection_duration: u64,

    sel_next: SelIter,
    sel_prev: SelIter,

    cursor: Cursor,

    read_only: bool,
    regex: bool,
    case_sensitive_sort: bool,
    redraw: bool,
}

impl SongList {
    pub fn new() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    /// Mark the list as a mirror of a remote catalog: `append`, `insert_at`
    /// and `remove_at` will refuse to change it.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Use regular expressions for filters and type-ahead search.
    pub fn set_regex(&mut self, regex: bool) {
        self.regex = regex;
    }

    pub fn set_case_sensitive_sort(&mut self, case_sensitive: bool) {
        self.case_sensitive_sort = case_sensitive;
    }

    /// Flags every free-text match starts from.
    fn base_flags(&self) -> MatchFlags {
        if self.regex {
            MatchFlags::REGEX
        } else {
            MatchFlags::empty()
        }
    }

    /// Number of visible records.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Number of canonical records, filtered or not.
    pub fn canonical_len(&self) -> usize {
        self.records.len()
    }

    /// The record at `index` in the visible sequence.
    pub fn record_at(&self, index: usize) -> Option<&Record> {
        self.visible.get(index).and_then(|&ci| self.records.get(ci))
    }

    /// Visible records in order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.visible.iter().filter_map(|&ci| self.records.get(ci))
    }

    /// Canonical records in order.
    pub fn canonical(&self) -> &[Record] {
        &self.records
    }

    /// Total duration of the canonical sequence in seconds.
    pub fn total_duration(&self) -> u64 {
        self.total_duration
    }

    pub fn selection_count(&self) -> usize {
        self.selection_count
    }

    /// Summed duration of selected records in seconds.
    pub fn selection_duration(&self) -> u64 {
        self.selection_duration
    }

    /// Whether anything changed since the renderer last cleared the flag.
    pub fn wants_redraw(&self) -> bool {
        self.redraw
    }

    pub fn clear_redraw(&mut self) {
        self.redraw = false;
    }

    pub fn mark_redraw(&mut self) {
        self.redraw = true;
    }

    /// Visible position of canonical index `ci`, if it is visible.
    fn visible_position(&self, ci: usize) -> Option<usize> {
        self.visible.binary_search(&ci).ok()
    }

    fn add_totals(&mut self, record: &Record) {
        self.total_duration += record.time.unwrap_or(0);
        if record.selected {
            self.selection_count += 1;
            self.selection_duration += record.time.unwrap_or(0);
        }
    }

    fn sub_totals(&mut self, record: &Record) {
        self.total_duration = self.total_duration.saturating_sub(record.time.unwrap_or(0));
        if record.selected {
            self.selection_count = self.selection_count.saturating_sub(1);
            self.selection_duration = self
                .selection_duration
                .saturating_sub(record.time.unwrap_or(0));
        }
    }

    /// Common tail of every change to the visible sequence.
    fn structure_changed(&mut self, was_empty: bool) {
        self.reset_selection_iterators();
        let size = self.visible.len();
        if was_empty && size > 0 {
            self.cursor.reset();
        }
        self.cursor.clamp(size);
        self.redraw = true;
    }

    /// Insert `record` at canonical index `ci`, updating the visible sequence
    /// and totals. Selection is dropped if the record is filtered out.
    fn place(&mut self, ci: usize, mut record: Record) -> usize {
        let was_empty = self.visible.is_empty();
        let passes = self.passes_filters(&record);
        if !passes {
            record.selected = false;
        }
        self.add_totals(&record);
        self.records.insert(ci, record);

        let at = self.visible.partition_point(|&v| v < ci);
        for v in &mut self.visible[at..] {
            *v += 1;
        }
        if passes {
            self.visible.insert(at, ci);
        }
        self.structure_changed(was_empty);
        ci
    }

    /// Remove canonical index `ci`, shifting later positions down by one.
    fn take(&mut self, ci: usize) -> Record {
        let was_empty = self.visible.is_empty();
        let record = self.records.remove(ci);
        self.sub_totals(&record);

        if let Some(vi) = self.visible_position(ci) {
            self.visible.remove(vi);
        }
        let at = self.visible.partition_point(|&v| v < ci);
        for v in &mut self.visible[at..] {
            *v -= 1;
        }
        for r in &mut self.records[ci..] {
            if let Some(p) = r.pos.as_mut() {
                *p = p.saturating_sub(1);
            }
        }
        self.structure_changed(was_empty);
        record
    }

    /// Append `record` to the canonical sequence, returning its canonical index.
    pub fn append(&mut self, record: Record) -> Result<usize, ListError> {
        if self.read_only {
            return Err(ListError::ReadOnly);
        }
        Ok(self.place(self.records.len(), record))
    }

    /// Insert `record` at daemon position `position`.
    ///
    /// A record already holding that position is replaced. Records after the
    /// insertion point move one position down.
    pub fn insert_at(&mut self, position: usize, mut record: Record) -> Result<usize, ListError> {
        if self.read_only {
            return Err(ListError::ReadOnly);
        }
        if let Some(ci) = self.records.iter().position(|r| r.pos == Some(position)) {
            self.take(ci);
        }
        let ci = position.min(self.records.len());
        for r in &mut self.records[ci..] {
            if let Some(p) = r.pos.as_mut() {
                *p += 1;
            }
        }
        record.pos = Some(position);
        Ok(self.place(ci, record))
    }

    /// Remove the record at visible `index`, returning it.
    pub fn remove_at(&mut self, index: usize) -> Result<Record, ListError> {
        if self.read_only {
            return Err(ListError::ReadOnly);
        }
        let len = self.visible.len();
        let ci = *self
            .visible
            .get(index)
            .ok_or(ListError::OutOfRange { index, len })?;
        Ok(self.take(ci))
    }

    /// Replace the whole list with `records`.
    ///
    /// This is the data-source sync path and ignores the read-only flag.
    pub fn load(&mut self, records: impl IntoIterator<Item = Record>) {
        let was_empty = self.visible.is_empty();
        self.records = records.into_iter().collect();
        self.total_duration = self.records.iter().filter_map(|r| r.time).sum();
        let selected = self.records.iter().filter(|r| r.selected);
        self.selection_count = selected.clone().count();
        self.selection_duration = selected.filter_map(|r| r.time).sum();
        self.rebuild_visible(was_empty);
    }

    /// Drop every record and reset all totals.
    pub fn clear(&mut self) {
        self.records.clear();
        self.visible.clear();
        self.total_duration = 0;
        self.selection_count = 0;
        self.selection_duration = 0;
        self.structure_changed(false);
    }

    /// Replace the contents with detached copies of `other`'s visible records.
    pub fn copy_from(&mut self, other: &SongList) {
        let copies: Vec<Record> = other.iter().map(Record::detached).collect();
        self.load(copies);
    }

    /// Remove records from the end until at most `max_size` remain.
    pub fn truncate(&mut self, max_size: usize) {
        while self.records.len() > max_size {
            self.take(self.records.len() - 1);
        }
    }

    /// Randomly reorder the canonical sequence.
    pub fn shuffle(&mut self) {
        let was_empty = self.visible.is_empty();
        let mut rng = rng();
        self.records.shuffle(&mut rng);
        debug!(count = self.records.len(), "shuffled list");
        self.rebuild_visible(was_empty);
    }

    /// Visible index under the cursor, `None` when the list is empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor.position(self.visible.len())
    }

    /// The record under the cursor.
    pub fn cursor_record(&self) -> Option<&Record> {
        self.cursor().and_then(|i| self.record_at(i))
    }

    pub fn viewport_offset(&self) -> usize {
        self.cursor.offset(self.visible.len())
    }

    pub fn viewport_height(&self) -> usize {
        self.cursor.height()
    }

    pub fn scroll_mode(&self) -> ScrollMode {
        self.cursor.mode()
    }

    pub fn set_scroll_mode(&mut self, mode: ScrollMode) {
        self.cursor.set_mode(mode, self.visible.len());
        self.redraw = true;
    }

    pub fn set_scrolloff(&mut self, scrolloff: usize) {
        self.cursor.set_scrolloff(scrolloff, self.visible.len());
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.cursor.set_wrap(wrap);
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        if height != self.cursor.height() {
            self.cursor.set_height(height, self.visible.len());
            self.redraw = true;
        }
    }

    /// Move the cursor by `delta` rows; `false` when it hit an end.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        self.redraw = true;
        self.cursor.move_by(delta, self.visible.len())
    }

    /// Put the cursor on visible `index`; `false` when clamped.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        self.redraw = true;
        self.cursor.set(index, self.visible.len())
    }

    /// Scroll the viewport by `delta` rows; `false` when it could not.
    pub fn scroll(&mut self, delta: isize) -> bool {
        self.redraw = true;
        self.cursor.scroll(delta, self.visible.len())
    }
}
