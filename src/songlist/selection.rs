use crate::library::{FieldMask, Record};
use crate::matcher::{MatchFlags, Matcher};

use super::SongList;

/// Progress of one selection iterator over the visible sequence.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub(super) enum SelIter {
    /// Not started since the last reset.
    #[default]
    Fresh,
    /// Last returned visible index.
    At(usize),
    /// Exhausted until the next reset.
    Done,
}

/// What to do with the selection flag of matching records.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectAction {
    Select,
    Deselect,
    Toggle,
}

impl SelectAction {
    fn apply(self, selected: bool) -> bool {
        match self {
            SelectAction::Select => true,
            SelectAction::Deselect => false,
            SelectAction::Toggle => !selected,
        }
    }
}

impl SongList {
    /// Set the selection flag of the record at visible `index`.
    ///
    /// Returns whether the flag changed. Totals only move on a change.
    pub fn set_selected(&mut self, index: usize, state: bool) -> bool {
        let Some(&ci) = self.visible.get(index) else {
            return false;
        };
        let record = &mut self.records[ci];
        if record.selected == state {
            return false;
        }
        record.selected = state;
        let time = record.time.unwrap_or(0);
        if state {
            self.selection_count += 1;
            self.selection_duration += time;
        } else {
            self.selection_count = self.selection_count.saturating_sub(1);
            self.selection_duration = self.selection_duration.saturating_sub(time);
        }
        self.redraw = true;
        true
    }

    /// Apply `action` to the record at visible `index`.
    pub fn select(&mut self, index: usize, action: SelectAction) -> bool {
        match self.record_at(index) {
            Some(r) => {
                let state = action.apply(r.selected);
                self.set_selected(index, state)
            }
            None => false,
        }
    }

    /// Apply `action` to every visible record. Returns how many changed.
    pub fn select_all(&mut self, action: SelectAction) -> usize {
        (0..self.visible.len())
            .filter(|&i| self.select(i, action))
            .count()
    }

    /// Apply `action` to every visible record from `from` to the end whose
    /// field in `mask` equals `pattern`. Returns how many changed.
    pub fn select_matching(
        &mut self,
        pattern: &str,
        mask: FieldMask,
        from: usize,
        action: SelectAction,
    ) -> usize {
        let matcher = Matcher::new(pattern, MatchFlags::EXACT);
        let last = match self.visible.len() {
            0 => return 0,
            n => n - 1,
        };
        let mut changed = 0;
        let mut i = from;
        while i <= last {
            let Some(found) = self.find_with(&matcher, mask, i, last, false) else {
                break;
            };
            if found < i {
                break;
            }
            if self.select(found, action) {
                changed += 1;
            }
            i = found + 1;
        }
        changed
    }

    /// Forget where the selection iterators stopped.
    pub fn reset_selection_iterators(&mut self) {
        self.sel_next = SelIter::Fresh;
        self.sel_prev = SelIter::Fresh;
    }

    /// Visible index of the next selected record.
    ///
    /// With nothing selected, the first call after a reset yields the cursor
    /// position and the following one `None`.
    pub fn next_selected_index(&mut self) -> Option<usize> {
        self.sel_prev = SelIter::Fresh;
        let start = match self.sel_next {
            SelIter::Done => return None,
            SelIter::Fresh if self.selection_count == 0 => {
                self.sel_next = SelIter::Done;
                return self.cursor();
            }
            SelIter::Fresh => 0,
            SelIter::At(i) => i + 1,
        };
        let found = (start..self.visible.len()).find(|&i| self.is_selected(i));
        self.sel_next = found.map_or(SelIter::Done, SelIter::At);
        found
    }

    /// Visible index of the previous selected record, scanning from the end.
    pub fn prev_selected_index(&mut self) -> Option<usize> {
        self.sel_next = SelIter::Fresh;
        let end = match self.sel_prev {
            SelIter::Done => return None,
            SelIter::Fresh if self.selection_count == 0 => {
                self.sel_prev = SelIter::Done;
                return self.cursor();
            }
            SelIter::Fresh => self.visible.len(),
            SelIter::At(i) => i,
        };
        let found = (0..end).rev().find(|&i| self.is_selected(i));
        self.sel_prev = found.map_or(SelIter::Done, SelIter::At);
        found
    }

    pub fn next_selected(&mut self) -> Option<&Record> {
        let i = self.next_selected_index()?;
        self.record_at(i)
    }

    pub fn prev_selected(&mut self) -> Option<&Record> {
        let i = self.prev_selected_index()?;
        self.record_at(i)
    }

    /// Like [`next_selected_index`](Self::next_selected_index), deselecting
    /// the record it returns.
    pub fn pop_next_selected_index(&mut self) -> Option<usize> {
        let i = self.next_selected_index()?;
        self.set_selected(i, false);
        Some(i)
    }

    /// Drain the selection one record at a time, or yield the cursor record
    /// once when nothing is selected.
    pub fn pop_next_selected(&mut self) -> Option<&Record> {
        let i = self.pop_next_selected_index()?;
        self.record_at(i)
    }

    fn is_selected(&self, index: usize) -> bool {
        self.record_at(index).is_some_and(|r| r.selected)
    }
}
