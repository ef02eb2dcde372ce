use crate::error::ListError;
use crate::library::{Field, FieldMask};
use crate::matcher::{MatchFlags, Matcher};

use super::SongList;

impl SongList {
    /// Search the visible sequence for a record matching `pattern`.
    ///
    /// The scan visits indices from `from` through `to` inclusive, wrapping
    /// around the end of the list; `from == to` visits a single index. With
    /// `REVERSE` the scan starts at `to` and walks backwards to `from`.
    /// Indices past the end are clamped to the last record.
    pub fn find(
        &self,
        pattern: &str,
        mask: FieldMask,
        from: usize,
        to: usize,
        flags: MatchFlags,
    ) -> Option<usize> {
        let matcher = Matcher::new(pattern, flags);
        self.find_with(&matcher, mask, from, to, flags.contains(MatchFlags::REVERSE))
    }

    pub(super) fn find_with(
        &self,
        matcher: &Matcher,
        mask: FieldMask,
        from: usize,
        to: usize,
        reverse: bool,
    ) -> Option<usize> {
        let n = self.visible.len();
        if n == 0 {
            return None;
        }
        let (from, to) = (from.min(n - 1), to.min(n - 1));
        let (start, end) = if reverse { (to, from) } else { (from, to) };

        let mut i = start;
        loop {
            let hit = self
                .record_at(i)
                .is_some_and(|record| matcher.matches(record, mask));
            if hit {
                return Some(i);
            }
            if i == end {
                return None;
            }
            i = if reverse { (i + n - 1) % n } else { (i + 1) % n };
        }
    }

    /// Type-ahead search over all fields, moving the cursor to the hit.
    ///
    /// The search runs once around the list starting next to the cursor, or
    /// on the cursor itself when `skip_current` is false.
    pub fn search(
        &mut self,
        pattern: &str,
        backwards: bool,
        skip_current: bool,
    ) -> Result<usize, ListError> {
        let n = self.visible.len();
        let c = self.cursor().ok_or(ListError::NotFound)?;
        let mut flags = self.base_flags();
        Matcher::check(pattern, flags)?;

        let (from, to) = match (backwards, skip_current) {
            (false, true) => ((c + 1) % n, c),
            (false, false) => (c, (c + n - 1) % n),
            (true, true) => (c, (c + n - 1) % n),
            (true, false) => ((c + 1) % n, c),
        };
        if backwards {
            flags |= MatchFlags::REVERSE;
        }
        let found = self
            .find(pattern, FieldMask::ALL, from, to, flags)
            .ok_or(ListError::NotFound)?;
        self.set_cursor(found);
        Ok(found)
    }

    /// Start of the next run of records whose `field` differs from the
    /// cursor record's.
    pub fn next_of(&self, field: Field) -> Option<usize> {
        let c = self.cursor()?;
        let n = self.visible.len();
        let value = self.record_at(c)?.field(field).into_owned();
        self.find(
            &value,
            field.mask(),
            (c + 1) % n,
            c,
            MatchFlags::NOT | MatchFlags::EXACT,
        )
    }

    /// Start of the previous run of records whose `field` differs from the
    /// cursor record's.
    ///
    /// Finding the differing record lands on the end of that run, so a second
    /// scan walks back to its first record.
    pub fn prev_of(&self, field: Field) -> Option<usize> {
        let c = self.cursor()?;
        let n = self.visible.len();
        let flags = MatchFlags::NOT | MatchFlags::EXACT | MatchFlags::REVERSE;

        let value = self.record_at(c)?.field(field).into_owned();
        let run_end = self.find(&value, field.mask(), c, (c + n - 1) % n, flags)?;
        if run_end == 0 {
            return Some(0);
        }

        let value = self.record_at(run_end)?.field(field).into_owned();
        match self.find(&value, field.mask(), 0, run_end - 1, flags) {
            Some(before) => Some(before + 1),
            None => Some(0),
        }
    }

    /// Visible index of the record with daemon identity `id`.
    pub fn find_by_id(&self, id: u32) -> Option<usize> {
        self.iter().position(|r| r.id == Some(id))
    }

    /// Visible index of the record for `file`.
    pub fn find_by_file(&self, file: &str) -> Option<usize> {
        self.iter().position(|r| r.file == file)
    }
}
