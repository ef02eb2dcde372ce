//! Cursor position and viewport scrolling over a list of `size` rows.
//!
//! The cursor does not own the list it walks; every operation takes the
//! current list size so the same implementation serves song lists and plain
//! row lists alike.

/// How the viewport follows the cursor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ScrollMode {
    /// Keep a margin of `scrolloff` rows between cursor and viewport edges.
    #[default]
    Normal,
    /// Keep the cursor in the middle row.
    Centered,
    /// Place the cursor proportionally to its position in the whole list.
    Relative,
}

impl ScrollMode {
    /// The next mode in `Normal -> Centered -> Relative` order.
    pub fn cycle(self) -> Self {
        match self {
            ScrollMode::Normal => ScrollMode::Centered,
            ScrollMode::Centered => ScrollMode::Relative,
            ScrollMode::Relative => ScrollMode::Normal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScrollMode::Normal => "normal",
            ScrollMode::Centered => "centered",
            ScrollMode::Relative => "relative",
        }
    }
}

/// Cursor index plus scroll offset.
///
/// Operations returning `bool` report whether the request was carried out in
/// full; `false` means it was clamped or had nothing to act on.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    index: usize,
    offset: usize,
    height: usize,
    scrolloff: usize,
    mode: ScrollMode,
    wrap: bool,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw cursor index; meaningless while the list is empty.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cursor index, or `None` for an empty list.
    pub fn position(&self, size: usize) -> Option<usize> {
        (size > 0).then(|| self.index.min(size - 1))
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    pub fn wrap(&self) -> bool {
        self.wrap
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    pub fn set_scrolloff(&mut self, scrolloff: usize, size: usize) {
        self.scrolloff = scrolloff;
        self.follow(size);
    }

    /// Switch scroll mode. Normal mode resumes from the offset the previous
    /// mode was showing.
    pub fn set_mode(&mut self, mode: ScrollMode, size: usize) {
        self.offset = self.offset(size);
        self.mode = mode;
        self.follow(size);
    }

    /// Set the number of rows the viewport shows.
    pub fn set_height(&mut self, height: usize, size: usize) {
        self.height = height;
        self.follow(size);
    }

    /// Back to the top of the list.
    pub fn reset(&mut self) {
        self.index = 0;
        self.offset = 0;
    }

    /// Pull cursor and offset back inside a list of `size` rows.
    pub fn clamp(&mut self, size: usize) {
        if size == 0 {
            self.reset();
            return;
        }
        self.index = self.index.min(size - 1);
        self.follow(size);
    }

    fn margin(&self) -> usize {
        if self.height == 0 {
            return 0;
        }
        self.scrolloff.min((self.height - 1) / 2)
    }

    fn max_offset(&self, size: usize) -> usize {
        size.saturating_sub(self.height)
    }

    /// Index of the first row drawn at the top of the viewport.
    pub fn offset(&self, size: usize) -> usize {
        let max = self.max_offset(size);
        match self.mode {
            ScrollMode::Normal => self.offset.min(max),
            ScrollMode::Centered => self
                .index
                .saturating_sub(self.height.saturating_sub(1) / 2)
                .min(max),
            ScrollMode::Relative => {
                let rows = self.height.saturating_sub(2);
                if rows >= size || size <= 1 {
                    return 0;
                }
                let span = size - 1;
                let row = (self.index * rows * 2 + span) / (2 * span);
                self.index.saturating_sub(row).min(max)
            }
        }
    }

    /// Restore the scroll margin after the cursor moved (Normal mode only;
    /// the other modes derive their offset from the cursor).
    fn follow(&mut self, size: usize) {
        if self.mode != ScrollMode::Normal {
            return;
        }
        let max = self.max_offset(size);
        // No blank trailing rows.
        self.offset = self.offset.min(max);
        if self.height == 0 {
            return;
        }
        let m = self.margin();
        if self.index < self.offset + m {
            self.offset = self.index.saturating_sub(m);
        } else if self.index + m >= self.offset + self.height {
            self.offset = (self.index + m + 1 - self.height).min(max);
        }
    }

    /// Move the cursor by `delta` rows.
    ///
    /// Past either end the cursor wraps when wrapping is enabled, otherwise
    /// it stops at the end and the move reports `false`.
    pub fn move_by(&mut self, delta: isize, size: usize) -> bool {
        if size == 0 {
            return false;
        }
        let last = size as isize - 1;
        let target = (self.index.min(size - 1) as isize).saturating_add(delta);
        let (index, complied) = if (0..=last).contains(&target) {
            (target, true)
        } else if self.wrap {
            (target.rem_euclid(size as isize), true)
        } else {
            (target.clamp(0, last), false)
        };
        self.index = index as usize;
        self.follow(size);
        complied
    }

    /// Put the cursor on `index`, clamped to the list.
    pub fn set(&mut self, index: usize, size: usize) -> bool {
        if size == 0 {
            return false;
        }
        self.index = index.min(size - 1);
        self.follow(size);
        index < size
    }

    /// Scroll the viewport by `delta` rows.
    ///
    /// In Normal mode the offset moves and the cursor is dragged along only as
    /// far as needed to stay within the margin. The other modes have no
    /// independent offset, so the cursor itself moves.
    pub fn scroll(&mut self, delta: isize, size: usize) -> bool {
        if size == 0 {
            return false;
        }
        if self.mode != ScrollMode::Normal {
            return self.move_by(delta, size);
        }

        let max = self.max_offset(size);
        let target = (self.offset.min(max) as isize).saturating_add(delta);
        let offset = target.clamp(0, max as isize) as usize;
        let complied = offset as isize == target;
        self.offset = offset;

        let m = self.margin();
        let last = size - 1;
        let lo = if offset == 0 { 0 } else { offset + m }.min(last);
        let hi = if offset == max {
            last
        } else {
            (offset + self.height.max(1) - 1).saturating_sub(m).min(last)
        };
        self.index = self.index.clamp(lo, hi.max(lo));
        complied
    }
}
