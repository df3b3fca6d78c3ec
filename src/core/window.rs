//! Window cell storage
//!
//! A window's rows live in a line arena that is allocated once with the
//! window. The visible row order is a table of `LineHandle`s into that arena,
//! so scrolling reorders handles instead of copying cells.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellAttrs};
use super::error::{CursesError, Result};
use super::keys::{is_ordinary, Key};

const TABSIZE: usize = 8;

/// Index of one row's storage in a window's line arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineHandle(usize);

impl LineHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Touched column range of a row, inclusive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtySpan {
    pub first: usize,
    pub last: usize,
}

/// How rows vacated by a scroll are blanked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankPolicy {
    /// Fill with the window background; otherwise the blank character with
    /// the window's current attributes.
    pub use_window_background: bool,
}

impl Default for BlankPolicy {
    fn default() -> Self {
        Self {
            use_window_background: true,
        }
    }
}

/// A rectangular cell grid with cursor, scroll margins and input settings
#[derive(Debug, Clone)]
pub struct Window {
    pub(super) height: usize,
    pub(super) width: usize,
    begin_y: usize,
    begin_x: usize,
    cur_y: usize,
    cur_x: usize,
    /// Row storage, never resized after creation
    pub(super) arena: Vec<Vec<Cell>>,
    /// Visible row order, always `height` entries
    pub(super) lines: Vec<LineHandle>,
    pub(super) dirty: Vec<Option<DirtySpan>>,
    pub(super) top_margin: usize,
    pub(super) bottom_margin: usize,
    pub(super) is_pad: bool,
    pub scroll_enabled: bool,
    pub no_delay: bool,
    /// Read timeout in milliseconds, 0 = none
    pub delay_ms: u32,
    pub background: Cell,
    /// Attributes applied to characters added from now on
    pub attrs: CellAttrs,
    pub blank: char,
    pub blank_policy: BlankPolicy,
    /// Refresh after every change that goes through the sync hook
    pub immediate: bool,
}

impl Window {
    pub fn new(nlines: usize, ncols: usize, begin_y: usize, begin_x: usize) -> Self {
        let background = Cell::default();
        Self {
            height: nlines,
            width: ncols,
            begin_y,
            begin_x,
            cur_y: 0,
            cur_x: 0,
            arena: (0..nlines).map(|_| vec![background; ncols]).collect(),
            lines: (0..nlines).map(LineHandle).collect(),
            dirty: vec![None; nlines],
            top_margin: 0,
            bottom_margin: nlines.saturating_sub(1),
            is_pad: false,
            scroll_enabled: false,
            no_delay: false,
            delay_ms: 0,
            background,
            attrs: CellAttrs::default(),
            blank: ' ',
            blank_policy: BlankPolicy::default(),
            immediate: false,
        }
    }

    /// An off-screen window. Pads never scroll and are not flushed by reads.
    pub fn pad(nlines: usize, ncols: usize) -> Self {
        Self {
            is_pad: true,
            ..Self::new(nlines, ncols, 0, 0)
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_pad(&self) -> bool {
        self.is_pad
    }

    /// Screen position of the top-left corner
    pub fn begin(&self) -> (usize, usize) {
        (self.begin_y, self.begin_x)
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cur_y, self.cur_x)
    }

    pub fn margins(&self) -> (usize, usize) {
        (self.top_margin, self.bottom_margin)
    }

    pub fn set_margins(&mut self, top: usize, bottom: usize) -> Result<()> {
        if top > bottom || bottom >= self.height {
            return Err(CursesError::InvalidArgument("scroll region out of range"));
        }
        self.top_margin = top;
        self.bottom_margin = bottom;
        Ok(())
    }

    /// Move the cursor. Out-of-bounds positions leave it where it was.
    pub fn move_to(&mut self, y: usize, x: usize) -> Result<()> {
        if y >= self.height || x >= self.width {
            return Err(CursesError::PositionFailed { y, x });
        }
        self.cur_y = y;
        self.cur_x = x;
        Ok(())
    }

    pub fn handles(&self) -> &[LineHandle] {
        &self.lines
    }

    /// Cells of the row currently shown at `row`
    pub fn line(&self, row: usize) -> Option<&[Cell]> {
        let handle = self.lines.get(row)?;
        Some(&self.arena[handle.0])
    }

    pub fn cell(&self, y: usize, x: usize) -> Option<&Cell> {
        self.line(y).and_then(|cells| cells.get(x))
    }

    /// Row text with trailing blanks removed
    pub fn row_text(&self, row: usize) -> String {
        self.line(row)
            .map(|cells| cells.iter().map(|c| c.ch).collect::<String>())
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default()
    }

    pub fn dirty_span(&self, row: usize) -> Option<DirtySpan> {
        self.dirty.get(row).copied().flatten()
    }

    /// Whether any row has changes not yet flushed
    pub fn is_touched(&self) -> bool {
        self.dirty.iter().any(Option::is_some)
    }

    /// Mark every row fully changed
    pub fn touch(&mut self) {
        for row in 0..self.height {
            self.touch_row(row);
        }
    }

    pub fn clear_dirty(&mut self) {
        self.dirty.iter_mut().for_each(|d| *d = None);
    }

    pub(super) fn touch_row(&mut self, row: usize) {
        if self.width == 0 {
            return;
        }
        self.dirty[row] = Some(DirtySpan {
            first: 0,
            last: self.width - 1,
        });
    }

    fn touch_cells(&mut self, row: usize, first: usize, last: usize) {
        let span = match self.dirty[row] {
            Some(span) => DirtySpan {
                first: span.first.min(first),
                last: span.last.max(last),
            },
            None => DirtySpan { first, last },
        };
        self.dirty[row] = Some(span);
    }

    /// The cell used to blank rows vacated by scrolling
    pub fn blank_cell(&self) -> Cell {
        if self.blank_policy.use_window_background {
            self.background
        } else {
            Cell::new(self.blank, self.attrs)
        }
    }

    /// Blank from the cursor to the end of its row
    pub fn clear_to_eol(&mut self) {
        let (y, x) = (self.cur_y, self.cur_x);
        if x >= self.width {
            return;
        }
        let blank = self.background;
        let handle = self.lines[y];
        self.arena[handle.0][x..].fill(blank);
        self.touch_cells(y, x, self.width - 1);
    }

    /// Write a key at the cursor with `waddch` semantics.
    ///
    /// Function-key tokens are not displayable and are ignored. A newline
    /// clears the rest of the row and moves down, scrolling when the cursor
    /// sits on the bottom margin of a scrolling window.
    pub fn add_char(&mut self, key: Key) {
        if !is_ordinary(key) {
            return;
        }
        let ch = char::from(key as u8);
        match ch {
            '\t' => {
                let stop = (self.cur_x / TABSIZE + 1) * TABSIZE;
                for _ in self.cur_x..stop.min(self.width) {
                    self.put(' ');
                }
            }
            '\n' => {
                self.clear_to_eol();
                self.cur_x = 0;
                self.newline();
            }
            '\r' => self.cur_x = 0,
            '\x08' => self.cur_x = self.cur_x.saturating_sub(1),
            '\x7f' => {
                self.put('^');
                self.put('?');
            }
            c if c < ' ' => {
                self.put('^');
                self.put(char::from(key as u8 + b'@'));
            }
            c => self.put(c),
        }
    }

    pub fn add_str(&mut self, s: &str) {
        for b in s.bytes() {
            self.add_char(Key::from(b));
        }
    }

    fn put(&mut self, ch: char) {
        if self.height == 0 || self.width == 0 {
            return;
        }
        let (y, x) = (self.cur_y, self.cur_x);
        let handle = self.lines[y];
        self.arena[handle.0][x] = Cell::new(ch, self.attrs);
        self.touch_cells(y, x, x);

        self.cur_x += 1;
        if self.cur_x >= self.width {
            self.cur_x = 0;
            self.newline();
        }
    }

    fn newline(&mut self) {
        if self.cur_y == self.bottom_margin {
            if self.scroll_enabled && !self.is_pad {
                // Permitted by the checks above
                let _ = self.scroll_lines(1);
            }
        } else if self.cur_y + 1 < self.height {
            self.cur_y += 1;
        }
    }
}
