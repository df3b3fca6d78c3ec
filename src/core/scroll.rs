//! Scroll engine
//!
//! Shifts the rows between a window's top and bottom margins by rotating
//! line handles. The handle pushed out at one margin is blank-filled and
//! reused at the other, so a scroll allocates nothing and only the blank
//! fill touches cells.

use tracing::debug;

use super::error::{CursesError, Result};
use super::window::Window;

impl Window {
    /// Whether `scroll_lines` would be accepted
    pub fn can_scroll(&self) -> bool {
        self.scroll_enabled && !self.is_pad
    }

    /// Scroll the scroll region by `n` rows: positive moves content up
    /// (row i+1 becomes row i), negative moves it down. Rows outside the
    /// margins are never touched.
    pub fn scroll_lines(&mut self, n: i32) -> Result<()> {
        if !self.can_scroll() {
            return Err(CursesError::NotPermitted);
        }
        if n == 0 || self.height == 0 {
            return Ok(());
        }

        debug!(
            "scroll {} rows in [{}, {}]",
            n, self.top_margin, self.bottom_margin
        );

        let blank = self.blank_cell();
        let (top, bottom) = (self.top_margin, self.bottom_margin);

        // Past the region height every row is already blank
        let region = bottom - top + 1;
        let steps = usize::try_from(n.unsigned_abs()).map_or(region, |s| s.min(region));

        for _ in 0..steps {
            let freed = if n > 0 {
                let freed = self.lines[top];
                for row in top..bottom {
                    self.lines[row] = self.lines[row + 1];
                    self.touch_row(row);
                }
                self.lines[bottom] = freed;
                self.touch_row(bottom);
                freed
            } else {
                let freed = self.lines[bottom];
                for row in (top + 1..=bottom).rev() {
                    self.lines[row] = self.lines[row - 1];
                    self.touch_row(row);
                }
                self.lines[top] = freed;
                self.touch_row(top);
                freed
            };

            self.arena[freed.index()].fill(blank);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cell::Cell;
    use crate::core::window::{DirtySpan, LineHandle};

    /// 5x4 window with rows labelled R0..R4 and scrolling enabled
    fn labelled_window() -> Window {
        let mut win = Window::new(5, 4, 0, 0);
        for row in 0..5 {
            win.move_to(row, 0).unwrap();
            win.add_str(&format!("R{}", row));
        }
        win.clear_dirty();
        win.scroll_enabled = true;
        win
    }

    fn rows(win: &Window) -> Vec<String> {
        (0..win.height()).map(|r| win.row_text(r)).collect()
    }

    #[test]
    fn test_scroll_up_one() {
        let mut win = labelled_window();
        let before: Vec<LineHandle> = win.handles().to_vec();

        win.scroll_lines(1).unwrap();

        assert_eq!(rows(&win), vec!["R1", "R2", "R3", "R4", ""]);
        // R0's storage is reused as the new blank row
        assert_eq!(win.handles()[..4], before[1..]);
        assert_eq!(win.handles()[4], before[0]);
        for row in 0..5 {
            assert_eq!(win.dirty_span(row), Some(DirtySpan { first: 0, last: 3 }));
        }
    }

    #[test]
    fn test_scroll_down_one() {
        let mut win = labelled_window();
        let before: Vec<LineHandle> = win.handles().to_vec();

        win.scroll_lines(-1).unwrap();

        assert_eq!(rows(&win), vec!["", "R0", "R1", "R2", "R3"]);
        assert_eq!(win.handles()[0], before[4]);
        assert_eq!(win.handles()[1..], before[..4]);
    }

    #[test]
    fn test_scroll_many() {
        let mut win = labelled_window();
        win.scroll_lines(3).unwrap();
        assert_eq!(rows(&win), vec!["R3", "R4", "", "", ""]);

        let mut win = labelled_window();
        win.scroll_lines(-2).unwrap();
        assert_eq!(rows(&win), vec!["", "", "R0", "R1", "R2"]);
    }

    #[test]
    fn test_scroll_beyond_region_blanks_it() {
        let mut win = labelled_window();
        win.set_margins(1, 3).unwrap();
        win.scroll_lines(i32::MAX).unwrap();
        assert_eq!(rows(&win), vec!["R0", "", "", "", "R4"]);

        let mut win = labelled_window();
        win.scroll_lines(i32::MIN).unwrap();
        assert_eq!(rows(&win), vec!["", "", "", "", ""]);
    }

    #[test]
    fn test_scroll_respects_margins() {
        let mut win = labelled_window();
        win.set_margins(1, 3).unwrap();
        let before: Vec<LineHandle> = win.handles().to_vec();

        win.scroll_lines(1).unwrap();
        assert_eq!(rows(&win), vec!["R0", "R2", "R3", "", "R4"]);
        assert_eq!(win.handles()[0], before[0]);
        assert_eq!(win.handles()[4], before[4]);
        assert_eq!(win.dirty_span(0), None);
        assert_eq!(win.dirty_span(4), None);

        win.scroll_lines(-1).unwrap();
        assert_eq!(rows(&win), vec!["R0", "", "R2", "R3", "R4"]);
    }

    #[test]
    fn test_scroll_zero_is_noop() {
        let mut win = labelled_window();
        let before: Vec<LineHandle> = win.handles().to_vec();

        assert!(win.scroll_lines(0).is_ok());
        assert_eq!(win.handles(), &before[..]);
        assert!(!win.is_touched());
    }

    #[test]
    fn test_scroll_rejected() {
        let mut win = labelled_window();
        win.scroll_enabled = false;
        let before: Vec<LineHandle> = win.handles().to_vec();
        assert!(matches!(win.scroll_lines(1), Err(CursesError::NotPermitted)));
        assert_eq!(win.handles(), &before[..]);

        let mut pad = Window::pad(5, 4);
        pad.scroll_enabled = true;
        assert!(matches!(pad.scroll_lines(1), Err(CursesError::NotPermitted)));
        assert!(matches!(pad.scroll_lines(0), Err(CursesError::NotPermitted)));
    }

    #[test]
    fn test_blank_fill_uses_policy() {
        let mut win = labelled_window();
        win.background = Cell::new('~', Default::default());
        win.scroll_lines(1).unwrap();
        assert_eq!(win.row_text(4), "~~~~");

        win.blank_policy.use_window_background = false;
        win.blank = '-';
        win.scroll_lines(-1).unwrap();
        assert_eq!(win.row_text(0), "----");
    }
}
