//! Window renderer using crossterm
//!
//! Draws the changed spans of a window onto the real terminal.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::debug;

use crate::core::cell::{AttrFlags, CellAttrs};
use crate::core::window::Window;

/// Terminal renderer
pub struct Renderer {
    /// Whether the terminal has been initialized
    initialized: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self { initialized: false }
    }

    /// Initialize the terminal for rendering
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        queue!(stdout, EnterAlternateScreen, Clear(ClearType::All), MoveTo(0, 0))?;
        stdout.flush()?;

        self.initialized = true;
        debug!("renderer initialized");
        Ok(())
    }

    /// Cleanup the terminal
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;

        let mut stdout = io::stdout();
        let _ = queue!(
            stdout,
            ResetColor,
            SetAttribute(Attribute::Reset),
            Show,
            LeaveAlternateScreen
        );
        let _ = stdout.flush();

        // Disable raw mode - this is the most important part
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw the window's dirty spans, place the cursor and clear the spans
    pub fn draw(&mut self, win: &mut Window) -> io::Result<()> {
        let stdout = io::stdout();
        let mut stdout = io::BufWriter::with_capacity(16384, stdout.lock());
        self.draw_to(&mut stdout, win)?;
        stdout.flush()
    }

    pub fn draw_to<W: Write>(&mut self, out: &mut W, win: &mut Window) -> io::Result<()> {
        let (begin_y, begin_x) = win.begin();

        queue!(out, Hide)?;

        let mut last_attrs: Option<CellAttrs> = None;
        for row in 0..win.height() {
            let Some(span) = win.dirty_span(row) else {
                continue;
            };
            let Some(cells) = win.line(row) else {
                continue;
            };

            queue!(out, MoveTo(to_u16(begin_x + span.first), to_u16(begin_y + row)))?;
            for cell in &cells[span.first..=span.last.min(cells.len() - 1)] {
                if last_attrs != Some(cell.attrs) {
                    self.apply_attrs(out, &cell.attrs)?;
                    last_attrs = Some(cell.attrs);
                }
                queue!(out, Print(cell.ch))?;
            }
        }

        let (cur_y, cur_x) = win.cursor();
        queue!(
            out,
            SetAttribute(Attribute::Reset),
            MoveTo(to_u16(begin_x + cur_x), to_u16(begin_y + cur_y)),
            Show
        )?;

        win.clear_dirty();
        Ok(())
    }

    /// Apply cell attributes
    fn apply_attrs<W: Write>(&self, out: &mut W, attrs: &CellAttrs) -> io::Result<()> {
        // Reset first
        queue!(out, SetAttribute(Attribute::Reset))?;

        if attrs.flags.contains(AttrFlags::BOLD) {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if attrs.flags.contains(AttrFlags::DIM) {
            queue!(out, SetAttribute(Attribute::Dim))?;
        }
        if attrs.flags.contains(AttrFlags::ITALIC) {
            queue!(out, SetAttribute(Attribute::Italic))?;
        }
        if attrs.flags.contains(AttrFlags::UNDERLINE) {
            queue!(out, SetAttribute(Attribute::Underlined))?;
        }
        if attrs.flags.contains(AttrFlags::BLINK) {
            queue!(out, SetAttribute(Attribute::SlowBlink))?;
        }
        if attrs.flags.contains(AttrFlags::REVERSE) {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        if attrs.flags.contains(AttrFlags::INVISIBLE) {
            queue!(out, SetAttribute(Attribute::Hidden))?;
        }
        if attrs.flags.contains(AttrFlags::STRIKETHROUGH) {
            queue!(out, SetAttribute(Attribute::CrossedOut))?;
        }

        // Apply colors
        let fg_color = attrs.fg.to_crossterm();
        if fg_color != crossterm::style::Color::Reset {
            queue!(out, SetForegroundColor(fg_color))?;
        }
        let bg_color = attrs.bg.to_crossterm();
        if bg_color != crossterm::style::Color::Reset {
            queue!(out, SetBackgroundColor(bg_color))?;
        }

        Ok(())
    }

    /// Get terminal size as (cols, rows)
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_clears_dirty_spans() {
        let mut renderer = Renderer::new();
        let mut win = Window::new(3, 8, 1, 2);
        win.move_to(1, 0).unwrap();
        win.add_str("hi");

        let mut out = Vec::new();
        renderer.draw_to(&mut out, &mut win).unwrap();

        assert!(!win.is_touched());
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('h'));
        assert!(text.contains('i'));
        // Row 1 of a window at (1, 2) starts at terminal row 3, column 3
        assert!(text.contains("\x1b[3;3H"));
    }

    #[test]
    fn test_draw_untouched_window_only_moves_cursor() {
        let mut renderer = Renderer::new();
        let mut win = Window::new(2, 4, 0, 0);

        let mut out = Vec::new();
        renderer.draw_to(&mut out, &mut win).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(!text.contains(' '));
    }
}
