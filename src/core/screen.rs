//! Screen context
//!
//! Owns the session modes, the input queues, the window table and the
//! backend, and exposes the curses-style entry points. One `Screen` per
//! terminal; nothing here is global.

use tracing::{debug, info};

use super::backend::Backend;
use super::error::{CursesError, Result};
use super::getch::InputQueue;
use super::keys::Key;
use super::modes::{InputMode, SessionState};
use super::window::{BlankPolicy, Window};

/// Handle to a window in a screen's window table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowId(usize);

impl WindowId {
    /// The standard screen, created with the `Screen`
    pub const STDSCR: WindowId = WindowId(0);
}

pub struct Screen<B: Backend> {
    pub session: SessionState,
    input: InputQueue,
    windows: Vec<Option<Window>>,
    blank_policy: BlankPolicy,
    backend: B,
}

impl<B: Backend> Screen<B> {
    /// Start a session with a standard screen covering the whole terminal.
    pub fn new(mut backend: B, session: SessionState, blank_policy: BlankPolicy) -> Self {
        if session.is_raw() {
            backend.set_ctrl_break(false);
        }
        let (rows, cols) = backend.size();
        let mut stdscr = Window::new(rows, cols, 0, 0);
        stdscr.blank_policy = blank_policy;

        info!("screen {}x{}, mode {:?}", cols, rows, session.mode);

        Self {
            input: InputQueue::new(&session),
            session,
            windows: vec![Some(stdscr)],
            blank_policy,
            backend,
        }
    }

    /// End the session and hand the backend back.
    pub fn end(self) -> B {
        debug!("screen ended");
        self.backend
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn stdscr(&self) -> WindowId {
        WindowId::STDSCR
    }

    pub fn window(&self, id: WindowId) -> Result<&Window> {
        self.windows
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(CursesError::InvalidWindow)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Result<&mut Window> {
        self.windows
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(CursesError::InvalidWindow)
    }

    /// Window of the read in progress or most recently started.
    pub fn active_input_window(&self) -> Option<WindowId> {
        self.input.active_window()
    }

    pub fn input(&self) -> &InputQueue {
        &self.input
    }

    // --- window table ---

    pub fn newwin(
        &mut self,
        nlines: usize,
        ncols: usize,
        begin_y: usize,
        begin_x: usize,
    ) -> Result<WindowId> {
        let (rows, cols) = self.backend.size();
        if nlines == 0 || ncols == 0 || begin_y + nlines > rows || begin_x + ncols > cols {
            return Err(CursesError::InvalidArgument("window does not fit on screen"));
        }
        let mut win = Window::new(nlines, ncols, begin_y, begin_x);
        win.blank_policy = self.blank_policy;
        Ok(self.insert(win))
    }

    pub fn newpad(&mut self, nlines: usize, ncols: usize) -> Result<WindowId> {
        if nlines == 0 || ncols == 0 {
            return Err(CursesError::InvalidArgument("pad must not be empty"));
        }
        let mut pad = Window::pad(nlines, ncols);
        pad.blank_policy = self.blank_policy;
        Ok(self.insert(pad))
    }

    /// Delete a window. Its id becomes invalid; the standard screen cannot
    /// be deleted.
    pub fn delwin(&mut self, id: WindowId) -> Result<()> {
        if id == WindowId::STDSCR {
            return Err(CursesError::InvalidArgument("cannot delete the standard screen"));
        }
        let slot = self.windows.get_mut(id.0).ok_or(CursesError::InvalidWindow)?;
        slot.take().ok_or(CursesError::InvalidWindow)?;
        if self.input.active_window() == Some(id) {
            debug!("deleted the active input window");
        }
        Ok(())
    }

    fn insert(&mut self, win: Window) -> WindowId {
        if let Some(free) = self.windows.iter().position(Option::is_none) {
            self.windows[free] = Some(win);
            WindowId(free)
        } else {
            self.windows.push(Some(win));
            WindowId(self.windows.len() - 1)
        }
    }

    // --- input ---

    pub fn getch(&mut self) -> Result<Key> {
        self.wgetch(WindowId::STDSCR)
    }

    pub fn wgetch(&mut self, id: WindowId) -> Result<Key> {
        let win = self
            .windows
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(CursesError::InvalidWindow)?;
        self.input.read(&self.session, id, win, &mut self.backend)
    }

    pub fn mvgetch(&mut self, y: usize, x: usize) -> Result<Key> {
        self.mvwgetch(WindowId::STDSCR, y, x)
    }

    pub fn mvwgetch(&mut self, id: WindowId, y: usize, x: usize) -> Result<Key> {
        self.wmove(id, y, x)?;
        self.wgetch(id)
    }

    pub fn ungetch(&mut self, key: Key) -> Result<()> {
        self.input.unget(key)
    }

    /// Throw away all typeahead: pushback, the pending line, and whatever
    /// the backend has queued.
    pub fn flushinp(&mut self) {
        self.input.flush();
        let mut dropped = 0;
        while self.backend.read_key().is_some() {
            dropped += 1;
        }
        debug!("flushinp dropped {} pending keys", dropped);
    }

    // --- input options ---

    /// Keys arrive immediately and control-break handling is off, so
    /// Ctrl+C reaches the caller as 0x03.
    pub fn raw(&mut self) {
        self.set_mode(InputMode::Raw);
        self.backend.set_ctrl_break(false);
    }

    pub fn noraw(&mut self) {
        self.set_mode(InputMode::Cooked);
        self.backend.set_ctrl_break(self.session.orig_ctrl_break);
    }

    pub fn cbreak(&mut self) {
        self.set_mode(InputMode::Cbreak);
    }

    /// Back to line mode. Also cancels half-delay.
    pub fn nocbreak(&mut self) {
        self.set_mode(InputMode::Cooked);
        self.session.delay_tenths = 0;
        self.backend.set_ctrl_break(self.session.orig_ctrl_break);
    }

    /// Cbreak mode where reads give up after `tenths` tenths of a second.
    pub fn halfdelay(&mut self, tenths: u32) -> Result<()> {
        if !(1..=255).contains(&tenths) {
            return Err(CursesError::InvalidArgument("halfdelay must be 1..=255"));
        }
        self.set_mode(InputMode::Cbreak);
        self.session.delay_tenths = tenths;
        Ok(())
    }

    pub fn echo(&mut self) {
        self.session.echo = true;
    }

    pub fn noecho(&mut self) {
        self.session.echo = false;
    }

    /// Translate CR to LF on input.
    pub fn nl(&mut self) {
        self.session.auto_cr = true;
    }

    pub fn nonl(&mut self) {
        self.session.auto_cr = false;
    }

    pub fn nodelay(&mut self, id: WindowId, enabled: bool) -> Result<()> {
        self.window_mut(id)?.no_delay = enabled;
        Ok(())
    }

    /// Negative blocks, zero never waits, positive waits up to `delay` ms.
    pub fn wtimeout(&mut self, id: WindowId, delay: i32) -> Result<()> {
        let win = self.window_mut(id)?;
        match delay {
            d if d < 0 => {
                win.no_delay = false;
                win.delay_ms = 0;
            }
            0 => {
                win.no_delay = true;
                win.delay_ms = 0;
            }
            d => {
                win.no_delay = false;
                win.delay_ms = d.unsigned_abs();
            }
        }
        Ok(())
    }

    pub fn timeout(&mut self, delay: i32) {
        // The standard screen always exists
        let _ = self.wtimeout(WindowId::STDSCR, delay);
    }

    fn set_mode(&mut self, mode: InputMode) {
        debug!("input mode {:?} -> {:?}", self.session.mode, mode);
        self.session.mode = mode;
    }

    // --- scrolling ---

    pub fn scroll(&mut self, id: WindowId) -> Result<()> {
        self.wscrl(id, 1)
    }

    pub fn scrl(&mut self, n: i32) -> Result<()> {
        self.wscrl(WindowId::STDSCR, n)
    }

    pub fn wscrl(&mut self, id: WindowId, n: i32) -> Result<()> {
        let win = self
            .windows
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(CursesError::InvalidWindow)?;
        win.scroll_lines(n)?;
        self.backend.sync(win)?;
        Ok(())
    }

    pub fn scrollok(&mut self, id: WindowId, enabled: bool) -> Result<()> {
        self.window_mut(id)?.scroll_enabled = enabled;
        Ok(())
    }

    pub fn wsetscrreg(&mut self, id: WindowId, top: usize, bottom: usize) -> Result<()> {
        self.window_mut(id)?.set_margins(top, bottom)
    }

    pub fn setscrreg(&mut self, top: usize, bottom: usize) -> Result<()> {
        self.wsetscrreg(WindowId::STDSCR, top, bottom)
    }

    pub fn immedok(&mut self, id: WindowId, enabled: bool) -> Result<()> {
        self.window_mut(id)?.immediate = enabled;
        Ok(())
    }

    // --- output ---

    pub fn wmove(&mut self, id: WindowId, y: usize, x: usize) -> Result<()> {
        self.window_mut(id)?.move_to(y, x)
    }

    pub fn waddch(&mut self, id: WindowId, key: Key) -> Result<()> {
        let win = self
            .windows
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(CursesError::InvalidWindow)?;
        win.add_char(key);
        self.backend.sync(win)?;
        Ok(())
    }

    pub fn waddstr(&mut self, id: WindowId, s: &str) -> Result<()> {
        let win = self
            .windows
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(CursesError::InvalidWindow)?;
        win.add_str(s);
        self.backend.sync(win)?;
        Ok(())
    }

    pub fn addstr(&mut self, s: &str) -> Result<()> {
        self.waddstr(WindowId::STDSCR, s)
    }

    pub fn wrefresh(&mut self, id: WindowId) -> Result<()> {
        let win = self
            .windows
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(CursesError::InvalidWindow)?;
        self.backend.refresh(win)?;
        Ok(())
    }

    pub fn refresh(&mut self) -> Result<()> {
        self.wrefresh(WindowId::STDSCR)
    }

    pub fn is_wintouched(&self, id: WindowId) -> Result<bool> {
        Ok(self.window(id)?.is_touched())
    }

    pub fn touchwin(&mut self, id: WindowId) -> Result<()> {
        self.window_mut(id)?.touch();
        Ok(())
    }
}
