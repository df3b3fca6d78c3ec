//! Character input pipeline
//!
//! A read drains, in order: the pushback stack, the pending cooked-mode
//! line, and finally the backend's key source. The acquisition loop applies
//! the timeout policy, CR translation and echo, and either returns the key
//! at once (raw/cbreak) or collects a whole line first (cooked).

use tracing::{debug, trace, warn};

use super::backend::{Backend, BreakGuard};
use super::error::{CursesError, Result};
use super::keys::{is_ordinary, Key, CR, LF};
use super::linebuf::LineBuffer;
use super::modes::SessionState;
use super::pushback::PushbackStack;
use super::screen::WindowId;
use super::window::Window;

/// Per-session input queues that persist between reads
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pushback: PushbackStack,
    line: LineBuffer,
    /// Window of the read in progress or most recently started
    active: Option<WindowId>,
}

impl InputQueue {
    pub fn new(session: &SessionState) -> Self {
        Self {
            pushback: PushbackStack::new(session.pushback_capacity),
            line: LineBuffer::new(session.line_capacity),
            active: None,
        }
    }

    /// Queue `key` to be returned by the next read.
    pub fn unget(&mut self, key: Key) -> Result<()> {
        self.pushback.push(key)
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.active
    }

    pub fn pushback(&self) -> &PushbackStack {
        &self.pushback
    }

    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    /// Drop pushed-back keys and any half-read line.
    pub fn flush(&mut self) {
        self.pushback.clear();
        self.line.reset();
    }

    /// Read one key for window `id`.
    pub fn read<B: Backend + ?Sized>(
        &mut self,
        session: &SessionState,
        id: WindowId,
        win: &mut Window,
        backend: &mut B,
    ) -> Result<Key> {
        let timed = session.delay_tenths > 0 || win.delay_ms > 0;
        let mut wait_count = session.wait_count(win.delay_ms);

        // Input has to reflect what is on screen
        if !win.is_pad() && win.is_touched() {
            backend.refresh(win)?;
        }

        self.active = Some(id);

        if let Some(key) = self.pushback.pop() {
            trace!("pushback -> {:#x}", key);
            return Ok(key);
        }

        if session.is_cooked() && self.line.has_pending() {
            if let Some(key) = self.line.next() {
                return Ok(key);
            }
        }

        self.line.reset();

        loop {
            let key = if session.is_raw() {
                backend.read_key()
            } else {
                BreakGuard::new(&mut *backend, session.orig_ctrl_break).read_key()
            };

            let mut key = match key {
                Some(key) => key,
                None if timed => {
                    if wait_count == 0 {
                        trace!("read timed out");
                        return Err(CursesError::NoInput);
                    }
                    wait_count -= 1;
                    backend.nap(session.poll_interval);
                    continue;
                }
                None if win.no_delay => return Err(CursesError::NoInput),
                None => {
                    backend.nap(session.poll_interval);
                    continue;
                }
            };

            if key == CR && session.auto_cr && !session.is_raw() {
                key = LF;
            }

            trace!("key {:#x}", key);

            if session.echo && is_ordinary(key) {
                win.add_char(key);
                if let Err(e) = backend.refresh(win) {
                    warn!("echo refresh failed: {}", e);
                }
            }

            if !session.is_cooked() {
                return Ok(key);
            }

            if !self.line.push(key) {
                debug!("line buffer full, dropped {:#x}", key);
            }

            if key == LF || key == CR {
                // A zero-capacity buffer holds nothing; hand back the terminator
                return Ok(self.line.next().unwrap_or(key));
            }
        }
    }
}
