//! Platform collaborators
//!
//! Everything the input pipeline and scroll engine need from the outside
//! world: a poll-once key source, the control-break switch, a sleep, and
//! window output.

use std::io;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use super::keys::Key;
use super::window::Window;

pub trait Backend {
    /// Next pending key, or `None` if nothing is available right now.
    /// Must not block.
    fn read_key(&mut self) -> Option<Key>;

    /// Whether the break key currently interrupts the program.
    fn ctrl_break(&self) -> bool;

    fn set_ctrl_break(&mut self, enabled: bool);

    /// Sleep between polls.
    fn nap(&mut self, duration: Duration);

    /// Draw the window's changed rows and clear its dirty spans.
    fn refresh(&mut self, win: &mut Window) -> io::Result<()>;

    /// Called after a scroll or character write changed `win`.
    fn sync(&mut self, win: &mut Window) -> io::Result<()> {
        if win.immediate {
            self.refresh(win)?;
        }
        Ok(())
    }

    /// Terminal size as (rows, cols).
    fn size(&self) -> (usize, usize);
}

/// Holds the control-break policy at a value for the duration of a read
/// and puts the previous policy back when dropped.
pub struct BreakGuard<'a, B: Backend + ?Sized> {
    backend: &'a mut B,
    saved: bool,
}

impl<'a, B: Backend + ?Sized> BreakGuard<'a, B> {
    pub fn new(backend: &'a mut B, policy: bool) -> Self {
        let saved = backend.ctrl_break();
        backend.set_ctrl_break(policy);
        Self { backend, saved }
    }
}

impl<B: Backend + ?Sized> Deref for BreakGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        &*self.backend
    }
}

impl<B: Backend + ?Sized> DerefMut for BreakGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut *self.backend
    }
}

impl<B: Backend + ?Sized> Drop for BreakGuard<'_, B> {
    fn drop(&mut self) {
        self.backend.set_ctrl_break(self.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::ScriptedBackend;

    #[test]
    fn test_break_guard_restores() {
        let mut backend = ScriptedBackend::new(&[]);
        backend.set_ctrl_break(false);
        {
            let guard = BreakGuard::new(&mut backend, true);
            assert!(guard.ctrl_break());
        }
        assert!(!backend.ctrl_break());
        assert_eq!(backend.break_changes, vec![true, false, true, false]);
    }

    #[test]
    fn test_sync_refreshes_immediate_windows() {
        let mut backend = ScriptedBackend::new(&[]);
        let mut win = Window::new(2, 2, 0, 0);
        backend.sync(&mut win).unwrap();
        assert_eq!(backend.refreshes, 0);

        win.immediate = true;
        win.add_char(b'x' as Key);
        backend.sync(&mut win).unwrap();
        assert_eq!(backend.refreshes, 1);
        assert!(!win.is_touched());
    }
}
