//! Scripted backend for unit tests
//!
//! Replays a fixed key script (with `None` entries standing for empty
//! polls) and records what the engine asked of it. Naps never sleep.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use super::backend::Backend;
use super::keys::Key;
use super::window::Window;

pub struct ScriptedBackend {
    script: VecDeque<Option<Key>>,
    ctrl_break: bool,
    pub polls: usize,
    pub naps: Vec<Duration>,
    pub refreshes: usize,
    pub syncs: usize,
    /// Every value passed to `set_ctrl_break`, starting with the initial one
    pub break_changes: Vec<bool>,
    /// Break policy observed at each poll
    pub break_at_poll: Vec<bool>,
    pub rows: usize,
    pub cols: usize,
}

impl ScriptedBackend {
    /// Backend whose polls return `keys` in order, then nothing.
    pub fn new(keys: &[Key]) -> Self {
        Self::with_script(keys.iter().map(|&k| Some(k)).collect())
    }

    pub fn with_script(script: Vec<Option<Key>>) -> Self {
        Self {
            script: script.into(),
            ctrl_break: true,
            polls: 0,
            naps: Vec::new(),
            refreshes: 0,
            syncs: 0,
            break_changes: vec![true],
            break_at_poll: Vec::new(),
            rows: 24,
            cols: 80,
        }
    }

    pub fn typing(keys: &str) -> Self {
        Self::new(&keys.bytes().map(Key::from).collect::<Vec<_>>())
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Backend for ScriptedBackend {
    fn read_key(&mut self) -> Option<Key> {
        self.polls += 1;
        self.break_at_poll.push(self.ctrl_break);
        self.script.pop_front().flatten()
    }

    fn ctrl_break(&self) -> bool {
        self.ctrl_break
    }

    fn set_ctrl_break(&mut self, enabled: bool) {
        self.ctrl_break = enabled;
        self.break_changes.push(enabled);
    }

    fn nap(&mut self, duration: Duration) {
        self.naps.push(duration);
    }

    fn refresh(&mut self, win: &mut Window) -> io::Result<()> {
        self.refreshes += 1;
        win.clear_dirty();
        Ok(())
    }

    fn sync(&mut self, win: &mut Window) -> io::Result<()> {
        self.syncs += 1;
        if win.immediate {
            self.refresh(win)?;
        }
        Ok(())
    }

    fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}
