//! crossterm backend
//!
//! Real-terminal implementation of the engine's collaborators: keys come
//! from crossterm's event queue, output goes through the `Renderer`.

use std::collections::VecDeque;
use std::io;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event};
use tracing::{debug, warn};

use super::keymapper::KeyMapper;
use super::renderer::Renderer;
use crate::core::backend::Backend;
use crate::core::keys::Key;
use crate::core::window::Window;

pub struct CrosstermBackend {
    renderer: Renderer,
    /// Keys produced by one event but not yet handed out
    pending: VecDeque<Key>,
    ctrl_break: bool,
}

impl CrosstermBackend {
    /// Put the terminal in raw mode on the alternate screen.
    pub fn init() -> io::Result<Self> {
        let mut renderer = Renderer::new();
        renderer.init()?;
        Ok(Self {
            renderer,
            pending: VecDeque::new(),
            ctrl_break: true,
        })
    }

    /// Restore the terminal.
    pub fn cleanup(mut self) -> io::Result<()> {
        self.renderer.cleanup()
    }
}

impl Backend for CrosstermBackend {
    fn read_key(&mut self) -> Option<Key> {
        if let Some(key) = self.pending.pop_front() {
            return Some(key);
        }

        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => {
                    warn!("event poll failed: {}", e);
                    return None;
                }
            }

            match event::read() {
                Ok(Event::Key(key_event)) => {
                    self.pending
                        .extend(KeyMapper::map(&key_event, self.ctrl_break));
                    if let Some(key) = self.pending.pop_front() {
                        return Some(key);
                    }
                }
                Ok(Event::Resize(cols, rows)) => {
                    debug!("terminal resized to {}x{}", cols, rows);
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("event read failed: {}", e);
                    return None;
                }
            }
        }
    }

    fn ctrl_break(&self) -> bool {
        self.ctrl_break
    }

    fn set_ctrl_break(&mut self, enabled: bool) {
        self.ctrl_break = enabled;
    }

    fn nap(&mut self, duration: Duration) {
        thread::sleep(duration);
    }

    fn refresh(&mut self, win: &mut Window) -> io::Result<()> {
        self.renderer.draw(win)
    }

    fn size(&self) -> (usize, usize) {
        match Renderer::size() {
            Ok((cols, rows)) => (rows as usize, cols as usize),
            Err(e) => {
                warn!("terminal size unavailable: {}", e);
                (24, 80)
            }
        }
    }
}
