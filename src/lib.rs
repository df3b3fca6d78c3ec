//! termwin - curses-style window input and scrolling
//!
//! termwin provides the two parts of a curses-family library that carry
//! real state: the character-input pipeline behind `getch`, and the scroll
//! engine behind `wscrl`.
//!
//! # Features
//!
//! - **Line discipline**: Cooked, cbreak and raw modes with echo and CR translation
//! - **Typeahead**: `ungetch` pushback and a persistent cooked-mode line buffer
//! - **Timeouts**: `halfdelay`, `timeout` and `nodelay` as a bounded poll loop
//! - **Scrolling**: Scroll regions rotate line handles, no cell copying
//! - **crossterm backend**: Real terminal input and output
//!
//! # Example
//!
//! ```no_run
//! use termwin::config::Config;
//! use termwin::core::Screen;
//! use termwin::ui::CrosstermBackend;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::load();
//! let backend = CrosstermBackend::init()?;
//! let mut screen = Screen::new(backend, config.input.to_session(), config.scroll.policy());
//! screen.addstr("name? ")?;
//! let key = screen.getch()?;
//! # let _ = key;
//! screen.end().cleanup()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod ui;

pub use crate::core::{CursesError, Key, Result, Screen, WindowId};
