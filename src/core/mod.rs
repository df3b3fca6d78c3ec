//! Input and scrolling core.
//!
//! This module contains the window-level engine:
//!
//! - **getch**: The read pipeline (pushback, cooked line buffer, timeouts, echo)
//! - **scroll**: Line-handle rotation inside a window's scroll region
//! - **window**: Cell grid, cursor, margins and dirty tracking
//! - **screen**: The per-terminal context that ties it together
//! - **backend**: What the engine needs from the platform
//!
//! # Architecture
//!
//! ```text
//! Screen
//! ├── SessionState (input mode, echo, delays)
//! ├── InputQueue
//! │   ├── PushbackStack (ungetch)
//! │   └── LineBuffer (cooked mode)
//! ├── Window table (line arena + handle table per window)
//! └── Backend (keys, naps, control-break, refresh)
//! ```

pub mod backend;
pub mod cell;
pub mod error;
pub mod getch;
pub mod keys;
pub mod linebuf;
pub mod modes;
pub mod pushback;
pub mod screen;
pub mod scroll;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{Backend, BreakGuard};
pub use cell::{AttrFlags, Cell, CellAttrs, Color};
pub use error::{CursesError, Result};
pub use getch::InputQueue;
pub use keys::Key;
pub use modes::{InputMode, SessionState};
pub use screen::{Screen, WindowId};
pub use window::{BlankPolicy, DirtySpan, LineHandle, Window};
