//! Error type shared by the input pipeline, scroll engine and window table.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CursesError {
    #[error("Window does not exist")]
    InvalidWindow,

    /// Timeout elapsed or a non-blocking read found nothing. Callers are
    /// expected to re-poll.
    #[error("No input available")]
    NoInput,

    #[error("Pushback stack is full")]
    PushbackOverflow,

    #[error("Scrolling is not permitted on this window")]
    NotPermitted,

    #[error("Cannot move cursor to ({y}, {x})")]
    PositionFailed { y: usize, x: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Backend I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl CursesError {
    /// True for the expected, recoverable "nothing to read" outcome.
    pub fn is_no_input(&self) -> bool {
        matches!(self, CursesError::NoInput)
    }
}

pub type Result<T> = std::result::Result<T, CursesError>;
