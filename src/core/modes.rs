//! Session input modes
//!
//! The terminal-wide flags the input pipeline consults on every read.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::linebuf::INBUFSIZ;
use super::pushback::NUNGETCH;

/// Poll granularity of timed and blocking reads.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Line discipline. Exactly one is in effect at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Characters are buffered until a line terminator arrives.
    #[default]
    Cooked,
    /// Every character is returned immediately.
    Cbreak,
    /// Like cbreak, and CR translation and break handling are bypassed.
    Raw,
}

/// Session state shared by every read on a screen
#[derive(Debug, Clone)]
pub struct SessionState {
    pub mode: InputMode,
    pub echo: bool,
    /// Translate CR to LF on input
    pub auto_cr: bool,
    /// Half-delay in tenths of a second, 0 = off. Overrides window timeouts.
    pub delay_tenths: u32,
    /// Control-break policy in effect for non-raw reads
    pub orig_ctrl_break: bool,
    pub poll_interval: Duration,
    pub line_capacity: usize,
    pub pushback_capacity: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            mode: InputMode::Cooked,
            echo: true,
            auto_cr: true,
            delay_tenths: 0,
            orig_ctrl_break: true,
            poll_interval: POLL_INTERVAL,
            line_capacity: INBUFSIZ,
            pushback_capacity: NUNGETCH,
        }
    }
}

impl SessionState {
    pub fn is_raw(&self) -> bool {
        self.mode == InputMode::Raw
    }

    pub fn is_cbreak(&self) -> bool {
        self.mode == InputMode::Cbreak
    }

    /// Neither raw nor cbreak: reads are line buffered.
    pub fn is_cooked(&self) -> bool {
        self.mode == InputMode::Cooked
    }

    /// Number of poll intervals a read may wait for a key, or 0 when no
    /// timed wait is configured. Always at least one for a timed read.
    pub fn wait_count(&self, window_delay_ms: u32) -> u32 {
        let total_ms = if self.delay_tenths > 0 {
            u64::from(self.delay_tenths) * 100
        } else if window_delay_ms > 0 {
            u64::from(window_delay_ms)
        } else {
            return 0;
        };
        let interval_ms = u64::try_from(self.poll_interval.as_millis())
            .unwrap_or(u64::MAX)
            .max(1);
        u32::try_from(total_ms / interval_ms)
            .unwrap_or(u32::MAX)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_cooked_with_echo() {
        let session = SessionState::default();
        assert!(session.is_cooked());
        assert!(!session.is_raw());
        assert!(!session.is_cbreak());
        assert!(session.echo);
        assert!(session.auto_cr);
        assert_eq!(session.poll_interval, Duration::from_millis(50));
    }

    #[test]
    fn test_wait_count() {
        let mut session = SessionState::default();
        assert_eq!(session.wait_count(0), 0);

        // Window timeouts round down to 50ms units, minimum one
        assert_eq!(session.wait_count(20), 1);
        assert_eq!(session.wait_count(120), 2);
        assert_eq!(session.wait_count(500), 10);

        // Half-delay wins over the window timeout
        session.delay_tenths = 3;
        assert_eq!(session.wait_count(500), 6);
    }

    #[test]
    fn test_wait_count_follows_poll_interval() {
        let mut session = SessionState {
            poll_interval: Duration::from_millis(10),
            ..SessionState::default()
        };
        assert_eq!(session.wait_count(200), 20);
        assert_eq!(session.wait_count(5), 1);

        session.delay_tenths = 5;
        assert_eq!(session.wait_count(0), 50);

        // Sub-millisecond intervals count as one millisecond
        session.poll_interval = Duration::from_micros(100);
        assert_eq!(session.wait_count(0), 500);
    }
}
