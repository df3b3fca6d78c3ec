//! Cooked-mode line buffer
//!
//! Holds one pending input line. Characters are produced by the acquisition
//! loop and consumed one per read; it is not a ring buffer.

use super::keys::Key;

/// Default line buffer size.
pub const INBUFSIZ: usize = 512;

#[derive(Debug, Clone)]
pub struct LineBuffer {
    buf: Vec<Key>,
    capacity: usize,
    consume_idx: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new(INBUFSIZ)
    }
}

impl LineBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            consume_idx: 0,
        }
    }

    /// Whether characters remain between the consumer and producer positions.
    pub fn has_pending(&self) -> bool {
        self.consume_idx < self.buf.len()
    }

    /// Take the next unread character, advancing the consumer position.
    pub fn next(&mut self) -> Option<Key> {
        let key = self.buf.get(self.consume_idx).copied()?;
        self.consume_idx += 1;
        Some(key)
    }

    /// Append a character. Returns false, storing nothing, when full.
    pub fn push(&mut self, key: Key) -> bool {
        if self.buf.len() >= self.capacity {
            return false;
        }
        self.buf.push(key);
        true
    }

    /// Zero both positions.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.consume_idx = 0;
    }

    pub fn produce_idx(&self) -> usize {
        self.buf.len()
    }

    pub fn consume_idx(&self) -> usize {
        self.consume_idx
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produce_then_consume() {
        let mut line = LineBuffer::new(8);
        assert!(!line.has_pending());

        for &b in b"ab\n" {
            assert!(line.push(b as Key));
        }
        assert_eq!(line.produce_idx(), 3);
        assert_eq!(line.next(), Some(b'a' as Key));
        assert_eq!(line.next(), Some(b'b' as Key));
        assert!(line.has_pending());
        assert_eq!(line.next(), Some(b'\n' as Key));
        assert!(!line.has_pending());
        assert_eq!(line.next(), None);
        assert_eq!(line.consume_idx(), 3);
    }

    #[test]
    fn test_full_buffer_drops() {
        let mut line = LineBuffer::new(2);
        assert!(line.push(1));
        assert!(line.push(2));
        assert!(!line.push(3));
        assert_eq!(line.produce_idx(), 2);
    }

    #[test]
    fn test_reset() {
        let mut line = LineBuffer::new(4);
        line.push(1);
        line.next();
        line.reset();
        assert_eq!(line.produce_idx(), 0);
        assert_eq!(line.consume_idx(), 0);
        assert_eq!(line.capacity(), 4);
    }
}
