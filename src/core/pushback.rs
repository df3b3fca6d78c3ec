//! Bounded LIFO of keys handed back with `ungetch`.

use super::error::{CursesError, Result};
use super::keys::Key;

/// Default number of keys that can be pushed back.
pub const NUNGETCH: usize = 256;

#[derive(Debug, Clone)]
pub struct PushbackStack {
    keys: Vec<Key>,
    capacity: usize,
}

impl Default for PushbackStack {
    fn default() -> Self {
        Self::new(NUNGETCH)
    }
}

impl PushbackStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a key. A full stack rejects the key and keeps its contents.
    pub fn push(&mut self, key: Key) -> Result<()> {
        if self.keys.len() >= self.capacity {
            return Err(CursesError::PushbackOverflow);
        }
        self.keys.push(key);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Key> {
        self.keys.pop()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut stack = PushbackStack::new(4);
        stack.push(b'a' as Key).unwrap();
        stack.push(b'b' as Key).unwrap();
        assert_eq!(stack.pop(), Some(b'b' as Key));
        assert_eq!(stack.pop(), Some(b'a' as Key));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let mut stack = PushbackStack::new(3);
        for key in 1..=3 {
            stack.push(key).unwrap();
        }
        assert!(matches!(stack.push(4), Err(CursesError::PushbackOverflow)));
        assert_eq!(stack.len(), 3);

        // Stored entries are untouched by the rejected push
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
    }

    #[test]
    fn test_default_capacity() {
        let mut stack = PushbackStack::default();
        assert_eq!(stack.capacity(), NUNGETCH);
        for key in 0..NUNGETCH as Key {
            stack.push(key).unwrap();
        }
        assert!(stack.push(0).is_err());
        stack.clear();
        assert!(stack.is_empty());
    }
}
