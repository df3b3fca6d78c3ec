//! Logical key codes
//!
//! Ordinary characters are returned as their byte value. Function keys are
//! tokens at or above `KEY_MIN`, already resolved by the backend.

/// A key code as returned by the read operations.
pub type Key = u32;

/// First code that is not an ordinary character. Anything below this is
/// echoed by the input pipeline.
pub const DISPLAY_LIMIT: Key = 0x100;

pub const KEY_MIN: Key = 0x101;
pub const KEY_BREAK: Key = 0x101;
pub const KEY_DOWN: Key = 0x102;
pub const KEY_UP: Key = 0x103;
pub const KEY_LEFT: Key = 0x104;
pub const KEY_RIGHT: Key = 0x105;
pub const KEY_HOME: Key = 0x106;
pub const KEY_BACKSPACE: Key = 0x107;
/// `KEY_F0 + n` is function key n.
pub const KEY_F0: Key = 0x108;
pub const KEY_DC: Key = 0x14a;
pub const KEY_IC: Key = 0x14b;
pub const KEY_NPAGE: Key = 0x152;
pub const KEY_PPAGE: Key = 0x153;
pub const KEY_ENTER: Key = 0x157;
pub const KEY_BTAB: Key = 0x161;
pub const KEY_END: Key = 0x166;

pub const CR: Key = b'\r' as Key;
pub const LF: Key = b'\n' as Key;

/// Function key `n` (F1 = `key_f(1)`).
pub const fn key_f(n: u8) -> Key {
    KEY_F0 + n as Key
}

/// Whether `key` is an ordinary character rather than a function-key token.
pub fn is_ordinary(key: Key) -> bool {
    key < DISPLAY_LIMIT
}

/// Printable name of a key, in the style of `keyname()`.
pub fn key_name(key: Key) -> String {
    match key {
        KEY_BREAK => "KEY_BREAK".to_string(),
        KEY_DOWN => "KEY_DOWN".to_string(),
        KEY_UP => "KEY_UP".to_string(),
        KEY_LEFT => "KEY_LEFT".to_string(),
        KEY_RIGHT => "KEY_RIGHT".to_string(),
        KEY_HOME => "KEY_HOME".to_string(),
        KEY_BACKSPACE => "KEY_BACKSPACE".to_string(),
        KEY_DC => "KEY_DC".to_string(),
        KEY_IC => "KEY_IC".to_string(),
        KEY_NPAGE => "KEY_NPAGE".to_string(),
        KEY_PPAGE => "KEY_PPAGE".to_string(),
        KEY_ENTER => "KEY_ENTER".to_string(),
        KEY_BTAB => "KEY_BTAB".to_string(),
        KEY_END => "KEY_END".to_string(),
        k if (KEY_F0..KEY_F0 + 64).contains(&k) => format!("KEY_F({})", k - KEY_F0),
        k if k < 0x20 => format!("^{}", char::from((k as u8) + b'@')),
        0x7f => "^?".to_string(),
        k if k < DISPLAY_LIMIT => char::from(k as u8).to_string(),
        k => format!("UNKNOWN KEY 0x{:x}", k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_keys_are_not_ordinary() {
        assert!(is_ordinary(b'a' as Key));
        assert!(is_ordinary(0x03));
        assert!(!is_ordinary(KEY_UP));
        assert!(!is_ordinary(key_f(12)));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(b'a' as Key), "a");
        assert_eq!(key_name(0x03), "^C");
        assert_eq!(key_name(key_f(5)), "KEY_F(5)");
        assert_eq!(key_name(KEY_NPAGE), "KEY_NPAGE");
    }
}
