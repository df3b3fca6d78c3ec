//! Key mapping for terminal input
//!
//! Converts crossterm key events to the key codes returned by `getch`.

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::keys::{
    key_f, Key, DISPLAY_LIMIT, KEY_BACKSPACE, KEY_BREAK, KEY_BTAB, KEY_DC, KEY_DOWN, KEY_END,
    KEY_HOME, KEY_IC, KEY_LEFT, KEY_NPAGE, KEY_PPAGE, KEY_RIGHT, KEY_UP,
};

const ESC: Key = 0x1B;

bitflags! {
    /// Modifier keys
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        let mut result = Modifiers::empty();
        if mods.contains(KeyModifiers::SHIFT) {
            result |= Modifiers::SHIFT;
        }
        if mods.contains(KeyModifiers::CONTROL) {
            result |= Modifiers::CTRL;
        }
        if mods.contains(KeyModifiers::ALT) {
            result |= Modifiers::ALT;
        }
        result
    }
}

/// Key mapper for converting key events to key codes
pub struct KeyMapper;

impl KeyMapper {
    /// Map a crossterm KeyEvent to the key codes it produces, in order.
    ///
    /// With `ctrl_break` set, Ctrl+C is delivered as `KEY_BREAK` instead of
    /// the control character. Release events and keys with no code map to
    /// nothing.
    pub fn map(event: &KeyEvent, ctrl_break: bool) -> Vec<Key> {
        if event.kind == KeyEventKind::Release {
            return Vec::new();
        }
        let mods = Modifiers::from(event.modifiers);

        match event.code {
            KeyCode::Char(ch) => Self::map_char(ch, mods, ctrl_break),
            KeyCode::Enter => vec![0x0D],
            KeyCode::Backspace => {
                if mods.contains(Modifiers::CTRL) {
                    vec![KEY_BACKSPACE]
                } else {
                    vec![0x08]
                }
            }
            KeyCode::Tab => {
                if mods.contains(Modifiers::SHIFT) {
                    vec![KEY_BTAB]
                } else {
                    vec![0x09]
                }
            }
            KeyCode::BackTab => vec![KEY_BTAB],
            KeyCode::Esc => vec![ESC],

            // Arrow keys
            KeyCode::Up => vec![KEY_UP],
            KeyCode::Down => vec![KEY_DOWN],
            KeyCode::Right => vec![KEY_RIGHT],
            KeyCode::Left => vec![KEY_LEFT],

            // Navigation keys
            KeyCode::Home => vec![KEY_HOME],
            KeyCode::End => vec![KEY_END],
            KeyCode::PageUp => vec![KEY_PPAGE],
            KeyCode::PageDown => vec![KEY_NPAGE],
            KeyCode::Insert => vec![KEY_IC],
            KeyCode::Delete => vec![KEY_DC],

            // Function keys
            KeyCode::F(n) if n <= 63 => vec![key_f(n)],

            _ => Vec::new(),
        }
    }

    /// Map a character with modifiers
    fn map_char(ch: char, mods: Modifiers, ctrl_break: bool) -> Vec<Key> {
        let code = ch as Key;
        // Wide characters are not decoded
        if code >= DISPLAY_LIMIT {
            return Vec::new();
        }

        let key = if mods.contains(Modifiers::CTRL) {
            if ctrl_break && ch.eq_ignore_ascii_case(&'c') {
                return vec![KEY_BREAK];
            }
            Self::control_code(ch).unwrap_or(code)
        } else {
            code
        };

        // Alt + key = ESC + key
        if mods.contains(Modifiers::ALT) {
            vec![ESC, key]
        } else {
            vec![key]
        }
    }

    fn control_code(ch: char) -> Option<Key> {
        match ch {
            'a'..='z' => Some(ch as Key - 'a' as Key + 1),
            'A'..='Z' => Some(ch as Key - 'A' as Key + 1),
            '@' | '`' | ' ' => Some(0x00),
            '[' => Some(0x1B),
            '\\' => Some(0x1C),
            ']' => Some(0x1D),
            '^' | '~' => Some(0x1E),
            '_' | '?' => Some(0x1F),
            _ => None,
        }
    }
}
