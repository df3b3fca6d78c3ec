//! Window cells and their attributes.

use bitflags::bitflags;

/// A single character position in a window
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub attrs: CellAttrs,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(CellAttrs::default())
    }
}

impl Cell {
    pub fn new(ch: char, attrs: CellAttrs) -> Self {
        Self { ch, attrs }
    }

    /// A space carrying `attrs`.
    pub fn blank(attrs: CellAttrs) -> Self {
        Self { ch: ' ', attrs }
    }

    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

/// Cell attributes
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellAttrs {
    pub fg: Color,
    pub bg: Color,
    pub flags: AttrFlags,
}

impl CellAttrs {
    pub fn with_flags(flags: AttrFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }
}

/// Color definition
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Color {
    #[default]
    Default,
    Indexed(u8),
    Rgb(u8, u8, u8),
}

impl Color {
    /// Convert to crossterm color
    pub fn to_crossterm(self) -> crossterm::style::Color {
        match self {
            Color::Default => crossterm::style::Color::Reset,
            Color::Indexed(n) => crossterm::style::Color::AnsiValue(n),
            Color::Rgb(r, g, b) => crossterm::style::Color::Rgb { r, g, b },
        }
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub struct AttrFlags: u16 {
        const BOLD          = 0b0000_0000_0001;
        const DIM           = 0b0000_0000_0010;
        const ITALIC        = 0b0000_0000_0100;
        const UNDERLINE     = 0b0000_0000_1000;
        const BLINK         = 0b0000_0001_0000;
        const REVERSE       = 0b0000_0010_0000;
        const INVISIBLE     = 0b0000_0100_0000;
        const STRIKETHROUGH = 0b0000_1000_0000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cell_is_blank() {
        let cell = Cell::default();
        assert!(cell.is_blank());
        assert_eq!(cell.attrs, CellAttrs::default());
    }

    #[test]
    fn test_color_to_crossterm() {
        assert_eq!(Color::Default.to_crossterm(), crossterm::style::Color::Reset);
        assert_eq!(
            Color::Indexed(4).to_crossterm(),
            crossterm::style::Color::AnsiValue(4)
        );
        assert_eq!(
            Color::Rgb(1, 2, 3).to_crossterm(),
            crossterm::style::Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
