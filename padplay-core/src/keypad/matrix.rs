//! Key symbols and the static key layout

/// Number of row lines
pub const ROWS: usize = 4;

/// Number of column lines
pub const COLS: usize = 4;

/// A key on the pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Digit key, 0-9
    Digit(u8),
    /// Decimal point
    Point,
    /// Equals
    Equals,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `x` (multiply)
    Times,
    /// `÷` (divide)
    Divide,
}

/// Physical layout, indexed `[row][col]`
pub static KEY_MATRIX: [[Key; COLS]; ROWS] = [
    [Key::Digit(1), Key::Digit(2), Key::Digit(3), Key::Divide],
    [Key::Digit(4), Key::Digit(5), Key::Digit(6), Key::Times],
    [Key::Digit(7), Key::Digit(8), Key::Digit(9), Key::Minus],
    [Key::Point, Key::Digit(0), Key::Equals, Key::Plus],
];

impl Key {
    /// Key at a matrix position
    pub fn at(row: usize, col: usize) -> Option<Key> {
        KEY_MATRIX.get(row)?.get(col).copied()
    }

    /// Character in the calculator alphabet (`0-9 . = + - * /`)
    pub fn symbol(self) -> char {
        match self {
            Key::Digit(d) => char::from(b'0' + d % 10),
            Key::Point => '.',
            Key::Equals => '=',
            Key::Plus => '+',
            Key::Minus => '-',
            Key::Times => '*',
            Key::Divide => '/',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_corners() {
        assert_eq!(Key::at(0, 0), Some(Key::Digit(1)));
        assert_eq!(Key::at(0, 3), Some(Key::Divide));
        assert_eq!(Key::at(3, 0), Some(Key::Point));
        assert_eq!(Key::at(3, 3), Some(Key::Plus));
        assert_eq!(Key::at(4, 0), None);
        assert_eq!(Key::at(0, 4), None);
    }

    #[test]
    fn test_every_symbol_is_unique() {
        let mut seen = [false; 128];
        for row in KEY_MATRIX.iter() {
            for key in row.iter() {
                let idx = key.symbol() as usize;
                assert!(!seen[idx], "duplicate symbol {}", key.symbol());
                seen[idx] = true;
            }
        }
    }

    #[test]
    fn test_operator_symbols() {
        assert_eq!(Key::Times.symbol(), '*');
        assert_eq!(Key::Divide.symbol(), '/');
        assert_eq!(Key::Digit(7).symbol(), '7');
        assert_eq!(Key::Digit(0).symbol(), '0');
    }
}
