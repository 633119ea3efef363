#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The tri-state value held by a single board cell.
//!
//! A cell is either undetermined (`Unknown`) or carries one of the two puzzle
//! values (`Zero`, `One`). Modelling this as a closed enum (rather than, say,
//! `Option<bool>`) lets every deduction rule match exhaustively, so a missing
//! case is a compile error rather than a silent bug.

use std::fmt::Display;

/// The state of a single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum State {
    /// The cell has not been determined yet. Rendered as `.`.
    #[default]
    Unknown,
    /// The cell holds the value zero. Rendered as `0`.
    Zero,
    /// The cell holds the value one. Rendered as `1`.
    One,
}

impl State {
    /// Maps a puzzle character to a cell state.
    ///
    /// `'0'` and `'1'` map to their values; every other character (spaces,
    /// `.`, and anything else) maps to `Unknown`.
    #[must_use]
    pub const fn from_char(c: char) -> Self {
        match c {
            '0' => Self::Zero,
            '1' => Self::One,
            _ => Self::Unknown,
        }
    }

    /// Returns the opposite value.
    ///
    /// `Zero` and `One` swap; `Unknown` has no opposite and maps to itself.
    #[must_use]
    pub const fn invert(self) -> Self {
        match self {
            Self::Unknown => Self::Unknown,
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }

    /// Returns the canonical display symbol for this state.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Unknown => '.',
            Self::Zero => '0',
            Self::One => '1',
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char() {
        assert_eq!(State::from_char('0'), State::Zero);
        assert_eq!(State::from_char('1'), State::One);
        assert_eq!(State::from_char('.'), State::Unknown);
        assert_eq!(State::from_char(' '), State::Unknown);
        assert_eq!(State::from_char('x'), State::Unknown);
    }

    #[test]
    fn test_invert_swaps_values() {
        assert_eq!(State::Zero.invert(), State::One);
        assert_eq!(State::One.invert(), State::Zero);
        assert_eq!(State::Unknown.invert(), State::Unknown);
    }

    #[test]
    fn test_invert_is_an_involution() {
        for s in [State::Unknown, State::Zero, State::One] {
            assert_eq!(s.invert().invert(), s);
        }
    }

    #[test]
    fn test_symbols() {
        assert_eq!(State::Unknown.to_string(), ".");
        assert_eq!(State::Zero.to_string(), "0");
        assert_eq!(State::One.to_string(), "1");
    }
}
