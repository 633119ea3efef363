#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for binary puzzle files.
//!
//! The format is deliberately minimal: one row of the grid per line, `'0'` and
//! `'1'` for given values, and any other character (conventionally `.` or a
//! space) for an unknown cell. Blank lines are separators, not rows; the board
//! width is the number of non-blank lines. Rows shorter than the width are
//! padded with unknown cells on the right.

use crate::puzzle::board::Board;
use itertools::Itertools;
use std::io::{self, BufRead};
use std::path::Path;

/// Parses puzzle rows from a `BufRead` source into a [`Board`].
///
/// # Panics
///
/// - If reading a line from the `reader` fails (e.g. I/O error, invalid
///   UTF-8).
/// - If the input contains no non-blank lines (a zero-width board).
pub fn parse_puzzle<R: BufRead>(reader: R) -> Board {
    let lines = reader
        .lines()
        .map(|line_result| line_result.unwrap_or_else(|e| panic!("Failed to read line: {e}")))
        .collect_vec();

    Board::create(&lines)
}

/// Parses a puzzle file specified by its path.
///
/// This is a convenience function that opens the file, wraps it in a
/// `BufReader`, and then calls [`parse_puzzle`].
///
/// # Errors
///
/// Returns `io::Result::Err` if the file cannot be opened or read (e.g. path
/// does not exist, permissions error). Panics from [`parse_puzzle`]
/// (zero-width input) will propagate.
pub fn parse_file<P: AsRef<Path>>(file_path: P) -> io::Result<Board> {
    let file = std::fs::File::open(file_path)?;
    let reader = io::BufReader::new(file);
    Ok(parse_puzzle(reader))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::state::State;
    use std::io::Cursor;

    #[test]
    fn test_parse_simple_puzzle() {
        let content = "1.1.\n..0.\n0..1\n....\n";
        let board = parse_puzzle(Cursor::new(content));

        assert_eq!(board.width(), 4);
        assert_eq!(board.get(0, 0), State::One);
        assert_eq!(board.get(2, 1), State::Zero);
        assert_eq!(board.get(3, 2), State::One);
        assert_eq!(board.get(1, 3), State::Unknown);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let content = "10\n\n01\n\n";
        let board = parse_puzzle(Cursor::new(content));

        assert_eq!(board.width(), 2);
        assert_eq!(board.get(0, 1), State::Zero);
        assert_eq!(board.get(1, 1), State::One);
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let content = "1\n01\n";
        let board = parse_puzzle(Cursor::new(content));

        assert_eq!(board.width(), 2);
        assert_eq!(board.get(1, 0), State::Unknown);
        assert_eq!(board.get(1, 1), State::One);
    }

    #[test]
    #[should_panic(expected = "invalid board size")]
    fn test_parse_empty_input() {
        let _board = parse_puzzle(Cursor::new(""));
    }
}
