#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The square board of tri-state cells and its validity predicates.
//!
//! A `Board` stores one [`State`] per `(column, row)` coordinate pair of an
//! `N`×`N` grid. The board itself enforces only coordinate bounds; it can hold
//! globally inconsistent contents while the solver is working. Global validity
//! is evaluated on demand by [`Board::is_complete_and_correct`], which checks
//! completeness, per-line balance, the no-three-in-a-row constraint and
//! pairwise distinctness of rows and columns.

use crate::puzzle::state::State;
use rustc_hash::FxHashSet;
use std::fmt::Display;

/// The coordinates of a single cell, reported by [`Board::first_empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl Point {
    /// Creates a point from a row and column index.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A square grid of cell states.
///
/// Cloning a board produces an independently-owned deep copy; mutating either
/// board never affects the other. Two boards compare equal iff they have the
/// same width and identical cell contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    cells: Vec<State>,
}

impl Board {
    /// Creates an empty board (all cells `Unknown`) with the given side length.
    ///
    /// # Panics
    ///
    /// If `width` is zero.
    #[must_use]
    pub fn new(width: usize) -> Self {
        assert!(width > 0, "invalid board size: {width}");
        Self {
            width,
            cells: vec![State::Unknown; width * width],
        }
    }

    /// Creates a board from an ordered sequence of row strings.
    ///
    /// Blank (empty) strings are dropped before counting, and the board width
    /// is the number of remaining rows. Characters map through
    /// [`State::from_char`]: `'0'` and `'1'` carry values, everything else is
    /// `Unknown`. Rows shorter than the width are padded with `Unknown`;
    /// characters beyond the width are ignored.
    ///
    /// # Panics
    ///
    /// If no non-blank rows are given.
    #[must_use]
    pub fn create<S: AsRef<str>>(lines: &[S]) -> Self {
        let rows: Vec<&str> = lines
            .iter()
            .map(|line| line.as_ref())
            .filter(|line| !line.is_empty())
            .collect();
        let mut board = Self::new(rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().take(board.width).enumerate() {
                board.set(x, y, State::from_char(c));
            }
        }
        board
    }

    /// Returns the side length of the board.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the state of the cell at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is out of range.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> State {
        assert!(self.is_valid_cell(x, y), "cell coordinates out of range");
        self.cells[y * self.width + x]
    }

    /// Sets the cell at column `x`, row `y` to the given state.
    ///
    /// This raw accessor always overwrites, regardless of the prior value;
    /// collision checking is the solver's responsibility.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is out of range.
    pub fn set(&mut self, x: usize, y: usize, state: State) {
        assert!(self.is_valid_cell(x, y), "cell coordinates out of range");
        self.cells[y * self.width + x] = state;
    }

    /// Reports whether `(x, y)` lies within the board.
    #[must_use]
    pub const fn is_valid_cell(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width
    }

    /// Like [`Board::get`], but treats out-of-range coordinates as `Unknown`.
    ///
    /// This is what makes the 3-cell sliding window safe at the edges of the
    /// grid: a window hanging past the border can never report a violation.
    #[allow(clippy::cast_sign_loss)]
    fn safe_get(&self, x: isize, y: isize) -> State {
        if x < 0 || y < 0 {
            return State::Unknown;
        }
        let (x, y) = (x as usize, y as usize);
        if self.is_valid_cell(x, y) {
            self.get(x, y)
        } else {
            State::Unknown
        }
    }

    /// Returns the coordinates of the first `Unknown` cell in row-major order
    /// (rows top-to-bottom, columns left-to-right within a row), or `None` if
    /// every cell is assigned.
    #[must_use]
    pub fn first_empty(&self) -> Option<Point> {
        for y in 0..self.width {
            for x in 0..self.width {
                if self.get(x, y) == State::Unknown {
                    return Some(Point::new(y, x));
                }
            }
        }
        None
    }

    /// Reports whether the board is a finished, valid puzzle solution.
    ///
    /// True iff no cell is `Unknown`, every row and column holds as many
    /// zeros as ones, no row or column contains three consecutive identical
    /// values, and all rows and all columns are pairwise distinct.
    #[must_use]
    pub fn is_complete_and_correct(&self) -> bool {
        self.is_complete() && self.rows_in_sync() && self.cols_in_sync()
    }

    fn is_complete(&self) -> bool {
        self.cells.iter().all(|&s| s != State::Unknown)
    }

    /// Checks balance, runs and distinctness over all rows.
    #[allow(clippy::cast_possible_wrap)]
    fn rows_in_sync(&self) -> bool {
        let mut signatures = FxHashSet::default();
        for y in 0..self.width {
            let (mut zeros, mut ones) = (0, 0);
            let mut signature = String::with_capacity(self.width);
            for x in 0..self.width {
                let state = self.get(x, y);
                match state {
                    State::Zero => zeros += 1,
                    State::One => ones += 1,
                    State::Unknown => {}
                }
                let (xi, yi) = (x as isize, y as isize);
                if !Self::valid_group(
                    self.safe_get(xi - 1, yi),
                    state,
                    self.safe_get(xi + 1, yi),
                ) {
                    return false;
                }
                signature.push(state.symbol());
            }
            if zeros != ones {
                return false;
            }
            signatures.insert(signature);
        }
        signatures.len() == self.width
    }

    /// Checks balance, runs and distinctness over all columns.
    #[allow(clippy::cast_possible_wrap)]
    fn cols_in_sync(&self) -> bool {
        let mut signatures = FxHashSet::default();
        for x in 0..self.width {
            let (mut zeros, mut ones) = (0, 0);
            let mut signature = String::with_capacity(self.width);
            for y in 0..self.width {
                let state = self.get(x, y);
                match state {
                    State::Zero => zeros += 1,
                    State::One => ones += 1,
                    State::Unknown => {}
                }
                let (xi, yi) = (x as isize, y as isize);
                if !Self::valid_group(
                    self.safe_get(xi, yi - 1),
                    state,
                    self.safe_get(xi, yi + 1),
                ) {
                    return false;
                }
                signature.push(state.symbol());
            }
            if zeros != ones {
                return false;
            }
            signatures.insert(signature);
        }
        signatures.len() == self.width
    }

    /// A 3-cell window is valid unless all three cells hold the same
    /// non-`Unknown` value.
    const fn valid_group(s1: State, s2: State, s3: State) -> bool {
        !matches!(
            (s1, s2, s3),
            (State::Zero, State::Zero, State::Zero) | (State::One, State::One, State::One)
        )
    }
}

impl Display for Board {
    /// Renders the board as one line of symbols per row, rows top-to-bottom.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.width {
            for x in 0..self.width {
                write!(f, "{}", self.get(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_board() {
        let board = Board::create(&["01", "  "]);
        assert_eq!(board.width(), 2);
        assert_eq!(board.get(0, 0), State::Zero);
        assert_eq!(board.get(1, 0), State::One);
        assert_eq!(board.get(0, 1), State::Unknown);
        assert_eq!(board.get(1, 1), State::Unknown);
    }

    #[test]
    fn test_create_drops_blank_rows() {
        let board = Board::create(&["01", "", "10"]);
        assert_eq!(board.width(), 2);
        assert_eq!(board.get(0, 1), State::One);
        assert_eq!(board.get(1, 1), State::Zero);
    }

    #[test]
    fn test_create_pads_short_rows() {
        let board = Board::create(&["1", "", ".0"]);
        assert_eq!(board.width(), 2);
        assert_eq!(board.get(1, 0), State::Unknown);
        assert_eq!(board.get(0, 1), State::Unknown);
        assert_eq!(board.get(1, 1), State::Zero);
    }

    #[test]
    #[should_panic(expected = "invalid board size")]
    fn test_create_rejects_empty_input() {
        let _board = Board::create::<&str>(&[]);
    }

    #[test]
    fn test_get_set_state() {
        let mut board = Board::create(&["10", "  "]);
        assert_eq!(board.get(0, 1), State::Unknown);

        board.set(0, 1, State::Zero);
        assert_eq!(board.get(0, 1), State::Zero);
    }

    #[test]
    #[should_panic(expected = "cell coordinates out of range")]
    fn test_get_out_of_range() {
        let board = Board::new(3);
        let _state = board.get(3, 0);
    }

    #[test]
    #[should_panic(expected = "cell coordinates out of range")]
    fn test_set_out_of_range() {
        let mut board = Board::new(3);
        board.set(0, 3, State::One);
    }

    #[test]
    fn test_is_valid_cell_boundaries() {
        let board = Board::new(3);

        assert!(board.is_valid_cell(0, 0));
        assert!(board.is_valid_cell(2, 0));
        assert!(!board.is_valid_cell(3, 0));

        assert!(board.is_valid_cell(0, 2));
        assert!(!board.is_valid_cell(0, 3));
    }

    #[test]
    fn test_complete_and_correct_true_case() {
        assert!(Board::create(&["10", "01"]).is_complete_and_correct());
        assert!(
            Board::create(&["1100", "0011", "1010", "0101"]).is_complete_and_correct()
        );
    }

    #[test]
    fn test_incomplete_board_is_not_correct() {
        assert!(!Board::create(&[" 0", "01"]).is_complete_and_correct());
        assert!(!Board::create(&[".0", "01"]).is_complete_and_correct());
    }

    #[test]
    fn test_unbalanced_line_is_not_correct() {
        // Row 0 has two ones and no zeros.
        assert!(!Board::create(&["11", "00"]).is_complete_and_correct());
    }

    #[test]
    fn test_run_of_three_is_not_correct() {
        // Every row is balanced, but row 0 opens with three ones.
        let board = Board::create(&[
            "111000", "110011", "001110", "110001", "101010", "010101",
        ]);
        assert!(!board.is_complete_and_correct());
    }

    #[test]
    fn test_duplicate_lines_are_not_correct() {
        // Balanced everywhere, no runs, but rows (and columns) repeat.
        let board = Board::create(&["1100", "0011", "1100", "0011"]);
        assert!(!board.is_complete_and_correct());
    }

    #[test]
    fn test_first_empty_scans_row_major() {
        assert_eq!(
            Board::create(&[".1", ".."]).first_empty(),
            Some(Point::new(0, 0))
        );
        assert_eq!(
            Board::create(&["10", ".."]).first_empty(),
            Some(Point::new(1, 0))
        );
        assert_eq!(Board::create(&["10", "01"]).first_empty(), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::create(&["10", "0 "]);
        let mut copy = board.clone();

        assert_eq!(board, copy);

        copy.set(1, 1, State::One);
        assert_ne!(board, copy);
        assert_eq!(board.get(1, 1), State::Unknown);
    }

    #[test]
    fn test_render() {
        let board = Board::create(&["0101", "10 1", "   0", " 1  "]);
        assert_eq!(board.to_string(), "0101\n10.1\n...0\n.1..\n");
    }
}
