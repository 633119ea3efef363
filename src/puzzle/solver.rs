#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The constraint-propagation and backtracking solver.
//!
//! This module provides the [`Solver`] struct, which fills the unknown cells
//! of a [`Board`] so that every row and column is balanced, free of
//! three-in-a-row runs, and distinct from every other row or column.
//!
//! The core logic involves:
//! 1.  **Propagation:** six local deduction rules (a horizontal and a vertical
//!     twin of the pair rule, the gap rule, and the balance rule) are applied
//!     over the full grid, in a fixed order, until a pass changes nothing
//!     (a fixpoint) or two deductions demand contradictory values for the
//!     same cell (a collision).
//! 2.  **Decision:** if the propagated board is still incomplete, the first
//!     unknown cell in row-major order is guessed, `Zero` before `One`.
//! 3.  **Backtracking:** handled by the recursive calls and cloning. Every
//!     guess operates on an independent copy of the board, so a failed branch
//!     is discarded wholesale and sibling branches never observe each other's
//!     mutations.
//!
//! The first complete-and-correct board found under this fixed guess order is
//! returned; exhausting both guesses for a cell fails the enclosing branch.

use crate::puzzle::board::{Board, Point};
use crate::puzzle::state::State;

/// Counters describing a solving run.
///
/// Retrieved via [`Solver::stats`]; counts accumulate across calls on the
/// same solver instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Number of propagation passes executed (each pass runs the six rules).
    pub passes: usize,
    /// Number of speculative cell assignments tried by the search.
    pub guesses: usize,
    /// Number of collisions observed during propagation.
    pub collisions: usize,
}

/// A binary puzzle solver.
///
/// The solver never mutates the boards it is handed; [`Solver::solve`] and
/// [`Solver::propagate`] work on private copies.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    stats: SolveStats,
}

impl Solver {
    /// Creates a solver with zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the statistics accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> SolveStats {
        self.stats
    }

    /// Solves the given board.
    ///
    /// Runs propagation to a fixpoint and, if the board is still incomplete,
    /// enters backtracking search. Returns the first complete-and-correct
    /// board found, or `None` if the search space is exhausted or propagation
    /// hits an immediate contradiction.
    pub fn solve(&mut self, board: &Board) -> Option<Board> {
        let mut working = board.clone();
        if !self.fixpoint(&mut working) {
            return None;
        }
        self.search(working)
    }

    /// Applies the deduction rules to a fixpoint without guessing.
    ///
    /// Returns the maximally-deduced board, which may still contain unknown
    /// cells, or `None` if a collision was detected. A partially-collided
    /// board is never returned as a success.
    pub fn propagate(&mut self, board: &Board) -> Option<Board> {
        let mut working = board.clone();
        if self.fixpoint(&mut working) {
            Some(working)
        } else {
            None
        }
    }

    /// Recursive search over the already-propagated `board`.
    ///
    /// A full board that fails the correctness predicate (a violation the
    /// local rules cannot see, such as duplicate rows) is a dead end: with no
    /// unknown cell left there is nothing to branch on.
    fn search(&mut self, board: Board) -> Option<Board> {
        if board.is_complete_and_correct() {
            return Some(board);
        }
        let point = board.first_empty()?;
        if let Some(solution) = self.guess(board.clone(), point, State::Zero) {
            return Some(solution);
        }
        self.guess(board, point, State::One)
    }

    /// Tries one speculative assignment, re-propagates and recurses.
    #[allow(clippy::cast_possible_wrap)]
    fn guess(&mut self, mut board: Board, point: Point, state: State) -> Option<Board> {
        self.stats.guesses += 1;
        // The target cell is unknown, so the update itself cannot collide.
        if !self.checked_update(&mut board, point.col as isize, point.row as isize, state) {
            return None;
        }
        if !self.fixpoint(&mut board) {
            return None;
        }
        self.search(board)
    }

    /// Runs full passes until one fails or changes nothing.
    ///
    /// On failure the board is left mid-pass; callers must discard it.
    fn fixpoint(&mut self, board: &mut Board) -> bool {
        loop {
            self.stats.passes += 1;
            let start = board.clone();
            if !self.pass(board) {
                return false;
            }
            if *board == start {
                return true;
            }
        }
    }

    /// One ordered application of all six rules.
    ///
    /// The `&&` chain is what makes a failing rule skip every later rule in
    /// the pass.
    fn pass(&mut self, board: &mut Board) -> bool {
        self.pair_rule_rows(board)
            && self.pair_rule_cols(board)
            && self.gap_rule_rows(board)
            && self.gap_rule_cols(board)
            && self.balance_rule_rows(board)
            && self.balance_rule_cols(board)
    }

    /// Fills `_11_` and `_00_` patterns in rows: the cells flanking a pair of
    /// equal values must hold the inverse, or a run of three would form.
    #[allow(clippy::cast_possible_wrap)]
    fn pair_rule_rows(&mut self, board: &mut Board) -> bool {
        let width = board.width();
        let mut ok = true;
        for y in 0..width {
            for x in 0..width - 1 {
                let state = board.get(x, y);
                if state != State::Unknown && state == board.get(x + 1, y) {
                    let inverse = state.invert();
                    let (xi, yi) = (x as isize, y as isize);
                    if ok {
                        ok = self.checked_update(board, xi - 1, yi, inverse);
                    }
                    if ok {
                        ok = self.checked_update(board, xi + 2, yi, inverse);
                    }
                }
            }
        }
        ok
    }

    /// Fills `_11_` and `_00_` patterns in columns.
    #[allow(clippy::cast_possible_wrap)]
    fn pair_rule_cols(&mut self, board: &mut Board) -> bool {
        let width = board.width();
        let mut ok = true;
        for y in 0..width - 1 {
            for x in 0..width {
                let state = board.get(x, y);
                if state != State::Unknown && state == board.get(x, y + 1) {
                    let inverse = state.invert();
                    let (xi, yi) = (x as isize, y as isize);
                    if ok {
                        ok = self.checked_update(board, xi, yi - 1, inverse);
                    }
                    if ok {
                        ok = self.checked_update(board, xi, yi + 2, inverse);
                    }
                }
            }
        }
        ok
    }

    /// Fills `1_1` and `0_0` patterns in rows: the gap must hold the inverse
    /// of its equal neighbours.
    #[allow(clippy::cast_possible_wrap)]
    fn gap_rule_rows(&mut self, board: &mut Board) -> bool {
        let width = board.width();
        let mut ok = true;
        for y in 0..width {
            for x in 1..width.saturating_sub(1) {
                let left = board.get(x - 1, y);
                if board.get(x, y) == State::Unknown
                    && left != State::Unknown
                    && left == board.get(x + 1, y)
                {
                    if ok {
                        ok = self.checked_update(board, x as isize, y as isize, left.invert());
                    }
                }
            }
        }
        ok
    }

    /// Fills `1_1` and `0_0` patterns in columns.
    #[allow(clippy::cast_possible_wrap)]
    fn gap_rule_cols(&mut self, board: &mut Board) -> bool {
        let width = board.width();
        let mut ok = true;
        for y in 1..width.saturating_sub(1) {
            for x in 0..width {
                let above = board.get(x, y - 1);
                if board.get(x, y) == State::Unknown
                    && above != State::Unknown
                    && above == board.get(x, y + 1)
                {
                    if ok {
                        ok = self.checked_update(board, x as isize, y as isize, above.invert());
                    }
                }
            }
        }
        ok
    }

    /// Fills the counting pattern in rows: once one value has claimed half
    /// the cells of a row, every remaining unknown cell must take the other.
    fn balance_rule_rows(&mut self, board: &mut Board) -> bool {
        let width = board.width();
        let mut ok = true;
        for y in 0..width {
            let (mut zeros, mut ones) = (0, 0);
            for x in 0..width {
                match board.get(x, y) {
                    State::Zero => zeros += 1,
                    State::One => ones += 1,
                    State::Unknown => {}
                }
            }
            if 2 * zeros >= width {
                if ok {
                    ok = self.fill_remaining_row(board, y, State::One);
                }
            } else if 2 * ones >= width && ok {
                ok = self.fill_remaining_row(board, y, State::Zero);
            }
        }
        ok
    }

    /// Fills the counting pattern in columns.
    fn balance_rule_cols(&mut self, board: &mut Board) -> bool {
        let width = board.width();
        let mut ok = true;
        for x in 0..width {
            let (mut zeros, mut ones) = (0, 0);
            for y in 0..width {
                match board.get(x, y) {
                    State::Zero => zeros += 1,
                    State::One => ones += 1,
                    State::Unknown => {}
                }
            }
            if 2 * zeros >= width {
                if ok {
                    ok = self.fill_remaining_col(board, x, State::One);
                }
            } else if 2 * ones >= width && ok {
                ok = self.fill_remaining_col(board, x, State::Zero);
            }
        }
        ok
    }

    /// Sets every unknown cell of row `y` to `value`.
    #[allow(clippy::cast_possible_wrap)]
    fn fill_remaining_row(&mut self, board: &mut Board, y: usize, value: State) -> bool {
        let mut ok = true;
        for x in 0..board.width() {
            if board.get(x, y) == State::Unknown && ok {
                ok = self.checked_update(board, x as isize, y as isize, value);
            }
        }
        ok
    }

    /// Sets every unknown cell of column `x` to `value`.
    #[allow(clippy::cast_possible_wrap)]
    fn fill_remaining_col(&mut self, board: &mut Board, x: usize, value: State) -> bool {
        let mut ok = true;
        for y in 0..board.width() {
            if board.get(x, y) == State::Unknown && ok {
                ok = self.checked_update(board, x as isize, y as isize, value);
            }
        }
        ok
    }

    /// Performs one checked cell update and reports whether it succeeded.
    ///
    /// Out-of-range coordinates are a harmless no-op (success), as is writing
    /// a value the cell already holds. An unknown cell takes the value.
    /// Writing a different value over a set cell is a collision: the board is
    /// left untouched and the update reports failure.
    #[allow(clippy::cast_sign_loss)]
    fn checked_update(&mut self, board: &mut Board, x: isize, y: isize, state: State) -> bool {
        if x < 0 || y < 0 {
            return true;
        }
        let (x, y) = (x as usize, y as usize);
        if !board.is_valid_cell(x, y) {
            return true;
        }

        let current = board.get(x, y);
        if current == state {
            true
        } else if current == State::Unknown {
            board.set(x, y, state);
            true
        } else {
            self.stats.collisions += 1;
            false
        }
    }
}
