#![deny(missing_docs)]
//! This crate solves square binary-grid logic puzzles (the Takuzu / Binairo family)
//! by running a local deduction-rule engine to a fixpoint and falling back to
//! backtracking search when deduction alone cannot finish the grid.

/// The `puzzle` module implements the board model, puzzle-file parsing, and the
/// constraint-propagation plus backtracking solver.
pub mod puzzle;
