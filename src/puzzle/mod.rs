#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod board;
pub mod parse;
pub mod solver;
pub mod state;
