//! Edge-Matching Puzzle Ambiguity Finder
//!
//! Generates square grids of jigsaw-style pieces and checks whether a piece
//! set can be reassembled in more than one distinct way.

pub mod analysis;
pub mod config;
pub mod duplicates;
pub mod edges;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod pieces;
pub mod search;
pub mod solver;

pub use config::Config;
pub use error::PuzzleError;
pub use search::{run_exhaustive, run_random, Finding, SearchStats};
