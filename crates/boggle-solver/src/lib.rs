//! Word search engine for Boggle-style letter grids.
//!
//! This crate answers two questions about a square board of letters:
//! can a given word be traced along adjacent, unrepeated cells, and which
//! dictionary words can be traced at all. The second is a depth-first
//! enumeration kept tractable by pruning on dictionary prefixes.

pub mod board;
pub mod cubes;
pub mod dictionary;
pub mod game;
pub mod pruning;
pub mod solver;
pub mod tracer;

// Re-export main types
pub use board::{Board, BoardConfig, InvalidGrid, Path, Position};
pub use cubes::{roll_board, BoardSize};
pub use dictionary::{Dictionary, Lexicon, LoadError};
pub use game::{word_score, GuessError, Player, Round, Scoreboard};
pub use pruning::Pruning;
pub use solver::{
    find_all_words, solve, FoundWord, SearchStats, SolveReport, SolverConfig, WordFinder,
    DEFAULT_MIN_LENGTH,
};
pub use tracer::can_trace;
