//! Board representation and adjacency model.
//!
//! A board is a square grid of uppercase letters stored row-major in a flat
//! arena. Adjacency (the up to eight king-move neighbours of a cell) is
//! computed once at construction so the searches only ever index into it.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True if `other` is one king move away (never the cell itself)
    pub fn is_adjacent(self, other: Position) -> bool {
        self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Ordered cells tracing a word, one per letter
pub type Path = SmallVec<[Position; 16]>;

/// Reasons a grid is rejected at construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidGrid {
    #[error("board has no cells")]
    Empty,

    #[error("row {row} has {found} letters, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({row}, {col}) holds {found:?}, which is not a letter")]
    NotALetter { row: usize, col: usize, found: char },

    #[error("{0} letters cannot fill a square board")]
    LengthNotSquare(usize),
}

/// Serialized form of a board: one string per row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Vec<String>,
}

/// Square letter grid with precomputed adjacency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardConfig", into = "BoardConfig")]
pub struct Board {
    size: usize,
    /// Letters (row-major)
    letters: Vec<char>,
    /// Neighbour cell indices per cell, in row-major scan order
    neighbors: Vec<SmallVec<[usize; 8]>>,
}

impl Board {
    /// Build a board from rows of letters. Letters are stored uppercase.
    pub fn new(rows: Vec<Vec<char>>) -> Result<Self, InvalidGrid> {
        let size = rows.len();
        if size == 0 {
            return Err(InvalidGrid::Empty);
        }

        let mut letters = Vec::with_capacity(size * size);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != size {
                return Err(InvalidGrid::NotSquare {
                    row,
                    expected: size,
                    found: cells.len(),
                });
            }
            for (col, letter) in cells.into_iter().enumerate() {
                if !letter.is_ascii_alphabetic() {
                    return Err(InvalidGrid::NotALetter {
                        row,
                        col,
                        found: letter,
                    });
                }
                letters.push(letter.to_ascii_uppercase());
            }
        }

        let neighbors = (0..size * size)
            .map(|index| compute_neighbors(size, index))
            .collect();

        Ok(Self {
            size,
            letters,
            neighbors,
        })
    }

    /// Build a board from one string per row
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, InvalidGrid> {
        Self::new(
            rows.iter()
                .map(|row| row.as_ref().chars().collect())
                .collect(),
        )
    }

    /// Build a board from a row-major string whose length is a perfect square
    pub fn from_letters(letters: &str) -> Result<Self, InvalidGrid> {
        let chars: Vec<char> = letters.chars().collect();
        if chars.is_empty() {
            return Err(InvalidGrid::Empty);
        }
        let size = (1..=chars.len())
            .find(|n| n * n >= chars.len())
            .unwrap_or(chars.len());
        if size * size != chars.len() {
            return Err(InvalidGrid::LengthNotSquare(chars.len()));
        }
        Self::new(chars.chunks(size).map(|row| row.to_vec()).collect())
    }

    /// Side length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.letters.len()
    }

    /// Check whether a signed coordinate lies on the board
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Letter at a position (bounds-checked)
    pub fn letter_at(&self, pos: Position) -> Option<char> {
        self.index_of(pos).map(|index| self.letters[index])
    }

    /// All in-bounds cells one king move from `pos`, row-major.
    /// Empty for an out-of-bounds position.
    pub fn neighbors_of(&self, pos: Position) -> SmallVec<[Position; 8]> {
        match self.index_of(pos) {
            Some(index) => self.neighbors[index]
                .iter()
                .map(|&n| self.position_of(n))
                .collect(),
            None => SmallVec::new(),
        }
    }

    /// Every position on the board, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cell_count()).map(move |index| self.position_of(index))
    }

    /// Rows as strings, top to bottom
    pub fn rows(&self) -> Vec<String> {
        self.letters
            .chunks(self.size)
            .map(|row| row.iter().collect())
            .collect()
    }

    pub(crate) fn index_of(&self, pos: Position) -> Option<usize> {
        if pos.row < self.size && pos.col < self.size {
            Some(pos.row * self.size + pos.col)
        } else {
            None
        }
    }

    pub(crate) fn position_of(&self, index: usize) -> Position {
        Position::new(index / self.size, index % self.size)
    }

    pub(crate) fn letter(&self, index: usize) -> char {
        self.letters[index]
    }

    pub(crate) fn neighbor_indices(&self, index: usize) -> &[usize] {
        &self.neighbors[index]
    }

    /// Count of cells holding `letter`
    pub(crate) fn count_letter(&self, letter: char) -> usize {
        self.letters.iter().filter(|&&l| l == letter).count()
    }
}

/// Scan the 3x3 block around `index` row-major, skipping the cell itself
fn compute_neighbors(size: usize, index: usize) -> SmallVec<[usize; 8]> {
    let row = (index / size) as isize;
    let col = (index % size) as isize;
    let size = size as isize;

    let mut neighbors = SmallVec::new();
    for r in row - 1..=row + 1 {
        for c in col - 1..=col + 1 {
            if (r, c) == (row, col) || r < 0 || c < 0 || r >= size || c >= size {
                continue;
            }
            neighbors.push((r * size + c) as usize);
        }
    }
    neighbors
}

impl TryFrom<BoardConfig> for Board {
    type Error = InvalidGrid;

    fn try_from(config: BoardConfig) -> Result<Self, Self::Error> {
        Board::from_rows(&config.rows)
    }
}

impl From<Board> for BoardConfig {
    fn from(board: Board) -> Self {
        BoardConfig { rows: board.rows() }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.letters.chunks(self.size).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, letter) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

/// "In use" overlay for one in-flight search.
///
/// Same shape as the board; a cell is marked while it sits on the current
/// path and cleared when the search backtracks past it.
#[derive(Debug, Clone)]
pub(crate) struct CellUsage {
    in_use: Vec<bool>,
}

impl CellUsage {
    pub(crate) fn new(board: &Board) -> Self {
        Self {
            in_use: vec![false; board.cell_count()],
        }
    }

    pub(crate) fn acquire(&mut self, index: usize) {
        debug_assert!(!self.in_use[index], "cell {} acquired twice", index);
        self.in_use[index] = true;
    }

    pub(crate) fn release(&mut self, index: usize) {
        self.in_use[index] = false;
    }

    pub(crate) fn is_in_use(&self, index: usize) -> bool {
        self.in_use[index]
    }

    pub(crate) fn is_clear(&self) -> bool {
        self.in_use.iter().all(|used| !used)
    }
}
