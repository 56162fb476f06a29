//! Single-word verification.
//!
//! Decides whether a word can be traced along adjacent, non-repeated cells
//! using depth-first backtracking over an explicit frame stack.
//!
//! Candidate order is fixed so the returned path is deterministic: start
//! cells are tried row-major, and each step scans the 3x3 block around the
//! previous cell row-major. The first complete path wins.

use smallvec::SmallVec;

use crate::board::{Board, CellUsage, Path};
use crate::pruning::exceeds_board;

/// A committed cell and the next neighbour slot to try from it
#[derive(Debug, Clone, Copy)]
struct Frame {
    cell: usize,
    cursor: usize,
}

impl Frame {
    fn new(cell: usize) -> Self {
        Self { cell, cursor: 0 }
    }
}

/// Find a path of adjacent, unrepeated cells spelling `word`.
///
/// Returns `None` when no such path exists. An empty word is traced by the
/// empty path. The board is never modified.
pub fn can_trace(board: &Board, word: &str) -> Option<Path> {
    let letters: SmallVec<[char; 16]> = word.chars().map(|c| c.to_ascii_uppercase()).collect();
    if letters.is_empty() {
        return Some(Path::new());
    }

    // Quick reject
    if exceeds_board(board, &letters) {
        tracing::trace!(word, "letters not available on board");
        return None;
    }

    let mut usage = CellUsage::new(board);
    let mut stack: SmallVec<[Frame; 16]> = SmallVec::new();

    for start in 0..board.cell_count() {
        if board.letter(start) != letters[0] {
            continue;
        }
        usage.acquire(start);
        stack.push(Frame::new(start));

        loop {
            let depth = stack.len();
            if depth == letters.len() {
                let path = stack.iter().map(|f| board.position_of(f.cell)).collect();
                for frame in stack.drain(..) {
                    usage.release(frame.cell);
                }
                debug_assert!(usage.is_clear());
                return Some(path);
            }

            let Some(top) = stack.last_mut() else {
                break;
            };

            let wanted = letters[depth];
            let neighbors = board.neighbor_indices(top.cell);
            let next = neighbors[top.cursor..]
                .iter()
                .position(|&n| !usage.is_in_use(n) && board.letter(n) == wanted);

            match next {
                Some(offset) => {
                    let cell = neighbors[top.cursor + offset];
                    top.cursor += offset + 1;
                    usage.acquire(cell);
                    stack.push(Frame::new(cell));
                }
                None => {
                    // Backtrack
                    let cell = top.cell;
                    stack.pop();
                    usage.release(cell);
                }
            }
        }
    }

    debug_assert!(usage.is_clear());
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn assert_valid_path(board: &Board, word: &str, path: &Path) {
        assert_eq!(path.len(), word.chars().count());
        for (pos, letter) in path.iter().zip(word.chars()) {
            assert_eq!(board.letter_at(*pos), Some(letter));
        }
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
        let mut cells: Vec<_> = path.to_vec();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), path.len(), "path reuses a cell");
    }

    #[test]
    fn test_trace_cat_on_small_board() {
        let board = Board::from_rows(&["CA", "TS"]).unwrap();

        let path = can_trace(&board, "CAT").unwrap();
        assert_eq!(path.as_slice(), &[p(0, 0), p(0, 1), p(1, 0)]);
        assert_valid_path(&board, "CAT", &path);

        assert!(can_trace(&board, "DOG").is_none());
    }

    #[test]
    fn test_empty_word_is_trivial_success() {
        let board = Board::from_rows(&["CA", "TS"]).unwrap();
        let path = can_trace(&board, "").unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_lowercase_input_is_normalized() {
        let board = Board::from_rows(&["CA", "TS"]).unwrap();
        assert!(can_trace(&board, "cats").is_some());
    }

    #[test]
    fn test_cell_cannot_be_reused() {
        // Only one A, so ABA needs the same cell twice
        let board = Board::from_rows(&["AB", "CD"]).unwrap();
        assert!(can_trace(&board, "AB").is_some());
        assert!(can_trace(&board, "ABA").is_none());
    }

    #[test]
    fn test_letters_must_be_adjacent() {
        let board = Board::from_rows(&["ABC", "DEF", "GHI"]).unwrap();
        assert!(can_trace(&board, "AEI").is_some());
        // A and C share a row but are two columns apart
        assert!(can_trace(&board, "AC").is_none());
        assert!(can_trace(&board, "AI").is_none());
    }

    #[test]
    fn test_backtracks_out_of_dead_ends() {
        // The first E found from R (row-major) is a dead end; the second
        // one leads on to the rest of the word.
        let board = Board::from_rows(&["REX", "EXX", "XAD"]).unwrap();
        let path = can_trace(&board, "READ").unwrap();
        assert_eq!(path.as_slice(), &[p(0, 0), p(1, 0), p(2, 1), p(2, 2)]);
        assert_valid_path(&board, "READ", &path);
    }

    #[test]
    fn test_tie_break_is_row_major_and_deterministic() {
        let board = Board::from_rows(&["AAA", "AAA", "AAA"]).unwrap();

        let first = can_trace(&board, "AAA").unwrap();
        assert_eq!(first.as_slice(), &[p(0, 0), p(0, 1), p(0, 2)]);
        for _ in 0..5 {
            assert_eq!(can_trace(&board, "AAA").unwrap(), first);
        }

        // Every cell once, ending wherever the scan order leads
        let all = can_trace(&board, "AAAAAAAAA").unwrap();
        assert_valid_path(&board, "AAAAAAAAA", &all);
        assert!(can_trace(&board, "AAAAAAAAAA").is_none());
    }

    #[test]
    fn test_single_letter_word() {
        let board = Board::from_rows(&["AB", "CB"]).unwrap();
        assert_eq!(can_trace(&board, "B").unwrap().as_slice(), &[p(0, 1)]);
    }

    #[test]
    fn test_repeated_letters_on_board() {
        let board = Board::from_letters("SEESTSEES").unwrap();
        for word in ["SEES", "SETS", "TEES", "SESTETS"] {
            if let Some(path) = can_trace(&board, word) {
                assert_valid_path(&board, word, &path);
            }
        }
        assert!(can_trace(&board, "SEES").is_some());
    }
}
