//! Exhaustive word enumeration.
//!
//! Walks every simple path on the board depth-first, abandoning a branch
//! as soon as its letters start no dictionary word. Each dictionary word
//! is reported once, with the first path that spells it.
//!
//! The search is an iterator over an explicit frame stack, so callers can
//! consume words one at a time and stop whenever they like. All search
//! state (the "in use" overlay, the path, the reported set) belongs to the
//! iterator and is dropped with it.

use std::collections::HashSet;
use std::iter::FusedIterator;
use std::time::Instant;

use serde::Serialize;
use smallvec::SmallVec;

use crate::board::{Board, CellUsage, Path};
use crate::dictionary::Lexicon;
use crate::pruning::{should_prune, Pruning};

/// Shortest word the game accepts by default
pub const DEFAULT_MIN_LENGTH: usize = 4;

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Words shorter than this are walked through but never reported
    pub min_length: usize,
    /// Branch pruning strategy
    pub pruning: Pruning,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            pruning: Pruning::Prefix,
        }
    }
}

/// A word found on the board and the cells that spell it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundWord {
    pub word: String,
    pub path: Path,
}

/// Counters collected while searching
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Partial paths examined
    pub nodes_visited: usize,
    /// Branches abandoned by pruning
    pub branches_pruned: usize,
    /// Distinct words reported
    pub words_found: usize,
}

/// Eager result of a full search
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub words: Vec<FoundWord>,
    pub stats: SearchStats,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

impl SolveReport {
    /// Words in discovery order
    pub fn word_list(&self) -> Vec<&str> {
        self.words.iter().map(|w| w.word.as_str()).collect()
    }
}

/// A frame in the search representing one cell on the current path
#[derive(Debug, Clone, Copy)]
struct SearchFrame {
    cell: usize,
    /// Next neighbour slot to extend into
    cursor: usize,
}

/// Lazy enumeration of every word on a board. See [`find_all_words`].
pub struct WordFinder<'a, L: Lexicon + ?Sized> {
    board: &'a Board,
    lexicon: &'a L,
    config: SolverConfig,
    usage: CellUsage,
    stack: SmallVec<[SearchFrame; 16]>,
    prefix: String,
    next_start: usize,
    reported: HashSet<String>,
    stats: SearchStats,
    finished: bool,
}

/// Enumerate every dictionary word of at least `config.min_length` letters
/// that can be traced on `board`.
///
/// Start cells are taken row-major and neighbours are extended in the same
/// order as [`can_trace`](crate::tracer::can_trace) scans them.
pub fn find_all_words<'a, L: Lexicon + ?Sized>(
    board: &'a Board,
    lexicon: &'a L,
    config: &SolverConfig,
) -> WordFinder<'a, L> {
    WordFinder {
        board,
        lexicon,
        config: config.clone(),
        usage: CellUsage::new(board),
        stack: SmallVec::new(),
        prefix: String::with_capacity(board.cell_count()),
        next_start: 0,
        reported: HashSet::new(),
        stats: SearchStats::default(),
        finished: false,
    }
}

impl<'a, L: Lexicon + ?Sized> WordFinder<'a, L> {
    /// Counters so far
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Commit a cell to the current path and examine the new prefix
    fn enter(&mut self, cell: usize) -> Option<FoundWord> {
        self.usage.acquire(cell);
        self.prefix.push(self.board.letter(cell));
        self.stack.push(SearchFrame { cell, cursor: 0 });
        self.stats.nodes_visited += 1;

        if should_prune(self.lexicon, &self.prefix, self.config.pruning) {
            self.stats.branches_pruned += 1;
            // Nothing to extend into; the next step backtracks
            if let Some(top) = self.stack.last_mut() {
                top.cursor = usize::MAX;
            }
            return None;
        }

        if self.prefix.len() >= self.config.min_length
            && !self.reported.contains(self.prefix.as_str())
            && self.lexicon.contains(&self.prefix)
        {
            self.reported.insert(self.prefix.clone());
            self.stats.words_found += 1;
            let path = self
                .stack
                .iter()
                .map(|f| self.board.position_of(f.cell))
                .collect();
            tracing::trace!(word = %self.prefix, "found word");
            return Some(FoundWord {
                word: self.prefix.clone(),
                path,
            });
        }

        None
    }

    /// Drop the most recent cell from the current path
    fn leave(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.usage.release(frame.cell);
            self.prefix.pop();
        }
    }

    /// Next neighbour of the top frame that is free, advancing its cursor
    fn next_extension(&mut self) -> Option<usize> {
        let board = self.board;
        let top = self.stack.last_mut()?;
        let neighbors = board.neighbor_indices(top.cell);
        while top.cursor < neighbors.len() {
            let cell = neighbors[top.cursor];
            top.cursor += 1;
            if !self.usage.is_in_use(cell) {
                return Some(cell);
            }
        }
        None
    }
}

impl<'a, L: Lexicon + ?Sized> Iterator for WordFinder<'a, L> {
    type Item = FoundWord;

    fn next(&mut self) -> Option<FoundWord> {
        if self.finished {
            return None;
        }

        loop {
            let cell = if self.stack.is_empty() {
                if self.next_start >= self.board.cell_count() {
                    break;
                }
                self.next_start += 1;
                Some(self.next_start - 1)
            } else {
                self.next_extension()
            };

            match cell {
                Some(cell) => {
                    if let Some(found) = self.enter(cell) {
                        return Some(found);
                    }
                }
                None => self.leave(),
            }
        }

        debug_assert!(self.usage.is_clear());
        self.finished = true;
        tracing::debug!(
            nodes_visited = self.stats.nodes_visited,
            branches_pruned = self.stats.branches_pruned,
            words_found = self.stats.words_found,
            "search exhausted"
        );
        None
    }
}

impl<'a, L: Lexicon + ?Sized> FusedIterator for WordFinder<'a, L> {}

/// Run the full search and collect every word
pub fn solve<L: Lexicon + ?Sized>(board: &Board, lexicon: &L, config: &SolverConfig) -> SolveReport {
    let start_time = Instant::now();
    let mut finder = find_all_words(board, lexicon, config);
    let words: Vec<FoundWord> = finder.by_ref().collect();

    SolveReport {
        words,
        stats: finder.stats().clone(),
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::board::Position;
    use crate::dictionary::Dictionary;
    use crate::tracer::can_trace;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn config(min_length: usize) -> SolverConfig {
        SolverConfig {
            min_length,
            ..Default::default()
        }
    }

    /// Counts `has_prefix` calls on the wrapped lexicon
    struct CountingLexicon<'a> {
        inner: &'a Dictionary,
        prefix_calls: Cell<usize>,
    }

    impl Lexicon for CountingLexicon<'_> {
        fn contains(&self, word: &str) -> bool {
            self.inner.contains(word)
        }

        fn has_prefix(&self, prefix: &str) -> bool {
            self.prefix_calls.set(self.prefix_calls.get() + 1);
            self.inner.has_prefix(prefix)
        }
    }

    fn random_board(rng: &mut StdRng, size: usize, alphabet: &[u8]) -> Board {
        let letters: String = (0..size * size)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
            .collect();
        Board::from_letters(&letters).unwrap()
    }

    fn random_words(rng: &mut StdRng, count: usize, alphabet: &[u8]) -> Vec<String> {
        (0..count)
            .map(|_| {
                let len = rng.gen_range(2..=6);
                (0..len)
                    .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_small_board_scenario() {
        // Every cell of a 2x2 board touches every other, so CATS is there too
        let board = Board::from_rows(&["CA", "TS"]).unwrap();
        let dict = Dictionary::from_words(["CAT", "CATS", "ACT"]).unwrap();

        let found: Vec<FoundWord> = find_all_words(&board, &dict, &config(3)).collect();

        assert_eq!(
            found,
            vec![
                FoundWord {
                    word: "CAT".into(),
                    path: [p(0, 0), p(0, 1), p(1, 0)].into_iter().collect(),
                },
                FoundWord {
                    word: "CATS".into(),
                    path: [p(0, 0), p(0, 1), p(1, 0), p(1, 1)].into_iter().collect(),
                },
                FoundWord {
                    word: "ACT".into(),
                    path: [p(0, 1), p(0, 0), p(1, 0)].into_iter().collect(),
                },
            ]
        );
    }

    #[test]
    fn test_min_length_filters_reports() {
        let board = Board::from_rows(&["CA", "TS"]).unwrap();
        let dict = Dictionary::from_words(["CAT", "CATS", "ACT"]).unwrap();

        let report = solve(&board, &dict, &config(4));
        assert_eq!(report.word_list(), vec!["CATS"]);
    }

    #[test]
    fn test_each_word_reported_once() {
        // AA can be traced from every cell in many ways
        let board = Board::from_rows(&["AAA", "AAA", "AAA"]).unwrap();
        let dict = Dictionary::from_words(["AA", "AAA", "AAAA"]).unwrap();

        let report = solve(&board, &dict, &config(2));
        assert_eq!(report.word_list(), vec!["AA", "AAA", "AAAA"]);
        assert_eq!(report.stats.words_found, 3);
    }

    #[test]
    fn test_prunes_at_first_missing_letter() {
        let board = Board::from_rows(&["CA", "TS"]).unwrap();
        let dict = Dictionary::from_words(["DOG"]).unwrap();
        let lexicon = CountingLexicon {
            inner: &dict,
            prefix_calls: Cell::new(0),
        };

        let mut finder = find_all_words(&board, &lexicon, &config(3));
        assert!(finder.next().is_none());

        // One prefix query per start cell and nothing deeper
        assert_eq!(lexicon.prefix_calls.get(), board.cell_count());
        assert_eq!(finder.stats().nodes_visited, board.cell_count());
        assert_eq!(finder.stats().branches_pruned, board.cell_count());
    }

    #[test]
    fn test_iterator_is_fused() {
        let board = Board::from_rows(&["CA", "TS"]).unwrap();
        let dict = Dictionary::from_words(["CAT"]).unwrap();

        let mut finder = find_all_words(&board, &dict, &config(3));
        assert_eq!(finder.next().map(|w| w.word), Some("CAT".to_string()));
        assert!(finder.next().is_none());
        assert!(finder.next().is_none());
    }

    #[test]
    fn test_partial_consumption_leaves_no_state() {
        let board = Board::from_letters("SEESTSEES").unwrap();
        let dict = Dictionary::from_words(["SEES", "SETS", "TEES", "SEST", "TESS"]).unwrap();

        let full = solve(&board, &dict, &config(4));
        assert!(full.words.len() >= 2);

        let first: Vec<FoundWord> = find_all_words(&board, &dict, &config(4)).take(1).collect();
        assert_eq!(first[0], full.words[0]);

        // A fresh search after an abandoned one sees the same board
        let again = solve(&board, &dict, &config(4));
        assert_eq!(again.words, full.words);
        assert_eq!(again.stats, full.stats);
    }

    #[test]
    fn test_found_paths_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        let alphabet = b"AEST";
        let board = random_board(&mut rng, 4, alphabet);
        let dict = Dictionary::from_words(random_words(&mut rng, 300, alphabet)).unwrap();

        for found in find_all_words(&board, &dict, &config(3)) {
            assert_eq!(found.path.len(), found.word.len());
            for (pos, letter) in found.path.iter().zip(found.word.chars()) {
                assert_eq!(board.letter_at(*pos), Some(letter));
            }
            for pair in found.path.windows(2) {
                assert!(pair[0].is_adjacent(pair[1]));
            }
            let distinct: BTreeSet<_> = found.path.iter().collect();
            assert_eq!(distinct.len(), found.path.len());
        }
    }

    #[test]
    fn test_enumeration_matches_trace_oracle() {
        let mut rng = StdRng::seed_from_u64(42);
        let alphabet = b"ABCDE";

        for _ in 0..20 {
            let size = rng.gen_range(2..=4);
            let board = random_board(&mut rng, size, alphabet);
            let words = random_words(&mut rng, 200, alphabet);
            let dict = Dictionary::from_words(&words).unwrap();

            let found: BTreeSet<String> = find_all_words(&board, &dict, &config(3))
                .map(|w| w.word)
                .collect();
            let expected: BTreeSet<String> = words
                .iter()
                .filter(|w| w.len() >= 3 && can_trace(&board, w).is_some())
                .cloned()
                .collect();

            assert_eq!(found, expected, "board:\n{}", board);
        }
    }

    #[test]
    fn test_pruning_does_not_change_results() {
        let mut rng = StdRng::seed_from_u64(1234);
        let alphabet = b"AELST";

        for _ in 0..10 {
            let board = random_board(&mut rng, 3, alphabet);
            let dict = Dictionary::from_words(random_words(&mut rng, 150, alphabet)).unwrap();

            let pruned = solve(&board, &dict, &config(2));
            let unpruned = solve(
                &board,
                &dict,
                &SolverConfig {
                    min_length: 2,
                    pruning: Pruning::Disabled,
                },
            );

            let pruned_set: BTreeSet<_> = pruned.word_list().into_iter().collect();
            let unpruned_set: BTreeSet<_> = unpruned.word_list().into_iter().collect();
            assert_eq!(pruned_set, unpruned_set);
            assert_eq!(unpruned.stats.branches_pruned, 0);
            assert!(pruned.stats.nodes_visited <= unpruned.stats.nodes_visited);
        }
    }
}
