//! Search space pruning rules.
//!
//! These rules detect partial paths (or whole candidate words) that can
//! never produce a result, so the searches can skip them. None of them
//! change what is found, only how much of the board is walked.

use crate::board::Board;
use crate::dictionary::Lexicon;

/// Whether enumeration abandons branches whose letters start no word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pruning {
    /// Abandon a branch as soon as its prefix starts no dictionary word
    #[default]
    Prefix,
    /// Walk every simple path on the board
    Disabled,
}

/// Check if a branch spelling `prefix` should be abandoned
pub fn should_prune<L: Lexicon + ?Sized>(lexicon: &L, prefix: &str, mode: Pruning) -> bool {
    match mode {
        Pruning::Prefix => !lexicon.has_prefix(prefix),
        Pruning::Disabled => false,
    }
}

/// Check if `word` needs more of some letter than the board holds, or more
/// cells than the board has. Such a word can never be traced.
pub fn exceeds_board(board: &Board, word: &[char]) -> bool {
    if word.len() > board.cell_count() {
        return true;
    }

    let mut seen: Vec<char> = Vec::with_capacity(word.len());
    for &letter in word {
        if seen.contains(&letter) {
            continue;
        }
        seen.push(letter);
        let needed = word.iter().filter(|&&l| l == letter).count();
        if needed > board.count_letter(letter) {
            return true;
        }
    }

    false
}
