//! Turn controller for one round of play.
//!
//! Owns the policy the searches leave to their caller: minimum word length,
//! the set of words already claimed this round, and scoring. The human
//! verifies words one at a time through [`Round::guess`]; the computer
//! then takes every remaining word through [`Round::computer_turn`].

use std::collections::HashSet;

use serde::Serialize;

use crate::board::{Board, Path};
use crate::dictionary::Lexicon;
use crate::solver::{find_all_words, FoundWord, SolverConfig};
use crate::tracer::can_trace;

/// Why a human guess was not accepted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("words must be at least {min} letters long")]
    TooShort { min: usize },

    #[error("not a word")]
    NotAWord,

    #[error("already claimed this round")]
    AlreadyUsed,

    #[error("cannot be traced on this board")]
    NotOnBoard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Computer,
}

/// Points for a word: one at the minimum length, one more per extra letter
pub fn word_score(word: &str, min_length: usize) -> u32 {
    let len = word.chars().count();
    if len < min_length {
        0
    } else {
        (len - min_length + 1) as u32
    }
}

/// Words and points credited to each player
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scoreboard {
    pub human_words: Vec<String>,
    pub computer_words: Vec<String>,
    pub human_score: u32,
    pub computer_score: u32,
}

impl Scoreboard {
    fn record(&mut self, player: Player, word: String, points: u32) {
        match player {
            Player::Human => {
                self.human_words.push(word);
                self.human_score += points;
            }
            Player::Computer => {
                self.computer_words.push(word);
                self.computer_score += points;
            }
        }
    }

    pub fn score(&self, player: Player) -> u32 {
        match player {
            Player::Human => self.human_score,
            Player::Computer => self.computer_score,
        }
    }
}

/// One round: a board, a vocabulary and the words claimed so far
pub struct Round<'a, L: Lexicon + ?Sized> {
    board: Board,
    lexicon: &'a L,
    min_length: usize,
    used_words: HashSet<String>,
    scoreboard: Scoreboard,
}

impl<'a, L: Lexicon + ?Sized> Round<'a, L> {
    pub fn new(board: Board, lexicon: &'a L, min_length: usize) -> Self {
        Self {
            board,
            lexicon,
            min_length,
            used_words: HashSet::new(),
            scoreboard: Scoreboard::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn is_used(&self, word: &str) -> bool {
        self.used_words.contains(&word.to_ascii_uppercase())
    }

    /// Check a human guess and credit it on success.
    ///
    /// Checks run in order: length, dictionary, already claimed, board.
    /// On success the path is returned for highlighting.
    pub fn guess(&mut self, input: &str) -> Result<Path, GuessError> {
        let word = input.trim().to_ascii_uppercase();

        if word.chars().count() < self.min_length {
            return Err(GuessError::TooShort {
                min: self.min_length,
            });
        }
        if !self.lexicon.contains(&word) {
            return Err(GuessError::NotAWord);
        }
        if self.used_words.contains(&word) {
            return Err(GuessError::AlreadyUsed);
        }
        let path = can_trace(&self.board, &word).ok_or(GuessError::NotOnBoard)?;

        self.claim(Player::Human, word);
        Ok(path)
    }

    /// Credit the computer with every word on the board nobody has claimed.
    ///
    /// Words the human already found are skipped without comment.
    pub fn computer_turn(&mut self) -> Vec<FoundWord> {
        let config = SolverConfig {
            min_length: self.min_length,
            ..Default::default()
        };

        let mut credited = Vec::new();
        // Collected first since claiming needs `&mut self`
        let found: Vec<FoundWord> = find_all_words(&self.board, self.lexicon, &config).collect();
        for found in found {
            if self.used_words.contains(&found.word) {
                tracing::trace!(word = %found.word, "skipping word already claimed");
                continue;
            }
            self.claim(Player::Computer, found.word.clone());
            credited.push(found);
        }

        tracing::debug!(
            words = credited.len(),
            score = self.scoreboard.computer_score,
            "computer turn finished"
        );
        credited
    }

    fn claim(&mut self, player: Player, word: String) {
        let points = word_score(&word, self.min_length);
        self.used_words.insert(word.clone());
        self.scoreboard.record(player, word, points);
    }
}
