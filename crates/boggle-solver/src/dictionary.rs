//! Word and prefix membership over a fixed vocabulary.
//!
//! The vocabulary is stored as an `fst::Set`, which answers exact lookups
//! and "does anything start with this" queries without materialising a trie.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use fst::automaton::Str;
use fst::{Automaton, IntoStreamer, Set, Streamer};

/// Membership oracle consulted by the searches.
///
/// Implementations must treat every prefix of a member word (including the
/// empty prefix) as a prefix hit, or prefix pruning would cut valid paths.
pub trait Lexicon {
    /// Exact, case-normalized membership
    fn contains(&self, word: &str) -> bool;

    /// True if some word starts with `prefix` (the word itself included)
    fn has_prefix(&self, prefix: &str) -> bool;
}

/// Failure to build a dictionary from a word source
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read word list: {0}")]
    Read(#[from] io::Error),

    #[error("line {line}: {word:?} is not a word of ASCII letters")]
    Malformed { line: usize, word: String },

    #[error("word list contains no words")]
    Empty,

    #[error("failed to build word set: {0}")]
    Fst(#[from] fst::Error),
}

/// Immutable uppercase vocabulary
#[derive(Debug)]
pub struct Dictionary {
    words: Set<Vec<u8>>,
}

impl Dictionary {
    /// Build from an iterator of words. Words are uppercased and
    /// de-duplicated; anything that is not all ASCII letters is rejected.
    pub fn from_words<I, S>(words: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = Vec::new();
        for (i, word) in words.into_iter().enumerate() {
            let word = word.as_ref();
            if word.is_empty() || !word.bytes().all(|b| b.is_ascii_alphabetic()) {
                return Err(LoadError::Malformed {
                    line: i + 1,
                    word: word.to_string(),
                });
            }
            normalized.push(word.to_ascii_uppercase());
        }
        Self::build(normalized)
    }

    /// Read one word per line. Blank lines and `#` comments are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        let mut words = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            if !word.bytes().all(|b| b.is_ascii_alphabetic()) {
                return Err(LoadError::Malformed {
                    line: i + 1,
                    word: word.to_string(),
                });
            }
            words.push(word.to_ascii_uppercase());
        }
        Self::build(words)
    }

    /// Load a word list file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::from_reader(BufReader::new(file))?;
        tracing::info!(path = %path.display(), words = dictionary.len(), "Loaded dictionary");
        Ok(dictionary)
    }

    fn build(mut words: Vec<String>) -> Result<Self, LoadError> {
        if words.is_empty() {
            return Err(LoadError::Empty);
        }
        // fst requires lexicographic order with no repeats
        words.sort_unstable();
        words.dedup();
        let words = Set::from_iter(words)?;
        Ok(Self { words })
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for Dictionary {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(normalize(word).as_bytes())
    }

    fn has_prefix(&self, prefix: &str) -> bool {
        let prefix = normalize(prefix);
        let matcher = Str::new(&prefix).starts_with();
        let mut stream = self.words.search(matcher).into_stream();
        stream.next().is_some()
    }
}

/// Uppercase a query, borrowing when it already is
fn normalize(word: &str) -> Cow<'_, str> {
    if word.bytes().any(|b| b.is_ascii_lowercase()) {
        Cow::Owned(word.to_ascii_uppercase())
    } else {
        Cow::Borrowed(word)
    }
}
