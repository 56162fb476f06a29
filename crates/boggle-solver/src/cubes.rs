//! Letter cubes and random board setup.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, InvalidGrid};

/// The sixteen cubes of a standard 4x4 game
pub const STANDARD_CUBES: [&str; 16] = [
    "AAEEGN", "ABBJOO", "ACHOPS", "AFFKPS",
    "AOOTTW", "CIMOTU", "DEILRX", "DELRVY",
    "DISTTY", "EEGHNW", "EEINSU", "EHRTVW",
    "EIOSST", "ELRTTY", "HIMNQU", "HLNNRZ",
];

/// The twenty-five cubes of a 5x5 game
pub const BIG_CUBES: [&str; 25] = [
    "AAAFRS", "AAEEEE", "AAFIRS", "ADENNN", "AEEEEM",
    "AEEGMU", "AEGMNN", "AFIRSY", "BJKQXZ", "CCNSTW",
    "CEIILT", "CEILPT", "CEIPST", "DDLNOR", "DDHNOT",
    "DHHLOR", "DHLNOR", "EIIITT", "EMOTTT", "ENSSSU",
    "FIPRSY", "GORRVW", "HIPRRY", "NOOTUW", "OOOTTU",
];

/// Board dimensions offered by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardSize {
    /// 4x4
    #[default]
    Standard,
    /// 5x5
    Big,
}

impl BoardSize {
    pub fn cubes(self) -> &'static [&'static str] {
        match self {
            BoardSize::Standard => &STANDARD_CUBES,
            BoardSize::Big => &BIG_CUBES,
        }
    }

    pub fn side(self) -> usize {
        match self {
            BoardSize::Standard => 4,
            BoardSize::Big => 5,
        }
    }
}

/// Shuffle the cubes into the grid and roll each one for its top face
pub fn roll_board<R: Rng + ?Sized>(rng: &mut R, size: BoardSize) -> Result<Board, InvalidGrid> {
    let mut cubes = size.cubes().to_vec();
    cubes.shuffle(rng);

    let letters: String = cubes
        .iter()
        .map(|cube| {
            let faces = cube.as_bytes();
            faces[rng.gen_range(0..faces.len())] as char
        })
        .collect();

    Board::from_letters(&letters)
}
