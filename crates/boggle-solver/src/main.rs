//! CLI entry point for the Boggle solver.
//!
//! Usage:
//!   boggle-solver trace <WORD> --board <LETTERS>
//!   boggle-solver solve --dictionary <FILE> --board <LETTERS> [options]
//!   boggle-solver roll [--size big] [--seed <n>]
//!   boggle-solver play --dictionary <FILE> [options]
//!
//! Boards are given either as a row-major letter string (`--board`) or as a
//! JSON file of the form `{"rows": ["CATS", ...]}` (`--board-file`).
//! Set `RUST_LOG=debug` for search statistics on stderr.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use boggle_solver::{
    can_trace, roll_board, solve, word_score, Board, BoardSize, Dictionary, Path, Player,
    Pruning, Round, SearchStats, SolverConfig, DEFAULT_MIN_LENGTH,
};

#[derive(Parser)]
#[command(name = "boggle-solver")]
#[command(about = "Word tracing and exhaustive word search for Boggle boards")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BoardArgs {
    /// Board letters, row-major (16 for a 4x4 board, 25 for 5x5)
    #[arg(long, conflicts_with = "board_file")]
    board: Option<String>,

    /// Path to a board JSON file
    #[arg(long, value_name = "FILE")]
    board_file: Option<PathBuf>,
}

impl BoardArgs {
    fn load(&self) -> anyhow::Result<Option<Board>> {
        if let Some(letters) = &self.board {
            return Ok(Some(Board::from_letters(letters)?));
        }
        if let Some(path) = &self.board_file {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read board file {:?}", path))?;
            let board = serde_json::from_str(&json)
                .with_context(|| format!("failed to parse board file {:?}", path))?;
            return Ok(Some(board));
        }
        Ok(None)
    }

    fn require(&self) -> anyhow::Result<Board> {
        match self.load()? {
            Some(board) => Ok(board),
            None => bail!("must provide either --board or --board-file"),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SizeArg {
    /// 4x4
    Standard,
    /// 5x5
    Big,
}

impl From<SizeArg> for BoardSize {
    fn from(size: SizeArg) -> Self {
        match size {
            SizeArg::Standard => BoardSize::Standard,
            SizeArg::Big => BoardSize::Big,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a word can be traced on a board
    Trace {
        /// Word to trace
        word: String,

        #[command(flatten)]
        board: BoardArgs,
    },

    /// Find every dictionary word on a board
    Solve {
        /// Word list, one word per line
        #[arg(long, short, value_name = "FILE")]
        dictionary: PathBuf,

        #[command(flatten)]
        board: BoardArgs,

        /// Minimum word length to report
        #[arg(long, default_value_t = DEFAULT_MIN_LENGTH)]
        min_length: usize,

        /// Walk every path instead of pruning on dictionary prefixes
        #[arg(long)]
        no_prune: bool,
    },

    /// Roll a random board from the letter cubes
    Roll {
        /// Board size
        #[arg(long, value_enum, default_value = "standard")]
        size: SizeArg,

        /// Seed for a reproducible board
        #[arg(long)]
        seed: Option<u64>,

        /// Print the board as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a round: enter words, then the computer takes the rest
    Play {
        /// Word list, one word per line
        #[arg(long, short, value_name = "FILE")]
        dictionary: PathBuf,

        #[command(flatten)]
        board: BoardArgs,

        /// Board size when rolling
        #[arg(long, value_enum, default_value = "standard")]
        size: SizeArg,

        /// Seed for a reproducible board
        #[arg(long)]
        seed: Option<u64>,

        /// Minimum word length
        #[arg(long, default_value_t = DEFAULT_MIN_LENGTH)]
        min_length: usize,
    },
}

/// Output format for a trace
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TraceOutput {
    word: String,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Path>,
}

/// Output format for a full search
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    board: Vec<String>,
    word_count: usize,
    total_score: u32,
    words: Vec<WordOutput>,
    stats: SearchStats,
    time_elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
struct WordOutput {
    word: String,
    score: u32,
    path: Path,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Commands::Trace { word, board } => {
            let board = board.require()?;
            let word = word.trim().to_ascii_uppercase();
            let path = can_trace(&board, &word);
            let found = path.is_some();

            let output = TraceOutput { word, found, path };
            println!("{}", serde_json::to_string_pretty(&output)?);

            // Exit with appropriate code
            Ok(if found { 0 } else { 1 })
        }

        Commands::Solve {
            dictionary,
            board,
            min_length,
            no_prune,
        } => {
            let board = board.require()?;
            let dictionary = Dictionary::from_file(&dictionary)?;
            let config = SolverConfig {
                min_length,
                pruning: if no_prune {
                    Pruning::Disabled
                } else {
                    Pruning::Prefix
                },
            };

            let report = solve(&board, &dictionary, &config);
            let words: Vec<WordOutput> = report
                .words
                .into_iter()
                .map(|found| WordOutput {
                    score: word_score(&found.word, min_length),
                    word: found.word,
                    path: found.path,
                })
                .collect();

            let output = SolveOutput {
                board: board.rows(),
                word_count: words.len(),
                total_score: words.iter().map(|w| w.score).sum(),
                words,
                stats: report.stats,
                time_elapsed_ms: report.time_elapsed_ms,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(0)
        }

        Commands::Roll { size, seed, json } => {
            let mut rng = make_rng(seed);
            let board = roll_board(&mut rng, size.into())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&board)?);
            } else {
                println!("{}", board);
            }
            Ok(0)
        }

        Commands::Play {
            dictionary,
            board,
            size,
            seed,
            min_length,
        } => {
            let dictionary = Dictionary::from_file(&dictionary)?;
            let board = match board.load()? {
                Some(board) => board,
                None => roll_board(&mut make_rng(seed), size.into())?,
            };
            play(Round::new(board, &dictionary, min_length))?;
            Ok(0)
        }
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Interactive round on stdin/stdout
fn play(mut round: Round<'_, Dictionary>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}\n", round.board());
    println!("Enter words one per line. An empty line ends your turn.");

    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter a word: ");
        stdout.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if line.trim().is_empty() {
            break;
        }

        match round.guess(&line) {
            Ok(path) => println!("  {} {}", line.trim().to_ascii_uppercase(), format_path(&path)),
            Err(e) => println!("  {}", e),
        }
    }

    println!("\nComputer's turn:");
    for found in round.computer_turn() {
        println!("  {} {}", found.word, format_path(&found.path));
    }

    let scores = round.scoreboard();
    println!(
        "\nFinal score: you {} ({} words), computer {} ({} words)",
        scores.score(Player::Human),
        scores.human_words.len(),
        scores.score(Player::Computer),
        scores.computer_words.len(),
    );
    Ok(())
}

fn format_path(path: &Path) -> String {
    path.iter()
        .map(|pos| pos.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
