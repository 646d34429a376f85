#![doc = include_str!("../README.md")]

use thiserror::Error;

pub mod strategy;
pub use strategy::Strategy;

pub mod words;

pub mod harness;
pub use harness::Harness;

pub mod perf;
pub use perf::{Perf, Summary};

mod stats;

#[cfg(test)]
pub(crate) mod mock;

/// A convenience alias for results produced by this crate.
pub type Result<T, E = SolveError> = std::result::Result<T, E>;

/// The errors that `wordlebot` can produce.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("puzzle encountered error")]
    Puzzle {
        #[from]
        kind: PuzzleError,
    },

    #[error("general IO error")]
    Io(#[from] std::io::Error),

    #[error("cannot compare a strategy with itself")]
    SelfComparison,

    #[error("statistical test is undefined for these samples")]
    Stats,

    #[error("the evaluation harness encountered an error")]
    Harness {
        #[from]
        kind: HarnessError,
    },
}

#[derive(Debug, Error)]
pub enum PuzzleError {
    /// The index provided when constructing a word does not correspond
    /// to a word in the guess list.
    #[error("the index {0} does not correspond to a word in the guess list")]
    InvalidIndex(usize),

    /// The string provided when constructing a word is not in the guess list.
    #[error("the string \"{0}\" is not in the guess list")]
    NotInWordlist(String),

    /// The puzzle has already evaluated six guesses.
    #[error("the puzzle has already evaluated six guesses")]
    OutOfGuesses,
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("no strategies have been added to the harness")]
    NoStrategiesAdded,

    /// A strategy created an unauthorized instance of
    /// [`Attempts`](strategy::Attempts) and used it to gain more information
    /// about its puzzle.
    #[error("the strategy {0} cheated")]
    StrategyCheated(String),

    #[error("could not write results file")]
    ResultsIo(#[source] std::io::Error),

    #[error("trouble serializing results")]
    Serde(#[from] serde_json::Error),
}
