//! The wordlists used by the puzzle and the harness.
//!
//! Both lists are embedded in the binary and parsed once on first use.
//! [`GUESSES`] holds every word a strategy is allowed to guess, and
//! [`ANSWERS`] selects the subset of those words that the harness may use
//! as puzzle answers.

use itertools::Itertools;
use lazy_static::lazy_static;

const GUESS_DATA: &str = include_str!("../data/guesses.txt");
const ANSWER_DATA: &str = include_str!("../data/answers.txt");

lazy_static! {
    /// Every five-letter word a strategy may guess, sorted for binary search.
    pub static ref GUESSES: Vec<&'static str> = {
        GUESS_DATA
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .sorted_unstable()
            .dedup()
            .collect()
    };

    /// Indices into [`GUESSES`] of the words a puzzle may use as its answer.
    pub static ref ANSWERS: Vec<usize> = {
        ANSWER_DATA
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(|w| {
                GUESSES
                    .binary_search(&w)
                    .expect("answer list must be a subset of the guess list")
            })
            .collect()
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn guesses_are_five_lowercase_ascii_letters() {
        for word in GUESSES.iter() {
            assert_eq!(word.len(), 5, "bad word {:?}", word);
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "bad word {:?}",
                word
            );
        }
    }

    #[test]
    fn guesses_are_sorted_and_unique() {
        for pair in GUESSES.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn answers_index_into_guesses() {
        assert!(!ANSWERS.is_empty());
        for &i in ANSWERS.iter() {
            assert!(i < GUESSES.len());
        }
    }

    #[test]
    fn openers_are_available() {
        // The strategies' precomputed first guesses must stay in the list.
        for opener in ["tares", "serai", "cares"] {
            assert!(GUESSES.binary_search(&opener).is_ok(), "missing {}", opener);
        }
    }
}
