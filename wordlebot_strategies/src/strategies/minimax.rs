use std::{collections::HashSet, fmt::Display};

use lazy_static::lazy_static;
use wordlebot::strategy::{Attempts, AttemptsKey, Puzzle, Strategy, Word};

use crate::util::{self, Picker, VOCABULARY};

lazy_static! {
    static ref OPENER: Word = Word::from_str("serai").expect("opener is in the wordlist");
}

/// A strategy that minimizes the worst-case surviving candidate count.
///
/// After the opener, `Minimax` scores every unguessed vocabulary word by
/// the size of the largest feedback partition it leaves behind, and plays
/// the word whose worst case is smallest. It gives up average-case speed
/// for a guarantee that no single feedback pattern leaves it swamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Minimax;

struct MinimaxPicker;

impl Picker for MinimaxPicker {
    fn pick(
        &mut self,
        candidates: &[Word],
        guessed: &HashSet<Word>,
        attempt: usize,
    ) -> Option<Word> {
        if attempt == 0 {
            return Some(*OPENER);
        }

        let mut best: Option<(Word, u32)> = None;
        for word in VOCABULARY.iter().filter(|w| !guessed.contains(w)) {
            let worst_case = util::partition_sizes(word, candidates)
                .values()
                .copied()
                .max()
                .unwrap_or(0);
            if best.map_or(true, |(_, b)| worst_case < b) {
                best = Some((*word, worst_case));
            }
        }
        best.map(|(word, _)| word)
    }
}

impl Strategy for Minimax {
    fn solve(&self, puzzle: &mut Puzzle, key: AttemptsKey) -> Attempts {
        util::drive(&mut MinimaxPicker, puzzle, key)
    }

    fn version(&self) -> &'static str {
        "0.2.0"
    }
}

impl Display for Minimax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordlebot_strategies::Minimax")
    }
}
