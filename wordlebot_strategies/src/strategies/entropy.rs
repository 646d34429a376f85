use std::{collections::HashSet, fmt::Display};

use lazy_static::lazy_static;
use wordlebot::strategy::{Attempts, AttemptsKey, Puzzle, Strategy, Word};

use crate::util::{self, Picker, VOCABULARY};

lazy_static! {
    // Precomputed maximum-entropy opener over the full wordlist.
    static ref OPENER: Word = Word::from_str("tares").expect("opener is in the wordlist");
}

/// A strategy that maximizes the expected information gained per guess.
///
/// After the opener, `Entropy` scores every unguessed vocabulary word by
/// the Shannon entropy of the feedback partition it induces on the
/// remaining candidates, and plays the highest-scoring word. Guesses are
/// drawn from the whole vocabulary, not just the candidates, so an
/// impossible word that splits the field well is fair game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entropy;

struct EntropyPicker;

impl Picker for EntropyPicker {
    fn pick(
        &mut self,
        candidates: &[Word],
        guessed: &HashSet<Word>,
        attempt: usize,
    ) -> Option<Word> {
        if attempt == 0 {
            return Some(*OPENER);
        }

        let mut best: Option<(Word, f64)> = None;
        for word in VOCABULARY.iter().filter(|w| !guessed.contains(w)) {
            let bits = util::entropy(word, candidates);
            if best.map_or(true, |(_, b)| bits > b) {
                best = Some((*word, bits));
            }
        }
        best.map(|(word, _)| word)
    }
}

impl Strategy for Entropy {
    fn solve(&self, puzzle: &mut Puzzle, key: AttemptsKey) -> Attempts {
        util::drive(&mut EntropyPicker, puzzle, key)
    }

    fn version(&self) -> &'static str {
        "0.2.0"
    }
}

impl Display for Entropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordlebot_strategies::Entropy")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn opens_with_the_precomputed_guess() {
        let mut puzzle = Puzzle::new(Word::from_str("earth").unwrap());
        let attempts = Entropy.solve(&mut puzzle, AttemptsKey::new_cheat());
        assert_eq!(attempts.inner()[0], *OPENER);
    }

    #[test]
    fn solves_within_six_guesses() {
        let answer = Word::from_str("earth").unwrap();
        let mut puzzle = Puzzle::new(answer);
        let attempts = Entropy.solve(&mut puzzle, AttemptsKey::new_cheat());
        assert_eq!(attempts.inner().last(), Some(&answer));
    }
}
