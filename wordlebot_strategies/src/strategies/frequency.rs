use std::{collections::HashSet, fmt::Display};

use lazy_static::lazy_static;
use wordlebot::strategy::{Attempts, AttemptsKey, Puzzle, Strategy, Word};

use crate::util::{self, Picker, VOCABULARY};

lazy_static! {
    static ref OPENER: Word = Word::from_str("cares").expect("opener is in the wordlist");
}

/// A strategy that favors letters common at each position.
///
/// After the opener, `Frequency` counts how often each letter appears at
/// each position across the remaining candidates, then plays the
/// unguessed vocabulary word whose letters rack up the highest positional
/// counts. Words that repeat a letter pay a 20% penalty per repeat, since
/// a duplicate probes less of the alphabet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency;

struct FrequencyPicker;

impl Picker for FrequencyPicker {
    fn pick(
        &mut self,
        candidates: &[Word],
        guessed: &HashSet<Word>,
        attempt: usize,
    ) -> Option<Word> {
        if attempt == 0 {
            return Some(*OPENER);
        }

        let freqs = util::position_frequencies(candidates);
        let mut best: Option<(Word, f64)> = None;
        for word in VOCABULARY.iter().filter(|w| !guessed.contains(w)) {
            let score = util::frequency_score(word, &freqs);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((*word, score));
            }
        }
        best.map(|(word, _)| word)
    }
}

impl Strategy for Frequency {
    fn solve(&self, puzzle: &mut Puzzle, key: AttemptsKey) -> Attempts {
        util::drive(&mut FrequencyPicker, puzzle, key)
    }

    fn version(&self) -> &'static str {
        "0.2.0"
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordlebot_strategies::Frequency")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn opens_with_the_precomputed_guess() {
        let mut puzzle = Puzzle::new(Word::from_str("earth").unwrap());
        let attempts = Frequency.solve(&mut puzzle, AttemptsKey::new_cheat());
        assert_eq!(attempts.inner()[0], *OPENER);
    }

    #[test]
    fn solves_within_six_guesses() {
        let answer = Word::from_str("roast").unwrap();
        let mut puzzle = Puzzle::new(answer);
        let attempts = Frequency.solve(&mut puzzle, AttemptsKey::new_cheat());
        assert_eq!(attempts.inner().last(), Some(&answer));
    }
}
