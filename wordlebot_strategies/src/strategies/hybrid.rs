use std::{collections::HashSet, fmt::Display};

use itertools::{Itertools, MinMaxResult};
use lazy_static::lazy_static;
use wordlebot::strategy::{Attempts, AttemptsKey, Puzzle, Strategy, Word};

use crate::util::{self, Picker, VOCABULARY};

lazy_static! {
    static ref OPENER: Word = Word::from_str("tares").expect("opener is in the wordlist");
}

/// A strategy that blends the entropy and frequency signals.
///
/// `Hybrid` scores every unguessed vocabulary word twice, once by
/// expected information and once by positional letter frequency, min-max
/// normalizes both scores across the pool, and combines them with weights
/// that shift round by round. Early guesses lean on entropy to cut the
/// field down; late guesses lean on frequency to land on a likely answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hybrid;

/// Weights for blending the two signals on a given round.
///
/// Entropy starts at 0.7 and loses 0.1 per attempt down to a floor of
/// 0.1; frequency mirrors it. The pair is renormalized to sum to one.
fn weights(attempt: usize) -> (f64, f64) {
    let entropy = (0.7 - 0.1 * attempt as f64).max(0.1);
    let frequency = (0.3 + 0.1 * attempt as f64).min(0.9);
    let total = entropy + frequency;
    (entropy / total, frequency / total)
}

/// Rescales `scores` into [0, 1], mapping everything to 1.0 when the
/// scores do not vary.
fn normalize(scores: &mut [f64]) {
    let (min, max) = match scores.iter().copied().minmax() {
        MinMaxResult::NoElements => return,
        MinMaxResult::OneElement(x) => (x, x),
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
    };
    for score in scores.iter_mut() {
        *score = if max > min {
            (*score - min) / (max - min)
        } else {
            1.0
        };
    }
}

struct HybridPicker;

impl Picker for HybridPicker {
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
        let pool: Vec<Word> = VOCABULARY
            .iter()
            .filter(|w| !guessed.contains(w))
            .copied()
            .collect();

        let mut entropies: Vec<f64> = pool
            .iter()
            .map(|word| util::entropy(word, candidates))
            .collect();
        let mut frequencies: Vec<f64> = pool
            .iter()
            .map(|word| util::frequency_score(word, &freqs))
            .collect();
        normalize(&mut entropies);
        normalize(&mut frequencies);

        let (entropy_weight, frequency_weight) = weights(attempt);
        let mut best: Option<(Word, f64)> = None;
        for (i, word) in pool.iter().enumerate() {
            let score = entropy_weight * entropies[i] + frequency_weight * frequencies[i];
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((*word, score));
            }
        }
        best.map(|(word, _)| word)
    }
}

impl Strategy for Hybrid {
    fn solve(&self, puzzle: &mut Puzzle, key: AttemptsKey) -> Attempts {
        util::drive(&mut HybridPicker, puzzle, key)
    }

    fn version(&self) -> &'static str {
        "0.2.0"
    }
}

impl Display for Hybrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordlebot_strategies::Hybrid")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn weights_shift_toward_frequency() {
        let (e0, f0) = weights(0);
        assert!((e0 - 0.7).abs() < 1e-9);
        assert!((f0 - 0.3).abs() < 1e-9);

        // Past attempt five the floor and ceiling kick in.
        let (e9, f9) = weights(9);
        assert!((e9 - 0.1).abs() < 1e-9);
        assert!((f9 - 0.9).abs() < 1e-9);

        for attempt in 0..6 {
            let (e, f) = weights(attempt);
            assert!((e + f - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn normalize_handles_flat_scores() {
        let mut varied = vec![1.0, 3.0, 2.0];
        normalize(&mut varied);
        assert_eq!(varied, vec![0.0, 1.0, 0.5]);

        let mut flat = vec![2.0, 2.0];
        normalize(&mut flat);
        assert_eq!(flat, vec![1.0, 1.0]);
    }

    #[test]
    fn opens_with_the_precomputed_guess() {
        let mut puzzle = Puzzle::new(Word::from_str("earth").unwrap());
        let attempts = Hybrid.solve(&mut puzzle, AttemptsKey::new_cheat());
        assert_eq!(attempts.inner()[0], *OPENER);
    }

    #[test]
    fn solves_within_six_guesses() {
        let answer = Word::from_str("earth").unwrap();
        let mut puzzle = Puzzle::new(answer);
        let attempts = Hybrid.solve(&mut puzzle, AttemptsKey::new_cheat());
        assert_eq!(attempts.inner().last(), Some(&answer));
    }
}
