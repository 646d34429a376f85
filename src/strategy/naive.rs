//! A single simple strategy to show how they are written.

use std::fmt::Display;

use crate::strategy::{Attempts, AttemptsKey, Feedback, Puzzle, Strategy, Word};
use crate::words::GUESSES;

/// A Wordle strategy that guesses the first word that could still be the
/// answer.
///
/// `Naive` walks the wordlist in order, keeping only words consistent with
/// the feedback seen so far, and always guesses the first survivor. It
/// exists to show how [`Strategy`] is implemented and to serve as a cheap
/// baseline; the serious strategies live in the `wordlebot_strategies`
/// crate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Naive;

impl Strategy for Naive {
    fn solve(&self, puzzle: &mut Puzzle, key: AttemptsKey) -> Attempts {
        let mut attempts = key.unlock();
        let mut candidates: Vec<Word> = (0..GUESSES.len())
            .map(|i| Word::from_index(i).expect("index is in bounds"))
            .collect();

        while !attempts.finished() {
            let guess = match candidates.first() {
                Some(word) => *word,
                None => break,
            };

            let (feedback, correct) = match puzzle.check(&guess, &mut attempts) {
                Ok(res) => res,
                Err(_) => break,
            };
            if correct {
                break;
            }

            candidates.retain(|word| Feedback::grade(&guess, word) == feedback);
        }

        attempts
    }

    fn version(&self) -> &'static str {
        "0.2.0"
    }
}

impl Display for Naive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordlebot::Naive")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn never_guesses_inconsistently() {
        let answer = Word::from_str("earth").unwrap();
        let mut puzzle = Puzzle::new(answer);
        let attempts = Naive.solve(&mut puzzle, AttemptsKey::new());

        // Every guess after the first must be consistent with the feedback
        // for every earlier guess.
        for (i, later) in attempts.inner().iter().enumerate().skip(1) {
            for earlier in &attempts.inner()[..i] {
                let observed = Feedback::grade(earlier, &answer);
                assert_eq!(Feedback::grade(earlier, later), observed);
            }
        }
    }
}
