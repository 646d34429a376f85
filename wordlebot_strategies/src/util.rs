//! Shared plumbing for the strategies.
//!
//! The interesting half of every strategy is its scoring function; the
//! rest — pruning the candidate set by feedback, never repeating a guess,
//! jumping on a lone surviving candidate — is identical across all of
//! them and lives here as [`drive()`].

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use wordlebot::{
    strategy::{Attempts, AttemptsKey, Feedback, Puzzle, Word},
    words::GUESSES,
};

lazy_static! {
    /// Every guessable word, as validated [`Word`]s.
    pub static ref VOCABULARY: Vec<Word> = (0..GUESSES.len())
        .map(|i| Word::from_index(i).expect("index is in bounds"))
        .collect();
}

/// Chooses the next guess for [`drive()`].
pub trait Picker {
    /// Picks a guess.
    ///
    /// `candidates` holds the words still consistent with all feedback so
    /// far, `guessed` the words already played, and `attempt` the number
    /// of guesses already made. Returning `None` ends the solve early.
    fn pick(
        &mut self,
        candidates: &[Word],
        guessed: &HashSet<Word>,
        attempt: usize,
    ) -> Option<Word>;
}

/// Runs the shared solve loop with `picker` choosing guesses.
///
/// The candidate set starts as the full vocabulary and is pruned to the
/// words consistent with each round of feedback. A lone surviving
/// candidate is guessed immediately without consulting the picker.
pub fn drive(picker: &mut dyn Picker, puzzle: &mut Puzzle, key: AttemptsKey) -> Attempts {
    let mut attempts = key.unlock();
    let mut candidates: Vec<Word> = VOCABULARY.clone();
    let mut guessed: HashSet<Word> = HashSet::new();

    while !attempts.finished() {
        let guess = if candidates.len() == 1 {
            candidates[0]
        } else {
            match picker.pick(&candidates, &guessed, attempts.inner().len()) {
                Some(word) => word,
                None => break,
            }
        };

        guessed.insert(guess);
        let (feedback, correct) = match puzzle.check(&guess, &mut attempts) {
            Ok(res) => res,
            Err(_) => break,
        };
        if correct {
            break;
        }

        prune(&mut candidates, &guess, feedback);
        if candidates.is_empty() {
            break;
        }
    }

    attempts
}

/// Removes the candidates that would not have produced `feedback` for
/// `guess`.
pub fn prune(candidates: &mut Vec<Word>, guess: &Word, feedback: Feedback) {
    candidates.retain(|word| Feedback::grade(guess, word) == feedback);
}

/// Sizes of the feedback partitions that `guess` induces on `candidates`.
pub fn partition_sizes(guess: &Word, candidates: &[Word]) -> HashMap<Feedback, u32> {
    let mut partitions = HashMap::new();
    for candidate in candidates {
        *partitions
            .entry(Feedback::grade(guess, candidate))
            .or_insert(0) += 1;
    }
    partitions
}

/// Expected information, in bits, gained by playing `guess` against the
/// candidate set.
pub fn entropy(guess: &Word, candidates: &[Word]) -> f64 {
    let total = candidates.len() as f64;
    partition_sizes(guess, candidates)
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Counts, per position, how often each letter appears there across the
/// candidate set.
pub fn position_frequencies(candidates: &[Word]) -> [[u32; 26]; 5] {
    const A_ASCII: usize = 0x61;
    let mut freqs = [[0_u32; 26]; 5];
    for word in candidates {
        for (pos, c) in word.chars().enumerate() {
            freqs[pos][c as usize - A_ASCII] += 1;
        }
    }
    freqs
}

/// Scores `word` by summed positional letter frequency.
///
/// Every time a letter repeats within the word, the running score is
/// scaled by 0.8 to discourage duplicates.
pub fn frequency_score(word: &Word, freqs: &[[u32; 26]; 5]) -> f64 {
    const A_ASCII: usize = 0x61;
    let mut score = 0.0;
    let mut seen = [false; 26];
    for (pos, c) in word.chars().enumerate() {
        let i = c as usize - A_ASCII;
        score += freqs[pos][i] as f64;
        if seen[i] {
            score *= 0.8;
        }
        seen[i] = true;
    }
    score
}

#[cfg(test)]
mod test {
    use super::*;

    fn words(strs: &[&str]) -> Vec<Word> {
        strs.iter().map(|s| Word::from_str(s).unwrap()).collect()
    }

    #[test]
    fn prune_keeps_only_consistent_words() {
        let guess = Word::from_str("cares").unwrap();
        let answer = Word::from_str("earth").unwrap();
        let feedback = Feedback::grade(&guess, &answer);

        let mut candidates = words(&["earth", "heart", "cares", "tiger", "early"]);
        prune(&mut candidates, &guess, feedback);

        // The answer always survives its own feedback.
        assert!(candidates.contains(&answer));
        // The guess itself cannot survive a miss.
        assert!(!candidates.contains(&guess));
        for word in &candidates {
            assert_eq!(Feedback::grade(&guess, word), feedback);
        }
    }

    #[test]
    fn partition_sizes_cover_all_candidates() {
        let guess = Word::from_str("tares").unwrap();
        let candidates = words(&["earth", "heart", "tiger", "about", "early", "roast"]);

        let partitions = partition_sizes(&guess, &candidates);
        assert_eq!(partitions.values().sum::<u32>(), candidates.len() as u32);
    }

    #[test]
    fn entropy_of_uniform_partition() {
        // "tiger" against these four produces four distinct patterns, so
        // the split is uniform and the entropy is log2(4) = 2 bits.
        let guess = Word::from_str("tiger").unwrap();
        let candidates = words(&["tiger", "earth", "night", "about"]);
        assert_eq!(partition_sizes(&guess, &candidates).len(), 4);
        assert!((entropy(&guess, &candidates) - 2.0).abs() < 1e-9);

        // A guess that cannot distinguish anything gains zero bits.
        let blind = Word::from_str("lymph").unwrap();
        let vowels = words(&["audio", "adieu"]);
        assert_eq!(partition_sizes(&blind, &vowels).len(), 1);
        assert!(entropy(&blind, &vowels).abs() < 1e-9);
    }

    #[test]
    fn frequency_prefers_common_positions() {
        let candidates = words(&["earth", "early", "eagle"]);
        let freqs = position_frequencies(&candidates);

        // All three candidates open with "ea", so every word in the set
        // scores at least those two columns fully.
        assert_eq!(freqs[0][(b'e' - b'a') as usize], 3);
        assert_eq!(freqs[1][(b'a' - b'a') as usize], 3);

        let earth = Word::from_str("earth").unwrap();
        let tiger = Word::from_str("tiger").unwrap();
        assert!(frequency_score(&earth, &freqs) > frequency_score(&tiger, &freqs));
    }

    #[test]
    fn duplicate_letters_are_penalized() {
        let candidates = words(&["eagle", "earth", "early"]);
        let freqs = position_frequencies(&candidates);

        // "eagle" repeats its `e`, so its raw column sum is scaled down.
        let eagle = Word::from_str("eagle").unwrap();
        let raw: f64 = eagle
            .chars()
            .enumerate()
            .map(|(pos, c)| freqs[pos][(c as u8 - b'a') as usize] as f64)
            .sum();
        assert!(frequency_score(&eagle, &freqs) < raw);
    }
}
