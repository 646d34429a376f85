//! Tools for defining Wordle strategies.

use std::{
    fmt::{Debug, Display},
    ops::Deref,
};

use serde::{Deserialize, Serialize};

use crate::{words::GUESSES, PuzzleError, Result};

pub mod naive;

/// A Wordle word.
///
/// This struct represents a possible guess, and its construction is
/// validated to ensure that every instance is a word from
/// [`GUESSES`](crate::words::GUESSES).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Word {
    pub(crate) index: usize,
}

impl Word {
    /// Creates a new [`Word`] from an index into [`GUESSES`](crate::words::GUESSES).
    ///
    /// Returns an error if the index provided is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wordlebot::{strategy::Word, words::GUESSES};
    /// #
    /// let first = Word::from_index(0)?;
    /// assert!(Word::from_index(GUESSES.len()).is_err());
    /// #
    /// # Ok::<_, wordlebot::SolveError>(())
    /// ```
    pub fn from_index(index: usize) -> Result<Self> {
        if index < GUESSES.len() {
            Ok(Word { index })
        } else {
            Err(PuzzleError::InvalidIndex(index).into())
        }
    }

    /// Creates a new [`Word`] from a five letter string.
    ///
    /// Returns an error if the string provided is not in the guess list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::ops::Deref;
    /// # use wordlebot::strategy::Word;
    /// #
    /// let earth = Word::from_str("earth")?;
    /// assert_eq!(earth.deref(), "earth");
    ///
    /// assert!(Word::from_str("tlamp").is_err());
    /// #
    /// # Ok::<_, wordlebot::SolveError>(())
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(word: &str) -> Result<Self> {
        GUESSES
            .binary_search(&word)
            .map(|index| Word { index })
            .map_err(|_| PuzzleError::NotInWordlist(word.to_string()).into())
    }
}

impl Deref for Word {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        crate::words::GUESSES[self.index]
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.deref())
    }
}

/// A grade that indicates the correctness of a single letter in a guess.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Grade {
    /// The letter guessed is in the correct position.
    Correct,

    /// The letter guessed is in the word, but not there.
    Almost,

    /// The word does not contain the letter guessed.
    Incorrect,
}

/// The full feedback pattern for one guess against one answer.
///
/// Grading handles duplicate letters the way Wordle does: correct positions
/// are graded first and consume copies of the answer's letters, and the
/// remaining copies are handed out as [`Grade::Almost`] left to right.
/// A guess never receives more `Correct` and `Almost` grades for a letter
/// than that letter's multiplicity in the answer.
///
/// `Feedback` is a small hashable value so that strategies can use it to
/// key partitions of a candidate set. It displays as five characters,
/// `G` for correct, `Y` for almost, and `_` for incorrect.
///
/// # Examples
///
/// ```rust
/// # use wordlebot::strategy::{Feedback, Word};
/// #
/// let feedback = Feedback::grade(&Word::from_str("ratio")?, &Word::from_str("earth")?);
/// assert_eq!(feedback.to_string(), "YGY__");
/// assert!(!feedback.is_solve());
/// #
/// # Ok::<_, wordlebot::SolveError>(())
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Feedback {
    grades: [Grade; 5],
}

impl Feedback {
    /// Grades `guess` as if `answer` were the puzzle word.
    pub fn grade(guess: &Word, answer: &Word) -> Self {
        const A_ASCII: usize = 0x61;
        let i = |c: char| c as usize - A_ASCII;

        let mut grades = [Grade::Incorrect; 5];

        // Copies of each answer letter not matched in place, available
        // to be handed out as `Almost`.
        let mut remaining = [0_u8; 26];
        for (g, a) in guess.chars().zip(answer.chars()) {
            if g != a {
                remaining[i(a)] += 1;
            }
        }

        for (pos, (g, a)) in guess.chars().zip(answer.chars()).enumerate() {
            if g == a {
                grades[pos] = Grade::Correct;
            } else if remaining[i(g)] > 0 {
                remaining[i(g)] -= 1;
                grades[pos] = Grade::Almost;
            }
        }

        Feedback { grades }
    }

    /// Returns the per-letter grades in guess order.
    pub fn grades(&self) -> &[Grade; 5] {
        &self.grades
    }

    /// Returns true if every letter was graded [`Grade::Correct`].
    pub fn is_solve(&self) -> bool {
        self.grades.iter().all(|&g| g == Grade::Correct)
    }
}

impl Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for grade in self.grades {
            let c = match grade {
                Grade::Correct => 'G',
                Grade::Almost => 'Y',
                Grade::Incorrect => '_',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// A specific Wordle puzzle to solve.
///
/// Implementers of [`Strategy`] receive an instance of this struct in the
/// [`solve()`](Strategy::solve()) function and query it through
/// [`check()`](Puzzle::check()), which returns the partial information
/// Wordle provides.
///
/// When an [`Attempts`] created with the [`cheat()`](Attempts::cheat())
/// function is passed to [`check()`](Puzzle::check()), the puzzle becomes
/// "poisoned." The [harness](crate::Harness) checks for this and refuses to
/// produce performance results for a strategy that has passed such an
/// instance to its puzzle.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Puzzle {
    word: Word,
    pub(crate) poisoned: bool,
}

impl Puzzle {
    /// Creates a new puzzle from a [`Word`].
    pub fn new(word: Word) -> Self {
        Puzzle {
            word,
            poisoned: false,
        }
    }

    /// Checks a guess against the puzzle word and records it.
    ///
    /// Returns the [`Feedback`] for the guess and whether the guess solved
    /// the puzzle. The guess is appended to `attempts`; once six guesses
    /// have been evaluated this function returns
    /// [`PuzzleError::OutOfGuesses`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wordlebot::strategy::{Attempts, Puzzle, Word};
    /// #
    /// let mut puzzle = Puzzle::new(Word::from_str("sober")?);
    /// let mut attempts = Attempts::cheat();
    ///
    /// let (feedback, correct) = puzzle.check(&Word::from_str("spool")?, &mut attempts)?;
    /// assert!(!correct);
    /// // Only one `o` in the answer, so the second one is graded incorrect.
    /// assert_eq!(feedback.to_string(), "G_Y__");
    /// assert_eq!(attempts.inner().len(), 1);
    /// #
    /// # Ok::<_, wordlebot::SolveError>(())
    /// ```
    pub fn check(&mut self, guess: &Word, attempts: &mut Attempts) -> Result<(Feedback, bool)> {
        if attempts.cheat {
            self.poisoned = true;
        }

        attempts.push(*guess)?;

        let feedback = Feedback::grade(guess, &self.word);
        let correct = feedback.is_solve();
        Ok((feedback, correct))
    }
}

/// A key provided to [`Strategy::solve()`] to produce [`Attempts`].
///
/// This exists to allow strategies to produce only one instance of
/// [`Attempts`] while running.
pub struct AttemptsKey {
    cheat: bool,
}

impl AttemptsKey {
    pub(crate) fn new() -> AttemptsKey {
        AttemptsKey { cheat: false }
    }

    /// Creates a key that mints poisoning [`Attempts`], for use in tests
    /// and documentation.
    pub fn new_cheat() -> AttemptsKey {
        AttemptsKey { cheat: true }
    }

    /// Uses the key to produce an instance of [`Attempts`].
    pub fn unlock(self) -> Attempts {
        Attempts::new(self.cheat)
    }
}

/// A record of attempts to solve one Wordle puzzle.
///
/// Strategies must return this, and the struct simply wraps a [`Vec`] to
/// ensure that strategies cannot inflate their performance. While
/// implementing [`Strategy::solve()`], unlock the provided [`AttemptsKey`]
/// and pass the result to every [`Puzzle::check()`] call.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Attempts {
    inner: Vec<Word>,
    pub(crate) cheat: bool,
}

impl Attempts {
    pub(crate) fn new(cheat: bool) -> Self {
        Attempts {
            cheat,
            ..Self::default()
        }
    }

    /// Creates a new [`Attempts`] for use other than in a strategy.
    ///
    /// Passing an instance created this way to [`Puzzle::check()`] will
    /// poison the puzzle, so do not do that inside [`Strategy::solve()`]!
    pub fn cheat() -> Self {
        Attempts {
            cheat: true,
            ..Self::default()
        }
    }

    /// Adds an attempt, erroring if six guesses were already made.
    pub(crate) fn push(&mut self, word: Word) -> Result<usize> {
        if self.inner.len() < 6 {
            self.inner.push(word);
            Ok(self.inner.len() - 1)
        } else {
            Err(PuzzleError::OutOfGuesses.into())
        }
    }

    /// Returns a slice of the words guessed so far, in order.
    pub fn inner(&self) -> &[Word] {
        self.inner.as_slice()
    }

    /// Returns true once six guesses have been evaluated.
    pub fn finished(&self) -> bool {
        self.inner.len() >= 6
    }

    /// Returns true if the last word in this attempt list matches `word`.
    pub(crate) fn solved(&self, word: &Word) -> bool {
        matches!(self.inner().last(), Some(s) if s == word)
    }
}

impl Display for Attempts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some((last, rest)) = self.inner.split_last() {
            for word in rest {
                writeln!(f, "{}", word)?;
            }
            write!(f, "{}", last)?;
        }
        Ok(())
    }
}

/// Trait defining a Wordle strategy.
///
/// To write a strategy, define a new struct and implement this trait on it.
/// The harness uses [`Display`] to format the name of the strategy, so do
/// not use linebreaks there. In [`solve()`](Strategy::solve()), unlock the
/// key at the very beginning and hand the resulting [`Attempts`] to every
/// [`Puzzle::check()`] call:
///
/// ```rust
/// # use std::fmt::Display;
/// use wordlebot::{
///     strategy::{Attempts, AttemptsKey, Puzzle, Strategy, Word},
///     words::GUESSES,
/// };
///
/// #[derive(Debug)]
/// struct Alphabetical;
/// #
/// # impl Display for Alphabetical {
/// #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
/// #         write!(f, "Alphabetical")
/// #     }
/// # }
///
/// impl Strategy for Alphabetical {
///     fn solve(&self, puzzle: &mut Puzzle, key: AttemptsKey) -> Attempts {
///         let mut attempts = key.unlock();
///         for i in 0..6 {
///             let word = Word::from_index(i).unwrap();
///             let (_, correct) = puzzle.check(&word, &mut attempts).unwrap();
///             if correct {
///                 break;
///             }
///         }
///         attempts
///     }
///
///     fn version(&self) -> &'static str {
///         "0.1.0"
///     }
/// }
/// ```
pub trait Strategy: Display + Debug + Sync {
    /// Tries to solve the given [`Puzzle`] and returns the attempts made.
    ///
    /// Use the `key` parameter to produce the [`Attempts`] to return via
    /// [`AttemptsKey::unlock()`].
    fn solve(&self, puzzle: &mut Puzzle, key: AttemptsKey) -> Attempts;

    /// Provides a version for this strategy.
    ///
    /// Ensure that this changes each time the logic of the strategy is
    /// updated in order to produce meaningful comparisons.
    fn version(&self) -> &'static str;
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::SolveError;

    fn str_to_grades(input: &str) -> [Grade; 5] {
        let mut res = [Grade::Incorrect; 5];
        for (i, c) in input.chars().enumerate() {
            match c {
                'c' => res[i] = Grade::Correct,
                'a' => res[i] = Grade::Almost,
                _ => {}
            }
        }
        res
    }

    macro_rules! puzzle_test {
        (I $answer:expr; $puzzle:ident, $attempts:ident, $count:ident; $guess:expr, $res:expr) => {{
            let (feedback, correct) = $puzzle.check(&Word::from_str($guess)?, &mut $attempts)?;
            $count += 1;
            assert_eq!($attempts.inner().len(), $count);
            assert_eq!(correct, $answer == $guess);
            assert_eq!(*feedback.grades(), str_to_grades($res));
        }};

        ($fn_name:ident[$answer:expr => $( [$guess:expr, $res:expr] );*]) => {
            #[test]
            fn $fn_name() -> Result<(), SolveError> {
                let mut attempts = Attempts::cheat();
                let mut puzzle = Puzzle::new(Word::from_str($answer)?);
                let mut count = 0;

                $(puzzle_test!(I $answer; puzzle, attempts, count; $guess, $res);)*

                Ok(())
            }
        };
    }

    puzzle_test! { repeat_letter_guesses ["sober" =>
        ["spool", "ciaii"];
        ["sober", "ccccc"]]
    }

    puzzle_test! { repeat_letter_answer ["spoon" =>
        ["odors", "aicia"]]
    }

    puzzle_test! { surplus_copies_go_gray ["crane" =>
        ["eerie", "iiaic"];
        ["crane", "ccccc"]]
    }

    puzzle_test! { correct_consumes_before_almost ["fever" =>
        ["eerie", "acaii"]]
    }

    #[test]
    fn six_guesses_is_the_limit() -> Result<(), SolveError> {
        let mut attempts = Attempts::cheat();
        let mut puzzle = Puzzle::new(Word::from_str("earth")?);

        for _ in 0..6 {
            puzzle.check(&Word::from_str("about")?, &mut attempts)?;
        }
        assert!(attempts.finished());
        assert!(matches!(
            puzzle.check(&Word::from_str("about")?, &mut attempts),
            Err(SolveError::Puzzle {
                kind: PuzzleError::OutOfGuesses
            })
        ));

        Ok(())
    }

    #[test]
    fn cheating_attempts_poison_the_puzzle() -> Result<(), SolveError> {
        let mut puzzle = Puzzle::new(Word::from_str("earth")?);

        let mut legit = AttemptsKey::new().unlock();
        puzzle.check(&Word::from_str("about")?, &mut legit)?;
        assert!(!puzzle.poisoned);

        let mut cheater = Attempts::cheat();
        puzzle.check(&Word::from_str("about")?, &mut cheater)?;
        assert!(puzzle.poisoned);

        Ok(())
    }

    proptest! {
        #[test]
        fn grading_is_consistent(
            guess in 0..crate::words::GUESSES.len(),
            answer in 0..crate::words::GUESSES.len(),
        ) {
            let guess = Word::from_index(guess).unwrap();
            let answer = Word::from_index(answer).unwrap();
            let feedback = Feedback::grade(&guess, &answer);

            // A guess solves the puzzle exactly when it is the answer.
            prop_assert_eq!(feedback.is_solve(), guess == answer);

            // No letter is credited more often than it occurs in the answer.
            for c in guess.chars() {
                let credited = guess
                    .chars()
                    .zip(feedback.grades().iter())
                    .filter(|&(g, &grade)| g == c && grade != Grade::Incorrect)
                    .count();
                let available = answer.chars().filter(|&a| a == c).count();
                prop_assert!(credited <= available);
            }

            // Every correct grade really is a positional match.
            for ((g, a), &grade) in guess
                .chars()
                .zip(answer.chars())
                .zip(feedback.grades().iter())
            {
                prop_assert_eq!(grade == Grade::Correct, g == a);
            }
        }

        #[test]
        fn grading_itself_solves(index in 0..crate::words::GUESSES.len()) {
            let word = Word::from_index(index).unwrap();
            prop_assert!(Feedback::grade(&word, &word).is_solve());
        }
    }
}
