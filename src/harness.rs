//! The evaluation harness for running Wordle strategies.

use std::{
    fs::File,
    io::BufWriter,
    ops::Deref,
    path::Path,
    sync::{Arc, Mutex},
};

use indicatif::ParallelProgressIterator;
use rand::seq::index::sample;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    perf::Perf,
    strategy::{AttemptsKey, Puzzle, Strategy, Word},
    words::ANSWERS,
    HarnessError, Result, SolveError, Summary,
};

/// An evaluation harness that can run many strategies on many puzzles.
///
/// When you want to test your strategies, create a new harness with
/// [`new()`](Harness::new()). You can then configure it using various
/// methods. Note that these configuration methods consume the existing
/// [`Harness`] and return a new one.
///
/// # Examples
///
/// ```rust
/// # use wordlebot::harness::Harness;
/// use wordlebot::strategy::naive::Naive;
///
/// let harness = Harness::new()
///     .quiet()
///     .add_strategy(Box::new(Naive))
///     .test_num(20);
///
/// let record = harness.run()?;
/// #
/// # Ok::<_, wordlebot::SolveError>(())
/// ```
#[derive(Debug)]
pub struct Harness {
    strategies: Vec<Box<dyn Strategy>>,
    verbose: bool,
    num_answers: Option<usize>,
    baseline: Option<usize>,
}

impl Default for Harness {
    fn default() -> Self {
        Harness {
            strategies: Vec::new(),
            verbose: false,
            num_answers: Some(100),
            baseline: None,
        }
    }
}

impl Harness {
    /// Creates a new harness with default configuration.
    ///
    /// Defaults:
    /// 1. tests no strategies
    /// 2. quiet mode
    /// 3. runs each strategy on 100 puzzles chosen at random
    /// 4. does not compare against a baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the harness show a progress bar while testing.
    pub fn verbose(self) -> Self {
        Harness {
            verbose: true,
            ..self
        }
    }

    /// Makes the harness silent while testing.
    pub fn quiet(self) -> Self {
        Harness {
            verbose: false,
            ..self
        }
    }

    /// Adds a strategy to the harness for testing.
    pub fn add_strategy(self, strat: Box<dyn Strategy>) -> Self {
        let mut strategies = self.strategies;
        strategies.push(strat);
        Harness { strategies, ..self }
    }

    /// Adds a [`Vec`] of strategies to the harness for testing.
    pub fn add_strategies(self, strats: Vec<Box<dyn Strategy>>) -> Self {
        let mut strategies = self.strategies;
        strategies.extend(strats);
        Harness { strategies, ..self }
    }

    /// Adds a strategy to the harness for testing and sets it as the
    /// baseline for comparison.
    pub fn add_baseline(self, strat: Box<dyn Strategy>) -> Self {
        self.add_strategy(strat).and_baseline()
    }

    /// Sets the most recently added strategy as the baseline for
    /// comparisons.
    pub fn and_baseline(self) -> Self {
        Self {
            baseline: Some(self.strategies.len() - 1),
            ..self
        }
    }

    /// Sets the harness to test each strategy on every possible answer.
    pub fn test_all(self) -> Self {
        Harness {
            num_answers: None,
            ..self
        }
    }

    /// Sets the harness to test each strategy on `n` random answers.
    pub fn test_num(self, n: usize) -> Self {
        Harness {
            num_answers: Some(n.clamp(1, ANSWERS.len())),
            ..self
        }
    }

    /// Runs the harness and produces performances for each strategy.
    ///
    /// The [`Perf`]s will be in the same order as the strategies were added
    /// to the harness.
    pub fn run(&self) -> Result<Record> {
        if self.strategies.is_empty() {
            return Err(HarnessError::NoStrategiesAdded.into());
        }

        let perfs = Arc::new(Mutex::new(Vec::new()));
        {
            let mut perfs = perfs.lock().unwrap();
            for strat in &self.strategies {
                perfs.push(Perf::new(strat.as_ref()))
            }
        }

        let mut rng = rand::thread_rng();

        if let Some(n) = self.num_answers {
            // try only some random answers

            if self.verbose {
                sample(&mut rng, ANSWERS.len(), n)
                    .iter()
                    .par_bridge()
                    .progress_count(n as u64)
                    .map(|i| self.run_inner(ANSWERS[i], perfs.clone()))
                    .collect::<Result<(), SolveError>>()?;
            } else {
                sample(&mut rng, ANSWERS.len(), n)
                    .iter()
                    .par_bridge()
                    .map(|i| self.run_inner(ANSWERS[i], perfs.clone()))
                    .collect::<Result<(), SolveError>>()?;
            }
        } else {
            // try all answers

            if self.verbose {
                (0..ANSWERS.len())
                    .into_par_iter()
                    .progress()
                    .map(|i| self.run_inner(ANSWERS[i], perfs.clone()))
                    .collect::<Result<(), SolveError>>()?;
            } else {
                (0..ANSWERS.len())
                    .into_par_iter()
                    .map(|i| self.run_inner(ANSWERS[i], perfs.clone()))
                    .collect::<Result<(), SolveError>>()?;
            }
        }

        Ok(Record::new(
            Arc::try_unwrap(perfs).unwrap().into_inner().unwrap(),
            self.baseline,
        ))
    }

    /// Runs the harness on the given answers, sequentially.
    ///
    /// Useful for reproducing a particular set of puzzles; `run()` is the
    /// parallel equivalent over the configured answer selection.
    pub fn run_words(&self, words: &[Word]) -> Result<Record> {
        if self.strategies.is_empty() {
            return Err(HarnessError::NoStrategiesAdded.into());
        }

        let mut perfs: Vec<Perf> = self
            .strategies
            .iter()
            .map(|s| Perf::new(s.as_ref()))
            .collect();

        for word in words {
            for (i, strategy) in self.strategies.iter().enumerate() {
                let mut puzzle = Puzzle::new(*word);
                let solution = strategy.solve(&mut puzzle, AttemptsKey::new());
                perfs[i].tries.push((*word, solution));

                if puzzle.poisoned {
                    return Err(HarnessError::StrategyCheated(format!("{}", strategy)).into());
                }
            }
        }

        Ok(Record::new(perfs, self.baseline))
    }

    fn run_inner(&self, index: usize, perfs: Arc<Mutex<Vec<Perf>>>) -> Result<()> {
        let word = Word::from_index(index)?;

        for (i, strategy) in self.strategies.iter().enumerate() {
            let mut puzzle = Puzzle::new(word);
            let solution = strategy.solve(&mut puzzle, AttemptsKey::new());
            {
                let mut perfs = perfs.lock().unwrap();
                perfs[i].tries.push((word, solution));
            }
            if puzzle.poisoned {
                return Err(HarnessError::StrategyCheated(format!("{}", strategy)).into());
            }
        }

        Ok(())
    }

    /// Runs the harness (see [`run()`](Harness::run())) and prints
    /// performance summaries of each strategy.
    pub fn run_and_summarize(&self) -> Result<Record> {
        let record = self.run()?;
        for perf in record.iter() {
            println!("{}", perf);
        }
        Ok(record)
    }
}

/// The performances produced by one run of the [`Harness`].
#[derive(Debug, Clone, Default)]
pub struct Record {
    perfs: Vec<Perf>,
    baseline: Option<usize>,
}

impl Deref for Record {
    type Target = [Perf];

    fn deref(&self) -> &Self::Target {
        &self.perfs
    }
}

impl Record {
    fn new(perfs: Vec<Perf>, baseline: impl Into<Option<usize>>) -> Self {
        Self {
            perfs,
            baseline: baseline.into(),
        }
    }

    /// Prints each strategy's summary, histogram, and hardest words.
    ///
    /// When the harness had a baseline, every other strategy is compared
    /// against it with significance tests.
    pub fn print_report(&self) -> Result<()> {
        let baseline_summary = self.baseline.map(|n| self.perfs[n].to_summary());

        for perf in self.perfs.iter() {
            let summary = perf.to_summary();

            let mut options = Summary::print_options().histogram(true);
            if let Some(baseline) = &baseline_summary {
                options = options.compare(baseline);
            }

            match summary.print(options) {
                Ok(()) => {}
                Err(SolveError::SelfComparison) => {
                    summary.print(Summary::print_options().histogram(true))?
                }
                Err(e) => return Err(e),
            }

            perf.print_hardest(10);
        }

        Ok(())
    }

    /// Writes the raw results for every strategy to a JSON file.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let results: Vec<StrategyResults> = self.perfs.iter().map(StrategyResults::from).collect();

        let file = File::create(path).map_err(HarnessError::ResultsIo)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &results)
            .map_err(HarnessError::Serde)?;

        Ok(())
    }
}

/// The raw-result form of one strategy's performance, as serialized by
/// [`Record::write_json()`].
#[derive(Debug, Serialize)]
struct StrategyResults {
    strategy: String,
    tried: u32,
    solved: u32,
    missed: u32,
    success_rate: f32,
    mean_guesses: Option<f32>,
    median_guesses: Option<f32>,
    attempt_distribution: [u32; 6],
    hardest_words: Vec<HardWord>,
}

#[derive(Debug, Serialize)]
struct HardWord {
    word: String,
    attempts: u32,
    solved: bool,
}

impl From<&Perf> for StrategyResults {
    fn from(perf: &Perf) -> Self {
        let summary = perf.to_summary();

        StrategyResults {
            strategy: perf.strategy_name().to_string(),
            tried: summary.num_tried(),
            solved: summary.num_solved(),
            missed: summary.num_missed(),
            success_rate: summary.frac_solved() * 100.,
            mean_guesses: summary.mean_guesses(),
            median_guesses: summary.median_guesses(),
            attempt_distribution: **summary.histogram(),
            hardest_words: perf
                .hardest(10)
                .into_iter()
                .map(|(word, attempts, solved)| HardWord {
                    word: word.to_string(),
                    attempts,
                    solved,
                })
                .collect(),
        }
    }
}
