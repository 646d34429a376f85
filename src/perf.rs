//! Evaluating and comparing strategies.

use std::{fmt::Display, io::Write, ops::Deref};

use comfy_table::{presets, Cell, Color, Table};
use fishers_exact::FishersExactPvalues;
use owo_colors::{AnsiColors, OwoColorize, Stream};
use serde::Serialize;

use crate::{
    stats::{Tails, WelchsT},
    strategy::{Attempts, Strategy, Word},
    Result, SolveError,
};

/// A record of one strategy's guesses after a run of the
/// [harness](crate::Harness).
///
/// This struct can provide statistics about the attempts on its own, but it
/// is recommended to produce a [`Summary`] first to cache the computations.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Perf {
    pub(crate) tries: Vec<(Word, Attempts)>,
    strategy_name: String,
}

impl Perf {
    /// Creates a new empty performance record.
    pub(crate) fn new(strat: &dyn Strategy) -> Self {
        Perf {
            tries: Vec::new(),
            strategy_name: format!("{} v{}", strat, strat.version()),
        }
    }

    /// Gets the name of the strategy that produced this performance record.
    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    /// Gets the number of puzzles attempted by the strategy.
    pub fn num_tried(&self) -> u32 {
        self.tries.len() as u32
    }

    /// Gets the number of puzzles solved by the strategy.
    pub fn num_solved(&self) -> u32 {
        self.tries
            .iter()
            .filter(|(word, attempts)| attempts.solved(word))
            .count() as u32
    }

    /// Gets the fraction of puzzles solved by the strategy.
    pub fn frac_solved(&self) -> f32 {
        (self.num_solved() as f32) / (self.num_tried() as f32)
    }

    /// Gets the number of guesses across all puzzle attempts.
    pub fn cumulative_guesses(&self) -> u32 {
        self.tries.iter().map(|(_, a)| a.inner().len() as u32).sum()
    }

    /// Gets the number of guesses across all solved puzzles.
    pub fn cumulative_guesses_solved(&self) -> u32 {
        self.tries
            .iter()
            .filter(|(word, attempts)| attempts.solved(word))
            .map(|(_, a)| a.inner().len() as u32)
            .sum()
    }

    /// Gets the average number of guesses needed to solve a puzzle.
    ///
    /// This function does not include guesses made on puzzles that the
    /// strategy was unable to solve.
    pub fn guesses_per_solution(&self) -> f32 {
        (self.cumulative_guesses_solved() as f32) / (self.num_solved() as f32)
    }

    /// Gets the number of puzzles the strategy could not solve.
    pub fn num_missed(&self) -> u32 {
        self.num_tried() - self.num_solved()
    }

    /// Gets the fraction of puzzles the strategy could not solve.
    pub fn frac_missed(&self) -> f32 {
        (self.num_missed() as f32) / (self.num_tried() as f32)
    }

    /// Lists the `n` hardest puzzles for this strategy.
    ///
    /// Misses come first, then solves ordered by attempts used, most
    /// expensive first. Each entry is the target word, the attempts made,
    /// and whether the puzzle was solved.
    pub fn hardest(&self, n: usize) -> Vec<(Word, u32, bool)> {
        let mut rows: Vec<_> = self
            .tries
            .iter()
            .map(|(word, attempts)| (*word, attempts.inner().len() as u32, attempts.solved(word)))
            .collect();
        rows.sort_by(|a, b| a.2.cmp(&b.2).then(b.1.cmp(&a.1)).then(a.0.cmp(&b.0)));
        rows.truncate(n);
        rows
    }

    /// Prints a table of the `n` hardest puzzles for this strategy.
    pub fn print_hardest(&self, n: usize) {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_header(vec!["word", "attempts", "solved"]);

        for (word, attempts, solved) in self.hardest(n) {
            let mut word_cell = Cell::new(word);
            if !solved {
                word_cell = word_cell.bg(Color::Red).fg(Color::Black);
            }
            table.add_row(vec![
                word_cell,
                Cell::new(attempts),
                Cell::new(if solved { "yes" } else { "no" }),
            ]);
        }

        println!("{}", table);
    }

    /// Converts this performance record to a pre-calculated summary.
    pub fn to_summary(&self) -> Summary {
        let mut bins = [0; 6];

        self.tries
            .iter()
            .filter(|(word, attempts)| attempts.solved(word))
            .map(|(_, attempts)| attempts.inner().len())
            .for_each(|n| bins[n - 1] += 1);

        assert_eq!(bins.iter().sum::<u32>(), self.num_solved());

        Summary {
            strategy_name: &self.strategy_name,
            num_tried: self.num_tried(),
            num_solved: self.num_solved(),
            cumulative_guesses: self.cumulative_guesses(),
            histogram: bins.into(),
        }
    }
}

impl Display for Perf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let perf_summary = self.to_summary();
        write!(f, "{}", perf_summary)
    }
}

/// A summary of a strategy's performance generated by the
/// [harness](crate::Harness).
///
/// It is recommended to convert the [`Perf`] struct to this via the
/// [`Perf::to_summary()`] method when you want to use the performance to
/// run statistics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Summary<'a> {
    strategy_name: &'a str,
    num_tried: u32,
    num_solved: u32,
    cumulative_guesses: u32,
    histogram: Histogram,
}

impl<'a> Summary<'a> {
    /// Gets the name of the strategy that produced this performance record.
    pub fn strategy_name(&self) -> &'a str {
        self.strategy_name
    }

    /// Gets the number of puzzles attempted by the strategy.
    pub fn num_tried(&self) -> u32 {
        self.num_tried
    }

    /// Gets the number of puzzles solved by the strategy.
    pub fn num_solved(&self) -> u32 {
        self.num_solved
    }

    /// Gets the fraction of puzzles solved by the strategy.
    pub fn frac_solved(&self) -> f32 {
        (self.num_solved as f32) / (self.num_tried as f32)
    }

    /// Gets the number of guesses across all puzzle attempts.
    pub fn cumulative_guesses(&self) -> u32 {
        self.cumulative_guesses
    }

    /// Gets the number of guesses across all solved puzzles.
    pub fn cumulative_guesses_solved(&self) -> u32 {
        self.histogram
            .iter()
            .enumerate()
            .map(|(i, v)| (i as u32 + 1) * v)
            .sum::<u32>()
    }

    /// Gets the attempt histogram for solved puzzles.
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Gets the average number of guesses needed to solve a puzzle.
    ///
    /// This function does not include guesses made on puzzles that the
    /// strategy was unable to solve, and returns `None` when nothing was
    /// solved.
    pub fn mean_guesses(&self) -> Option<f32> {
        if self.num_solved == 0 {
            return None;
        }
        Some((self.cumulative_guesses_solved() as f32) / (self.num_solved as f32))
    }

    /// Gets the median number of guesses needed to solve a puzzle.
    ///
    /// Like [`mean_guesses()`](Self::mean_guesses()), misses are excluded,
    /// and `None` is returned when nothing was solved.
    pub fn median_guesses(&self) -> Option<f32> {
        if self.num_solved == 0 {
            return None;
        }

        // Indices of the middle solve (or middle two, for an even count)
        // in the attempt-sorted list of solves.
        let lo = (self.num_solved - 1) / 2;
        let hi = self.num_solved / 2;

        let mut cumulative = 0;
        let mut lo_val = None;
        let mut hi_val = None;
        for (i, &count) in self.histogram.iter().enumerate() {
            let next = cumulative + count;
            if lo_val.is_none() && lo < next {
                lo_val = Some((i + 1) as f32);
            }
            if hi_val.is_none() && hi < next {
                hi_val = Some((i + 1) as f32);
            }
            cumulative = next;
        }

        Some((lo_val? + hi_val?) / 2.0)
    }

    /// Gets the number of puzzles the strategy could not solve.
    pub fn num_missed(&self) -> u32 {
        self.num_tried - self.num_solved
    }

    /// Gets the fraction of puzzles the strategy could not solve.
    pub fn frac_missed(&self) -> f32 {
        (self.num_missed() as f32) / (self.num_tried as f32)
    }

    /// Compares this summary with a baseline.
    ///
    /// Returns [`SolveError::SelfComparison`] when the two summaries are
    /// identical, since comparing a strategy with itself is meaningless.
    pub fn compare<'b>(&self, baseline: &Summary<'b>) -> Result<Comparison<'a, 'b>> {
        if self == baseline {
            return Err(SolveError::SelfComparison);
        }

        Comparison::compare(self.clone(), baseline.clone(), 0.05)
    }

    /// Prints this summary to stdout according to `options`.
    pub fn print(&self, options: SummaryPrintOptions) -> Result<()> {
        let mut stdout = std::io::stdout();

        writeln!(stdout, "{:-^80}", self.strategy_name)?;

        match options.compare {
            Some(baseline) => {
                let comparison = self.compare(&baseline)?;

                writeln!(
                    stdout,
                    "Ran {} words and comp. with {}, {} words",
                    self.num_tried(),
                    baseline.strategy_name(),
                    baseline.num_tried()
                )?;

                let solved_diff = format!("{:+.1}%", comparison.frac_solved_diff() * 100.);
                if comparison.solved_significant() {
                    let positive = comparison.frac_solved_diff().is_sign_positive();
                    writeln!(
                        stdout,
                        "Guessed {} correctly, or {:.1}% ({}), and {} incorrectly, {}",
                        self.num_solved(),
                        self.frac_solved() * 100.,
                        solved_diff.if_supports_color(Stream::Stdout, |text| {
                            if positive {
                                text.color(AnsiColors::Green)
                            } else {
                                text.color(AnsiColors::Red)
                            }
                        }),
                        self.num_missed(),
                        "a sig. diff.".if_supports_color(Stream::Stdout, |text| text.bold())
                    )?;
                } else {
                    writeln!(
                        stdout,
                        "Guessed {} correctly, or {:.1}% ({}), and {} incorrectly, not a sig. diff.",
                        self.num_solved(),
                        self.frac_solved() * 100.,
                        solved_diff,
                        self.num_missed()
                    )?;
                }

                match (self.mean_guesses(), comparison.mean_guesses_diff()) {
                    (Some(mean), Some(diff)) => {
                        let diff_str = format!("{:+.2}", diff);
                        if comparison.guesses_significant() {
                            let negative = diff.is_sign_negative();
                            writeln!(
                                stdout,
                                "Correct guesses took {:.2} ({}) attempts on average, {}",
                                mean,
                                diff_str.if_supports_color(Stream::Stdout, |text| {
                                    if negative {
                                        text.color(AnsiColors::Green)
                                    } else {
                                        text.color(AnsiColors::Red)
                                    }
                                }),
                                "a sig. diff."
                                    .if_supports_color(Stream::Stdout, |text| text.bold())
                            )?;
                        } else {
                            writeln!(
                                stdout,
                                "Correct guesses took {:.2} ({}) attempts on average, not a sig. diff.",
                                mean, diff_str,
                            )?;
                        }
                    }
                    (Some(mean), None) => {
                        writeln!(stdout, "Correct guesses took {:.2} attempts on average", mean)?;
                    }
                    (None, _) => {
                        writeln!(stdout, "No puzzles solved")?;
                    }
                }
            }
            None => {
                write!(stdout, "{}", self.body())?;
            }
        }

        if options.histogram {
            write!(stdout, "{}", self.histogram)?;
        }

        Ok(())
    }

    /// Gets a builder of options for [`print()`](Self::print()).
    pub fn print_options() -> SummaryPrintOptions<'a> {
        SummaryPrintOptions::default()
    }

    fn body(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Ran {} words\n", self.num_tried()));
        out.push_str(&format!(
            "Guessed {} correctly, or {:.1}%, and {} incorrectly\n",
            self.num_solved(),
            self.frac_solved() * 100.,
            self.num_missed()
        ));
        match (self.mean_guesses(), self.median_guesses()) {
            (Some(mean), Some(median)) => out.push_str(&format!(
                "Correct guesses took {:.2} attempts on average (median {})\n",
                mean, median
            )),
            _ => out.push_str("No puzzles solved\n"),
        }

        out
    }
}

/// Options controlling [`Summary::print()`].
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SummaryPrintOptions<'a> {
    compare: Option<Summary<'a>>,
    histogram: bool,
}

impl<'a> SummaryPrintOptions<'a> {
    /// Creates the default options: no comparison, no histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares the printed summary against `baseline`.
    pub fn compare(self, baseline: &Summary<'a>) -> Self {
        Self {
            compare: Some(baseline.clone()),
            ..self
        }
    }

    /// Sets whether to print the attempt histogram.
    pub fn histogram(self, histogram: bool) -> Self {
        Self { histogram, ..self }
    }
}

impl<'a> Display for Summary<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:-^80}", self.strategy_name)?;
        write!(f, "{}", self.body())
    }
}

/// The result of comparing one strategy's summary against a baseline.
///
/// The solved/missed proportions are compared with Fisher's exact test,
/// and the number of attempts per solve with Welch's t-test. The latter is
/// unavailable when either side's attempts are degenerate (fewer than two
/// solves, or no variance at all).
#[derive(Debug, Clone)]
pub struct Comparison<'a, 'b> {
    this: Summary<'a>,
    baseline: Summary<'b>,
    solved: FishersExactPvalues,
    guesses: Option<WelchsT>,
}

impl<'a, 'b> Comparison<'a, 'b> {
    pub(crate) fn compare(
        this: Summary<'a>,
        baseline: Summary<'b>,
        alpha: f64,
    ) -> Result<Self> {
        let solved = fishers_exact::fishers_exact(&[
            this.num_solved(),
            baseline.num_solved(),
            this.num_missed(),
            baseline.num_missed(),
        ])
        .map_err(|_| SolveError::Stats)?;

        let guesses = WelchsT::two_sample(
            &this.histogram.samples(),
            &baseline.histogram.samples(),
            alpha,
            Tails::Two,
        )
        .ok();

        Ok(Self {
            this,
            baseline,
            solved,
            guesses,
        })
    }

    /// Returns true if the solved proportions differ significantly.
    pub fn solved_significant(&self) -> bool {
        self.solved.two_tail_pvalue < 0.05
    }

    /// Returns true if the attempts per solve differ significantly.
    ///
    /// A comparison where the t-test could not run reports false.
    pub fn guesses_significant(&self) -> bool {
        self.guesses
            .as_ref()
            .map(WelchsT::is_significant)
            .unwrap_or(false)
    }

    /// Gets the difference in solved fractions, this minus baseline.
    pub fn frac_solved_diff(&self) -> f32 {
        self.this.frac_solved() - self.baseline.frac_solved()
    }

    /// Gets the difference in missed fractions, this minus baseline.
    pub fn frac_missed_diff(&self) -> f32 {
        self.this.frac_missed() - self.baseline.frac_missed()
    }

    /// Gets the difference in mean guesses per solve, this minus baseline.
    ///
    /// Returns `None` when either side solved nothing.
    pub fn mean_guesses_diff(&self) -> Option<f32> {
        Some(self.this.mean_guesses()? - self.baseline.mean_guesses()?)
    }
}

/// The distribution of attempts across solved puzzles.
///
/// Bin `i` (zero-indexed) counts the puzzles solved in `i + 1` guesses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Histogram {
    bins: [u32; 6],
}

impl Histogram {
    /// Expands the bins into one sample value per solve for running
    /// statistics.
    pub(crate) fn samples(&self) -> Vec<f64> {
        self.bins
            .iter()
            .enumerate()
            .flat_map(|(i, &count)| std::iter::repeat((i + 1) as f64).take(count as usize))
            .collect()
    }
}

impl From<[u32; 6]> for Histogram {
    fn from(other: [u32; 6]) -> Self {
        Self { bins: other }
    }
}

impl Deref for Histogram {
    type Target = [u32; 6];

    fn deref(&self) -> &Self::Target {
        &self.bins
    }
}

impl Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let max = self.iter().copied().max().unwrap_or(0);
        let digits = std::iter::successors(Some(max), |&n| (n >= 10).then(|| n / 10)).count();
        let count_per_mark = (max as f32 / (80. - digits as f32 - 6.)).max(1.0);

        for (i, &bin) in self.bins.iter().enumerate() {
            let marks = (bin as f32 / count_per_mark).floor() as usize;
            writeln!(f, "{} |{:#>marks$} ({})", i + 1, "", bin)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        mock::Mock,
        strategy::{AttemptsKey, Puzzle},
    };

    fn perf_for(mock: Mock, targets: &[&str]) -> Perf {
        let mut perf = Perf::new(&mock);
        for target in targets {
            let word = Word::from_str(target).unwrap();
            let mut puzzle = Puzzle::new(word);
            let attempts = mock.solve(&mut puzzle, AttemptsKey::new());
            perf.tries.push((word, attempts));
        }
        perf
    }

    // The default mock guesses "about", "tiger", "doubt", "point",
    // "parka", "sword" in order, so a target from that list is solved
    // with a known number of attempts.
    fn scripted_perf() -> Perf {
        perf_for(
            Mock::new(None),
            &["about", "doubt", "parka", "parka", "earth"],
        )
    }

    #[test]
    fn counts_are_consistent() {
        let perf = scripted_perf();

        assert_eq!(perf.num_tried(), 5);
        assert_eq!(perf.num_solved(), 4);
        assert_eq!(perf.num_missed(), 1);
        assert_eq!(perf.num_solved() + perf.num_missed(), perf.num_tried());
        assert!((perf.frac_solved() - 0.8).abs() < f32::EPSILON);
        assert!((perf.frac_solved() + perf.frac_missed() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn summary_matches_perf() {
        let perf = scripted_perf();
        let summary = perf.to_summary();

        assert_eq!(summary.num_tried(), perf.num_tried());
        assert_eq!(summary.num_solved(), perf.num_solved());
        assert_eq!(summary.cumulative_guesses(), perf.cumulative_guesses());

        // Attempts: about = 1, doubt = 3, parka = 5, parka = 5, earth = miss.
        assert_eq!(**summary.histogram(), [1, 0, 1, 0, 2, 0]);
    }

    #[test]
    fn histogram_sums_to_solves() {
        let perf = scripted_perf();
        let summary = perf.to_summary();
        assert_eq!(
            summary.histogram().iter().sum::<u32>(),
            summary.num_solved()
        );
    }

    #[test]
    fn mean_is_weighted_histogram_mean() {
        let perf = scripted_perf();
        let summary = perf.to_summary();

        let weighted: u32 = summary
            .histogram()
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u32 + 1) * count)
            .sum();
        let expected = weighted as f32 / summary.num_solved() as f32;

        assert_eq!(summary.mean_guesses(), Some(expected));
        // 1 + 3 + 5 + 5 over four solves.
        assert!((expected - 3.5).abs() < f32::EPSILON);
    }

    #[test]
    fn median_splits_the_solves() {
        let perf = scripted_perf();
        let summary = perf.to_summary();
        // Sorted attempts per solve: 1, 3, 5, 5.
        assert_eq!(summary.median_guesses(), Some(4.0));

        let none: Summary = Summary {
            strategy_name: "empty",
            num_tried: 3,
            num_solved: 0,
            cumulative_guesses: 18,
            histogram: [0; 6].into(),
        };
        assert_eq!(none.median_guesses(), None);
        assert_eq!(none.mean_guesses(), None);
    }

    #[test]
    fn hardest_lists_misses_first() {
        let perf = scripted_perf();
        let hardest = perf.hardest(3);

        assert_eq!(hardest.len(), 3);
        // The miss comes first no matter how many attempts solves took.
        assert_eq!(&*hardest[0].0, "earth");
        assert!(!hardest[0].2);
        // Then the most expensive solves.
        assert_eq!(hardest[1].1, 5);
        assert!(hardest[1].2);
    }

    #[test]
    fn self_comparison_is_rejected() {
        let perf = scripted_perf();
        let summary = perf.to_summary();
        assert!(matches!(
            summary.compare(&summary),
            Err(SolveError::SelfComparison)
        ));
    }

    #[test]
    fn comparison_diffs() {
        let quick = perf_for(Mock::new(None), &["about", "about", "tiger", "doubt"]);
        let slow = perf_for(Mock::new(None), &["parka", "sword", "point", "earth"]);

        let quick_summary = quick.to_summary();
        let slow_summary = slow.to_summary();
        let comparison = quick_summary.compare(&slow_summary).unwrap();

        // quick: 4/4 solved in 1, 1, 2, 3; slow: 3/4 solved in 5, 6, 4.
        assert!((comparison.frac_solved_diff() - 0.25).abs() < f32::EPSILON);
        let diff = comparison.mean_guesses_diff().unwrap();
        assert!((diff - (7.0 / 4.0 - 5.0)).abs() < 0.0001);
    }
}
