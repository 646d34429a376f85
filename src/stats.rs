//! Significance testing for strategy comparisons.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::{Result, SolveError};

#[allow(dead_code)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Tails {
    One,
    Two,
}

impl Tails {
    fn factor(&self) -> f64 {
        match self {
            Self::One => 1.0,
            Self::Two => 2.0,
        }
    }
}

struct Sample {
    mean: f64,
    len: f64,
    var: f64,
}

impl Sample {
    /// Mean and unbiased variance; `None` for samples of fewer than two
    /// values, which have no variance to speak of.
    fn new(values: &[f64]) -> Option<Self> {
        if values.len() < 2 {
            return None;
        }

        let len = values.len() as f64;
        let mean = values.iter().sum::<f64>() / len;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (len - 1.0);

        Some(Sample { mean, len, var })
    }
}

/// Welch's unequal-variance t-test on two samples.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub(crate) struct WelchsT {
    /// The p-value of the test, which is the probability that accepting the
    /// results of the test is an error because the null hypothesis is in
    /// fact true.
    pub(crate) p: f64,

    /// The maximum allowed p-value.
    pub(crate) alpha: f64,

    /// The "tails" of the test.
    #[allow(dead_code)]
    pub(crate) tails: Tails,
}

impl WelchsT {
    /// Runs the test on two samples.
    ///
    /// Returns [`SolveError::Stats`] when either sample is too small or the
    /// combined variance is zero, since the test statistic is undefined
    /// there.
    ///
    /// # Panics
    ///
    /// `alpha` must be in (0, 1).
    pub(crate) fn two_sample(a: &[f64], b: &[f64], alpha: f64, tails: Tails) -> Result<Self> {
        assert!(alpha > 0.0 && alpha < 1.0);

        let a = Sample::new(a).ok_or(SolveError::Stats)?;
        let b = Sample::new(b).ok_or(SolveError::Stats)?;

        let pooled = a.var / a.len + b.var / b.len;
        if pooled <= f64::EPSILON {
            return Err(SolveError::Stats);
        }

        // Uses equations from
        // https://statisticaloddsandends.wordpress.com/2020/07/03/welchs-t-test-and-the-welch-satterthwaite-equation/.
        let t = (a.mean - b.mean).abs() / pooled.sqrt();

        // Welch-Satterthwaite degrees of freedom.
        let deg = pooled.powi(2)
            / (a.var.powi(2) / (a.len.powi(2) * (a.len - 1.0))
                + b.var.powi(2) / (b.len.powi(2) * (b.len - 1.0)));

        let dist = StudentsT::new(0.0, 1.0, deg).map_err(|_| SolveError::Stats)?;
        let p = dist.cdf(-t) * tails.factor();

        Ok(Self { p, alpha, tails })
    }

    pub(crate) fn is_significant(&self) -> bool {
        self.p < self.alpha
    }
}
