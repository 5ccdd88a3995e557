//! Latency sample aggregation.
//!
//! Reduces a sequence of latency samples (milliseconds) to a [`Summary`]:
//! mean, extremes, Bessel-corrected standard deviation, standard error,
//! and a two-sided Student's t confidence interval for the mean.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use thiserror::Error;

/// Confidence level used for every interval the tool reports.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Errors raised while aggregating samples.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// No samples at all.
    #[error("no samples to aggregate")]
    Empty,

    /// Too few samples to estimate a variance.
    #[error("at least 2 samples are required, got {n}")]
    InsufficientSamples { n: usize },

    /// A sample was NaN or infinite.
    #[error("sample sequence contains a non-finite value")]
    NonFinite,

    /// The t-distribution could not be constructed.
    #[error("t-distribution error: {0}")]
    Distribution(String),
}

/// Two-sided confidence interval for a mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Confidence level (e.g. 0.95)
    pub level: f64,
    /// Lower bound in milliseconds
    pub low: f64,
    /// Upper bound in milliseconds
    pub high: f64,
}

impl ConfidenceInterval {
    /// Width of the interval.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Half of the interval width.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width() / 2.0
    }
}

/// Summary statistics over one sample sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of samples
    pub n: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Sample standard deviation (divisor n - 1)
    pub std_dev: f64,
    /// Standard error of the mean
    pub std_err: f64,
    /// Confidence interval for the mean
    pub ci: ConfidenceInterval,
}

impl Summary {
    /// Summarize samples with a 95% confidence interval.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] for fewer than two samples or non-finite input.
    ///
    /// # Example
    ///
    /// ```
    /// use dnsbench::stats::Summary;
    ///
    /// let s = Summary::from_samples(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
    /// assert_eq!(s.mean, 30.0);
    /// assert!((s.ci.low - 10.37).abs() < 0.01);
    /// ```
    pub fn from_samples(samples: &[f64]) -> Result<Self, StatsError> {
        Self::with_confidence(samples, DEFAULT_CONFIDENCE)
    }

    /// Summarize samples with an interval at the given confidence level.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] for fewer than two samples, non-finite input,
    /// or a level outside `(0, 1)`.
    pub fn with_confidence(samples: &[f64], level: f64) -> Result<Self, StatsError> {
        let n = samples.len();
        match n {
            0 => return Err(StatsError::Empty),
            1 => return Err(StatsError::InsufficientSamples { n }),
            _ => {}
        }
        if samples.iter().any(|s| !s.is_finite()) {
            return Err(StatsError::NonFinite);
        }

        let count = n as f64;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let t = t_critical(level, n - 1)?;

        // Rounding in the sum can push the mean of identical samples past them.
        if min == max {
            return Ok(Self {
                n,
                mean: min,
                min,
                max,
                std_dev: 0.0,
                std_err: 0.0,
                ci: ConfidenceInterval {
                    level,
                    low: min,
                    high: min,
                },
            });
        }

        let mean = (samples.iter().sum::<f64>() / count).clamp(min, max);
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (count - 1.0);
        let std_dev = variance.sqrt();
        let std_err = std_dev / count.sqrt();

        let margin = t * std_err;

        Ok(Self {
            n,
            mean,
            min,
            max,
            std_dev,
            std_err,
            ci: ConfidenceInterval {
                level,
                low: mean - margin,
                high: mean + margin,
            },
        })
    }
}

/// Two-sided Student's t critical value for `level` and `df` degrees of freedom.
///
/// # Errors
///
/// Returns [`StatsError::Distribution`] when `df` is zero or `level` is not
/// strictly between 0 and 1.
pub fn t_critical(level: f64, df: usize) -> Result<f64, StatsError> {
    if !(level > 0.0 && level < 1.0) {
        return Err(StatsError::Distribution(format!(
            "confidence level must be in (0, 1), got {level}"
        )));
    }
    let dist = StudentsT::new(0.0, 1.0, df as f64)
        .map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok(dist.inverse_cdf(0.5 + level / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_five_sample_scenario() {
        let s = Summary::from_samples(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
        assert_eq!(s.n, 5);
        assert!(approx(s.mean, 30.0, EPS));
        assert!(approx(s.min, 10.0, EPS));
        assert!(approx(s.max, 50.0, EPS));
        assert!(approx(s.std_dev, 15.811_388, 1e-5));
        assert!(approx(s.std_err, 7.071_068, 1e-5));
        assert!(approx(s.ci.low, 10.368, 0.01));
        assert!(approx(s.ci.high, 49.632, 0.01));
        assert!(approx(s.ci.level, 0.95, EPS));
    }

    #[test]
    fn test_two_domain_means() {
        let s = Summary::from_samples(&[12.0, 18.0]).unwrap();
        assert!(approx(s.mean, 15.0, EPS));
        assert!(approx(s.std_dev, 4.242_641, 1e-5));
        assert!(approx(s.std_err, 3.0, EPS));
        // t(0.975, 1) = 12.706
        assert!(approx(s.ci.half_width(), 12.706_2 * 3.0, 0.01));
        assert!(s.ci.low < s.min && s.ci.high > s.max);
    }

    #[test]
    fn test_t_critical_values() {
        assert!(approx(t_critical(0.95, 1).unwrap(), 12.706_2, 1e-3));
        assert!(approx(t_critical(0.95, 4).unwrap(), 2.776_4, 1e-3));
        assert!(approx(t_critical(0.95, 49).unwrap(), 2.009_6, 1e-3));
        assert!(t_critical(0.95, 0).is_err());
        assert!(t_critical(1.0, 5).is_err());
        assert!(t_critical(0.0, 5).is_err());
    }

    #[test]
    fn test_mean_within_bounds() {
        let sets: [&[f64]; 4] = [
            &[1.0, 2.0],
            &[5.5, 3.2, 9.9, 0.1],
            &[100.0, 0.001, 42.0, 42.0, 17.5],
            &[7.0, 7.0, 7.0, 7.1],
        ];
        for samples in sets {
            let s = Summary::from_samples(samples).unwrap();
            assert!(s.mean >= s.min && s.mean <= s.max, "{samples:?}");
        }
    }

    #[test]
    fn test_interval_symmetric() {
        let s = Summary::from_samples(&[3.1, 8.4, 2.2, 15.9, 4.4, 6.0]).unwrap();
        assert!(approx(s.mean - s.ci.low, s.ci.high - s.mean, 1e-9));
    }

    #[test]
    fn test_interval_narrows_with_more_samples() {
        let pattern = [10.0, 20.0, 30.0, 40.0, 50.0];
        let small = Summary::from_samples(&pattern).unwrap();
        let large_samples: Vec<f64> = pattern.iter().copied().cycle().take(50).collect();
        let large = Summary::from_samples(&large_samples).unwrap();

        assert!(large.std_err < small.std_err);
        assert!(large.ci.width() < small.ci.width());
    }

    #[test]
    fn test_zero_variance_collapses() {
        let s = Summary::from_samples(&[12.5; 10]).unwrap();
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.ci.low, 12.5);
        assert_eq!(s.ci.high, 12.5);
    }

    #[test]
    fn test_identical_inexact_samples_stay_in_range() {
        let s = Summary::from_samples(&[0.1, 0.1, 0.1]).unwrap();
        assert!(s.mean >= s.min && s.mean <= s.max);
        assert_eq!(s.mean, 0.1);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!((s.ci.low, s.ci.high), (0.1, 0.1));
    }

    #[test]
    fn test_rejects_degenerate_input() {
        assert_eq!(Summary::from_samples(&[]), Err(StatsError::Empty));
        assert_eq!(
            Summary::from_samples(&[4.0]),
            Err(StatsError::InsufficientSamples { n: 1 })
        );
        assert_eq!(
            Summary::from_samples(&[4.0, f64::NAN]),
            Err(StatsError::NonFinite)
        );
    }

    #[test]
    fn test_custom_confidence_level() {
        let samples = [10.0, 20.0, 30.0, 40.0, 50.0];
        let ninety = Summary::with_confidence(&samples, 0.90).unwrap();
        let ninety_nine = Summary::with_confidence(&samples, 0.99).unwrap();
        assert!(ninety.ci.width() < ninety_nine.ci.width());
        assert!(matches!(
            Summary::with_confidence(&samples, 1.5),
            Err(StatsError::Distribution(_))
        ));
    }
}
