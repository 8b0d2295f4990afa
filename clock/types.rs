// ========================================================================================
//                             High-Level Data Contracts
// ========================================================================================

// This file is ONLY for types that are SHARED BETWEEN FILES, not types that only are
// used in one file.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The number of CpG sites in the Horvath 2013 clock panel. The input contract is
/// fixed at this count; it is not derived from any site list at runtime.
pub const HORVATH_CPG_COUNT: usize = 353;

/// A validated panel of methylation beta values.
///
/// The constructor is the sole entry point for creating this type and performs the
/// single upfront length check, so a wrong-sized panel is an unrepresentable state
/// for the compute kernels. Individual values are not range-checked: a beta is
/// nominally in [0,1], but out-of-range and non-finite values pass through and
/// propagate into the arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct BetaPanel {
    values: Vec<f64>,
}

impl BetaPanel {
    /// Creates a new, validated `BetaPanel` from raw values.
    #[inline]
    pub fn from_values(values: Vec<f64>) -> Result<Self, ClockError> {
        if values.len() != HORVATH_CPG_COUNT {
            return Err(ClockError::CpgCountMismatch {
                expected: HORVATH_CPG_COUNT,
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    #[inline(always)]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sum over all beta values. NaN anywhere in the panel yields NaN.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Arithmetic mean over all beta values.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.sum() / self.values.len() as f64
    }
}

/// The surrogate model used to turn a panel into an age.
///
/// This enum makes the model choice a type-safe property of the computation, so a
/// caller can never ask for a model the kernel does not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClockModel {
    /// Rescaled panel mean plus a normally distributed variation term drawn from a
    /// generator seeded by the panel itself. Deterministic per input.
    MeanSeeded,
    /// Ten fixed positional sites weighted on top of the panel mean, with a
    /// sine-derived variation term. Deterministic per input.
    KeySites,
}

impl fmt::Display for ClockModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockModel::MeanSeeded => write!(f, "mean-seeded"),
            ClockModel::KeySites => write!(f, "key-sites"),
        }
    }
}

/// One age estimate, as produced by a kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeEstimate {
    /// The model that produced this estimate.
    pub model: ClockModel,
    /// Estimated epigenetic age in years, already clamped to the model's range.
    pub age_years: f64,
    /// The derived generator seed, for models that draw a sampled variation term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// A comprehensive error type for all input and plumbing failures.
///
/// Failures are assumed to be user-input errors and carry the detail needed to
/// correct them.
#[derive(Error, Debug)]
pub enum ClockError {
    #[error("Expected {expected} beta values, but received {actual}")]
    CpgCountMismatch { expected: usize, actual: usize },
    #[error("Beta value {position} ('{token}') is not a number")]
    InvalidBetaValue { token: String, position: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beta_panel_accepts_exact_count() {
        let panel = BetaPanel::from_values(vec![0.5; HORVATH_CPG_COUNT]).unwrap();
        assert_eq!(panel.values().len(), HORVATH_CPG_COUNT);
    }

    #[test]
    fn beta_panel_rejects_other_counts() {
        for count in [0, 1, 352, 354] {
            match BetaPanel::from_values(vec![0.5; count]) {
                Err(ClockError::CpgCountMismatch { expected, actual }) => {
                    assert_eq!(expected, HORVATH_CPG_COUNT);
                    assert_eq!(actual, count);
                }
                other => panic!("expected a count mismatch for {count}, got {other:?}"),
            }
        }
    }

    #[test]
    fn beta_panel_does_not_range_check_values() {
        let mut values = vec![0.5; HORVATH_CPG_COUNT];
        values[0] = -3.0;
        values[1] = 7.5;
        assert!(BetaPanel::from_values(values).is_ok());
    }

    #[test]
    fn mean_of_uniform_panel_is_exact() {
        let panel = BetaPanel::from_values(vec![0.25; HORVATH_CPG_COUNT]).unwrap();
        assert!((panel.mean() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn clock_model_display_matches_cli_names() {
        assert_eq!(ClockModel::MeanSeeded.to_string(), "mean-seeded");
        assert_eq!(ClockModel::KeySites.to_string(), "key-sites");
    }
}
