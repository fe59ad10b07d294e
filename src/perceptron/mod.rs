//! Single-layer perceptron: a hard-threshold linear classifier and its
//! mistake-driven training loop.

use std::fmt;

pub mod classifier;
pub mod trainer;

/// Errors surfaced by the perceptron classifier and trainer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerceptronError {
    /// An input vector's length differs from the weight vector's length.
    DimensionMismatch {
        /// Observed input length.
        got: usize,
        /// Expected length (the weight vector's dimensionality).
        expected: usize,
    },

    /// A configured sweep cap was reached with misclassifications still
    /// occurring. The dataset may not be linearly separable.
    SweepLimitExceeded {
        /// Number of sweeps completed before giving up.
        sweeps: usize,
    },
}

impl fmt::Display for PerceptronError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerceptronError::DimensionMismatch { got, expected } => {
                write!(f, "dimension mismatch: input has {got} features, weights expect {expected}")
            }
            PerceptronError::SweepLimitExceeded { sweeps } => {
                write!(
                    f,
                    "no convergence after {sweeps} sweeps; the data may not be linearly separable"
                )
            }
        }
    }
}

impl std::error::Error for PerceptronError {}
