//! The hard-threshold classifier: a pure function from an input vector, a
//! weight vector and a bias to a 0/1 prediction.

use num_traits::Float;

use super::PerceptronError;

/// Calculates the dot product of two equal-length vectors.
///
/// Length equality is the caller's precondition; [`activation`] checks it
/// before calling this.
pub fn dot_product<F: Float + std::iter::Sum>(a: &[F], b: &[F]) -> F {
    a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum()
}

/// Computes the activation `dot(input, weights) - bias` whose sign drives the
/// threshold classifier.
///
/// # Errors
/// Returns `PerceptronError::DimensionMismatch` if `input` and `weights`
/// have different lengths.
pub fn activation<F>(input: &[F], weights: &[F], bias: F) -> Result<F, PerceptronError>
where
    F: Float + std::iter::Sum,
{
    if input.len() != weights.len() {
        return Err(PerceptronError::DimensionMismatch {
            got: input.len(),
            expected: weights.len(),
        });
    }
    Ok(dot_product(input, weights) - bias)
}

/// Classifies `input` against `weights` and `bias`.
///
/// Returns `F::one()` when the activation is strictly positive and
/// `F::zero()` otherwise. An activation of exactly zero classifies as zero;
/// this tie-break is load-bearing for convergence on boundary inputs and
/// must not be relaxed to `>=`.
///
/// Pure and side-effect free; safe to call from multiple threads since it
/// only reads its arguments.
///
/// # Errors
/// Returns `PerceptronError::DimensionMismatch` if `input` and `weights`
/// have different lengths.
pub fn classify<F>(input: &[F], weights: &[F], bias: F) -> Result<F, PerceptronError>
where
    F: Float + std::iter::Sum,
{
    let a = activation(input, weights, bias)?;
    if a > F::zero() { Ok(F::one()) } else { Ok(F::zero()) }
}
