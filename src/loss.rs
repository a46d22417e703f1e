//! Loss estimation for discarded objectives.
//!
//! For each representative `r`, the correlation matrix of every *other*
//! objective is recomputed and its trace reported. Scores are kept per
//! representative rather than summed so callers can compare how much each
//! representative's removal leaves behind.

use tracing::trace;

use crate::error::{ReductionError, Result};
use crate::samples::SampleMatrix;
use crate::similarity::correlation_matrix;

/// Trace of the correlation matrix of the objectives left after removing `r`.
///
/// A single remaining objective gives a 1x1 matrix with trace 1. With no
/// objective left (single-objective input) the loss is 0.
///
/// # Errors
///
/// - [`ReductionError::DimensionMismatch`] if `r` is not an objective index.
/// - [`ReductionError::DegenerateInput`] if a remaining column is constant.
///   The index refers to the reduced matrix.
pub fn removal_loss(samples: &SampleMatrix, r: usize) -> Result<f64> {
    let n = samples.n_objectives();
    if r >= n {
        return Err(ReductionError::DimensionMismatch {
            expected: n.saturating_sub(1),
            found: r,
        });
    }
    match samples.without_objective(r) {
        Some(rest) => Ok(correlation_matrix(&rest)?.trace()),
        None => Ok(0.0),
    }
}

/// One loss score per representative, aligned by position.
///
/// # Example
///
/// ```
/// use cull::{estimate_loss, SampleMatrix};
///
/// let samples = SampleMatrix::try_new(&[
///     vec![1.0, 0.0, 5.0],
///     vec![2.0, 1.0, 3.0],
///     vec![3.0, 0.0, 4.0],
///     vec![4.0, 1.0, 1.0],
/// ]).unwrap();
///
/// let loss = estimate_loss(&samples, &[0, 2]).unwrap();
/// assert_eq!(loss, vec![2.0, 2.0]);
/// ```
pub fn estimate_loss(samples: &SampleMatrix, representatives: &[usize]) -> Result<Vec<f64>> {
    representatives
        .iter()
        .map(|&r| {
            let loss = removal_loss(samples, r)?;
            trace!(representative = r, loss, "removal loss");
            Ok(loss)
        })
        .collect()
}
