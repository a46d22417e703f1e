//! Errors raised by the reduction stages.

use thiserror::Error;

/// Result alias for `cull`.
pub type Result<T> = std::result::Result<T, ReductionError>;

/// Errors returned by the reduction pipeline and its stages.
///
/// Every stage reports the first problem it detects and the pipeline passes it
/// through unchanged. Inputs are deterministic, so nothing here is retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReductionError {
    /// No samples (or no objectives) were provided.
    #[error("sample matrix is empty")]
    EmptySamples,

    /// Fewer than two samples: correlation is undefined.
    #[error("at least 2 samples are required, found {found}")]
    TooFewSamples { found: usize },

    /// A sample row had a different number of objectives than the first row.
    #[error("sample {row} has {found} objectives, expected {expected}")]
    InconsistentDimensions {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A value was NaN or infinite.
    #[error("sample value at [{sample_idx}][{objective_idx}] is not finite")]
    NonFinite {
        sample_idx: usize,
        objective_idx: usize,
    },

    /// A similarity matrix entry was NaN or infinite.
    #[error("similarity entry at [{row}][{col}] is not finite")]
    NonFiniteSimilarity { row: usize, col: usize },

    /// An index or matrix size did not match the data it was applied to.
    #[error("dimension mismatch: expected at most {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// An objective column has zero variance, so its correlation is undefined.
    #[error("objective {objective} has zero variance")]
    DegenerateInput { objective: usize },

    /// The similarity matrix is not symmetric within tolerance.
    #[error("matrix is not symmetric at [{row}][{col}] (difference {difference:e})")]
    NonSymmetricInput {
        row: usize,
        col: usize,
        difference: f64,
    },

    /// The spectrum has a negative eigenvalue beyond tolerance, or sums to zero.
    #[error("invalid spectrum: eigenvalue {index} = {eigenvalue:e}")]
    InvalidSpectrum { index: usize, eigenvalue: f64 },

    /// A threshold or kernel parameter is outside its valid range.
    #[error("invalid configuration '{name}': {message}")]
    InvalidConfiguration {
        name: &'static str,
        message: &'static str,
    },
}
