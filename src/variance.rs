//! Explained-variance analysis of a spectrum.
//!
//! This is the PCA "how many components do I need" question: normalize the
//! eigenvalues into ratios, accumulate them from the largest down, and stop at
//! the first prefix that reaches the target fraction.

use std::cmp::Ordering;

use crate::error::{ReductionError, Result};

/// Relative tolerance below which a negative eigenvalue is treated as zero.
const NEGATIVE_TOL: f64 = 1e-9;

/// Clamp round-off negatives to zero, reject genuine ones.
fn checked_spectrum(eigenvalues: &[f64]) -> Result<Vec<f64>> {
    if eigenvalues.is_empty() {
        return Err(ReductionError::EmptySamples);
    }
    let scale = eigenvalues
        .iter()
        .fold(1.0_f64, |acc, v| acc.max(v.abs()));
    eigenvalues
        .iter()
        .enumerate()
        .map(|(index, &eigenvalue)| {
            if !eigenvalue.is_finite() || eigenvalue < -NEGATIVE_TOL * scale {
                Err(ReductionError::InvalidSpectrum { index, eigenvalue })
            } else {
                Ok(eigenvalue.max(0.0))
            }
        })
        .collect()
}

/// Each eigenvalue divided by the sum of all eigenvalues, in input order.
///
/// # Errors
///
/// [`ReductionError::InvalidSpectrum`] for a negative eigenvalue beyond
/// tolerance or a spectrum that sums to zero.
pub fn explained_variance_ratios(eigenvalues: &[f64]) -> Result<Vec<f64>> {
    let spectrum = checked_spectrum(eigenvalues)?;
    let total: f64 = spectrum.iter().sum();
    if total <= 0.0 {
        return Err(ReductionError::InvalidSpectrum {
            index: 0,
            eigenvalue: total,
        });
    }
    Ok(spectrum.into_iter().map(|v| v / total).collect())
}

/// Smallest set of components whose explained variance reaches `threshold`.
///
/// Components are taken in decreasing eigenvalue order (ties keep input
/// order), so this is correct whatever order the eigenvalues arrive in. The
/// returned indices refer to positions in `eigenvalues`.
///
/// # Errors
///
/// - [`ReductionError::InvalidConfiguration`] if `threshold` is not in `(0, 1]`.
/// - [`ReductionError::InvalidSpectrum`] as for [`explained_variance_ratios`].
///
/// # Example
///
/// ```
/// use cull::significant_components;
///
/// // Ratios 0.6, 0.3, 0.1.
/// let ev = [0.6, 0.3, 0.1];
/// assert_eq!(significant_components(&ev, 0.5).unwrap(), vec![0]);
/// assert_eq!(significant_components(&ev, 0.9).unwrap(), vec![0, 1]);
/// assert_eq!(significant_components(&ev, 0.95).unwrap(), vec![0, 1, 2]);
/// ```
pub fn significant_components(eigenvalues: &[f64], threshold: f64) -> Result<Vec<usize>> {
    validate_variance_threshold(threshold)?;
    let ratios = explained_variance_ratios(eigenvalues)?;

    let mut order: Vec<usize> = (0..ratios.len()).collect();
    order.sort_by(|&a, &b| ratios[b].partial_cmp(&ratios[a]).unwrap_or(Ordering::Equal));

    let mut cumulative = 0.0;
    let mut selected = Vec::new();
    for idx in order {
        cumulative += ratios[idx];
        selected.push(idx);
        // Slack so that a threshold of exactly 1.0 survives round-off.
        if cumulative + 1e-12 >= threshold {
            break;
        }
    }
    Ok(selected)
}

pub(crate) fn validate_variance_threshold(threshold: f64) -> Result<()> {
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(ReductionError::InvalidConfiguration {
            name: "variance_threshold",
            message: "must be in (0, 1]",
        });
    }
    Ok(())
}
