//! Symmetric eigen-decomposition of similarity matrices.
//!
//! Uses the classical Jacobi rotation method: repeatedly find the largest
//! off-diagonal element and zero it with a Givens rotation, accumulating the
//! rotations into the eigenvector matrix. Each rotation is orthogonal, so the
//! trace is preserved and the accumulated matrix stays orthonormal. Convergence
//! is guaranteed for symmetric input and the method is unconditionally stable.
//!
//! Similarity matrices here are `m x m` with `m` the number of objectives
//! (tens at most), which is well inside the range where Jacobi is fast.
//!
//! Eigenpairs are returned sorted by **descending** eigenvalue. Variance
//! analysis accumulates components in that order, so an ascending order from
//! the solver would silently invert it.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::error::{ReductionError, Result};
use crate::similarity::SimilarityMatrix;

/// Eigenvalues and eigenvectors of a symmetric matrix.
///
/// `eigenvectors` is row-major `n x n`; column `k` is the eigenvector paired
/// with `eigenvalues[k]`. Row `i` holds the loadings of objective `i` on every
/// component.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpectralDecomposition {
    dim: usize,
    eigenvalues: Vec<f64>,
    eigenvectors: Vec<f64>,
}

impl SpectralDecomposition {
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Eigenvalues, descending.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Loading of `objective` on `component`, i.e. `V[objective][component]`.
    pub fn loading(&self, objective: usize, component: usize) -> f64 {
        self.eigenvectors[objective * self.dim + component]
    }

    /// Eigenvector (column) `component`.
    pub fn eigenvector(&self, component: usize) -> Vec<f64> {
        (0..self.dim)
            .map(|i| self.loading(i, component))
            .collect()
    }

    /// Row-major eigenvector matrix.
    pub fn eigenvectors(&self) -> &[f64] {
        &self.eigenvectors
    }
}

/// Decompose a symmetric similarity matrix.
///
/// # Errors
///
/// - [`ReductionError::NonFiniteSimilarity`] if an entry is NaN or infinite.
/// - [`ReductionError::NonSymmetricInput`] if any `|A[i][j] - A[j][i]|`
///   exceeds `1e-9 * max(1, max|A|)`.
///
/// # Example
///
/// ```
/// use cull::{decompose, SimilarityMatrix};
///
/// // [[2, 1], [1, 2]] has eigenvalues 3 and 1.
/// let m = SimilarityMatrix::from_row_major(2, vec![2.0, 1.0, 1.0, 2.0]).unwrap();
/// let d = decompose(&m).unwrap();
/// assert!((d.eigenvalues()[0] - 3.0).abs() < 1e-9);
/// assert!((d.eigenvalues()[1] - 1.0).abs() < 1e-9);
/// ```
pub fn decompose(matrix: &SimilarityMatrix) -> Result<SpectralDecomposition> {
    let n = matrix.dim();
    let a = matrix.as_slice();

    if let Some(pos) = a.iter().position(|v| !v.is_finite()) {
        return Err(ReductionError::NonFiniteSimilarity {
            row: pos / n,
            col: pos % n,
        });
    }

    let scale = a.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
    let (row, col, difference) = matrix.max_asymmetry();
    if difference > 1e-9 * scale {
        return Err(ReductionError::NonSymmetricInput {
            row,
            col,
            difference,
        });
    }

    let (values, vectors, _) = jacobi_eigen(a, n, scale, 100 * n * n);
    Ok(sorted_descending(n, values, vectors))
}

/// Jacobi iteration. Returns (unsorted eigenvalues, row-major eigenvectors,
/// converged within `max_iter` rotations).
fn jacobi_eigen(a: &[f64], n: usize, scale: f64, max_iter: usize) -> (Vec<f64>, Vec<f64>, bool) {
    // Symmetrize away any residual asymmetry that passed the tolerance check.
    let mut mat = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            mat[i * n + j] = 0.5 * (a[i * n + j] + a[j * n + i]);
        }
    }
    let mut vecs = vec![0.0; n * n];
    for i in 0..n {
        vecs[i * n + i] = 1.0;
    }

    let tol = 1e-12 * scale;
    let mut rotations = 0;
    let mut converged = false;

    loop {
        let mut max_off = 0.0_f64;
        let mut p = 0;
        let mut q = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                let v = mat[i * n + j].abs();
                if v > max_off {
                    max_off = v;
                    p = i;
                    q = j;
                }
            }
        }
        if max_off < tol {
            converged = true;
            break;
        }
        if rotations >= max_iter {
            break;
        }

        // tan(2θ) = 2 a_pq / (a_pp - a_qq) zeroes a_pq.
        let app = mat[p * n + p];
        let aqq = mat[q * n + q];
        let apq = mat[p * n + q];
        let theta = if (app - aqq).abs() < tol {
            core::f64::consts::FRAC_PI_4
        } else {
            0.5 * (2.0 * apq / (app - aqq)).atan()
        };
        let c = theta.cos();
        let s = theta.sin();

        for i in 0..n {
            if i != p && i != q {
                let ip = mat[i * n + p];
                let iq = mat[i * n + q];
                let new_ip = c * ip + s * iq;
                let new_iq = -s * ip + c * iq;
                mat[i * n + p] = new_ip;
                mat[p * n + i] = new_ip;
                mat[i * n + q] = new_iq;
                mat[q * n + i] = new_iq;
            }
        }
        mat[p * n + p] = c * c * app + 2.0 * c * s * apq + s * s * aqq;
        mat[q * n + q] = s * s * app - 2.0 * c * s * apq + c * c * aqq;
        mat[p * n + q] = 0.0;
        mat[q * n + p] = 0.0;

        // V <- V J
        for i in 0..n {
            let vp = vecs[i * n + p];
            let vq = vecs[i * n + q];
            vecs[i * n + p] = c * vp + s * vq;
            vecs[i * n + q] = -s * vp + c * vq;
        }

        rotations += 1;
    }

    trace!(dim = n, rotations, "jacobi eigensolver finished");
    if !converged {
        debug!(dim = n, max_iter, "jacobi eigensolver hit the rotation cap before converging");
    }

    let values = (0..n).map(|i| mat[i * n + i]).collect();
    (values, vecs, converged)
}

/// Sort eigenpairs by descending eigenvalue and fix each eigenvector's sign
/// so its largest-magnitude entry is positive.
fn sorted_descending(n: usize, values: Vec<f64>, vecs: Vec<f64>) -> SpectralDecomposition {
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[b].partial_cmp(&values[a]).unwrap_or(Ordering::Equal));

    let mut eigenvalues = Vec::with_capacity(n);
    let mut eigenvectors = vec![0.0; n * n];
    for (k, &src) in order.iter().enumerate() {
        eigenvalues.push(values[src]);

        let mut pivot = 0.0_f64;
        for i in 0..n {
            let v = vecs[i * n + src];
            if v.abs() > pivot.abs() {
                pivot = v;
            }
        }
        let sign = if pivot < 0.0 { -1.0 } else { 1.0 };
        for i in 0..n {
            eigenvectors[i * n + k] = sign * vecs[i * n + src];
        }
    }

    SpectralDecomposition {
        dim: n,
        eigenvalues,
        eigenvectors,
    }
}
