//! Objective-similarity matrices.
//!
//! Two ways to measure how much two objectives move together over a sample set:
//!
//! - **Pearson correlation** ([`correlation_matrix`]): the linear default.
//!   `r_ij = cov(x_i, x_j) / (std_i * std_j)`, symmetric with unit diagonal.
//!
//! - **Kernel similarity** ([`kernel_matrix`]): each objective column is
//!   z-scored and treated as a point in sample space, a kernel is evaluated
//!   between every pair of columns, and the resulting Gram matrix is cosine
//!   normalized:
//!
//! ```text
//!   K'_ij = K(x_i, x_j) / sqrt(K(x_i, x_i) * K(x_j, x_j))
//! ```
//!
//! After normalization the diagonal is 1 and downstream stages cannot tell the
//! two apart. Inner products and squared distances are averaged over samples,
//! so `gamma` keeps its meaning as the sample count changes. With z-scored
//! columns the mean product is exactly the correlation, which makes the
//! `Linear` kernel a check on the Pearson path.

use crate::error::{ReductionError, Result};
use crate::samples::SampleMatrix;

/// Kernel used by [`kernel_matrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KernelKind {
    /// `x·y`
    Linear,
    /// `(gamma * x·y + coef0)^degree`
    Polynomial,
    /// `exp(-gamma * ||x - y||²)`
    #[default]
    Rbf,
    /// `tanh(gamma * x·y + coef0)`
    Sigmoid,
}

/// Parameters of the kernel similarity path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KernelConfig {
    pub kind: KernelKind,
    /// Bandwidth / scale. Must be finite and > 0.
    pub gamma: f64,
    /// Additive constant for the polynomial and sigmoid kernels.
    pub coef0: f64,
    /// Exponent of the polynomial kernel.
    pub degree: u32,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            kind: KernelKind::Rbf,
            gamma: 0.1,
            coef0: 1.0,
            degree: 3,
        }
    }
}

impl KernelConfig {
    pub fn new(kind: KernelKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_coef0(mut self, coef0: f64) -> Self {
        self.coef0 = coef0;
        self
    }

    pub fn with_degree(mut self, degree: u32) -> Self {
        self.degree = degree;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(ReductionError::InvalidConfiguration {
                name: "gamma",
                message: "must be finite and > 0",
            });
        }
        if !self.coef0.is_finite() {
            return Err(ReductionError::InvalidConfiguration {
                name: "coef0",
                message: "must be finite",
            });
        }
        if self.degree == 0 {
            return Err(ReductionError::InvalidConfiguration {
                name: "degree",
                message: "must be >= 1",
            });
        }
        Ok(())
    }

    /// Kernel value from the mean product and mean squared difference of two columns.
    fn eval(&self, dot: f64, sq_dist: f64) -> f64 {
        match self.kind {
            KernelKind::Linear => dot,
            KernelKind::Polynomial => (self.gamma * dot + self.coef0).powi(self.degree as i32),
            KernelKind::Rbf => (-self.gamma * sq_dist).exp(),
            KernelKind::Sigmoid => (self.gamma * dot + self.coef0).tanh(),
        }
    }
}

/// Square, symmetric objective-similarity matrix (row-major).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimilarityMatrix {
    dim: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Wrap a caller-supplied row-major matrix.
    ///
    /// Only the shape is checked here; symmetry is checked by
    /// [`crate::spectral::decompose`].
    pub fn from_row_major(dim: usize, values: Vec<f64>) -> Result<Self> {
        if dim == 0 {
            return Err(ReductionError::EmptySamples);
        }
        if values.len() != dim * dim {
            return Err(ReductionError::DimensionMismatch {
                expected: dim * dim,
                found: values.len(),
            });
        }
        Ok(Self { dim, values })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.dim + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.dim..(i + 1) * self.dim]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Sum of the diagonal entries.
    pub fn trace(&self) -> f64 {
        (0..self.dim).map(|i| self.get(i, i)).sum()
    }

    /// Largest `|A[i][j] - A[j][i]|` and where it occurs.
    pub fn max_asymmetry(&self) -> (usize, usize, f64) {
        let mut worst = (0, 0, 0.0);
        for i in 0..self.dim {
            for j in (i + 1)..self.dim {
                let d = (self.get(i, j) - self.get(j, i)).abs();
                if d > worst.2 {
                    worst = (i, j, d);
                }
            }
        }
        worst
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.max_asymmetry().2 <= tol
    }
}

/// Z-score every column. Fails on the first zero-variance column.
fn standardized_columns(samples: &SampleMatrix) -> Result<Vec<Vec<f64>>> {
    (0..samples.n_objectives())
        .map(|j| {
            let stats = samples.column_stats(j);
            if stats.is_constant() {
                return Err(ReductionError::DegenerateInput { objective: j });
            }
            Ok(samples
                .column(j)
                .into_iter()
                .map(|v| (v - stats.mean) / stats.std)
                .collect())
        })
        .collect()
}

fn mean_product(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum::<f64>() / a.len() as f64
}

fn mean_sq_dist(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>() / a.len() as f64
}

/// Pearson correlation between every pair of objective columns.
///
/// The result is symmetric, has an exact unit diagonal and entries in `[-1, 1]`.
///
/// # Errors
///
/// [`ReductionError::DegenerateInput`] if any column is constant.
///
/// # Example
///
/// ```
/// use cull::{correlation_matrix, SampleMatrix};
///
/// let samples = SampleMatrix::try_new(&[
///     vec![1.0, 2.0, 3.0],
///     vec![2.0, 4.0, 1.0],
///     vec![3.0, 6.0, 2.0],
/// ]).unwrap();
///
/// let corr = correlation_matrix(&samples).unwrap();
/// assert!((corr.get(0, 1) - 1.0).abs() < 1e-12);
/// assert_eq!(corr.trace(), 3.0);
/// ```
pub fn correlation_matrix(samples: &SampleMatrix) -> Result<SimilarityMatrix> {
    let z = standardized_columns(samples)?;
    let m = z.len();

    let mut values = vec![0.0; m * m];
    for i in 0..m {
        values[i * m + i] = 1.0;
        for j in (i + 1)..m {
            let r = mean_product(&z[i], &z[j]).clamp(-1.0, 1.0);
            values[i * m + j] = r;
            values[j * m + i] = r;
        }
    }

    Ok(SimilarityMatrix { dim: m, values })
}

/// Cosine-normalized kernel similarity between every pair of objective columns.
///
/// # Errors
///
/// - [`ReductionError::InvalidConfiguration`] for invalid kernel parameters.
/// - [`ReductionError::DegenerateInput`] if a column is constant, or if the
///   kernel gives a column non-positive self-similarity (possible for
///   `Sigmoid` and `Polynomial` with a negative `coef0`).
pub fn kernel_matrix(samples: &SampleMatrix, config: &KernelConfig) -> Result<SimilarityMatrix> {
    config.validate()?;
    let z = standardized_columns(samples)?;
    let m = z.len();

    let mut gram = vec![0.0; m * m];
    for i in 0..m {
        for j in i..m {
            let k = config.eval(mean_product(&z[i], &z[j]), mean_sq_dist(&z[i], &z[j]));
            gram[i * m + j] = k;
            gram[j * m + i] = k;
        }
    }

    let mut norms = Vec::with_capacity(m);
    for i in 0..m {
        let self_sim = gram[i * m + i];
        if !(self_sim.is_finite() && self_sim > 0.0) {
            return Err(ReductionError::DegenerateInput { objective: i });
        }
        norms.push(self_sim.sqrt());
    }

    let mut values = vec![0.0; m * m];
    for i in 0..m {
        values[i * m + i] = 1.0;
        for j in (i + 1)..m {
            let v = gram[i * m + j] / (norms[i] * norms[j]);
            values[i * m + j] = v;
            values[j * m + i] = v;
        }
    }

    Ok(SimilarityMatrix { dim: m, values })
}
