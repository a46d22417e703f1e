//! The end-to-end reduction pipeline.
//!
//! ```text
//! samples -> similarity -> decompose -> { significant components, groups }
//!         -> representatives -> loss
//! ```
//!
//! Every stage is a pure function of its inputs. The first error from any stage
//! aborts the run; there is no partial result.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::Result;
use crate::groups::{find_groups, validate_correlation_threshold, CorrelatedGroup};
use crate::loss::estimate_loss;
use crate::samples::SampleMatrix;
use crate::select::{select_representatives, ComponentScope};
use crate::similarity::{correlation_matrix, kernel_matrix, KernelConfig};
use crate::spectral::decompose;
use crate::variance::{explained_variance_ratios, significant_components, validate_variance_threshold};

/// Per-call configuration of [`reduce`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReductionConfig {
    /// Minimum `|similarity|` for two objectives to share a group.
    pub correlation_threshold: f64,
    /// Target cumulative explained variance for the significant components.
    pub variance_threshold: f64,
    /// Kernel similarity instead of Pearson correlation when set.
    pub kernel: Option<KernelConfig>,
    /// Components used to score representatives.
    pub component_scope: ComponentScope,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            correlation_threshold: 0.5,
            variance_threshold: 0.95,
            kernel: None,
            component_scope: ComponentScope::All,
        }
    }
}

impl ReductionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_correlation_threshold(mut self, threshold: f64) -> Self {
        self.correlation_threshold = threshold;
        self
    }

    pub fn with_variance_threshold(mut self, threshold: f64) -> Self {
        self.variance_threshold = threshold;
        self
    }

    pub fn with_kernel(mut self, kernel: KernelConfig) -> Self {
        self.kernel = Some(kernel);
        self
    }

    pub fn with_component_scope(mut self, scope: ComponentScope) -> Self {
        self.component_scope = scope;
        self
    }

    /// Check every threshold and kernel parameter without touching any data.
    pub fn validate(&self) -> Result<()> {
        validate_correlation_threshold(self.correlation_threshold)?;
        validate_variance_threshold(self.variance_threshold)?;
        if let Some(kernel) = &self.kernel {
            kernel.validate()?;
        }
        Ok(())
    }
}

/// Everything the pipeline computed, for diagnostics as well as the final set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reduction {
    /// Correlated groups, anchor order, possibly overlapping.
    pub groups: Vec<CorrelatedGroup>,
    /// One representative per group, aligned with `groups`.
    pub representatives: Vec<usize>,
    /// Significant component indices, largest eigenvalue first.
    pub variance_report: Vec<usize>,
    /// One loss score per representative, aligned with `representatives`.
    pub loss_report: Vec<f64>,
    /// Eigenvalues of the similarity matrix, descending.
    pub eigenvalues: Vec<f64>,
    /// Explained-variance ratio of each eigenvalue.
    pub explained_variance: Vec<f64>,
}

impl Reduction {
    /// The reduced objective set: distinct representatives, ascending.
    ///
    /// Overlapping groups can elect the same objective more than once.
    pub fn retained_objectives(&self) -> Vec<usize> {
        self.representatives
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Objectives in `0..n_objectives` that were not retained.
    pub fn discarded_objectives(&self, n_objectives: usize) -> Vec<usize> {
        let retained: BTreeSet<usize> = self.representatives.iter().copied().collect();
        (0..n_objectives).filter(|j| !retained.contains(j)).collect()
    }

    /// Fraction of the original objectives that were retained.
    pub fn reduction_ratio(&self, n_objectives: usize) -> f64 {
        if n_objectives == 0 {
            return 0.0;
        }
        self.retained_objectives().len() as f64 / n_objectives as f64
    }

    /// Cumulative explained variance of the significant components.
    pub fn explained_by_significant(&self) -> f64 {
        self.variance_report
            .iter()
            .map(|&c| self.explained_variance[c])
            .sum()
    }
}

/// Run the full reduction on one sample matrix.
///
/// # Example
///
/// ```
/// use cull::{reduce, ReductionConfig, SampleMatrix};
///
/// // Objectives 0 and 1 move together; objective 2 is unrelated.
/// let samples = SampleMatrix::try_new(&[
///     vec![1.0, 2.0, 1.0],
///     vec![2.0, 4.0, -1.0],
///     vec![3.0, 6.0, -1.0],
///     vec![4.0, 8.0, 1.0],
/// ]).unwrap();
///
/// let r = reduce(&samples, &ReductionConfig::default()).unwrap();
/// let groups: Vec<&[usize]> = r.groups.iter().map(|g| g.members()).collect();
/// assert_eq!(groups, vec![&[0, 1][..], &[2][..]]);
/// assert_eq!(r.retained_objectives().len(), 2);
/// assert_eq!(r.representatives[1], 2);
/// ```
pub fn reduce(samples: &SampleMatrix, config: &ReductionConfig) -> Result<Reduction> {
    config.validate()?;
    debug!(
        n_samples = samples.n_samples(),
        n_objectives = samples.n_objectives(),
        kernel = ?config.kernel.map(|k| k.kind),
        "starting objective reduction"
    );

    let similarity = match &config.kernel {
        Some(kernel) => kernel_matrix(samples, kernel)?,
        None => correlation_matrix(samples)?,
    };

    let decomposition = decompose(&similarity)?;
    let eigenvalues = decomposition.eigenvalues().to_vec();
    let explained_variance = explained_variance_ratios(&eigenvalues)?;
    let variance_report = significant_components(&eigenvalues, config.variance_threshold)?;
    debug!(
        significant = variance_report.len(),
        leading_eigenvalue = eigenvalues.first().copied().unwrap_or(0.0),
        "variance analysis done"
    );

    let groups = find_groups(&similarity, config.correlation_threshold)?;
    debug!(groups = groups.len(), "correlated groups found");

    let components: Vec<usize> = match config.component_scope {
        ComponentScope::All => (0..decomposition.dim()).collect(),
        ComponentScope::Significant => variance_report.clone(),
    };
    if components.len() < 2 {
        debug!(
            components = components.len(),
            "fewer than two scoring components, representatives default to first members"
        );
    }
    let representatives = select_representatives(&groups, &decomposition, &components)?;
    let loss_report = estimate_loss(samples, &representatives)?;
    debug!(?representatives, ?loss_report, "objective reduction finished");

    Ok(Reduction {
        groups,
        representatives,
        variance_report,
        loss_report,
        eigenvalues,
        explained_variance,
    })
}

/// [`reduce`] on raw rows, validating them into a [`SampleMatrix`] first.
pub fn reduce_rows(rows: &[Vec<f64>], config: &ReductionConfig) -> Result<Reduction> {
    let samples = SampleMatrix::try_new(rows)?;
    reduce(&samples, config)
}
