//! Objective reduction for many-objective optimization.
//!
//! Given a sample matrix of objective values (rows = evaluated solutions,
//! columns = objectives), `cull` finds groups of objectives that carry the same
//! information, keeps one representative per group, and reports how much is
//! lost by dropping the rest.
//!
//! # Pipeline
//!
//! ```text
//!   SampleMatrix
//!     -> similarity matrix     (Pearson correlation, or a normalized kernel)
//!     -> eigen-decomposition   (Jacobi, eigenpairs sorted descending)
//!     -> significant components (smallest prefix reaching the variance target)
//!     -> correlated groups     (anchor-centric, may overlap)
//!     -> representatives       (max per-objective loading variance)
//!     -> loss                  (trace of the correlation matrix without r)
//! ```
//!
//! Each stage is a public function and can be used on its own; [`reduce`]
//! runs them in order and returns every intermediate artifact.
//!
//! # Why correlation
//!
//! Two objectives that rise and fall together over a population do not
//! trade off against each other: optimizing one optimizes the other. A
//! population of solutions is a cheap sample of that joint behaviour, and
//! the correlation matrix summarizes it. Its eigenvalues say how many
//! independent directions of variation the objective set really has; its
//! entries say which objectives share a direction.
//!
//! # Example
//!
//! ```
//! use cull::{reduce_rows, ReductionConfig};
//!
//! // Objective 1 is a rescaled copy of objective 0; objective 2 is unrelated.
//! let rows = vec![
//!     vec![0.1, 10.0, 3.0],
//!     vec![0.4, 40.0, 1.0],
//!     vec![0.2, 20.0, 1.0],
//!     vec![0.3, 30.0, 3.0],
//! ];
//! let r = reduce_rows(&rows, &ReductionConfig::default()).unwrap();
//! assert_eq!(r.groups.len(), 2);
//! assert_eq!(r.retained_objectives().len(), 2);
//! assert_eq!(r.loss_report.len(), r.representatives.len());
//! ```

/// Error types used across `cull`.
pub mod error;
pub mod groups;
pub mod loss;
pub mod pipeline;
pub mod samples;
pub mod select;
pub mod similarity;
pub mod spectral;
pub mod variance;

pub use error::{ReductionError, Result};
pub use groups::{find_groups, overlapping_objectives, CorrelatedGroup};
pub use loss::{estimate_loss, removal_loss};
pub use pipeline::{reduce, reduce_rows, Reduction, ReductionConfig};
pub use samples::{ColumnStats, SampleMatrix};
pub use select::{loading_variance, select_representatives, ComponentScope};
pub use similarity::{correlation_matrix, kernel_matrix, KernelConfig, KernelKind, SimilarityMatrix};
pub use spectral::{decompose, SpectralDecomposition};
pub use variance::{explained_variance_ratios, significant_components};
