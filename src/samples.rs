//! Validated sample matrices.
//!
//! A [`SampleMatrix`] holds one row per evaluated solution and one column per
//! objective. Construction checks the shape once so the later stages can index
//! freely.

use crate::error::{ReductionError, Result};

/// Summary statistics of one objective column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnStats {
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            mean,
            std: var.sqrt(),
            min,
            max,
        }
    }

    /// True when the column carries no variation relative to its own magnitude.
    ///
    /// The tolerance scales with the largest absolute value in the column, so
    /// the answer does not depend on the unit the objective is measured in.
    pub fn is_constant(&self) -> bool {
        let scale = self.min.abs().max(self.max.abs());
        self.std <= 1e-12 * scale
    }
}

/// Immutable `n_samples x n_objectives` matrix of objective values (row-major).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SampleMatrix {
    n_samples: usize,
    n_objectives: usize,
    values: Vec<f64>,
}

impl SampleMatrix {
    /// Build a sample matrix from rows of objective values.
    ///
    /// Requires at least 2 rows, at least 1 objective, equal row lengths and
    /// finite values.
    pub fn try_new(rows: &[Vec<f64>]) -> Result<Self> {
        let first = rows.first().ok_or(ReductionError::EmptySamples)?;
        let n_objectives = first.len();
        if n_objectives == 0 {
            return Err(ReductionError::EmptySamples);
        }
        if rows.len() < 2 {
            return Err(ReductionError::TooFewSamples { found: rows.len() });
        }

        let mut values = Vec::with_capacity(rows.len() * n_objectives);
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != n_objectives {
                return Err(ReductionError::InconsistentDimensions {
                    row: row_idx,
                    expected: n_objectives,
                    found: row.len(),
                });
            }
            if let Some(objective_idx) = row.iter().position(|v| !v.is_finite()) {
                return Err(ReductionError::NonFinite {
                    sample_idx: row_idx,
                    objective_idx,
                });
            }
            values.extend_from_slice(row);
        }

        Ok(Self {
            n_samples: rows.len(),
            n_objectives,
            values,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn n_objectives(&self) -> usize {
        self.n_objectives
    }

    /// Value of `objective` in sample `sample`.
    pub fn value(&self, sample: usize, objective: usize) -> f64 {
        self.values[sample * self.n_objectives + objective]
    }

    /// One sample (row).
    pub fn sample(&self, sample: usize) -> &[f64] {
        let start = sample * self.n_objectives;
        &self.values[start..start + self.n_objectives]
    }

    /// Copy of one objective column.
    pub fn column(&self, objective: usize) -> Vec<f64> {
        (0..self.n_samples)
            .map(|s| self.value(s, objective))
            .collect()
    }

    pub fn column_stats(&self, objective: usize) -> ColumnStats {
        ColumnStats::from_values(&self.column(objective))
    }

    /// The matrix with column `r` removed.
    ///
    /// Returns `None` if `r` is out of range or removing it leaves no objectives.
    pub fn without_objective(&self, r: usize) -> Option<Self> {
        if r >= self.n_objectives || self.n_objectives == 1 {
            return None;
        }
        let keep: Vec<usize> = (0..self.n_objectives).filter(|&j| j != r).collect();
        Some(self.project(&keep))
    }

    /// Projection onto `indices`, in the given order.
    ///
    /// This is how a caller materializes the reduced problem once the
    /// representatives are known.
    pub fn select_objectives(&self, indices: &[usize]) -> Result<Self> {
        if indices.is_empty() {
            return Err(ReductionError::EmptySamples);
        }
        if let Some(&bad) = indices.iter().find(|&&j| j >= self.n_objectives) {
            return Err(ReductionError::DimensionMismatch {
                expected: self.n_objectives.saturating_sub(1),
                found: bad,
            });
        }
        Ok(self.project(indices))
    }

    fn project(&self, indices: &[usize]) -> Self {
        let mut values = Vec::with_capacity(self.n_samples * indices.len());
        for s in 0..self.n_samples {
            let row = self.sample(s);
            values.extend(indices.iter().map(|&j| row[j]));
        }
        Self {
            n_samples: self.n_samples,
            n_objectives: indices.len(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 10.0, 0.5],
            vec![2.0, 20.0, 0.1],
            vec![3.0, 30.0, 0.9],
        ]
    }

    #[test]
    fn try_new_validates_shape() {
        assert_eq!(
            SampleMatrix::try_new(&[]).unwrap_err(),
            ReductionError::EmptySamples
        );
        assert_eq!(
            SampleMatrix::try_new(&[vec![], vec![]]).unwrap_err(),
            ReductionError::EmptySamples
        );
        assert_eq!(
            SampleMatrix::try_new(&[vec![1.0, 2.0]]).unwrap_err(),
            ReductionError::TooFewSamples { found: 1 }
        );
        assert_eq!(
            SampleMatrix::try_new(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err(),
            ReductionError::InconsistentDimensions {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            SampleMatrix::try_new(&[vec![1.0, 2.0], vec![3.0, f64::INFINITY]]).unwrap_err(),
            ReductionError::NonFinite {
                sample_idx: 1,
                objective_idx: 1
            }
        );
    }

    #[test]
    fn accessors_follow_row_major_layout() {
        let m = SampleMatrix::try_new(&rows()).unwrap();
        assert_eq!(m.n_samples(), 3);
        assert_eq!(m.n_objectives(), 3);
        assert_eq!(m.value(1, 1), 20.0);
        assert_eq!(m.sample(2), &[3.0, 30.0, 0.9]);
        assert_eq!(m.column(0), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn without_objective_drops_one_column() {
        let m = SampleMatrix::try_new(&rows()).unwrap();
        let r = m.without_objective(1).unwrap();
        assert_eq!(r.n_objectives(), 2);
        assert_eq!(r.column(0), vec![1.0, 2.0, 3.0]);
        assert_eq!(r.column(1), vec![0.5, 0.1, 0.9]);

        assert!(m.without_objective(3).is_none());
        let single = SampleMatrix::try_new(&[vec![1.0], vec![2.0]]).unwrap();
        assert!(single.without_objective(0).is_none());
    }

    #[test]
    fn select_objectives_reorders_and_checks_bounds() {
        let m = SampleMatrix::try_new(&rows()).unwrap();
        let p = m.select_objectives(&[2, 0]).unwrap();
        assert_eq!(p.sample(0), &[0.5, 1.0]);
        assert!(matches!(
            m.select_objectives(&[0, 7]),
            Err(ReductionError::DimensionMismatch { found: 7, .. })
        ));
        assert!(m.select_objectives(&[]).is_err());
    }

    #[test]
    fn column_stats_detects_constant_columns() {
        let stats = ColumnStats::from_values(&[4.0, 4.0, 4.0]);
        assert!(stats.is_constant());
        assert_eq!(stats.min, 4.0);

        let stats = ColumnStats::from_values(&[1.0, 3.0]);
        assert!(!stats.is_constant());
        assert!((stats.mean - 2.0).abs() < 1e-12);
        assert!((stats.std - 1.0).abs() < 1e-12);

        assert!(ColumnStats::from_values(&[0.0, 0.0]).is_constant());
    }

    #[test]
    fn tiny_magnitude_column_is_not_constant() {
        let tiny = ColumnStats::from_values(&[1e-13, 3e-13, 2e-13, 4e-13]);
        assert!(!tiny.is_constant());

        let scaled = ColumnStats::from_values(&[1.0, 3.0, 2.0, 4.0]);
        assert!(!scaled.is_constant());
        assert!((tiny.std * 1e13 - scaled.std).abs() < 1e-9);
    }
}
