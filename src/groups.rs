//! Correlated-group discovery.
//!
//! Every objective anchors a group made of itself plus every objective whose
//! absolute similarity with it reaches the threshold. A group is kept unless an
//! earlier group has exactly the same members. Groups therefore describe
//! distinct anchor patterns, not a partition: with a chain `a ~ b ~ c` where
//! `a` and `c` are not similar, `b` appears in three groups.

use std::collections::BTreeSet;

use crate::error::{ReductionError, Result};
use crate::similarity::SimilarityMatrix;

/// A set of objectives considered redundant with their anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGroup"))]
pub struct CorrelatedGroup {
    anchor: usize,
    /// Sorted ascending, anchor included.
    members: Vec<usize>,
}

impl CorrelatedGroup {
    /// Build a group from any member order. Duplicates are dropped.
    ///
    /// # Errors
    ///
    /// [`ReductionError::InvalidConfiguration`] if `anchor` is not a member.
    pub fn try_new(anchor: usize, mut members: Vec<usize>) -> Result<Self> {
        members.sort_unstable();
        members.dedup();
        if members.binary_search(&anchor).is_err() {
            return Err(ReductionError::InvalidConfiguration {
                name: "anchor",
                message: "must be one of the group members",
            });
        }
        Ok(Self { anchor, members })
    }

    /// The objective whose row produced this group.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Groups always contain their anchor.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, objective: usize) -> bool {
        self.members.binary_search(&objective).is_ok()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGroup {
    anchor: usize,
    members: Vec<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGroup> for CorrelatedGroup {
    type Error = ReductionError;

    fn try_from(raw: RawGroup) -> Result<Self> {
        Self::try_new(raw.anchor, raw.members)
    }
}

/// Anchor-centric correlated groups.
///
/// A negative correlation is as informative as a positive one, so the test is
/// on `|S[i][j]|`.
///
/// # Errors
///
/// [`ReductionError::InvalidConfiguration`] if `threshold` is negative or not
/// finite. Thresholds above 1 are allowed and produce only singletons.
///
/// # Example
///
/// ```
/// use cull::{find_groups, SimilarityMatrix};
///
/// let s = SimilarityMatrix::from_row_major(3, vec![
///     1.0, 0.9, 0.1,
///     0.9, 1.0, 0.2,
///     0.1, 0.2, 1.0,
/// ]).unwrap();
///
/// let groups = find_groups(&s, 0.5).unwrap();
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].members(), &[0, 1]);
/// assert_eq!(groups[1].members(), &[2]);
/// ```
pub fn find_groups(similarity: &SimilarityMatrix, threshold: f64) -> Result<Vec<CorrelatedGroup>> {
    validate_correlation_threshold(threshold)?;

    let n = similarity.dim();
    let mut groups: Vec<CorrelatedGroup> = Vec::new();
    for anchor in 0..n {
        let members: Vec<usize> = similarity
            .row(anchor)
            .iter()
            .enumerate()
            .filter(|&(j, &s)| j == anchor || s.abs() >= threshold)
            .map(|(j, _)| j)
            .collect();

        if groups.iter().any(|g| g.members == members) {
            continue;
        }
        groups.push(CorrelatedGroup { anchor, members });
    }
    Ok(groups)
}

/// Objectives that appear in more than one group, ascending.
pub fn overlapping_objectives(groups: &[CorrelatedGroup]) -> Vec<usize> {
    let mut seen = BTreeSet::new();
    let mut repeated = BTreeSet::new();
    for g in groups {
        for &m in &g.members {
            if !seen.insert(m) {
                repeated.insert(m);
            }
        }
    }
    repeated.into_iter().collect()
}

pub(crate) fn validate_correlation_threshold(threshold: f64) -> Result<()> {
    if !(threshold.is_finite() && threshold >= 0.0) {
        return Err(ReductionError::InvalidConfiguration {
            name: "correlation_threshold",
            message: "must be finite and >= 0",
        });
    }
    Ok(())
}
