//! Representative selection.
//!
//! Row `i` of the eigenvector matrix holds the loadings of objective `i` on
//! each principal component. An objective whose loadings are spread unevenly
//! (high on a few components, low on the rest) is tied to specific directions
//! of variation; one with flat loadings is not. The importance of an objective
//! is therefore the variance of its loadings over the relevant components, and
//! each group is represented by the member with the highest importance.
//!
//! Scores are computed per member. Aggregating the group's loadings into a
//! single number before taking the arg-max would always elect the first member.

use crate::error::{ReductionError, Result};
use crate::groups::CorrelatedGroup;
use crate::spectral::SpectralDecomposition;

/// Which principal components count when scoring objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentScope {
    /// Every component of the decomposition.
    #[default]
    All,
    /// Only the components reported by variance analysis.
    ///
    /// When a single component is significant every loading variance is 0,
    /// so each group falls back to its first member.
    Significant,
}

/// Population variance of `objective`'s loadings over `components`.
///
/// Zero for fewer than two components.
pub fn loading_variance(
    decomposition: &SpectralDecomposition,
    objective: usize,
    components: &[usize],
) -> f64 {
    if components.len() < 2 {
        return 0.0;
    }
    let n = components.len() as f64;
    let loadings: Vec<f64> = components
        .iter()
        .map(|&c| decomposition.loading(objective, c))
        .collect();
    let mean = loadings.iter().sum::<f64>() / n;
    loadings.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

/// One representative per group, in group order.
///
/// The representative is the member with the largest [`loading_variance`];
/// ties keep the earliest member in ascending index order.
///
/// # Errors
///
/// [`ReductionError::DimensionMismatch`] if a group member or component index
/// is outside the decomposition.
pub fn select_representatives(
    groups: &[CorrelatedGroup],
    decomposition: &SpectralDecomposition,
    components: &[usize],
) -> Result<Vec<usize>> {
    let dim = decomposition.dim();
    if let Some(&bad) = components.iter().find(|&&c| c >= dim) {
        return Err(ReductionError::DimensionMismatch {
            expected: dim.saturating_sub(1),
            found: bad,
        });
    }

    let mut representatives = Vec::with_capacity(groups.len());
    for group in groups {
        let mut best: Option<(usize, f64)> = None;
        for &member in group.members() {
            if member >= dim {
                return Err(ReductionError::DimensionMismatch {
                    expected: dim.saturating_sub(1),
                    found: member,
                });
            }
            let score = loading_variance(decomposition, member, components);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((member, score)),
            }
        }
        // Groups always hold their anchor.
        if let Some((member, _)) = best {
            representatives.push(member);
        }
    }
    Ok(representatives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::find_groups;
    use crate::similarity::SimilarityMatrix;
    use crate::spectral::decompose;

    fn decomposition(n: usize, values: Vec<f64>) -> SpectralDecomposition {
        decompose(&SimilarityMatrix::from_row_major(n, values).unwrap()).unwrap()
    }

    #[test]
    fn loading_variance_of_axis_aligned_loadings() {
        // Identity: objective i loads 1.0 on exactly one component.
        let d = decomposition(3, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        let all = [0, 1, 2];
        for i in 0..3 {
            // Loadings are a permutation of [1, 0, 0]: variance 2/9.
            assert!((loading_variance(&d, i, &all) - 2.0 / 9.0).abs() < 1e-12);
        }
        assert_eq!(loading_variance(&d, 0, &[0]), 0.0);
        assert_eq!(loading_variance(&d, 0, &[]), 0.0);
    }

    #[test]
    fn picks_member_with_most_concentrated_loadings() {
        // [[3, 1], [1, 2]] block plus an isolated 0.5. Sorted components:
        //   3.618 -> ( 0.851, 0.526, 0)
        //   1.382 -> (-0.526, 0.851, 0)
        //   0.5   -> (0, 0, 1)
        // Loading variances: objective 0 ~ 0.322, objective 1 ~ 0.123, objective 2 = 2/9.
        let d = decomposition(3, vec![3.0, 1.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0, 0.5]);
        let all = [0, 1, 2];
        let scores: Vec<f64> = (0..3).map(|i| loading_variance(&d, i, &all)).collect();
        assert!((scores[0] - 0.3219).abs() < 1e-3, "{scores:?}");
        assert!((scores[1] - 0.1230).abs() < 1e-3, "{scores:?}");
        assert!((scores[2] - 2.0 / 9.0).abs() < 1e-9, "{scores:?}");

        // Groups [0] and [1, 2].
        let grouping = SimilarityMatrix::from_row_major(
            3,
            vec![
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.9, //
                0.0, 0.9, 1.0,
            ],
        )
        .unwrap();
        let groups = find_groups(&grouping, 0.5).unwrap();
        assert_eq!(select_representatives(&groups, &d, &all).unwrap(), vec![0, 2]);

        let everything = find_groups(&grouping, 0.0).unwrap();
        assert_eq!(select_representatives(&everything, &d, &all).unwrap(), vec![0]);
    }

    #[test]
    fn component_scope_changes_the_winner() {
        // Over the two leading components objective 2 loads (0, 0), which has
        // no spread, so objective 1 now wins the group {1, 2}.
        let d = decomposition(3, vec![3.0, 1.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0, 0.5]);
        let grouping = SimilarityMatrix::from_row_major(
            3,
            vec![
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.9, //
                0.0, 0.9, 1.0,
            ],
        )
        .unwrap();
        let groups = find_groups(&grouping, 0.5).unwrap();
        assert_eq!(select_representatives(&groups, &d, &[0, 1]).unwrap(), vec![0, 1]);
    }

    #[test]
    fn ties_keep_first_member() {
        // Identity spectrum: every objective has loadings (1, 0, 0) permuted.
        let d = decomposition(3, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        let groups = find_groups(
            &SimilarityMatrix::from_row_major(3, vec![1.0; 9]).unwrap(),
            0.5,
        )
        .unwrap();
        let reps = select_representatives(&groups, &d, &[0, 1, 2]).unwrap();
        assert_eq!(reps, vec![0]);
    }

    #[test]
    fn one_representative_per_group_and_member_of_it() {
        let s = vec![
            1.0, 0.8, 0.1, 0.0, //
            0.8, 1.0, 0.7, 0.0, //
            0.1, 0.7, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        let d = decomposition(4, s.clone());
        let groups = find_groups(&SimilarityMatrix::from_row_major(4, s).unwrap(), 0.5).unwrap();
        let reps = select_representatives(&groups, &d, &[0, 1, 2, 3]).unwrap();
        assert_eq!(reps.len(), groups.len());
        for (g, r) in groups.iter().zip(&reps) {
            assert!(g.contains(*r), "{r} not in {:?}", g.members());
        }
    }

    #[test]
    fn out_of_range_component_is_rejected() {
        let d = decomposition(2, vec![1.0, 0.0, 0.0, 1.0]);
        assert_eq!(
            select_representatives(&[], &d, &[0, 2]).unwrap_err(),
            ReductionError::DimensionMismatch {
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn out_of_range_member_is_rejected() {
        let small = decomposition(2, vec![1.0, 0.0, 0.0, 1.0]);
        let big = SimilarityMatrix::from_row_major(3, vec![1.0; 9]).unwrap();
        let groups = find_groups(&big, 0.5).unwrap();
        assert!(matches!(
            select_representatives(&groups, &small, &[0, 1]),
            Err(ReductionError::DimensionMismatch { found: 2, .. })
        ));
    }

    #[test]
    fn no_groups_no_representatives() {
        let d = decomposition(1, vec![1.0]);
        assert!(select_representatives(&[], &d, &[0]).unwrap().is_empty());
    }
}
