//! # Pattern Blending
//!
//! Combines several layouts into one hybrid layout.
//!
//! Cells are blended by weighted interpolation and pathway sets are merged by
//! union. Blending is deterministic and never mutates its inputs. Blended cell
//! values are intensities, not cluster identifiers.

use crate::utils::{normalize_weights, round_cell};
use crate::{LayoutError, LayoutPatternResult, LayoutResult, PathwaySet};

/// Blends layout patterns with weighted cell interpolation.
#[derive(Debug, Clone, Default)]
pub struct PatternBlender;

impl PatternBlender {
    /// Creates a new blender.
    pub fn new() -> Self {
        Self
    }

    /// Blends `patterns` using `weights`.
    ///
    /// Weights are normalized to sum to 1, so only their ratios matter. Each
    /// output cell is the weighted sum of the input cells rounded to the
    /// nearest integer, halves rounding up. Pathways are the union of all
    /// inputs' pathways in order of first appearance.
    ///
    /// Fails with [`LayoutError::InvalidArgument`] when `patterns` is empty,
    /// when the two slices differ in length, when weights are negative,
    /// non-finite or all zero, or when the grids differ in size.
    ///
    /// # Examples
    ///
    /// ```
    /// use hamlet::{LayoutPatternResult, PathwaySet, PatternBlender};
    ///
    /// let a = LayoutPatternResult::new(vec![vec![0, 1], vec![1, 0]], PathwaySet::new(), "a");
    /// let b = LayoutPatternResult::new(vec![vec![2, 0], vec![0, 2]], PathwaySet::new(), "b");
    ///
    /// let blended = PatternBlender::new().blend(&[a, b], &[1.0, 1.0]).unwrap();
    /// assert_eq!(blended.grid, vec![vec![1, 1], vec![1, 1]]);
    /// ```
    pub fn blend(
        &self,
        patterns: &[LayoutPatternResult],
        weights: &[f64],
    ) -> LayoutResult<LayoutPatternResult> {
        let first = patterns
            .first()
            .ok_or_else(|| LayoutError::InvalidArgument("No patterns to blend".to_string()))?;

        if patterns.len() != weights.len() {
            return Err(LayoutError::InvalidArgument(
                "Patterns and weights must have the same length".to_string(),
            ));
        }

        let weights = normalize_weights(weights)?;
        let side = first.grid.len();
        Self::check_shapes(patterns, side)?;

        let grid = Self::blend_grids(patterns, &weights, side);
        let pathways = Self::merge_pathways(patterns);
        let description = format!("Blended pattern from {} patterns", patterns.len());

        log::info!(
            "Blended {} patterns into a {}x{} grid with {} pathway points",
            patterns.len(),
            side,
            side,
            pathways.len()
        );

        Ok(LayoutPatternResult::new(grid, pathways, description))
    }

    /// Rejects inputs that are not square grids of the first pattern's side.
    fn check_shapes(patterns: &[LayoutPatternResult], side: usize) -> LayoutResult<()> {
        for (index, pattern) in patterns.iter().enumerate() {
            if let Some(reason) = pattern.invariant_violation() {
                return Err(LayoutError::InvalidArgument(format!(
                    "Pattern {} is malformed: {}",
                    index, reason
                )));
            }

            if pattern.grid.len() != side {
                return Err(LayoutError::InvalidArgument(format!(
                    "Pattern {} has a {}x{} grid, expected {}x{}",
                    index,
                    pattern.grid.len(),
                    pattern.grid.len(),
                    side,
                    side
                )));
            }
        }

        Ok(())
    }

    /// Weighted, rounded sum of every cell across all patterns.
    fn blend_grids(patterns: &[LayoutPatternResult], weights: &[f64], side: usize) -> Vec<Vec<u32>> {
        (0..side)
            .map(|y| {
                (0..side)
                    .map(|x| {
                        let value: f64 = patterns
                            .iter()
                            .zip(weights)
                            .map(|(pattern, weight)| f64::from(pattern.grid[y][x]) * weight)
                            .sum();
                        round_cell(value)
                    })
                    .collect()
            })
            .collect()
    }

    /// Union of all pathway sets, first occurrence wins.
    fn merge_pathways(patterns: &[LayoutPatternResult]) -> PathwaySet {
        patterns
            .iter()
            .flat_map(|pattern| pattern.pathways.iter().copied())
            .collect()
    }
}

/// Blends layouts with a default [`PatternBlender`].
pub fn blend(patterns: &[LayoutPatternResult], weights: &[f64]) -> LayoutResult<LayoutPatternResult> {
    PatternBlender::new().blend(patterns, weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PathwayKind, PathwayPoint};

    fn pattern(grid: Vec<Vec<u32>>, pathways: Vec<PathwayPoint>) -> LayoutPatternResult {
        LayoutPatternResult::new(grid, pathways.into(), "test pattern")
    }

    fn main_point(x: u32, y: u32) -> PathwayPoint {
        PathwayPoint::new(x, y, PathwayKind::Main)
    }

    fn organic(x: u32, y: u32) -> PathwayPoint {
        PathwayPoint::new(x, y, PathwayKind::Organic)
    }

    #[test]
    fn test_blend_two_by_two_example() {
        let a = pattern(vec![vec![0, 1], vec![1, 0]], vec![]);
        let b = pattern(vec![vec![2, 0], vec![0, 2]], vec![]);

        let blended = blend(&[a, b], &[1.0, 1.0]).unwrap();
        assert_eq!(blended.grid, vec![vec![1, 1], vec![1, 1]]);
    }

    #[test]
    fn test_blend_weight_scale_invariance() {
        let a = pattern(vec![vec![0, 3], vec![5, 1]], vec![main_point(0, 0)]);
        let b = pattern(vec![vec![4, 0], vec![1, 2]], vec![organic(1, 1)]);
        let patterns = [a, b];

        let unit = blend(&patterns, &[1.0, 1.0]).unwrap();
        let scaled = blend(&patterns, &[10.0, 10.0]).unwrap();
        assert_eq!(unit, scaled);
    }

    #[test]
    fn test_blend_huge_equal_weights_match_unit_weights() {
        let a = pattern(vec![vec![0]], vec![]);
        let b = pattern(vec![vec![2]], vec![]);
        let patterns = [a, b];

        let unit = blend(&patterns, &[1.0, 1.0]).unwrap();
        let huge = blend(&patterns, &[1e308, 1e308]).unwrap();
        assert_eq!(unit.grid, vec![vec![1]]);
        assert_eq!(unit, huge);
    }

    #[test]
    fn test_blend_large_intensities_ignore_weight_scale() {
        for (count, base) in [(6, 1_000_000_000u32), (10, 123_456_789)] {
            let patterns: Vec<_> = (0..count)
                .map(|i| pattern(vec![vec![if i % 2 == 0 { base } else { base + 1 }]], vec![]))
                .collect();
            let unit = blend(&patterns, &vec![1.0; count]).unwrap();

            for scale in [0.1, 0.001, 7.0, 1e-200] {
                let scaled = blend(&patterns, &vec![scale; count]).unwrap();
                assert_eq!(unit.grid, scaled.grid, "count {} scale {}", count, scale);
            }
        }
    }

    #[test]
    fn test_blend_uneven_weights() {
        let a = pattern(vec![vec![4]], vec![]);
        let b = pattern(vec![vec![0]], vec![]);

        // 4 * 0.75 = 3
        let blended = blend(&[a.clone(), b.clone()], &[3.0, 1.0]).unwrap();
        assert_eq!(blended.grid, vec![vec![3]]);

        // 4 * 0.25 = 1
        let blended = blend(&[a, b], &[1.0, 3.0]).unwrap();
        assert_eq!(blended.grid, vec![vec![1]]);
    }

    #[test]
    fn test_blend_identity() {
        let a = pattern(
            vec![vec![0, 2, 2], vec![1, 0, 2], vec![1, 1, 0]],
            vec![main_point(0, 0), organic(2, 2), main_point(1, 1)],
        );

        let blended = blend(std::slice::from_ref(&a), &[1.0]).unwrap();
        assert_eq!(blended.grid, a.grid);
        assert_eq!(blended.pathways, a.pathways);
    }

    #[test]
    fn test_blend_merges_pathways_in_first_seen_order() {
        let a = pattern(vec![vec![0, 0], vec![0, 0]], vec![main_point(0, 0), main_point(1, 0)]);
        let b = pattern(
            vec![vec![0, 0], vec![0, 0]],
            vec![main_point(1, 0), organic(1, 0), main_point(0, 1)],
        );

        let blended = blend(&[a, b], &[1.0, 1.0]).unwrap();
        assert_eq!(
            blended.pathways.as_slice(),
            &[main_point(0, 0), main_point(1, 0), organic(1, 0), main_point(0, 1)]
        );
    }

    #[test]
    fn test_blend_does_not_mutate_inputs() {
        let a = pattern(vec![vec![1, 0], vec![0, 1]], vec![main_point(0, 0)]);
        let b = pattern(vec![vec![3, 3], vec![3, 3]], vec![main_point(0, 0)]);
        let before = (a.clone(), b.clone());
        let patterns = [a, b];

        let _ = blend(&patterns, &[2.0, 1.0]).unwrap();
        assert_eq!(patterns[0], before.0);
        assert_eq!(patterns[1], before.1);
    }

    #[test]
    fn test_blend_description_counts_patterns() {
        let a = pattern(vec![vec![1]], vec![]);
        let blended = blend(&[a.clone(), a.clone(), a], &[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(blended.description, "Blended pattern from 3 patterns");
    }

    #[test]
    fn test_blend_argument_errors() {
        let a = pattern(vec![vec![1]], vec![]);

        match blend(&[], &[]) {
            Err(LayoutError::InvalidArgument(msg)) => assert_eq!(msg, "No patterns to blend"),
            other => panic!("expected argument error, got {:?}", other),
        }

        match blend(std::slice::from_ref(&a), &[1.0, 2.0]) {
            Err(LayoutError::InvalidArgument(msg)) => {
                assert_eq!(msg, "Patterns and weights must have the same length")
            }
            other => panic!("expected argument error, got {:?}", other),
        }

        assert!(matches!(
            blend(std::slice::from_ref(&a), &[-1.0]),
            Err(LayoutError::InvalidArgument(_))
        ));
        assert!(matches!(
            blend(std::slice::from_ref(&a), &[0.0]),
            Err(LayoutError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_blend_rejects_mismatched_sides() {
        let small = pattern(vec![vec![1]], vec![]);
        let large = pattern(vec![vec![1, 1], vec![1, 1]], vec![]);

        assert!(matches!(
            blend(&[small, large], &[1.0, 1.0]),
            Err(LayoutError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_blend_rejects_ragged_grid() {
        let good = pattern(vec![vec![1, 1], vec![1, 1]], vec![]);
        let ragged = pattern(vec![vec![1, 1], vec![1]], vec![]);

        assert!(matches!(
            blend(&[good, ragged], &[1.0, 1.0]),
            Err(LayoutError::InvalidArgument(_))
        ));
    }
}
