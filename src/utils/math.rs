//! # Layout Mathematics
//!
//! Weight normalization and cell rounding used when blending layouts.

use crate::{LayoutError, LayoutResult};

/// Scales weights so they sum to 1, keeping their ratios.
///
/// Weights must be finite and non-negative with a positive total. Each weight
/// is first divided by the largest one, so equal weights normalize to the same
/// values whatever their magnitude and the total never overflows.
///
/// # Examples
///
/// ```
/// use hamlet::utils::normalize_weights;
///
/// let weights = normalize_weights(&[10.0, 30.0]).unwrap();
/// assert_eq!(weights, vec![0.25, 0.75]);
/// assert!(normalize_weights(&[0.0, 0.0]).is_err());
/// ```
pub fn normalize_weights(weights: &[f64]) -> LayoutResult<Vec<f64>> {
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(LayoutError::InvalidArgument(format!(
            "Weights must be finite and non-negative, got {}",
            bad
        )));
    }

    let largest = weights.iter().copied().fold(0.0, f64::max);
    if largest <= 0.0 {
        return Err(LayoutError::InvalidArgument(
            "Weights must have a positive sum".to_string(),
        ));
    }

    let relative: Vec<f64> = weights.iter().map(|w| w / largest).collect();
    let total: f64 = relative.iter().sum();

    Ok(relative.into_iter().map(|w| w / total).collect())
}

/// Relative slack added before rounding; absorbs summation error at halves.
pub const CELL_ROUNDING_TOLERANCE: f64 = 1e-12;

/// Rounds a blended cell value to the nearest integer, halves rounding up.
pub fn round_cell(value: f64) -> u32 {
    let rounded = (value + value.abs() * CELL_ROUNDING_TOLERANCE).round();
    if rounded <= 0.0 {
        0
    } else if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}
