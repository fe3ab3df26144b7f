//! Repositioning offset.
//!
//! Computes the translation that lifts a model so that no coordinate lies
//! below a per-axis threshold.

use nalgebra::Vector3;
use stl_types::MinCorner;
use tracing::debug;

/// Default per-axis threshold.
pub const DEFAULT_MIN_POSITION: f64 = 0.01;

/// Configuration for [`reposition_offset`].
#[derive(Debug, Clone)]
pub struct RepositionParams {
    /// Lowest allowed coordinate on each axis.
    ///
    /// Default: `(0.01, 0.01, 0.01)`
    pub min_position: Vector3<f64>,

    /// Move every axis so its minimum lands exactly on the threshold, even
    /// when it is already above.
    ///
    /// Default: `false`
    pub force: bool,
}

impl Default for RepositionParams {
    fn default() -> Self {
        Self {
            min_position: Vector3::repeat(DEFAULT_MIN_POSITION),
            force: false,
        }
    }
}

impl RepositionParams {
    /// Set the per-axis threshold.
    #[must_use]
    pub fn with_min_position(mut self, min_position: Vector3<f64>) -> Self {
        self.min_position = min_position;
        self
    }

    /// Set force mode.
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Offset to add to every vertex.
///
/// Per axis: `threshold - min` when forced or when `min < threshold`,
/// otherwise 0. An axis with no vertices (`min = +inf`) is never moved.
///
/// A shifted axis satisfies `min + offset >= threshold` exactly in `f64`;
/// the offset is raised by an ulp where rounding would land below.
///
/// # Example
///
/// ```
/// use stl_repair::{reposition_offset, RepositionParams};
/// use stl_types::{MinCorner, Point3, Vector3};
///
/// let mut min = MinCorner::empty();
/// min.include(&Point3::new(-1.0, -1.0, 0.0));
///
/// let params = RepositionParams::default().with_min_position(Vector3::zeros());
/// assert_eq!(reposition_offset(&min, &params), Vector3::new(1.0, 1.0, 0.0));
/// ```
#[must_use]
pub fn reposition_offset(min_corner: &MinCorner, params: &RepositionParams) -> Vector3<f64> {
    let offset = Vector3::from_fn(|axis, _| {
        let min = min_corner.axis(axis);
        let threshold = params.min_position[axis];
        if min.is_finite() && (params.force || min < threshold) {
            let mut shift = threshold - min;
            while min + shift < threshold {
                shift = next_up(shift);
            }
            shift
        } else {
            0.0
        }
    });
    debug!(
        "Reposition offset [{}, {}, {}] (force: {})",
        offset.x, offset.y, offset.z, params.force
    );
    offset
}

/// Smallest `f64` greater than a finite `value`.
fn next_up(value: f64) -> f64 {
    if value == 0.0 {
        return f64::from_bits(1);
    }
    let bits = value.to_bits();
    if value > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}
