//! Running per-axis minimum.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The smallest coordinate seen on each axis.
///
/// Starts at `+inf` on every axis and shrinks as points are included. The
/// codecs feed every parsed vertex through [`MinCorner::include`]; the
/// repositioning step reads the result.
///
/// # Example
///
/// ```
/// use stl_types::{MinCorner, Point3};
///
/// let mut min = MinCorner::empty();
/// assert!(min.is_empty());
///
/// min.include(&Point3::new(1.0, -2.0, 3.0));
/// min.include(&Point3::new(-1.0, 5.0, 4.0));
/// assert_eq!(min.point(), Point3::new(-1.0, -2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MinCorner {
    min: Point3<f64>,
}

impl MinCorner {
    /// A corner with no points included (`+inf` on every axis).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
        }
    }

    /// Build from an iterator of points.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut corner = Self::empty();
        for point in points {
            corner.include(point);
        }
        corner
    }

    /// Lower each axis to the point's coordinate where it is smaller.
    #[inline]
    pub fn include(&mut self, point: &Point3<f64>) {
        for axis in 0..3 {
            if point[axis] < self.min[axis] {
                self.min[axis] = point[axis];
            }
        }
    }

    /// True while no point has been included.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.iter().all(|c| c.is_infinite() && c.is_sign_positive())
    }

    /// The minimum on one axis (0 = x, 1 = y, 2 = z).
    ///
    /// `+inf` when nothing has been included.
    #[inline]
    #[must_use]
    pub fn axis(&self, axis: usize) -> f64 {
        self.min[axis]
    }

    /// The minimum as a point.
    #[inline]
    #[must_use]
    pub fn point(&self) -> Point3<f64> {
        self.min
    }
}

impl Default for MinCorner {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for MinCorner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.min.x, self.min.y, self.min.z)
    }
}
