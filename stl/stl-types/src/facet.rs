//! Facet type: one STL triangle record.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry;

/// A triangle as stored in an STL file: a normal plus three vertices.
///
/// Facets read by the codecs always carry the recomputed normal, never the
/// value found in the source file. Winding is **counter-clockwise** with
/// respect to the normal once [`Facet::with_counterclockwise_winding`] has
/// been applied.
///
/// # Example
///
/// ```
/// use stl_types::{Facet, Point3};
///
/// let facet = Facet::from_vertices(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!(facet.is_counterclockwise());
/// assert!((facet.normal.z - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Facet {
    /// Unit normal (or zero for degenerate facets).
    pub normal: Vector3<f64>,
    /// The three corners in file order.
    pub vertices: [Point3<f64>; 3],
}

impl Facet {
    /// Create a facet from an explicit normal and vertices.
    ///
    /// The normal is stored as given.
    #[inline]
    #[must_use]
    pub const fn new(normal: Vector3<f64>, vertices: [Point3<f64>; 3]) -> Self {
        Self { normal, vertices }
    }

    /// Create a facet whose normal is recomputed from its vertices.
    #[must_use]
    pub fn from_vertices(v1: Point3<f64>, v2: Point3<f64>, v3: Point3<f64>) -> Self {
        Self {
            normal: geometry::recompute_normal(&v1, &v2, &v3),
            vertices: [v1, v2, v3],
        }
    }

    /// Normal recomputed from the current vertex positions.
    #[must_use]
    pub fn computed_normal(&self) -> Vector3<f64> {
        let [v1, v2, v3] = &self.vertices;
        geometry::recompute_normal(v1, v2, v3)
    }

    /// Replace the stored normal with the recomputed one.
    pub fn recompute_normal(&mut self) {
        self.normal = self.computed_normal();
    }

    /// Whether the vertices wind counter-clockwise around the stored normal.
    #[must_use]
    pub fn is_counterclockwise(&self) -> bool {
        let [v1, v2, v3] = &self.vertices;
        geometry::is_counterclockwise(v1, v2, v3, &self.normal)
    }

    /// Copy of this facet with its last two vertices swapped if the winding
    /// disagrees with the stored normal.
    ///
    /// # Example
    ///
    /// ```
    /// use stl_types::{Facet, Point3, Vector3};
    ///
    /// let a = Point3::new(0.0, 0.0, 0.0);
    /// let b = Point3::new(1.0, 0.0, 0.0);
    /// let c = Point3::new(0.0, 1.0, 0.0);
    ///
    /// let flipped = Facet::new(Vector3::z(), [a, c, b]);
    /// assert_eq!(flipped.with_counterclockwise_winding().vertices, [a, b, c]);
    /// ```
    #[must_use]
    pub fn with_counterclockwise_winding(&self) -> Self {
        let [v1, v2, v3] = self.vertices;
        Self {
            normal: self.normal,
            vertices: geometry::ensure_counterclockwise(v1, v2, v3, &self.normal),
        }
    }

    /// Copy of this facet with every vertex moved by `offset`.
    ///
    /// The normal is unaffected by a translation.
    #[must_use]
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self {
            normal: self.normal,
            vertices: self.vertices.map(|v| v + offset),
        }
    }

    /// Whether any vertex coordinate is strictly negative.
    #[must_use]
    pub fn has_negative_coordinate(&self) -> bool {
        self.vertices
            .iter()
            .any(|v| v.iter().any(|&c| c < 0.0))
    }

    /// Iterate over the three vertex positions.
    pub fn vertices(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.vertices.iter()
    }
}
