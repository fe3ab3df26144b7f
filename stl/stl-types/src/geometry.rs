//! Geometry kernel.
//!
//! Pure vector functions used to validate and correct facets. Vertices are
//! [`Point3`] values and directions are [`Vector3`] values; every function
//! here is free of side effects.
//!
//! The normal stored in an STL file is never trusted. Normals are always
//! recomputed from the vertex positions with [`recompute_normal`].

use nalgebra::{Point3, Vector3};

/// Dot product of two vectors.
#[inline]
#[must_use]
pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b)
}

/// Cross product of two vectors (right-hand rule).
#[inline]
#[must_use]
pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

/// Euclidean length of a vector. Never negative.
#[inline]
#[must_use]
pub fn magnitude(v: &Vector3<f64>) -> f64 {
    v.norm()
}

/// Scale a vector to unit length.
///
/// Returns the zero vector when the magnitude is zero instead of dividing by zero.
///
/// # Example
///
/// ```
/// use stl_types::{geometry::normalize, Vector3};
///
/// let n = normalize(&Vector3::new(0.0, 3.0, 4.0));
/// assert!((n.y - 0.6).abs() < 1e-12);
/// assert!((n.z - 0.8).abs() < 1e-12);
///
/// assert_eq!(normalize(&Vector3::zeros()), Vector3::zeros());
/// ```
#[must_use]
pub fn normalize(v: &Vector3<f64>) -> Vector3<f64> {
    let len = magnitude(v);
    if len == 0.0 {
        return Vector3::zeros();
    }
    v / len
}

/// Unnormalized winding vector `(v2 - v1) x (v3 - v1)`.
#[inline]
fn winding_vector(v1: &Point3<f64>, v2: &Point3<f64>, v3: &Point3<f64>) -> Vector3<f64> {
    cross(&(v2 - v1), &(v3 - v1))
}

/// Recompute the unit normal of a triangle from its vertices.
///
/// The result depends only on the three positions. Degenerate triangles
/// (collinear or coincident vertices) yield the zero vector.
///
/// # Example
///
/// ```
/// use stl_types::{geometry::recompute_normal, Point3};
///
/// let n = recompute_normal(
///     &Point3::new(0.0, 0.0, 0.0),
///     &Point3::new(1.0, 0.0, 0.0),
///     &Point3::new(0.0, 1.0, 0.0),
/// );
/// assert!((n.z - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn recompute_normal(v1: &Point3<f64>, v2: &Point3<f64>, v3: &Point3<f64>) -> Vector3<f64> {
    normalize(&winding_vector(v1, v2, v3))
}

/// Check whether the vertices wind counter-clockwise around `normal`.
///
/// True iff `dot((v2 - v1) x (v3 - v1), normal) > 0`. Degenerate triangles are
/// never counter-clockwise.
#[must_use]
pub fn is_counterclockwise(
    v1: &Point3<f64>,
    v2: &Point3<f64>,
    v3: &Point3<f64>,
    normal: &Vector3<f64>,
) -> bool {
    dot(&winding_vector(v1, v2, v3), normal) > 0.0
}

/// Reorder vertices so they wind counter-clockwise around `normal`.
///
/// Returns the vertices unchanged when the winding already agrees with the
/// normal (dot product `>= 0`), otherwise swaps the last two. Applying it to
/// its own output is a no-op.
///
/// # Example
///
/// ```
/// use stl_types::{geometry::ensure_counterclockwise, Point3, Vector3};
///
/// let a = Point3::new(0.0, 0.0, 0.0);
/// let b = Point3::new(1.0, 0.0, 0.0);
/// let c = Point3::new(0.0, 1.0, 0.0);
/// let down = Vector3::new(0.0, 0.0, -1.0);
///
/// assert_eq!(ensure_counterclockwise(a, b, c, &down), [a, c, b]);
/// assert_eq!(ensure_counterclockwise(a, c, b, &down), [a, c, b]);
/// ```
#[must_use]
pub fn ensure_counterclockwise(
    v1: Point3<f64>,
    v2: Point3<f64>,
    v3: Point3<f64>,
    normal: &Vector3<f64>,
) -> [Point3<f64>; 3] {
    if dot(&winding_vector(&v1, &v2, &v3), normal) < 0.0 {
        [v1, v3, v2]
    } else {
        [v1, v2, v3]
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        let z = cross(&Vector3::x(), &Vector3::y());
        assert_eq!(z, Vector3::z());
    }

    #[test]
    fn magnitude_is_non_negative() {
        assert_eq!(magnitude(&Vector3::new(-3.0, 0.0, -4.0)), 5.0);
        assert_eq!(magnitude(&Vector3::zeros()), 0.0);
    }

    #[test]
    fn normalize_zero_vector_is_zero() {
        let n = normalize(&Vector3::zeros());
        assert_eq!(n, Vector3::zeros());
        assert!(n.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn recompute_normal_of_degenerate_triangle_is_zero() {
        let n = recompute_normal(&p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), &p(2.0, 0.0, 0.0));
        assert_eq!(n, Vector3::zeros());
    }

    #[test]
    fn recompute_normal_reversed_winding_flips() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(1.0, 0.0, 0.0);
        let c = p(0.0, 1.0, 0.0);
        assert_eq!(recompute_normal(&a, &b, &c), -recompute_normal(&a, &c, &b));
    }

    #[test]
    fn counterclockwise_detection() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(1.0, 0.0, 0.0);
        let c = p(0.0, 1.0, 0.0);
        assert!(is_counterclockwise(&a, &b, &c, &Vector3::z()));
        assert!(!is_counterclockwise(&a, &c, &b, &Vector3::z()));
        // Perpendicular normal is neither.
        assert!(!is_counterclockwise(&a, &b, &c, &Vector3::x()));
    }

    #[test]
    fn recomputed_normal_is_counterclockwise_for_non_degenerate() {
        let a = p(0.3, -1.0, 2.0);
        let b = p(4.0, 0.5, -1.0);
        let c = p(-2.0, 3.0, 0.25);
        let n = recompute_normal(&a, &b, &c);
        assert!(is_counterclockwise(&a, &b, &c, &n));
    }

    #[test]
    fn ensure_counterclockwise_keeps_agreeing_order() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(1.0, 0.0, 0.0);
        let c = p(0.0, 1.0, 0.0);
        assert_eq!(ensure_counterclockwise(a, b, c, &Vector3::z()), [a, b, c]);
    }

    #[test]
    fn ensure_counterclockwise_swaps_last_two() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(1.0, 0.0, 0.0);
        let c = p(0.0, 1.0, 0.0);
        assert_eq!(ensure_counterclockwise(a, c, b, &Vector3::z()), [a, b, c]);
    }

    #[test]
    fn ensure_counterclockwise_zero_normal_is_unchanged() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(1.0, 0.0, 0.0);
        let c = p(0.0, 1.0, 0.0);
        assert_eq!(ensure_counterclockwise(a, c, b, &Vector3::zeros()), [a, c, b]);
    }
}
