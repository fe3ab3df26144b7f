//! Edge adjacency for unindexed facet sets.
//!
//! STL stores every triangle with its own copy of the vertex coordinates, so
//! edges are identified by exact coordinate equality rather than by index.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use stl_types::Facet;

/// Exact key for a coordinate triple.
///
/// Two keys are equal iff every component is bit-identical, with `-0.0`
/// folded into `0.0`. Ordering is numeric and lexicographic (x, then y, then
/// z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey([u64; 3]);

impl CoordKey {
    /// Key for a point.
    #[must_use]
    pub fn from_point(p: &Point3<f64>) -> Self {
        Self([canonical_bits(p.x), canonical_bits(p.y), canonical_bits(p.z)])
    }

    /// Key for a vector (used for facet normals).
    #[must_use]
    pub fn from_vector(v: &Vector3<f64>) -> Self {
        Self([canonical_bits(v.x), canonical_bits(v.y), canonical_bits(v.z)])
    }

    /// The coordinates this key was built from.
    #[must_use]
    pub fn point(&self) -> Point3<f64> {
        let [x, y, z] = self.0.map(f64::from_bits);
        Point3::new(x, y, z)
    }
}

impl Ord for CoordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .iter()
            .zip(&other.0)
            .map(|(&a, &b)| f64::from_bits(a).total_cmp(&f64::from_bits(b)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for CoordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[inline]
fn canonical_bits(c: f64) -> u64 {
    // -0.0 == 0.0 must hash the same.
    if c == 0.0 {
        0.0f64.to_bits()
    } else {
        c.to_bits()
    }
}

/// Direction-independent edge key: the two endpoint keys in sorted order.
///
/// # Example
///
/// ```
/// use stl_repair::EdgeKey;
/// use stl_types::Point3;
///
/// let a = Point3::new(0.0, 0.0, 0.0);
/// let b = Point3::new(1.0, 0.0, 0.0);
///
/// assert_eq!(EdgeKey::new(&a, &b), EdgeKey::new(&b, &a));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    low: CoordKey,
    high: CoordKey,
}

impl EdgeKey {
    /// Key for the edge between two points.
    #[must_use]
    pub fn new(a: &Point3<f64>, b: &Point3<f64>) -> Self {
        Self::from_keys(CoordKey::from_point(a), CoordKey::from_point(b))
    }

    /// Key for the edge between two coordinate keys.
    #[must_use]
    pub fn from_keys(a: CoordKey, b: CoordKey) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The smaller endpoint.
    #[must_use]
    pub const fn low(&self) -> CoordKey {
        self.low
    }

    /// The larger endpoint.
    #[must_use]
    pub const fn high(&self) -> CoordKey {
        self.high
    }

    /// The endpoint opposite `vertex`, or `None` if `vertex` is not on the
    /// edge.
    #[must_use]
    pub fn opposite(&self, vertex: CoordKey) -> Option<CoordKey> {
        if self.low == vertex {
            Some(self.high)
        } else if self.high == vertex {
            Some(self.low)
        } else {
            None
        }
    }
}

/// The three edges of a facet, in vertex order.
#[must_use]
pub fn facet_edges(facet: &Facet) -> [EdgeKey; 3] {
    let [v1, v2, v3] = &facet.vertices;
    [EdgeKey::new(v1, v2), EdgeKey::new(v2, v3), EdgeKey::new(v3, v1)]
}

/// Edge-to-facet adjacency for a facet list.
///
/// Edges are remembered in the order they are first met while walking the
/// facets, so every iteration below is deterministic.
///
/// # Example
///
/// ```
/// use stl_repair::FacetAdjacency;
/// use stl_types::{Facet, Point3};
///
/// let facet = Facet::from_vertices(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// let adjacency = FacetAdjacency::build(&[facet]);
///
/// assert_eq!(adjacency.edge_count(), 3);
/// assert_eq!(adjacency.open_edge_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FacetAdjacency {
    edge_to_facets: HashMap<EdgeKey, Vec<usize>>,
    discovery_order: Vec<EdgeKey>,
}

impl FacetAdjacency {
    /// Build adjacency from a list of facets.
    #[must_use]
    pub fn build(facets: &[Facet]) -> Self {
        let mut edge_to_facets: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
        let mut discovery_order = Vec::new();

        for (facet_idx, facet) in facets.iter().enumerate() {
            for edge in facet_edges(facet) {
                edge_to_facets
                    .entry(edge)
                    .or_insert_with(|| {
                        discovery_order.push(edge);
                        Vec::new()
                    })
                    .push(facet_idx);
            }
        }

        Self {
            edge_to_facets,
            discovery_order,
        }
    }

    /// Facets referencing an edge, or `None` if no facet does.
    #[must_use]
    pub fn facets_for_edge(&self, edge: &EdgeKey) -> Option<&[usize]> {
        self.edge_to_facets.get(edge).map(Vec::as_slice)
    }

    /// Number of facet references to an edge (0 if unknown).
    #[must_use]
    pub fn edge_usage(&self, edge: &EdgeKey) -> usize {
        self.edge_to_facets.get(edge).map_or(0, Vec::len)
    }

    /// Every edge in discovery order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.discovery_order.iter().copied()
    }

    /// Edges referenced by exactly one facet, in discovery order.
    pub fn open_edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edges().filter(|edge| self.edge_usage(edge) == 1)
    }

    /// Number of open edges.
    #[must_use]
    pub fn open_edge_count(&self) -> usize {
        self.edge_to_facets
            .values()
            .filter(|facets| facets.len() == 1)
            .count()
    }

    /// Number of edges referenced by more than two facets.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_to_facets
            .values()
            .filter(|facets| facets.len() > 2)
            .count()
    }

    /// Total number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.discovery_order.len()
    }

    /// Map from "facets per edge" to the number of edges with that usage.
    #[must_use]
    pub fn usage_histogram(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for facets in self.edge_to_facets.values() {
            *histogram.entry(facets.len()).or_insert(0) += 1;
        }
        histogram
    }

    /// True iff every edge is shared by exactly two facets.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.edge_to_facets.values().all(|facets| facets.len() == 2)
    }
}
