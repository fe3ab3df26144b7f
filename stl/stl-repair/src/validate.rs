//! Manifold check.

use std::collections::BTreeMap;

use stl_types::Facet;

use crate::adjacency::FacetAdjacency;

/// Edge-usage report for a facet set.
///
/// A facet set is manifold when every edge is used by exactly two facets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifoldReport {
    /// Number of facets checked.
    pub facet_count: usize,
    /// Number of distinct edges.
    pub edge_count: usize,
    /// Edges used by a single facet.
    pub open_edge_count: usize,
    /// Edges used by more than two facets.
    pub overused_edge_count: usize,
    /// Facets-per-edge histogram.
    pub usage_histogram: BTreeMap<usize, usize>,
}

impl ManifoldReport {
    /// True iff every edge is used exactly twice.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.open_edge_count == 0 && self.overused_edge_count == 0
    }
}

impl std::fmt::Display for ManifoldReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} facets, {} edges: ",
            self.facet_count, self.edge_count
        )?;
        if self.is_manifold() {
            write!(f, "manifold")
        } else {
            write!(
                f,
                "not manifold ({} open edges, {} edges shared by more than two facets)",
                self.open_edge_count, self.overused_edge_count
            )
        }
    }
}

/// Build a [`ManifoldReport`] for `facets`.
///
/// # Example
///
/// ```
/// use stl_repair::check_manifold;
/// use stl_types::{Facet, Point3};
///
/// let facet = Facet::from_vertices(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// let report = check_manifold(&[facet]);
/// assert!(!report.is_manifold());
/// assert_eq!(report.open_edge_count, 3);
/// ```
#[must_use]
pub fn check_manifold(facets: &[Facet]) -> ManifoldReport {
    let adjacency = FacetAdjacency::build(facets);
    ManifoldReport {
        facet_count: facets.len(),
        edge_count: adjacency.edge_count(),
        open_edge_count: adjacency.open_edge_count(),
        overused_edge_count: adjacency.non_manifold_edge_count(),
        usage_histogram: adjacency.usage_histogram(),
    }
}

/// True iff every edge of `facets` is used by exactly two facets.
#[must_use]
pub fn is_manifold(facets: &[Facet]) -> bool {
    FacetAdjacency::build(facets).is_manifold()
}
