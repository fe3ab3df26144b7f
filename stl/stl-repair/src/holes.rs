//! Greedy hole closing.
//!
//! Every open edge (an edge used by a single facet) borders a hole. For each
//! open edge that is still unpatched, the first other unpatched open edge
//! sharing one of its endpoints supplies a third vertex, and the triangle
//! over those three vertices becomes a patch. All open edges covered by a
//! patch are then treated as closed, so a triangular hole gets exactly one
//! patch and a quadrilateral hole exactly two.
//!
//! Candidates are taken in edge discovery order; no attempt is made to pick
//! the geometrically best one. The result is not guaranteed to be manifold
//! for holes with crossing or branching boundaries.
//!
//! # Example
//!
//! ```
//! use stl_repair::holes::close_open_edges;
//! use stl_types::{Facet, Point3};
//!
//! // A tetrahedron with its slanted face missing.
//! let o = Point3::new(0.0, 0.0, 0.0);
//! let x = Point3::new(1.0, 0.0, 0.0);
//! let y = Point3::new(0.0, 1.0, 0.0);
//! let z = Point3::new(0.0, 0.0, 1.0);
//! let facets = vec![
//!     Facet::from_vertices(o, y, x),
//!     Facet::from_vertices(o, x, z),
//!     Facet::from_vertices(o, z, y),
//! ];
//!
//! let patches = close_open_edges(&facets);
//! assert_eq!(patches.len(), 1);
//! ```

use hashbrown::HashSet;
use stl_types::Facet;
use tracing::{debug, info};

use crate::adjacency::{facet_edges, CoordKey, EdgeKey, FacetAdjacency};

/// Synthesize patch facets for the open edges of `facets`.
///
/// Returns only the new facets; the input is not modified.
#[must_use]
pub fn close_open_edges(facets: &[Facet]) -> Vec<Facet> {
    patch_open_edges(&FacetAdjacency::build(facets))
}

/// Synthesize patch facets for the open edges of a prebuilt adjacency.
#[must_use]
pub fn patch_open_edges(adjacency: &FacetAdjacency) -> Vec<Facet> {
    let open: Vec<EdgeKey> = adjacency.open_edges().collect();
    if open.is_empty() {
        return Vec::new();
    }
    debug!("Found {} open edges", open.len());

    let open_set: HashSet<EdgeKey> = open.iter().copied().collect();
    let mut closed: HashSet<EdgeKey> = HashSet::new();
    let mut patches = Vec::new();

    for edge in &open {
        if closed.contains(edge) {
            continue;
        }

        let Some([v1, v2, v3]) = find_patch(edge, &open, &closed) else {
            debug!("No partner for open edge {:?}", edge);
            continue;
        };

        let patch = Facet::from_vertices(v1.point(), v2.point(), v3.point());
        for patch_edge in facet_edges(&patch) {
            if open_set.contains(&patch_edge) {
                closed.insert(patch_edge);
            }
        }
        patches.push(patch);
    }

    info!(
        "Synthesized {} patches for {} open edges ({} left unpatched)",
        patches.len(),
        open.len(),
        open.len() - closed.len()
    );

    patches
}

/// Pick the three patch corners for `edge`.
///
/// The high endpoint is tried as the pivot first, then the low one. The
/// patch runs from the non-pivot endpoint through the pivot to the partner's
/// far end.
fn find_patch(
    edge: &EdgeKey,
    open: &[EdgeKey],
    closed: &HashSet<EdgeKey>,
) -> Option<[CoordKey; 3]> {
    [(edge.low(), edge.high()), (edge.high(), edge.low())]
        .into_iter()
        .find_map(|(start, pivot)| {
            open.iter()
                .filter(|other| *other != edge && !closed.contains(*other))
                .find_map(|other| {
                    other
                        .opposite(pivot)
                        .filter(|&far| far != start && far != pivot)
                })
                .map(|far| [start, pivot, far])
        })
}
