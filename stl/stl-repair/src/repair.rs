//! Model-level repair pipeline.
//!
//! Closes holes with synthesized patches, then drops exact duplicate facets.

use hashbrown::HashSet;
use stl_types::{Facet, Model};
use tracing::{debug, info};

use crate::adjacency::{CoordKey, FacetAdjacency};
use crate::holes::patch_open_edges;

/// Configuration for [`repair_model`].
///
/// # Example
///
/// ```
/// use stl_repair::RepairParams;
///
/// // Only remove duplicates, leave holes alone.
/// let params = RepairParams::default().with_close_holes(false);
/// assert!(params.remove_duplicates);
/// ```
#[derive(Debug, Clone)]
pub struct RepairParams {
    /// Synthesize patch facets over open edges.
    ///
    /// Default: `true`
    pub close_holes: bool,

    /// Remove facets identical to an earlier facet.
    ///
    /// Default: `true`
    pub remove_duplicates: bool,
}

impl Default for RepairParams {
    fn default() -> Self {
        Self {
            close_holes: true,
            remove_duplicates: true,
        }
    }
}

impl RepairParams {
    /// Set whether holes are closed.
    #[must_use]
    pub fn with_close_holes(mut self, close: bool) -> Self {
        self.close_holes = close;
        self
    }

    /// Set whether duplicate facets are removed.
    #[must_use]
    pub fn with_remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = remove;
        self
    }
}

/// Remove facets whose normal and vertices repeat an earlier facet.
///
/// A facet is compared as the set of its four coordinate triples (normal
/// and three vertices), so vertex order does not matter. The first
/// occurrence is kept and the order of survivors is preserved.
///
/// Returns the number of facets removed.
///
/// # Example
///
/// ```
/// use stl_repair::remove_duplicate_facets;
/// use stl_types::{Facet, Point3};
///
/// let a = Point3::new(0.0, 0.0, 0.0);
/// let b = Point3::new(1.0, 0.0, 0.0);
/// let c = Point3::new(0.0, 1.0, 0.0);
///
/// let original = Facet::from_vertices(a, b, c);
/// let rotated = Facet::new(original.normal, [b, c, a]);
/// let mut facets = vec![original, rotated];
///
/// assert_eq!(remove_duplicate_facets(&mut facets), 1);
/// assert_eq!(facets, vec![original]);
/// ```
pub fn remove_duplicate_facets(facets: &mut Vec<Facet>) -> usize {
    let original_count = facets.len();
    let mut seen: HashSet<Vec<CoordKey>> = HashSet::with_capacity(original_count);

    facets.retain(|facet| seen.insert(facet_key(facet)));

    let removed = original_count - facets.len();
    if removed > 0 {
        debug!("Removed {removed} duplicate facets");
    }
    removed
}

/// Set-of-tuples key for a facet.
fn facet_key(facet: &Facet) -> Vec<CoordKey> {
    let mut key: Vec<CoordKey> = std::iter::once(CoordKey::from_vector(&facet.normal))
        .chain(facet.vertices().map(CoordKey::from_point))
        .collect();
    key.sort_unstable();
    key.dedup();
    key
}

/// Close holes and drop duplicates in `model.facets`.
///
/// The facet list is replaced by the originals (minus duplicates) followed
/// by the patches that survived deduplication.
///
/// # Example
///
/// ```
/// use stl_repair::{repair_model, RepairParams};
/// use stl_types::{Facet, Model, Point3};
///
/// let mut model = Model::from_facets(
///     "tri",
///     vec![Facet::from_vertices(
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     )],
/// );
///
/// let summary = repair_model(&mut model, &RepairParams::default());
/// assert_eq!(summary.open_edges_before, 3);
/// ```
pub fn repair_model(model: &mut Model, params: &RepairParams) -> RepairSummary {
    let initial_facets = model.facet_count();
    let open_edges_before = FacetAdjacency::build(&model.facets).open_edge_count();

    let patches_added = if params.close_holes && open_edges_before > 0 {
        let patches = patch_open_edges(&FacetAdjacency::build(&model.facets));
        let count = patches.len();
        model.facets.extend(patches);
        count
    } else {
        0
    };

    let duplicates_removed = if params.remove_duplicates {
        remove_duplicate_facets(&mut model.facets)
    } else {
        0
    };

    let open_edges_after = FacetAdjacency::build(&model.facets).open_edge_count();

    let summary = RepairSummary {
        initial_facets,
        final_facets: model.facet_count(),
        open_edges_before,
        patches_added,
        duplicates_removed,
        open_edges_after,
    };
    info!("{summary}");
    summary
}

/// Result of [`repair_model`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairSummary {
    /// Number of facets before repair.
    pub initial_facets: usize,
    /// Number of facets after repair.
    pub final_facets: usize,
    /// Open edges found before repair.
    pub open_edges_before: usize,
    /// Patch facets synthesized (before deduplication).
    pub patches_added: usize,
    /// Facets dropped as duplicates.
    pub duplicates_removed: usize,
    /// Open edges remaining after repair.
    pub open_edges_after: usize,
}

impl RepairSummary {
    /// Check if any repairs were performed.
    #[must_use]
    pub fn had_changes(&self) -> bool {
        self.patches_added > 0 || self.duplicates_removed > 0
    }
}

impl std::fmt::Display for RepairSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Repair: {} -> {} facets ({} patches, {} duplicates), open edges {} -> {}",
            self.initial_facets,
            self.final_facets,
            self.patches_added,
            self.duplicates_removed,
            self.open_edges_before,
            self.open_edges_after
        )
    }
}
