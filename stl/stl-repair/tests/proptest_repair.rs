//! Property-based tests for facet repair.
//!
//! These tests use proptest to generate random facet sets and verify
//! invariants of hole closing, deduplication and repositioning.
//!
//! Run with: cargo test -p stl-repair -- proptest

use proptest::prelude::*;
use stl_repair::{
    check_manifold, remove_duplicate_facets, reposition_offset, repair_model, RepairParams,
    RepositionParams,
};
use stl_types::{Facet, MinCorner, Model, Point3, Vector3};

// =============================================================================
// Strategies
// =============================================================================

/// Points on a coarse grid so that random facets share vertices and edges.
fn arb_grid_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-3i32..3).prop_map(|[x, y, z]| {
        Point3::new(f64::from(x), f64::from(y), f64::from(z))
    })
}

fn arb_facets(max: usize) -> impl Strategy<Value = Vec<Facet>> {
    prop::collection::vec(
        (arb_grid_point(), arb_grid_point(), arb_grid_point())
            .prop_map(|(a, b, c)| Facet::from_vertices(a, b, c)),
        0..max,
    )
}

/// Closed icosahedron, 20 facets.
fn icosahedron() -> Vec<Facet> {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let v = [
        Point3::new(-1.0, phi, 0.0),
        Point3::new(1.0, phi, 0.0),
        Point3::new(-1.0, -phi, 0.0),
        Point3::new(1.0, -phi, 0.0),
        Point3::new(0.0, -1.0, phi),
        Point3::new(0.0, 1.0, phi),
        Point3::new(0.0, -1.0, -phi),
        Point3::new(0.0, 1.0, -phi),
        Point3::new(phi, 0.0, -1.0),
        Point3::new(phi, 0.0, 1.0),
        Point3::new(-phi, 0.0, -1.0),
        Point3::new(-phi, 0.0, 1.0),
    ];
    let faces: [[usize; 3]; 20] = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    faces
        .iter()
        .map(|f| Facet::from_vertices(v[f[0]], v[f[1]], v[f[2]]))
        .collect()
}

// =============================================================================
// Property Tests: Hole Closing
// =============================================================================

proptest! {
    /// Removing any single facet from a closed surface is fully repaired.
    #[test]
    fn single_missing_facet_is_closed(missing in 0usize..20) {
        let mut facets = icosahedron();
        facets.remove(missing);
        let mut model = Model::from_facets("ico", facets);

        let summary = repair_model(&mut model, &RepairParams::default());

        prop_assert_eq!(summary.open_edges_before, 3);
        prop_assert_eq!(summary.patches_added, 1);
        prop_assert_eq!(model.facet_count(), 20);

        let report = check_manifold(&model.facets);
        prop_assert!(report.is_manifold(), "{}", report);
    }

    /// Repair never panics and only ever adds patches or drops duplicates.
    #[test]
    fn repair_accounts_for_every_facet(facets in arb_facets(40)) {
        let original = facets.len();
        let mut model = Model::from_facets("random", facets);

        let summary = repair_model(&mut model, &RepairParams::default());

        prop_assert_eq!(
            model.facet_count(),
            original + summary.patches_added - summary.duplicates_removed
        );
        prop_assert_eq!(summary.final_facets, model.facet_count());
    }
}

// =============================================================================
// Property Tests: Deduplication
// =============================================================================

proptest! {
    /// A second deduplication pass finds nothing.
    #[test]
    fn dedup_is_idempotent(facets in arb_facets(40)) {
        let mut facets = facets;
        remove_duplicate_facets(&mut facets);
        prop_assert_eq!(remove_duplicate_facets(&mut facets), 0);
    }

    /// Doubling a facet list and deduplicating restores the original.
    #[test]
    fn dedup_removes_appended_copy(facets in arb_facets(20)) {
        let mut unique = facets;
        remove_duplicate_facets(&mut unique);

        let mut doubled = unique.clone();
        doubled.extend_from_slice(&unique);
        prop_assert_eq!(remove_duplicate_facets(&mut doubled), unique.len());
        prop_assert_eq!(doubled, unique);
    }
}

// =============================================================================
// Property Tests: Repositioning
// =============================================================================

proptest! {
    /// Without force, every axis ends at or above the threshold, and axes
    /// already above it are left alone.
    #[test]
    fn reposition_is_monotonic(
        min in prop::array::uniform3(-1000.0..1000.0f64),
        threshold in prop::array::uniform3(-10.0..10.0f64),
    ) {
        let corner = MinCorner::from_points([Point3::new(min[0], min[1], min[2])].iter());
        let params = RepositionParams::default()
            .with_min_position(Vector3::new(threshold[0], threshold[1], threshold[2]));

        let offset = reposition_offset(&corner, &params);

        for axis in 0..3 {
            if min[axis] >= threshold[axis] {
                prop_assert!(offset[axis] == 0.0);
            } else {
                prop_assert!(min[axis] + offset[axis] >= threshold[axis]);
            }
        }
    }

    /// With force, every axis lands on the threshold.
    #[test]
    fn forced_reposition_hits_threshold(
        min in prop::array::uniform3(-1000.0..1000.0f64),
        threshold in prop::array::uniform3(-10.0..10.0f64),
    ) {
        let corner = MinCorner::from_points([Point3::new(min[0], min[1], min[2])].iter());
        let params = RepositionParams::default()
            .with_min_position(Vector3::new(threshold[0], threshold[1], threshold[2]))
            .with_force(true);

        let offset = reposition_offset(&corner, &params);

        for axis in 0..3 {
            prop_assert!((min[axis] + offset[axis] - threshold[axis]).abs() < 1e-9);
        }
    }
}
