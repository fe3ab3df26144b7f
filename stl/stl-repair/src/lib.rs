//! Repair operations for STL facet sets.
//!
//! This crate provides tools for:
//! - Edge adjacency over unindexed facets (exact coordinate matching)
//! - Open-edge detection and greedy hole closing
//! - Duplicate facet removal
//! - Manifold checks (edge-usage histogram)
//! - Repositioning offsets that keep a model above a minimum coordinate
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with no UI dependencies.
//!
//! # Example
//!
//! ```
//! use stl_repair::{check_manifold, repair_model, RepairParams};
//! use stl_types::{Facet, Model, Point3};
//!
//! let o = Point3::new(0.0, 0.0, 0.0);
//! let x = Point3::new(1.0, 0.0, 0.0);
//! let y = Point3::new(0.0, 1.0, 0.0);
//! let z = Point3::new(0.0, 0.0, 1.0);
//!
//! // Tetrahedron missing one face.
//! let mut model = Model::from_facets(
//!     "tetra",
//!     vec![
//!         Facet::from_vertices(o, y, x),
//!         Facet::from_vertices(o, x, z),
//!         Facet::from_vertices(o, z, y),
//!     ],
//! );
//!
//! let summary = repair_model(&mut model, &RepairParams::default());
//! assert_eq!(summary.patches_added, 1);
//! assert!(check_manifold(&model.facets).is_manifold());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod adjacency;
pub mod holes;
mod repair;
mod reposition;
mod validate;

pub use adjacency::{facet_edges, CoordKey, EdgeKey, FacetAdjacency};
pub use holes::close_open_edges;
pub use repair::{remove_duplicate_facets, repair_model, RepairParams, RepairSummary};
pub use reposition::{reposition_offset, RepositionParams, DEFAULT_MIN_POSITION};
pub use validate::{check_manifold, is_manifold, ManifoldReport};
