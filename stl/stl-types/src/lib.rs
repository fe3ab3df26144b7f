//! Core STL types for the STL cleaner.
//!
//! This crate provides the foundational types for STL validation and repair:
//!
//! - [`geometry`] - The geometry kernel (dot/cross product, normal recomputation, winding)
//! - [`Facet`] - A triangle stored as a normal plus three vertices, as in the STL format
//! - [`Model`] - A named sequence of facets
//! - [`MinCorner`] - Running per-axis minimum over vertex positions
//!
//! # Layer 0 Crate
//!
//! This crate has no I/O and no UI dependencies. It is shared by the codec
//! (`stl-io`), the repair engine (`stl-repair`) and the command line tool.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Facet winding is
//! **counter-clockwise (CCW) when viewed from the side the normal points to**.
//!
//! # Example
//!
//! ```
//! use stl_types::{Facet, Model, Point3};
//!
//! let mut model = Model::new("part");
//! model.facets.push(Facet::from_vertices(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ));
//!
//! assert_eq!(model.facet_count(), 1);
//! assert!((model.facets[0].normal.z - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod facet;
pub mod geometry;
mod model;

pub use bounds::MinCorner;
pub use facet::Facet;
pub use model::Model;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
