//! Validate and repair STL files.
//!
//! Ties the workspace together into a single conversion:
//! - Read a binary or ASCII STL file, counting warnings as it goes
//! - Recompute normals, close holes and drop duplicate facets
//! - Lift the model above a minimum position
//! - Write it back in the encoding it was read in
//!
//! # Example
//!
//! ```no_run
//! use stl_cleaner::{clean_stl_file, default_output_path, CleanParams};
//! use std::path::Path;
//!
//! let input = Path::new("part.stl");
//! let report = clean_stl_file(input, default_output_path(input), &CleanParams::default())?;
//! println!("{}", report.repair);
//! # Ok::<(), stl_cleaner::CleanError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod params;
mod pipeline;

pub use error::{CleanError, CleanResult};
pub use params::CleanParams;
pub use pipeline::{clean_stl_file, default_output_path, CleanReport, StlCleaner};
