//! Cleaning parameters.

use nalgebra::Vector3;
use stl_io::ReadOptions;
use stl_repair::{RepairParams, RepositionParams};

/// Configuration for a cleaning run.
///
/// # Example
///
/// ```
/// use stl_cleaner::CleanParams;
/// use stl_types::Vector3;
///
/// let params = CleanParams::default()
///     .with_indent(2)
///     .with_min_position(Vector3::zeros())
///     .with_force_reposition(true);
///
/// assert_eq!(params.indent, 2);
/// assert!(params.reposition.force);
/// ```
#[derive(Debug, Clone)]
pub struct CleanParams {
    /// How the input is parsed.
    pub read: ReadOptions,
    /// Which repairs run.
    pub repair: RepairParams,
    /// Minimum position and force mode.
    pub reposition: RepositionParams,
    /// Spaces per nesting level in ASCII output.
    ///
    /// Default: `1`
    pub indent: usize,
    /// Keep every warning for printing, not just the count.
    ///
    /// Default: `false`
    pub detailed_warnings: bool,
}

impl Default for CleanParams {
    fn default() -> Self {
        Self {
            read: ReadOptions::default(),
            repair: RepairParams::default(),
            reposition: RepositionParams::default(),
            indent: 1,
            detailed_warnings: false,
        }
    }
}

impl CleanParams {
    /// Set the ASCII indentation width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Set the per-axis minimum position.
    #[must_use]
    pub fn with_min_position(mut self, min_position: Vector3<f64>) -> Self {
        self.reposition.min_position = min_position;
        self
    }

    /// Always move the model onto the minimum position.
    #[must_use]
    pub fn with_force_reposition(mut self, force: bool) -> Self {
        self.reposition.force = force;
        self
    }

    /// Name the model after the `solid` line only.
    #[must_use]
    pub fn with_ignore_endsolid_name(mut self, ignore: bool) -> Self {
        self.read.ignore_endsolid_name = ignore;
        self
    }

    /// Report each warning with its position.
    #[must_use]
    pub fn with_detailed_warnings(mut self, detailed: bool) -> Self {
        self.detailed_warnings = detailed;
        self
    }

    /// Replace the repair configuration.
    #[must_use]
    pub fn with_repair(mut self, repair: RepairParams) -> Self {
        self.repair = repair;
        self
    }
}
