//! The read, repair, reposition and write pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::Vector3;
use stl_io::{encode_stl, load_stl, Diagnostic, Diagnostics, StlEncoding, WriteOptions};
use stl_repair::{check_manifold, repair_model, reposition_offset, ManifoldReport, RepairSummary};
use stl_types::MinCorner;
use tracing::{debug, info};

use crate::error::{CleanError, CleanResult};
use crate::params::CleanParams;

const CLEANED_SUFFIX: &str = "-cleaned.stl";

/// Outcome of a successful cleaning run.
#[derive(Debug, Clone)]
pub struct CleanReport {
    /// File that was read.
    pub input: PathBuf,
    /// File that was written.
    pub output: PathBuf,
    /// Encoding of both files.
    pub encoding: StlEncoding,
    /// Model name (empty for binary files).
    pub name: String,
    /// Per-axis minimum seen while parsing.
    pub min_corner: MinCorner,
    /// Translation applied on write.
    pub offset: Vector3<f64>,
    /// What repair changed.
    pub repair: RepairSummary,
    /// Edge usage of the repaired facets.
    pub manifold: ManifoldReport,
    /// Warnings counted while parsing.
    pub warning_count: usize,
    /// Recorded warnings, filled only with `detailed_warnings`.
    pub warnings: Vec<Diagnostic>,
}

/// Converts one STL file at a time, keeping the diagnostics of the last run.
///
/// # Example
///
/// ```no_run
/// use stl_cleaner::{CleanParams, StlCleaner};
///
/// let mut cleaner = StlCleaner::new(CleanParams::default());
/// match cleaner.clean_file("part.stl", "part-cleaned.stl") {
///     Ok(report) => println!("{} facets written", report.repair.final_facets),
///     Err(err) => eprintln!("{err} ({} warnings)", cleaner.diagnostics().warning_count()),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StlCleaner {
    params: CleanParams,
    diagnostics: Diagnostics,
}

impl StlCleaner {
    /// Create a cleaner with the given parameters.
    #[must_use]
    pub fn new(params: CleanParams) -> Self {
        Self {
            params,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Diagnostics of the most recent run, including a failed one.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Read `input`, repair it and write the result to `output` in the same
    /// encoding.
    ///
    /// Nothing is written when the input cannot be parsed.
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::SameInputOutput`] before touching either file
    /// when both paths name the same file, the parse error for invalid input,
    /// [`CleanError::Write`] if the output cannot be written, and
    /// [`CleanError::ValidationFailed`] if errors were counted during a run
    /// that otherwise completed.
    pub fn clean_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        input: P,
        output: Q,
    ) -> CleanResult<CleanReport> {
        let input = input.as_ref();
        let output = output.as_ref();
        self.diagnostics = Diagnostics::new();

        if same_file(input, output) {
            return Err(CleanError::SameInputOutput {
                path: input.to_path_buf(),
            });
        }

        info!("Cleaning {} -> {}", input.display(), output.display());
        let loaded = load_stl(input, &self.params.read, &mut self.diagnostics)?;
        let encoding = loaded.source.encoding();
        let mut model = loaded.model;
        debug!(
            "Read {} facets, minimum {}",
            model.facet_count(),
            loaded.min_corner
        );

        let repair = repair_model(&mut model, &self.params.repair);
        let manifold = check_manifold(&model.facets);
        debug!("{manifold}");

        let offset = reposition_offset(&loaded.min_corner, &self.params.reposition);
        let options = WriteOptions::default()
            .with_indent(self.params.indent)
            .with_offset(offset)
            .with_floor(self.params.reposition.min_position);
        let bytes = encode_stl(&model, &loaded.source, &options)?;
        fs::write(output, bytes).map_err(|source| CleanError::Write {
            path: output.to_path_buf(),
            source,
        })?;
        info!("Wrote {} facets to {}", model.facet_count(), output.display());

        if self.diagnostics.has_errors() {
            return Err(CleanError::ValidationFailed {
                errors: self.diagnostics.error_count(),
                warnings: self.diagnostics.warning_count(),
                first_error: self.diagnostics.first_error().unwrap_or_default().to_string(),
            });
        }

        let warnings = if self.params.detailed_warnings {
            self.diagnostics.warnings().cloned().collect()
        } else {
            Vec::new()
        };

        Ok(CleanReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            encoding,
            name: model.name,
            min_corner: loaded.min_corner,
            offset,
            repair,
            manifold,
            warning_count: self.diagnostics.warning_count(),
            warnings,
        })
    }
}

/// Clean one file with the given parameters.
///
/// # Errors
///
/// See [`StlCleaner::clean_file`].
pub fn clean_stl_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    params: &CleanParams,
) -> CleanResult<CleanReport> {
    StlCleaner::new(params.clone()).clean_file(input, output)
}

/// Output path used when none is given.
///
/// A trailing `.stl` is replaced by `-cleaned.stl`; any other name gets
/// `-cleaned.stl` appended.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use stl_cleaner::default_output_path;
///
/// assert_eq!(
///     default_output_path(Path::new("models/part.stl")),
///     PathBuf::from("models/part-cleaned.stl")
/// );
/// assert_eq!(
///     default_output_path(Path::new("part.STL")),
///     PathBuf::from("part.STL-cleaned.stl")
/// );
/// ```
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let text = input.to_string_lossy();
    let stem = text.strip_suffix(".stl").unwrap_or(&text);
    PathBuf::from(format!("{stem}{CLEANED_SUFFIX}"))
}

fn same_file(input: &Path, output: &Path) -> bool {
    if input == output {
        return true;
    }
    match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
