//! Validating STL reader and writer.
//!
//! This crate reads binary and ASCII STL files into a [`Model`], recording
//! every deviation from the format in a [`Diagnostics`] accumulator, and
//! writes models back out in either encoding.
//!
//! - **Binary**: fixed 50-byte records after an 80-byte header and a count
//! - **ASCII**: a line-oriented `solid` / `facet` / `endsolid` grammar
//!
//! The encoding is sniffed from the byte length, never from the extension.
//! Normals found in the file are discarded and recomputed from the vertices.
//!
//! # Layer 0 Crate
//!
//! This crate has no UI dependencies and can be used from CLI tools,
//! servers, or other libraries.
//!
//! # Example
//!
//! ```
//! use stl_io::{encode_stl, read_stl, Diagnostics, ReadOptions, WriteOptions};
//!
//! let text = b"solid empty\nendsolid empty\n";
//!
//! let mut diagnostics = Diagnostics::new();
//! let loaded = read_stl(text, &ReadOptions::default(), &mut diagnostics).unwrap();
//! assert_eq!(loaded.model.name, "empty");
//!
//! let bytes = encode_stl(&loaded.model, &loaded.source, &WriteOptions::default()).unwrap();
//! assert_eq!(bytes, text);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod ascii;
mod binary;
mod cursor;
mod diagnostics;
mod error;

pub use ascii::{read_ascii, resolve_name, write_ascii, DEFAULT_MODEL_NAME};
pub use binary::{
    default_header, is_binary_stl, read_binary, write_binary, COUNT_SIZE, HEADER_SIZE,
    TRIANGLE_SIZE,
};
pub use cursor::{normalize_lines, LineCursor};
pub use diagnostics::{Diagnostic, Diagnostics, Position};
pub use error::{StlError, StlResult};

use std::fmt;
use std::fs;
use std::path::Path;

use nalgebra::{Point3, Vector3};
use stl_types::{MinCorner, Model};
use tracing::info;

/// The two STL encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StlEncoding {
    /// Fixed-size little-endian records.
    Binary,
    /// Line-oriented text.
    Ascii,
}

impl StlEncoding {
    /// Sniff the encoding of a file's contents.
    ///
    /// Anything whose length does not match a binary layout is ASCII.
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Self {
        if is_binary_stl(bytes) {
            Self::Binary
        } else {
            Self::Ascii
        }
    }
}

impl fmt::Display for StlEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => f.write_str("binary"),
            Self::Ascii => f.write_str("ASCII"),
        }
    }
}

/// Options controlling how a file is read.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Name the model after the `solid` line only, ignoring `endsolid`.
    pub ignore_endsolid_name: bool,
}

impl ReadOptions {
    /// Set whether the `endsolid` name is ignored.
    #[must_use]
    pub fn with_ignore_endsolid_name(mut self, ignore: bool) -> Self {
        self.ignore_endsolid_name = ignore;
        self
    }
}

/// Options controlling how a model is written.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Spaces per nesting level in ASCII output.
    pub indent: usize,
    /// Translation added to every vertex on the way out.
    pub offset: Vector3<f64>,
    /// Lowest coordinate written on each axis after translation.
    ///
    /// Binary output rounds upward into `f32` rather than below it.
    /// Default: `-inf` (no clamping)
    pub floor: Vector3<f64>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 1,
            offset: Vector3::zeros(),
            floor: Vector3::repeat(f64::NEG_INFINITY),
        }
    }
}

impl WriteOptions {
    /// Set the ASCII indentation width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Set the translation applied to every vertex.
    #[must_use]
    pub fn with_offset(mut self, offset: Vector3<f64>) -> Self {
        self.offset = offset;
        self
    }

    /// Set the per-axis floor for written vertices.
    #[must_use]
    pub fn with_floor(mut self, floor: Vector3<f64>) -> Self {
        self.floor = floor;
        self
    }

    /// Raise a translated vertex to the floor.
    pub(crate) fn clamp(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::new(
            point.x.max(self.floor.x),
            point.y.max(self.floor.y),
            point.z.max(self.floor.z),
        )
    }
}

/// Where a model came from, which decides how it is written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StlSource {
    /// Read from a binary file; the header is echoed on write.
    Binary {
        /// The original 80-byte header.
        header: [u8; HEADER_SIZE],
    },
    /// Read from an ASCII file.
    Ascii,
}

impl StlSource {
    /// The encoding this source is written back in.
    #[must_use]
    pub const fn encoding(&self) -> StlEncoding {
        match self {
            Self::Binary { .. } => StlEncoding::Binary,
            Self::Ascii => StlEncoding::Ascii,
        }
    }
}

/// A parsed file.
#[derive(Debug, Clone)]
pub struct LoadedStl {
    /// The facets and name.
    pub model: Model,
    /// Per-axis minimum over every vertex read.
    pub min_corner: MinCorner,
    /// Encoding details needed to write the model back.
    pub source: StlSource,
}

/// Read an STL file held in memory, sniffing its encoding.
///
/// # Errors
///
/// Returns the first fatal format violation; it is also counted in
/// `diagnostics`.
pub fn read_stl(
    bytes: &[u8],
    options: &ReadOptions,
    diagnostics: &mut Diagnostics,
) -> StlResult<LoadedStl> {
    let encoding = StlEncoding::detect(bytes);
    info!("Detected {encoding} STL ({} bytes)", bytes.len());

    match encoding {
        StlEncoding::Binary => read_binary(bytes, diagnostics),
        StlEncoding::Ascii => read_ascii(&String::from_utf8_lossy(bytes), options, diagnostics),
    }
}

/// Load an STL file from disk.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, or is not a
/// valid STL file.
///
/// # Example
///
/// ```no_run
/// use stl_io::{load_stl, Diagnostics, ReadOptions};
///
/// let mut diagnostics = Diagnostics::new();
/// let loaded = load_stl("part.stl", &ReadOptions::default(), &mut diagnostics).unwrap();
/// println!("{} facets", loaded.model.facet_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(
    path: P,
    options: &ReadOptions,
    diagnostics: &mut Diagnostics,
) -> StlResult<LoadedStl> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StlError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StlError::Io(e)
        }
    })?;
    read_stl(&bytes, options, diagnostics)
}

/// Encode a model in the encoding it was read from.
///
/// The whole file is produced in memory so that callers can write it in one
/// step.
///
/// # Errors
///
/// Returns an error if the model cannot be represented in the target
/// encoding.
pub fn encode_stl(model: &Model, source: &StlSource, options: &WriteOptions) -> StlResult<Vec<u8>> {
    let mut bytes = Vec::new();
    match source {
        StlSource::Binary { header } => write_binary(model, header, options, &mut bytes)?,
        StlSource::Ascii => write_ascii(model, options, &mut bytes)?,
    }
    Ok(bytes)
}

/// Save a model to disk in the encoding described by `source`.
///
/// Nothing is written if encoding fails.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn save_stl<P: AsRef<Path>>(
    path: P,
    model: &Model,
    source: &StlSource,
    options: &WriteOptions,
) -> StlResult<()> {
    let bytes = encode_stl(model, source, options)?;
    fs::write(path, bytes)?;
    Ok(())
}
