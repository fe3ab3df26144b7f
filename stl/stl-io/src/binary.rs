//! Binary STL reader and writer.
//!
//! # Layout
//!
//! ```text
//! UINT8[80]    – Header (opaque, echoed on write)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (ignored, recomputed)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (must be 0)
//! end
//! ```
//!
//! All values are little-endian.

use std::io::Write;

use stl_types::{Facet, MinCorner, Model, Point3};
use tracing::debug;

use crate::diagnostics::{Diagnostics, Position};
use crate::error::{StlError, StlResult};
use crate::{LoadedStl, StlSource, WriteOptions};

/// Header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of the triangle count field in bytes.
pub const COUNT_SIZE: usize = 4;

/// Size of one triangle record (normal + 3 vertices + attribute count).
pub const TRIANGLE_SIZE: usize = 50;

/// Offset of the first triangle record.
const BODY_OFFSET: usize = HEADER_SIZE + COUNT_SIZE;

/// Check whether `bytes` is a binary STL file.
///
/// A file is binary iff `80 + 4 + 50 * N` equals its length, where `N` is the
/// triangle count stored after the header. Files too short to hold a count
/// are not binary.
///
/// # Example
///
/// ```
/// use stl_io::is_binary_stl;
///
/// let mut bytes = vec![0u8; 84 + 50];
/// bytes[80] = 1; // one triangle
/// assert!(is_binary_stl(&bytes));
///
/// assert!(!is_binary_stl(b"solid cube\nendsolid cube\n"));
/// ```
#[must_use]
pub fn is_binary_stl(bytes: &[u8]) -> bool {
    let Some(count) = read_u32(bytes, HEADER_SIZE) else {
        return false;
    };
    let expected = BODY_OFFSET as u64 + TRIANGLE_SIZE as u64 * u64::from(count);
    expected == bytes.len() as u64
}

/// Read a binary STL held in memory.
///
/// Every triangle gets its normal recomputed. Negative coordinates and
/// clockwise triangles are recorded as warnings; a non-zero attribute byte
/// count is fatal.
///
/// # Errors
///
/// Returns an error if the header is incomplete, the file holds fewer records
/// than its count announces, or a record has a non-zero attribute byte count.
pub fn read_binary(bytes: &[u8], diagnostics: &mut Diagnostics) -> StlResult<LoadedStl> {
    let (Some(header), Some(triangle_count)) = (read_header(bytes), read_u32(bytes, HEADER_SIZE))
    else {
        return Err(diagnostics.fail(StlError::invalid(
            Position::Byte(0),
            format!(
                "File is too small for a binary STL header ({} of {BODY_OFFSET} bytes)",
                bytes.len()
            ),
        )));
    };

    let available = bytes.len().saturating_sub(BODY_OFFSET) / TRIANGLE_SIZE;
    let mut model = Model::with_capacity("", available.min(triangle_count as usize));
    let mut min_corner = MinCorner::empty();

    for i in 0..triangle_count as usize {
        let offset = BODY_OFFSET + i * TRIANGLE_SIZE;
        let position = Position::Byte(offset as u64);
        let Some(record) = bytes.get(offset..offset + TRIANGLE_SIZE) else {
            return Err(diagnostics.fail(StlError::invalid(
                position,
                format!("Expected {triangle_count} triangles but the file ends after {i}"),
            )));
        };

        // Bytes 0..12 hold the stored normal, which is never trusted.
        let v1 = read_point(record, 12);
        let v2 = read_point(record, 24);
        let v3 = read_point(record, 36);
        let attribute_byte_count = u16::from_le_bytes([record[48], record[49]]);

        for vertex in [&v1, &v2, &v3] {
            min_corner.include(vertex);
        }

        let facet = Facet::from_vertices(v1, v2, v3);

        if facet.has_negative_coordinate() {
            diagnostics.warn(
                position,
                "Not all vertices of this facet have positive values",
            );
        }
        if !facet.is_counterclockwise() {
            diagnostics.warn(
                position,
                "Vertices of this facet are not ordered counterclockwise",
            );
        }
        if attribute_byte_count != 0 {
            return Err(diagnostics.fail(StlError::invalid(
                position,
                format!(
                    "Attribute byte count should be '0', but got '{attribute_byte_count}'"
                ),
            )));
        }

        model.facets.push(facet);
    }

    debug!(
        "Read {} facets from binary STL ({} bytes)",
        model.facet_count(),
        bytes.len()
    );

    Ok(LoadedStl {
        model,
        min_corner,
        source: StlSource::Binary { header },
    })
}

/// Write a model as binary STL.
///
/// The header is echoed verbatim. Every facet is moved by the configured
/// offset and has its winding made counter-clockwise before it is written;
/// the attribute byte count is always 0. No written vertex coordinate is
/// below the configured floor, even after narrowing to `f32`.
///
/// # Errors
///
/// Returns an error if writing fails or the model has more than `u32::MAX`
/// facets.
pub fn write_binary<W: Write>(
    model: &Model,
    header: &[u8; HEADER_SIZE],
    options: &WriteOptions,
    mut writer: W,
) -> StlResult<()> {
    let count = u32::try_from(model.facet_count()).map_err(|_| StlError::TooManyFacets {
        count: model.facet_count(),
    })?;

    writer.write_all(header)?;
    writer.write_all(&count.to_le_bytes())?;

    for facet in &model.facets {
        let fixed = facet
            .translated(&options.offset)
            .with_counterclockwise_winding();

        let n = fixed.normal;
        write_f32_triple(&mut writer, [n.x, n.y, n.z].map(narrow))?;
        for vertex in &fixed.vertices {
            let v = options.clamp(vertex);
            let floor = options.floor;
            write_f32_triple(
                &mut writer,
                [
                    narrow_at_least(v.x, floor.x),
                    narrow_at_least(v.y, floor.y),
                    narrow_at_least(v.z, floor.z),
                ],
            )?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}

/// Header used when writing a model that was not read from a binary file.
#[must_use]
pub fn default_header() -> [u8; HEADER_SIZE] {
    let mut header = [b' '; HEADER_SIZE];
    let text = b"Binary STL written by stl-cleaner";
    header[..text.len()].copy_from_slice(text);
    header
}

fn read_header(bytes: &[u8]) -> Option<[u8; HEADER_SIZE]> {
    bytes.get(..HEADER_SIZE)?.try_into().ok()
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let raw = bytes.get(at..at + COUNT_SIZE)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

/// Read 3 little-endian f32s starting at `at`.
fn read_point(record: &[u8], at: usize) -> Point3<f64> {
    let read_f32 = |i: usize| {
        let b = &record[at + i * 4..at + i * 4 + 4];
        f64::from(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    };
    Point3::new(read_f32(0), read_f32(1), read_f32(2))
}

/// Nearest `f32`.
#[allow(clippy::cast_possible_truncation)]
fn narrow(value: f64) -> f32 {
    // Truncation: f64 to f32 is intentional for STL format
    value as f32
}

/// Nearest `f32`, stepped up one ulp if rounding fell below `floor`.
fn narrow_at_least(value: f64, floor: f64) -> f32 {
    let narrowed = narrow(value);
    if f64::from(narrowed) < floor {
        next_up(narrowed)
    } else {
        narrowed
    }
}

/// Smallest `f32` greater than a finite `value`.
fn next_up(value: f32) -> f32 {
    if value == 0.0 {
        return f32::from_bits(1);
    }
    let bits = value.to_bits();
    if value > 0.0 {
        f32::from_bits(bits + 1)
    } else {
        f32::from_bits(bits - 1)
    }
}

/// Write 3 f32s in little-endian.
fn write_f32_triple<W: Write>(writer: &mut W, values: [f32; 3]) -> StlResult<()> {
    for value in values {
        writer.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}
