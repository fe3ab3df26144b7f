//! ASCII STL reader and writer.
//!
//! The reader walks the grammar
//!
//! ```text
//! solid [name]
//!   { facet normal <f> <f> <f>
//!     outer loop
//!       vertex <f> <f> <f>   (x3)
//!     endloop
//!     endfacet }*
//! endsolid [name]
//! ```
//!
//! one normalized line at a time. Vertex coordinates may be negative.

use std::io::Write;

use regex::{Captures, Regex};
use stl_types::{Facet, MinCorner, Model, Point3};
use tracing::debug;

use crate::cursor::{normalize_lines, LineCursor};
use crate::diagnostics::{Diagnostics, Position};
use crate::error::{StlError, StlResult};
use crate::{LoadedStl, ReadOptions, StlSource, WriteOptions};

/// Signed decimal with an optional exponent.
const NUMBER: &str = r"[+-]?(?:\d+\.?\d*|\.\d+)(?:[Ee][+-]?\d+)?";

/// Lines per facet record: normal, outer loop, 3 vertices, endloop, endfacet.
const LINES_PER_FACET: usize = 7;

/// Name used when neither `solid` nor `endsolid` carries one.
pub const DEFAULT_MODEL_NAME: &str = "model";

/// Compiled line patterns.
struct AsciiGrammar {
    facet_normal: Regex,
    vertex: Regex,
    solid_name: Regex,
    endsolid_name: Regex,
}

impl AsciiGrammar {
    fn new() -> StlResult<Self> {
        Ok(Self {
            facet_normal: Regex::new(&format!(
                "^facet normal ({NUMBER}) ({NUMBER}) ({NUMBER})$"
            ))?,
            vertex: Regex::new(&format!("^vertex ({NUMBER}) ({NUMBER}) ({NUMBER})$"))?,
            solid_name: Regex::new("^solid (.+)$")?,
            endsolid_name: Regex::new("^endsolid (.+)$")?,
        })
    }
}

/// Read an ASCII STL document.
///
/// Warnings (blank lines, a missing or mismatched name, negative
/// coordinates, clockwise facets) are recorded in `diagnostics`; the first
/// grammar violation aborts the read.
///
/// # Errors
///
/// Returns an error naming the line and the expected element when the
/// document does not follow the grammar.
///
/// # Example
///
/// ```
/// use stl_io::{read_ascii, Diagnostics, ReadOptions};
///
/// let text = "solid tri\n\
///     facet normal 0 0 0\n\
///     outer loop\n\
///     vertex 0 0 0\n\
///     vertex 1 0 0\n\
///     vertex 0 1 0\n\
///     endloop\n\
///     endfacet\n\
///     endsolid tri\n";
///
/// let mut diagnostics = Diagnostics::new();
/// let loaded = read_ascii(text, &ReadOptions::default(), &mut diagnostics).unwrap();
///
/// assert_eq!(loaded.model.name, "tri");
/// assert_eq!(loaded.model.facet_count(), 1);
/// assert_eq!(diagnostics.warning_count(), 0);
/// ```
pub fn read_ascii(
    text: &str,
    options: &ReadOptions,
    diagnostics: &mut Diagnostics,
) -> StlResult<LoadedStl> {
    let grammar = AsciiGrammar::new()?;
    let lines = normalize_lines(text);
    let mut cursor = LineCursor::new(&lines, diagnostics);

    let solid_name = read_solid(&grammar, &mut cursor, diagnostics)?;

    let facet_count = cursor.non_blank_count().saturating_sub(2) / LINES_PER_FACET;
    let mut model = Model::with_capacity("", facet_count);
    let mut min_corner = MinCorner::empty();

    for _ in 0..facet_count {
        let facet = read_facet(&grammar, &mut cursor, &mut min_corner, diagnostics)?;
        model.facets.push(facet);
    }

    let endsolid_name = read_endsolid(&grammar, &cursor, &solid_name, diagnostics)?;
    cursor.advance(diagnostics);

    model.name = resolve_name(&solid_name, &endsolid_name, options.ignore_endsolid_name);
    debug!(
        "Read {} facets from ASCII STL '{}'",
        model.facet_count(),
        model.name
    );

    Ok(LoadedStl {
        model,
        min_corner,
        source: StlSource::Ascii,
    })
}

/// Pick the model name from the `solid` and `endsolid` labels.
///
/// # Example
///
/// ```
/// use stl_io::resolve_name;
///
/// assert_eq!(resolve_name("part", "part", false), "part");
/// assert_eq!(resolve_name("", "part", false), "part");
/// assert_eq!(resolve_name("a", "b", false), "a | b");
/// assert_eq!(resolve_name("a", "b", true), "a");
/// assert_eq!(resolve_name("", "", false), "model");
/// ```
#[must_use]
pub fn resolve_name(solid_name: &str, endsolid_name: &str, ignore_endsolid_name: bool) -> String {
    let name = if ignore_endsolid_name || endsolid_name.is_empty() {
        solid_name.to_string()
    } else if solid_name.is_empty() || solid_name == endsolid_name {
        endsolid_name.to_string()
    } else {
        format!("{solid_name} | {endsolid_name}")
    };

    if name.is_empty() {
        DEFAULT_MODEL_NAME.to_string()
    } else {
        name
    }
}

/// Write a model as ASCII STL.
///
/// Facets are moved by the configured offset and have their winding fixed
/// before they are written. Vertices are raised to the configured floor. Nesting levels are indented by
/// `options.indent` spaces each.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_ascii<W: Write>(model: &Model, options: &WriteOptions, mut writer: W) -> StlResult<()> {
    let name = if model.name.is_empty() {
        DEFAULT_MODEL_NAME
    } else {
        model.name.as_str()
    };
    let pad = |level: usize| " ".repeat(options.indent * level);

    writeln!(writer, "solid {name}")?;
    for facet in &model.facets {
        let fixed = facet
            .translated(&options.offset)
            .with_counterclockwise_winding();
        let n = fixed.normal;

        writeln!(writer, "{}facet normal {:?} {:?} {:?}", pad(1), n.x, n.y, n.z)?;
        writeln!(writer, "{}outer loop", pad(2))?;
        for vertex in &fixed.vertices {
            let v = options.clamp(vertex);
            writeln!(writer, "{}vertex {:?} {:?} {:?}", pad(3), v.x, v.y, v.z)?;
        }
        writeln!(writer, "{}endloop", pad(2))?;
        writeln!(writer, "{}endfacet", pad(1))?;
    }
    writeln!(writer, "endsolid {name}")?;

    writer.flush()?;
    Ok(())
}

/// `solid [name]`. Returns the name, empty when missing.
fn read_solid(
    grammar: &AsciiGrammar,
    cursor: &mut LineCursor<'_>,
    diagnostics: &mut Diagnostics,
) -> StlResult<String> {
    let line = cursor.expect_line("solid", diagnostics)?;
    if !line.starts_with("solid") {
        return Err(diagnostics.fail(StlError::unexpected(cursor.position(), "solid", line)));
    }

    let name = if let Some(caps) = grammar.solid_name.captures(line) {
        caps[1].to_string()
    } else {
        diagnostics.warn_expected(cursor.position(), "solid <string>", line);
        String::new()
    };

    cursor.advance(diagnostics);
    Ok(name)
}

/// One `facet ... endfacet` record.
fn read_facet(
    grammar: &AsciiGrammar,
    cursor: &mut LineCursor<'_>,
    min_corner: &mut MinCorner,
    diagnostics: &mut Diagnostics,
) -> StlResult<Facet> {
    const FACET_NORMAL: &str = "facet normal <float> <float> <float>";
    const VERTEX: &str = "vertex <float> <float> <float>";

    // The stored normal is checked for syntax only.
    let line = cursor.expect_line(FACET_NORMAL, diagnostics)?;
    let Some(caps) = grammar.facet_normal.captures(line) else {
        return Err(diagnostics.fail(StlError::unexpected(cursor.position(), FACET_NORMAL, line)));
    };
    parse_triple(&caps, cursor.position(), diagnostics)?;
    cursor.advance(diagnostics);

    cursor.expect_exact("outer loop", diagnostics)?;

    let mut vertices = [Point3::origin(); 3];
    for vertex in &mut vertices {
        let position = cursor.position();
        let line = cursor.expect_line(VERTEX, diagnostics)?;
        let Some(caps) = grammar.vertex.captures(line) else {
            return Err(diagnostics.fail(StlError::unexpected(position, VERTEX, line)));
        };
        let [x, y, z] = parse_triple(&caps, position, diagnostics)?;
        *vertex = Point3::new(x, y, z);

        min_corner.include(vertex);
        if x < 0.0 || y < 0.0 || z < 0.0 {
            diagnostics.warn(position, "Not all vertex coordinates have positive values");
        }
        cursor.advance(diagnostics);
    }

    let [v1, v2, v3] = vertices;
    let facet = Facet::from_vertices(v1, v2, v3);
    if !facet.is_counterclockwise() {
        diagnostics.warn(
            cursor.position(),
            "Vertices of this facet are not ordered counterclockwise",
        );
    }

    cursor.expect_exact("endloop", diagnostics)?;
    cursor.expect_exact("endfacet", diagnostics)?;

    Ok(facet)
}

/// `endsolid [name]`. Returns the trailing name, empty when missing.
fn read_endsolid(
    grammar: &AsciiGrammar,
    cursor: &LineCursor<'_>,
    solid_name: &str,
    diagnostics: &mut Diagnostics,
) -> StlResult<String> {
    let line = cursor.expect_line("endsolid", diagnostics)?;
    if !line.starts_with("endsolid") {
        return Err(diagnostics.fail(StlError::unexpected(cursor.position(), "endsolid", line)));
    }

    if !solid_name.is_empty() {
        let expected = format!("endsolid {solid_name}");
        if line != expected {
            diagnostics.warn_expected(cursor.position(), &expected, line);
        }
    }

    Ok(grammar
        .endsolid_name
        .captures(line)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default())
}

fn parse_triple(
    caps: &Captures<'_>,
    position: Position,
    diagnostics: &mut Diagnostics,
) -> StlResult<[f64; 3]> {
    let mut values = [0.0; 3];
    for (i, value) in values.iter_mut().enumerate() {
        let text = &caps[i + 1];
        *value = text.parse().map_err(|_| {
            diagnostics.fail(StlError::invalid(
                position,
                format!("'{text}' is not a valid number"),
            ))
        })?;
    }
    Ok(values)
}
