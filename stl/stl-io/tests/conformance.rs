//! File-level conformance tests for the STL codecs.
//!
//! These tests write small STL documents to scratch files, load them back
//! through the public API and check the resulting models and diagnostics.
//!
//! To run: cargo test -p stl-io --test conformance

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use proptest::prelude::*;
use stl_io::{
    is_binary_stl, load_stl, save_stl, Diagnostics, Position, ReadOptions, StlEncoding,
    StlError, StlSource, WriteOptions, HEADER_SIZE, TRIANGLE_SIZE,
};
use stl_types::{Facet, Model, Point3, Vector3};
use tempfile::tempdir;

/// Four outward-facing triangles of a unit tetrahedron.
fn tetrahedron() -> Model {
    let o = Point3::new(0.0, 0.0, 0.0);
    let x = Point3::new(1.0, 0.0, 0.0);
    let y = Point3::new(0.0, 1.0, 0.0);
    let z = Point3::new(0.0, 0.0, 1.0);
    Model::from_facets(
        "tetra",
        vec![
            Facet::from_vertices(o, y, x),
            Facet::from_vertices(o, x, z),
            Facet::from_vertices(o, z, y),
            Facet::from_vertices(x, y, z),
        ],
    )
}

fn binary_record(vertices: [[f32; 3]; 3], attribute: u16) -> Vec<u8> {
    let mut record = Vec::with_capacity(TRIANGLE_SIZE);
    for _ in 0..3 {
        record.extend_from_slice(&0f32.to_le_bytes());
    }
    for vertex in vertices {
        for c in vertex {
            record.extend_from_slice(&c.to_le_bytes());
        }
    }
    record.extend_from_slice(&attribute.to_le_bytes());
    record
}

// =============================================================================
// Loading Tests
// =============================================================================

#[test]
fn test_load_ascii_file() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("cube.stl");
    std::fs::write(
        &path,
        "solid cube\n\
         facet normal 0 0 1\n\
         outer loop\n\
         vertex -1 -1 0\n\
         vertex 1 -1 0\n\
         vertex 1 1 0\n\
         endloop\n\
         endfacet\n\
         endsolid cube\n",
    )
    .unwrap();

    let mut diagnostics = Diagnostics::new();
    let loaded = load_stl(&path, &ReadOptions::default(), &mut diagnostics).unwrap();

    assert_eq!(loaded.source.encoding(), StlEncoding::Ascii);
    assert_eq!(loaded.model.name, "cube");
    assert_eq!(loaded.model.facet_count(), 1);
    assert_eq!(loaded.min_corner.point(), Point3::new(-1.0, -1.0, 0.0));
    assert_eq!(diagnostics.error_count(), 0);
}

#[test]
fn test_load_binary_with_bad_attribute() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("bad.stl");

    let mut bytes = vec![0u8; HEADER_SIZE];
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend(binary_record(
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        5,
    ));
    std::fs::write(&path, &bytes).unwrap();

    let mut diagnostics = Diagnostics::new();
    let err = load_stl(&path, &ReadOptions::default(), &mut diagnostics).unwrap_err();

    assert_eq!(err.position(), Some(Position::Byte(84)));
    assert_eq!(
        err.to_string(),
        "Error on position 84: Attribute byte count should be '0', but got '5'."
    );
    assert_eq!(
        diagnostics.first_error(),
        Some("Error on position 84: Attribute byte count should be '0', but got '5'.")
    );
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("missing.stl");

    let mut diagnostics = Diagnostics::new();
    let err = load_stl(&path, &ReadOptions::default(), &mut diagnostics).unwrap_err();
    match err {
        StlError::FileNotFound { path: reported } => assert_eq!(reported, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_binary_roundtrip_preserves_header() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("tetra.stl");

    let mut header = [b'#'; HEADER_SIZE];
    header[..9].copy_from_slice(b"exporter!");
    let source = StlSource::Binary { header };
    save_stl(&path, &tetrahedron(), &source, &WriteOptions::default()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(is_binary_stl(&bytes));
    assert_eq!(&bytes[..HEADER_SIZE], &header[..]);

    let mut diagnostics = Diagnostics::new();
    let loaded = load_stl(&path, &ReadOptions::default(), &mut diagnostics).unwrap();
    assert_eq!(loaded.source, source);
    assert_eq!(loaded.model.facet_count(), 4);
    assert_eq!(diagnostics.warning_count(), 0);
}

#[test]
fn test_ascii_roundtrip_applies_offset() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("tetra.stl");

    let options = WriteOptions::default()
        .with_indent(2)
        .with_offset(Vector3::new(0.5, 0.5, 0.5));
    save_stl(&path, &tetrahedron(), &StlSource::Ascii, &options).unwrap();

    let mut diagnostics = Diagnostics::new();
    let loaded = load_stl(&path, &ReadOptions::default(), &mut diagnostics).unwrap();

    assert_eq!(loaded.model.name, "tetra");
    assert_eq!(loaded.min_corner.point(), Point3::new(0.5, 0.5, 0.5));
    for (read, written) in loaded.model.facets.iter().zip(&tetrahedron().facets) {
        assert_eq!(read.normal, written.normal);
    }
    assert_eq!(diagnostics.warning_count(), 0);
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #[test]
    fn sniff_accepts_exact_binary_lengths(count in 0u32..64, header in any::<[u8; 32]>()) {
        let mut bytes = header.to_vec();
        bytes.resize(HEADER_SIZE, 0);
        bytes.extend_from_slice(&count.to_le_bytes());
        bytes.resize(bytes.len() + TRIANGLE_SIZE * count as usize, 0);
        prop_assert!(is_binary_stl(&bytes));

        bytes.push(b'\n');
        prop_assert!(!is_binary_stl(&bytes));
    }

    #[test]
    fn sniff_rejects_ascii_documents(name in "[a-z]{1,12}", facets in 0usize..8) {
        let mut text = format!("solid {name}\n");
        for _ in 0..facets {
            text.push_str(
                "facet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\n",
            );
        }
        text.push_str(&format!("endsolid {name}\n"));
        prop_assert!(!is_binary_stl(text.as_bytes()));
    }
}
