//! Benchmarks for stl-repair operations.
//!
//! Run with: cargo bench -p stl-repair
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p stl-repair -- --save-baseline main
//! 2. After changes: cargo bench -p stl-repair -- --baseline main

#![allow(missing_docs, clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stl_repair::{
    check_manifold, close_open_edges, remove_duplicate_facets, repair_model, FacetAdjacency,
    RepairParams,
};
use stl_types::{Facet, Model, Point3};
use std::collections::HashMap;

// =============================================================================
// Test Model Generation
// =============================================================================

/// Icosphere facets with the given subdivision level (20 * 4^n triangles).
fn create_sphere(subdivisions: u32) -> Vec<Facet> {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let a = 1.0;
    let b = 1.0 / phi;

    let mut vertices: Vec<Point3<f64>> = [
        [0.0, b, -a],
        [b, a, 0.0],
        [-b, a, 0.0],
        [0.0, b, a],
        [0.0, -b, a],
        [-a, 0.0, b],
        [0.0, -b, -a],
        [a, 0.0, -b],
        [a, 0.0, b],
        [-a, 0.0, -b],
        [b, -a, 0.0],
        [-b, -a, 0.0],
    ]
    .iter()
    .map(|v| Point3::from(nalgebra::Vector3::new(v[0], v[1], v[2]).normalize()))
    .collect();

    let mut faces: Vec<[usize; 3]> = vec![
        [0, 1, 2],
        [3, 2, 1],
        [3, 4, 5],
        [3, 8, 4],
        [0, 6, 7],
        [0, 9, 6],
        [4, 10, 11],
        [6, 11, 10],
        [2, 5, 9],
        [11, 9, 5],
        [1, 7, 8],
        [10, 8, 7],
        [3, 5, 2],
        [3, 1, 8],
        [0, 2, 9],
        [0, 7, 1],
        [6, 9, 11],
        [6, 10, 7],
        [4, 11, 5],
        [4, 8, 10],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut next = Vec::with_capacity(faces.len() * 4);
        for [v0, v1, v2] in faces {
            let m01 = midpoint(v0, v1, &mut vertices, &mut midpoints);
            let m12 = midpoint(v1, v2, &mut vertices, &mut midpoints);
            let m20 = midpoint(v2, v0, &mut vertices, &mut midpoints);
            next.push([v0, m01, m20]);
            next.push([v1, m12, m01]);
            next.push([v2, m20, m12]);
            next.push([m01, m12, m20]);
        }
        faces = next;
    }

    faces
        .iter()
        .map(|f| Facet::from_vertices(vertices[f[0]], vertices[f[1]], vertices[f[2]]))
        .collect()
}

fn midpoint(
    v1: usize,
    v2: usize,
    vertices: &mut Vec<Point3<f64>>,
    midpoints: &mut HashMap<(usize, usize), usize>,
) -> usize {
    let key = if v1 < v2 { (v1, v2) } else { (v2, v1) };
    if let Some(&idx) = midpoints.get(&key) {
        return idx;
    }

    let mid = nalgebra::center(&vertices[v1], &vertices[v2]);
    let idx = vertices.len();
    vertices.push(Point3::from(mid.coords.normalize()));
    midpoints.insert(key, idx);
    idx
}

/// Remove every tenth facet to open many small holes.
fn perforate(facets: &[Facet]) -> Vec<Facet> {
    facets
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 10 != 0)
        .map(|(_, f)| *f)
        .collect()
}

// =============================================================================
// Adjacency Benchmarks
// =============================================================================

fn bench_adjacency(c: &mut Criterion) {
    let mut group = c.benchmark_group("Adjacency");

    for subdivisions in 1..=4 {
        let facets = create_sphere(subdivisions);
        let name = format!("sphere_{}tri", facets.len());
        group.throughput(Throughput::Elements(facets.len() as u64));

        group.bench_with_input(BenchmarkId::new("build", &name), &facets, |b, facets| {
            b.iter(|| FacetAdjacency::build(black_box(facets)));
        });

        group.bench_with_input(
            BenchmarkId::new("check_manifold", &name),
            &facets,
            |b, facets| b.iter(|| check_manifold(black_box(facets))),
        );
    }

    group.finish();
}

// =============================================================================
// Repair Benchmarks
// =============================================================================

fn bench_repair(c: &mut Criterion) {
    let mut group = c.benchmark_group("Repair");

    for subdivisions in [1, 2, 3] {
        let open = perforate(&create_sphere(subdivisions));
        let name = format!("perforated_{}tri", open.len());
        group.throughput(Throughput::Elements(open.len() as u64));

        group.bench_with_input(BenchmarkId::new("close_open_edges", &name), &open, |b, open| {
            b.iter(|| close_open_edges(black_box(open)));
        });

        group.bench_with_input(BenchmarkId::new("repair_model", &name), &open, |b, open| {
            let params = RepairParams::default();
            b.iter(|| {
                let mut model = Model::from_facets("bench", open.clone());
                repair_model(&mut model, &params)
            });
        });
    }

    group.finish();
}

fn bench_duplicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("Duplicates");

    let sphere = create_sphere(3);
    let mut doubled = sphere.clone();
    doubled.extend_from_slice(&sphere);
    group.throughput(Throughput::Elements(doubled.len() as u64));

    group.bench_function("remove_duplicate_facets", |b| {
        b.iter(|| {
            let mut facets = doubled.clone();
            remove_duplicate_facets(black_box(&mut facets))
        });
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_adjacency, bench_repair, bench_duplicates);

criterion_main!(benches);
