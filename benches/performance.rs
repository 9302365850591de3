// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polyframe_parts::component::{Bearing, Collar, Cube, MountingPlate};
use polyframe_parts::{to_scad, Assembly, Placement};

fn build(count: usize) -> Assembly {
    let mut assembly = Assembly::new();
    for i in 0..count {
        let name = format!("item{}", i);
        match i % 4 {
            0 => assembly.add(name, Cube::new(10.0, 5.0, 2.0).unwrap(), Placement::default()),
            1 => assembly.add(name, Bearing::new(8.0, 22.0, 7.0).unwrap(), Placement::default()),
            2 => assembly.add(
                name,
                Collar::new(8.0, 3.0, 6.0, 2.0, 3.0, 4.0).unwrap(),
                Placement::default().rotated(0.0, 0.0, 45.0),
            ),
            _ => assembly.add(
                name,
                MountingPlate::new(42.0, 42.0, 3.0, 3.0, 31.0, 31.0).unwrap(),
                Placement::default(),
            ),
        }
        .unwrap();
    }
    assembly
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");

    for count in [16, 128] {
        group.bench_with_input(BenchmarkId::new("stack_center", count), &count, |b, &n| {
            let mut assembly = build(n);
            b.iter(|| {
                assembly.stack_y(black_box(2.0));
                assembly.center_assembly();
            });
        });
    }

    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");

    for count in [16, 128] {
        let assembly = build(count);
        group.bench_with_input(BenchmarkId::new("sequential", count), &assembly, |b, a| {
            b.iter(|| black_box(a.assemble()));
        });
        group.bench_with_input(BenchmarkId::new("parallel", count), &assembly, |b, a| {
            b.iter(|| black_box(a.assemble_parallel()));
        });
    }

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let node = build(128).assemble();
    c.bench_function("to_scad_128", |b| b.iter(|| to_scad(black_box(&node))));
}

criterion_group!(benches, bench_layout, bench_assemble, bench_emit);
criterion_main!(benches);
