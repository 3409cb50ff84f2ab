//! Benchmarks for the unfolding pipeline.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point3;
use netfold::prelude::*;

/// A closed zig-zag "accordion" strip of n panels, each at a dihedral
/// angle to the next, so no two adjacent panels merge.
fn accordion_mesh(n: usize) -> TriangleMesh {
    let mut positions = Vec::with_capacity((n + 1) * 2);
    let mut indices = Vec::with_capacity(n * 6);

    for i in 0..=n {
        let x = i as f64;
        let y = if i % 2 == 0 { 0.0 } else { 0.5 };
        positions.push(Point3::new(x, y, 0.0));
        positions.push(Point3::new(x, y, 1.0));
    }

    for i in 0..n {
        let a = (2 * i) as u32;
        let b = a + 1;
        let c = a + 2;
        let d = a + 3;
        indices.extend_from_slice(&[a, b, c, c, b, d]);
    }

    TriangleMesh::new(positions, indices)
}

/// A flat grid plane of 2*n*n triangles; everything merges to one face.
fn grid_mesh(n: usize) -> TriangleMesh {
    let mut positions = Vec::with_capacity((n + 1) * (n + 1));
    let mut indices = Vec::with_capacity(n * n * 6);

    for j in 0..=n {
        for i in 0..=n {
            positions.push(Point3::new(i as f64, 0.0, j as f64));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = (j * (n + 1) + i) as u32;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1) as u32;
            let v11 = v01 + 1;

            indices.extend_from_slice(&[v00, v10, v11, v00, v11, v01]);
        }
    }

    TriangleMesh::new(positions, indices)
}

fn bench_build(c: &mut Criterion) {
    let config = UnfoldConfig::default().sequential();

    c.bench_function("build_accordion_100", |b| {
        let mesh = accordion_mesh(100);
        b.iter(|| Unfolding::build(&mesh, &config).unwrap());
    });

    c.bench_function("build_grid_50x50_merge_to_one", |b| {
        let mesh = grid_mesh(50);
        b.iter(|| Unfolding::build(&mesh, &config).unwrap());
    });
}

fn bench_animation(c: &mut Criterion) {
    let mesh = accordion_mesh(100);
    let config = UnfoldConfig::default()
        .sequential()
        .with_unfold_duration(0.1);

    c.bench_function("unfold_accordion_100_ticks", |b| {
        b.iter(|| {
            let unfolding = Unfolding::build(&mesh, &config).unwrap();
            let mut animator = UnfoldAnimator::new(unfolding, &config);
            animator.toggle_unfold();
            while animator.is_animating() {
                animator.tick(1.0 / 60.0);
            }
            animator.is_unfolded()
        });
    });

    c.bench_function("world_transforms_accordion_100", |b| {
        let unfolding = Unfolding::build(&mesh, &config).unwrap();
        let hierarchy = unfolding.hierarchy();
        b.iter(|| {
            let mut sum = 0.0;
            for id in 0..hierarchy.len() {
                let id = NodeId::new(id);
                sum += hierarchy.world_transform(id).translation.vector.norm();
            }
            sum
        });
    });
}

criterion_group!(benches, bench_build, bench_animation);
criterion_main!(benches);
