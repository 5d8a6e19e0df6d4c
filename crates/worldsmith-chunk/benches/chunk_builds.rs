use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::DVec3;
use worldsmith_chunk::*;

fn rolling(ctx: &SampleContext<'_, ()>) -> f64 {
    (ctx.input.x * 0.01).sin() * (ctx.input.y * 0.013).cos() * 50.0
}

fn tint(ctx: &ColorContext<'_, ()>) -> Color {
    Color::Rgb([(ctx.height / 50.0) as f32 * 0.5 + 0.5, 0.4, 0.3])
}

fn patch(resolution: u32) -> PatchDescriptor<()> {
    PatchDescriptor::new(6_000_000.0, 2_000.0, resolution, ())
        .with_offset(DVec3::new(10_000.0, -4_000.0, 0.0))
}

fn bench_sphere_chunk(c: &mut Criterion) {
    for res in [16, 64] {
        let p = patch(res);
        c.bench_function(&format!("sphere_chunk_{res}"), |bencher| {
            bencher.iter(|| black_box(build_sphere_chunk(black_box(&p), &rolling, Some(&tint))))
        });
    }
}

fn bench_ring_chunk(c: &mut Criterion) {
    for res in [16, 64] {
        let p = patch(res).with_height(3_000.0);
        c.bench_function(&format!("ring_chunk_{res}"), |bencher| {
            bencher.iter(|| black_box(build_ring_chunk(black_box(&p), &rolling, Some(&tint))))
        });
    }
}

fn bench_deindex(c: &mut Criterion) {
    let indices = grid_indices(64);
    let src = vec![1.0_f32; 65 * 65 * 4];
    c.bench_function("deindex_rgba_64", |bencher| {
        bencher.iter(|| black_box(deindex(black_box(&src), 4, &indices)))
    });
}

criterion_group!(
    benches,
    bench_sphere_chunk,
    bench_ring_chunk,
    bench_deindex
);
criterion_main!(benches);
