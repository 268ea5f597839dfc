use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use psvg_core::ConversionParams;
use psvg_core::PsGraphicsHandler;
use psvg_core::path::{GraphicsPath, PathIntersector, WindingRule};
use psvg_core::svg::SvgDevice;

/// Device discarding all output.
struct NullDevice;

impl SvgDevice for NullDevice {}

/// `shfill` operands of a Coons patch mesh with `n` x `n` patches.
fn coons_mesh(n: usize, size: f64) -> Vec<f64> {
    let mut ops = vec![6.0, 3.0, 0.0, 0.0];
    for row in 0..n {
        for col in 0..n {
            let (x0, y0) = (col as f64 * size, row as f64 * size);
            let (x1, y1) = (x0 + size, y0 + size);
            let third = size / 3.0;
            ops.push(0.0);
            #[rustfmt::skip]
            ops.extend([
                x0, y0, x0, y0 + third, x0, y1 - third, x0, y1,
                x0 + third, y1, x1 - third, y1, x1, y1,
                x1, y1 - third, x1, y0 + third, x1, y0,
                x1 - third, y0, x0 + third, y0,
            ]);
            let t = (row * n + col) as f64 / (n * n) as f64;
            ops.extend([t, 0.0, 1.0 - t]);
            ops.extend([1.0 - t, t, 0.0]);
            ops.extend([0.0, 1.0 - t, t]);
            ops.extend([t, t, t]);
        }
    }
    ops
}

fn bench_shfill_coons(c: &mut Criterion) {
    let mut group = c.benchmark_group("shfill_coons");
    for &n in &[2usize, 8] {
        let operands = coons_mesh(n, 100.0);
        group.bench_with_input(BenchmarkId::new("mesh", n), &operands, |b, operands| {
            b.iter(|| {
                let mut device = NullDevice;
                let mut handler = PsGraphicsHandler::new(&mut device, ConversionParams::default());
                handler.do_shfill(black_box(operands)).ok();
            })
        });
    }
    group.finish();
}

fn star(cx: f64, cy: f64, r: f64, points: usize) -> GraphicsPath {
    let mut path = GraphicsPath::new();
    for k in 0..points * 2 {
        let radius = if k % 2 == 0 { r } else { r / 2.5 };
        let angle = std::f64::consts::PI * k as f64 / points as f64;
        let (x, y) = (cx + radius * angle.cos(), cy + radius * angle.sin());
        if k == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path.close_path();
    path
}

fn bench_intersect(c: &mut Criterion) {
    let intersector = PathIntersector::default();
    let a = star(0.0, 0.0, 100.0, 24);
    let b = star(30.0, 20.0, 100.0, 24);
    c.bench_function("intersect_stars", |bench| {
        bench.iter(|| {
            let result = intersector.intersect(black_box(&a), black_box(&b), WindingRule::NonZero);
            black_box(result.len());
        })
    });
}

criterion_group!(shading_benches, bench_shfill_coons, bench_intersect);
criterion_main!(shading_benches);
