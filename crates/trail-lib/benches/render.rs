//! Rendering benchmarks for trail-lib
//!
//! Run with: cargo bench --package trail-lib

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use trail_lib::{Canvas, Coordinate, History, TrailStyle, render};

/// Generate a wandering walk like the simulated robot produces
fn generate_walk(num_points: usize) -> History {
    let points = (0..num_points)
        .map(|i| {
            let t = i as f64;
            let lat = 48.2082 + t * 0.0001 + (t * 0.3).sin() * 0.0004;
            let lon = 16.3738 + t * 0.00015 + (t * 0.2).cos() * 0.0004;
            Coordinate::new(lat, lon).expect("generated coordinates are valid")
        })
        .collect();
    History::new(points)
}

fn bench_render(c: &mut Criterion) {
    let canvas = Canvas::default();
    let style = TrailStyle::default();
    let mut group = c.benchmark_group("render");

    for num_points in [10, 100, 1_000, 10_000] {
        let history = generate_walk(num_points);
        group.throughput(Throughput::Elements(num_points as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_points),
            &history,
            |b, history| b.iter(|| render(history, &canvas, &style)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
