//! Benchmarks for ranking and filtering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sportspot_places::{apply, rank, Coordinate, FilterParams, Place};
use std::sync::Arc;

fn grid(n: usize) -> Vec<Arc<Place>> {
    (0..n)
        .map(|i| {
            let lat = 13.0 + (i % 100) as f64 * 0.01;
            let lng = 100.0 + (i / 100) as f64 * 0.01;
            let category = if i % 3 == 0 { "gym" } else { "pitch" };
            let coordinate = Coordinate::new(lat, lng);
            Arc::new(Place::new(i.to_string(), format!("Place {i}"), category, coordinate))
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let origin = Coordinate::new(13.5, 100.2);
    let mut group = c.benchmark_group("rank");
    for n in [100, 1_000, 10_000] {
        let places = grid(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &places, |b, places| {
            b.iter(|| rank(black_box(places), Some(origin)))
        });
    }
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let ranked = rank(&grid(10_000), Some(Coordinate::new(13.5, 100.2)));
    let params = FilterParams::new().with_search_text("gym").with_radius_km(25.0).with_limit(30);

    c.bench_function("filter_10k", |b| b.iter(|| apply(black_box(ranked.clone()), &params)));
}

criterion_group!(benches, bench_rank, bench_filter);
criterion_main!(benches);
