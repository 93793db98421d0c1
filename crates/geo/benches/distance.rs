//! Benchmarks for distance calculations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use sportspot_geo::{distance_km, parse_coordinate, Coordinate};

fn bench_single_distance(c: &mut Criterion) {
    let gym = Coordinate::new(13.75, 100.50);
    let park = Coordinate::new(13.80, 100.50);

    c.bench_function("haversine_single", |b| {
        b.iter(|| distance_km(black_box(&gym), black_box(&park)))
    });
}

fn bench_parsing(c: &mut Criterion) {
    let geojson = json!({"type": "Point", "coordinates": [100.50, 13.75]});
    let wkt = json!("POINT(100.50 13.75)");
    let fields = json!({"latitude": "13.75", "longitude": "100.50"});

    let mut group = c.benchmark_group("coordinate_parsing");
    group.bench_function("geojson", |b| b.iter(|| parse_coordinate(black_box(&geojson))));
    group.bench_function("wkt", |b| b.iter(|| parse_coordinate(black_box(&wkt))));
    group.bench_function("string_fields", |b| b.iter(|| parse_coordinate(black_box(&fields))));
    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_parsing);
criterion_main!(benches);
