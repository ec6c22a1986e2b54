use criterion::{black_box, criterion_group, criterion_main, Criterion};
use note_detect::{Algorithm, NoteDetector, Transform};

fn tone(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| (2.0 * std::f64::consts::PI * 440.0 * i as f64 / 44_100.0).sin())
        .collect()
}

fn run_transform_benchmark(c: &mut Criterion, algorithm: Algorithm, len: usize) {
    let transform = algorithm.build();
    let samples = tone(len);
    c.bench_function(&format!("{algorithm} {len}"), |b| {
        b.iter(|| transform.transform(black_box(&samples)))
    });
}

fn transform_benchmarks(c: &mut Criterion) {
    run_transform_benchmark(c, Algorithm::Direct, 256);
    run_transform_benchmark(c, Algorithm::Direct, 1024);

    for len in [1024, 4096, 16384] {
        run_transform_benchmark(c, Algorithm::Iterative, len);
        run_transform_benchmark(c, Algorithm::Recursive, len);
        run_transform_benchmark(c, Algorithm::Planned, len);
    }
}

fn detector_benchmarks(c: &mut Criterion) {
    let samples = tone(8192);
    c.bench_function("detector 8192", |b| {
        b.iter(|| {
            let mut detector = NoteDetector::new(black_box(samples.clone()));
            detector.run()
        })
    });
}

criterion_group!(benches, transform_benchmarks, detector_benchmarks);
criterion_main!(benches);
