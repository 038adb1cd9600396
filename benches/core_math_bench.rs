use chart_morph::core::{
    FieldValue, Path, PathInterpolator, Point, Record, Resampling, StackLayoutComputer,
    StackSeries,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn wave(points: usize, phase: f64) -> Path {
    (0..points)
        .map(|i| {
            let x = i as f64;
            Point::new(x, (x * 0.05 + phase).sin() * 100.0)
        })
        .collect::<Vec<_>>()
        .into()
}

fn bench_path_interpolation_extend(c: &mut Criterion) {
    let from = wave(2_000, 0.0);
    let to = wave(500, 1.5);
    let interpolator = PathInterpolator::new(&from, &to, Resampling::ExtendToLongest);

    c.bench_function("path_interpolation_extend_2k", |b| {
        b.iter(|| {
            let _ = black_box(&interpolator).at(black_box(0.37));
        })
    });
}

fn bench_path_resample_uniform(c: &mut Criterion) {
    let from = wave(2_000, 0.0);
    let to = wave(500, 1.5);

    c.bench_function("path_resample_uniform_512", |b| {
        b.iter(|| {
            let _ = PathInterpolator::new(
                black_box(&from),
                black_box(&to),
                Resampling::Uniform { resolution: 512 },
            );
        })
    });
}

fn bench_stack_layout_8x1k(c: &mut Criterion) {
    let names: Vec<String> = (0..8).map(|i| format!("series-{i}")).collect();
    let records: Vec<Vec<Record>> = names
        .iter()
        .enumerate()
        .map(|(s, name)| {
            (0..1_000)
                .map(|i| {
                    let mut record = Record::new();
                    record.insert("series".to_owned(), FieldValue::from(name.as_str()));
                    record.insert("step".to_owned(), FieldValue::Number(i as f64));
                    record.insert(
                        "value".to_owned(),
                        FieldValue::Number(10.0 + ((i + s) % 7) as f64),
                    );
                    record
                })
                .collect()
        })
        .collect();
    let series: Vec<StackSeries<'_>> = names
        .iter()
        .zip(&records)
        .map(|(name, records)| StackSeries { name, records })
        .collect();
    let computer = StackLayoutComputer::new("step", "value");

    c.bench_function("stack_layout_8x1k", |b| {
        b.iter(|| {
            let _ = computer
                .compute(black_box(&series))
                .expect("stack layout should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_path_interpolation_extend,
    bench_path_resample_uniform,
    bench_stack_layout_8x1k
);
criterion_main!(benches);
