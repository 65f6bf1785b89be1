//! Performance benchmarks for coverage analysis.
//!
//! Measures the hot paths:
//! - Luminance of 256 colors under both models
//! - WCAG and APCA scoring
//! - Cross-tabulation of a full-size population
//! - A complete comparison run

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use contrast_coverage::analysis::Comparison;
use contrast_coverage::color::{Color, ColorPair};
use contrast_coverage::contrast::Metric;
use contrast_coverage::coverage::CoverageMatrix;
use contrast_coverage::levels::ThresholdSet;
use contrast_coverage::luminance::LuminanceModel;
use contrast_coverage::sampler::{Sampler, UniformSampler};

fn colors_256() -> Vec<Color> {
    (0u8..=255)
        .map(|i| Color::new(i, i.wrapping_mul(97), i.wrapping_mul(193)))
        .collect()
}

fn pairs_256() -> Vec<ColorPair> {
    let colors = colors_256();
    colors
        .iter()
        .zip(colors.iter().rev())
        .map(|(&fg, &bg)| ColorPair::new(fg, bg))
        .collect()
}

fn bench_luminance(c: &mut Criterion) {
    let colors = colors_256();

    c.bench_function("wcag_luminance_256", |b| {
        b.iter(|| {
            for &color in &colors {
                black_box(LuminanceModel::Wcag.luminance(color));
            }
        })
    });

    c.bench_function("apca_luminance_256", |b| {
        b.iter(|| {
            for &color in &colors {
                black_box(LuminanceModel::Apca.luminance(color));
            }
        })
    });
}

fn bench_scoring(c: &mut Criterion) {
    let pairs = pairs_256();
    let wcag = Metric::default();

    c.bench_function("wcag_score_256", |b| {
        b.iter(|| {
            for pair in &pairs {
                black_box(wcag.score_pair(pair));
            }
        })
    });

    c.bench_function("apca_score_256", |b| {
        b.iter(|| {
            for pair in &pairs {
                black_box(Metric::Apca.score_pair(pair));
            }
        })
    });
}

fn bench_tabulate(c: &mut Criterion) {
    let pairs = UniformSampler::seeded(1).sample(20_000);
    let wcag = ThresholdSet::wcag();
    let apca = ThresholdSet::apca();
    let rows = wcag.classify_all(&Metric::default().score_population(&pairs).unwrap());
    let cols = apca.classify_all(&Metric::Apca.score_population(&pairs).unwrap());

    c.bench_function("tabulate_20k", |b| {
        b.iter(|| {
            CoverageMatrix::tabulate(
                black_box(&rows),
                black_box(&cols),
                wcag.bucket_count(),
                apca.bucket_count(),
            )
        })
    });
}

fn bench_comparison(c: &mut Criterion) {
    let pairs = UniformSampler::seeded(2).sample(20_000);
    let comparison = Comparison::standard().remove(0);

    c.bench_function("comparison_run_20k", |b| {
        b.iter(|| comparison.run(black_box(&pairs)))
    });
}

criterion_group!(
    benches,
    bench_luminance,
    bench_scoring,
    bench_tabulate,
    bench_comparison,
);
criterion_main!(benches);
