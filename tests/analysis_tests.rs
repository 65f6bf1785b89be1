use contrast_coverage::analysis::{Axis, Comparison};
use contrast_coverage::color::{BLACK, ColorPair, WHITE};
use contrast_coverage::contrast::Metric;
use contrast_coverage::coverage::Scale;
use contrast_coverage::levels::ThresholdSet;
use contrast_coverage::sampler::{FixedSampler, Sampler, UniformSampler};

fn wcag_vs_apca() -> Comparison {
    Comparison::standard().remove(0)
}

#[test]
fn test_black_on_white_tops_both_axes() {
    let report = wcag_vs_apca()
        .run(&[ColorPair::new(BLACK, WHITE)])
        .unwrap();
    assert_eq!(report.matrix.count(3, 6), 1);
    assert_eq!(report.matrix.population(), 1);
}

#[test]
fn test_identical_colors_bottom_both_axes() {
    let gray = "#808080 on #808080".parse::<ColorPair>().unwrap();
    let comparison = wcag_vs_apca();
    assert_eq!(comparison.rows.scores(&[gray]).unwrap(), vec![1.0]);
    assert_eq!(comparison.cols.scores(&[gray]).unwrap(), vec![0.0]);

    let report = comparison.run(&[gray]).unwrap();
    assert_eq!(report.matrix.count(0, 0), 1);
}

#[test]
fn test_constant_scores_land_in_one_cell() {
    let rows = Axis::new("three-way", Metric::default(), ThresholdSet::wcag()).unwrap();
    let cols = Axis::new(
        "two-way",
        Metric::default(),
        ThresholdSet::new(vec![4.0, 6.0]).unwrap(),
    )
    .unwrap();
    let comparison = Comparison::new("constant", rows, cols);

    let scores = vec![5.0; 250];
    let matrix = comparison.tabulate_scores(&scores, &scores).unwrap();
    // 5.0 is at or above 4.5 in the first set and between 4 and 6 in the second
    assert_eq!(matrix.count(2, 1), 250);
    assert_eq!(matrix.population(), 250);
    assert_eq!(matrix.agreement(), None);

    let table = matrix.table(Scale::Percent);
    assert_eq!(table.cells[2][1], 100.0);
    assert!(table.is_consistent());
}

#[test]
fn test_standard_comparisons_on_sampled_pairs() {
    let pairs = UniformSampler::seeded(2024).sample(4_000);
    for comparison in Comparison::standard() {
        let report = comparison.run(&pairs).unwrap();
        assert_eq!(report.matrix.population(), 4_000);
        assert_eq!(report.matrix.rows(), comparison.rows.thresholds.bucket_count());
        assert_eq!(report.matrix.cols(), 7);

        let rendered = report.render(Scale::Percent);
        assert_eq!(rendered.name, comparison.name);
        assert!(rendered.table.is_consistent());
    }
}

#[test]
fn test_high_ambient_axis_is_square_against_apca() {
    let pairs = UniformSampler::seeded(9).sample(1_000);
    let comparison = &Comparison::standard()[1];
    let report = comparison.run(&pairs).unwrap();
    assert!(report.matrix.agreement().is_some());
}

#[test]
fn test_runs_are_deterministic() {
    let first = UniformSampler::seeded(77).sample(2_000);
    let second = UniformSampler::seeded(77).sample(2_000);
    assert_eq!(first, second);

    let comparison = wcag_vs_apca();
    let a = comparison.run(&first).unwrap();
    let b = comparison.run(&second).unwrap();
    assert_eq!(a.matrix, b.matrix);
}

#[test]
fn test_fixed_population_cycles() {
    let pairs = FixedSampler::new(vec![ColorPair::new(BLACK, WHITE)])
        .unwrap()
        .sample(10);
    let report = wcag_vs_apca().run(&pairs).unwrap();
    assert_eq!(report.matrix.count(3, 6), 10);
}

#[test]
fn test_invalid_metric_rejected() {
    assert!(Axis::new("bad", Metric::Wcag { ambient: -1.0 }, ThresholdSet::wcag()).is_err());

    let mut comparison = wcag_vs_apca();
    comparison.rows.metric = Metric::Wcag { ambient: 0.0 };
    assert!(comparison.run(&[ColorPair::new(BLACK, WHITE)]).is_err());
}

#[test]
fn test_empty_population() {
    let report = wcag_vs_apca().run(&[]).unwrap();
    assert_eq!(report.matrix.population(), 0);
    let rendered = report.render(Scale::Percent);
    assert_eq!(rendered.population, 0);
    assert!(rendered.table.is_consistent());
}
