use std::path::PathBuf;

use contrast_coverage::analysis::Comparison;
use contrast_coverage::config::{AnalysisConfig, ConfigError, ConfigOverrides, OutputFormat};
use contrast_coverage::contrast::Metric;
use contrast_coverage::coverage::Scale;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("contrast-coverage-{}-{name}", std::process::id()))
}

const CUSTOM: &str = r#"
[population]
size = 500
seed = 99

[output]
format = "json"
scale = "count"

[[comparisons]]
name = "wcag-only"

[comparisons.rows]
label = "WCAG 2"
thresholds = [3, 4.5, 7]

[comparisons.rows.metric]
model = "wcag"
ambient = 0.05

[comparisons.cols]
label = "WCAG 2 dim"
thresholds = [2.0, 4.0]

[comparisons.cols.metric]
model = "wcag"
ambient = 0.2
"#;

#[test]
fn test_defaults() {
    let config = AnalysisConfig::default();
    assert_eq!(config.population.size, 20_000);
    assert_eq!(config.population.seed, None);
    assert!(config.population.pairs.is_empty());
    assert_eq!(config.output.format, OutputFormat::Yaml);
    assert_eq!(config.output.scale, Scale::Percent);
    assert_eq!(config.comparisons, Comparison::standard());
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_without_file_gives_defaults() {
    let config = AnalysisConfig::load(None, &ConfigOverrides::default()).unwrap();
    assert_eq!(config, AnalysisConfig::default());
}

#[test]
fn test_parse_custom_toml() {
    let config = AnalysisConfig::from_toml_str(CUSTOM).unwrap();
    assert_eq!(config.population.size, 500);
    assert_eq!(config.population.seed, Some(99));
    assert_eq!(config.output.format, OutputFormat::Json);
    assert_eq!(config.output.scale, Scale::Count);
    assert_eq!(config.comparisons.len(), 1);

    let comparison = &config.comparisons[0];
    assert_eq!(comparison.name, "wcag-only");
    assert_eq!(comparison.rows.thresholds.thresholds(), &[3.0, 4.5, 7.0]);
    assert_eq!(comparison.cols.metric, Metric::Wcag { ambient: 0.2 });
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = AnalysisConfig::from_toml_str("[population]\nsize = 10\n").unwrap();
    assert_eq!(config.population.size, 10);
    assert_eq!(config.output.scale, Scale::Percent);
    assert_eq!(config.comparisons, Comparison::standard());
}

#[test]
fn test_invalid_thresholds_rejected() {
    let toml = CUSTOM.replace("[2.0, 4.0]", "[4.0, 2.0]");
    assert!(matches!(
        AnalysisConfig::from_toml_str(&toml),
        Err(ConfigError::Extract(_))
    ));
}

#[test]
fn test_invalid_ambient_rejected() {
    let toml = CUSTOM.replace("ambient = 0.2", "ambient = -0.2");
    assert!(matches!(
        AnalysisConfig::from_toml_str(&toml),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_invalid_pair_rejected() {
    let toml = "[population]\npairs = [\"black on notacolor\"]\n";
    assert!(matches!(
        AnalysisConfig::from_toml_str(toml),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_explicit_pairs_replace_sampling() {
    let toml = "[population]\nsize = 5000\npairs = [\"#767676 on white\", \"red on black\"]\n";
    let config = AnalysisConfig::from_toml_str(toml).unwrap();
    let pairs = config.population.build().unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].to_string(), "#767676 on #ffffff");
    assert_eq!(pairs[1].to_string(), "#ff0000 on #000000");
}

#[test]
fn test_seeded_population_is_reproducible() {
    let config = AnalysisConfig::from_toml_str("[population]\nsize = 64\nseed = 5\n").unwrap();
    let a = config.population.build().unwrap();
    let b = config.population.build().unwrap();
    assert_eq!(a.len(), 64);
    assert_eq!(a, b);
}

#[test]
fn test_missing_file() {
    let path = temp_path("does-not-exist.toml");
    assert!(matches!(
        AnalysisConfig::load(Some(&path), &ConfigOverrides::default()),
        Err(ConfigError::Missing(p)) if p == path
    ));
}

#[test]
fn test_overrides_beat_file() {
    let path = temp_path("overrides.toml");
    std::fs::write(&path, CUSTOM).unwrap();

    let overrides = ConfigOverrides {
        size: Some(7),
        scale: Some(Scale::Percent),
        ..Default::default()
    };
    let config = AnalysisConfig::load(Some(&path), &overrides).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.population.size, 7);
    assert_eq!(config.population.seed, Some(99));
    assert_eq!(config.output.scale, Scale::Percent);
    assert_eq!(config.output.format, OutputFormat::Json);
}

#[test]
fn test_save_and_reload() {
    let path = temp_path("saved.toml");
    let mut config = AnalysisConfig::from_toml_str(CUSTOM).unwrap();
    config.population.pairs = vec!["black on white".into()];
    config.comparisons.extend(Comparison::standard());

    config.save(&path).unwrap();
    let reloaded = AnalysisConfig::load(Some(&path), &ConfigOverrides::default()).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(reloaded, config);
}
