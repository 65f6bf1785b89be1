//! CLI entry point for contrast-coverage.

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use contrast_coverage::analysis::RenderedReport;
use contrast_coverage::cli::Cli;
use contrast_coverage::config::{AnalysisConfig, OutputFormat};
use contrast_coverage::logging::init_logging;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file.as_deref(), Some(&cli.log_level));

    let config = AnalysisConfig::load(cli.config.as_deref(), &cli.to_config_overrides())
        .wrap_err("Failed to load configuration")?;

    if let Some(ref path) = cli.save_config {
        config
            .save(path)
            .wrap_err_with(|| format!("Failed to save configuration to {}", path.display()))?;
        eprintln!("Saved configuration to {}", path.display());
    }

    let pairs = config
        .population
        .build()
        .wrap_err("Failed to build population")?;
    info!(
        pairs = pairs.len(),
        comparisons = config.comparisons.len(),
        "starting analysis"
    );

    let reports = config
        .comparisons
        .iter()
        .map(|c| c.run(&pairs).map(|r| r.render(config.output.scale)))
        .collect::<Result<Vec<RenderedReport>, _>>()
        .wrap_err("Comparison failed")?;

    let text = match config.output.format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(&reports).wrap_err("Failed to serialize reports to YAML")?
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(&reports).wrap_err("Failed to serialize reports to JSON")?
        }
    };

    if let Some(ref path) = cli.output {
        std::fs::write(path, &text)
            .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;
        eprintln!("Wrote {} reports to {}", reports.len(), path.display());
    } else {
        print!("{text}");
    }

    Ok(())
}
