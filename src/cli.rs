use clap::{Parser, ValueEnum};
use creditprep::config::PrepConfig;
use creditprep::error::Result;
use creditprep::pipeline;
use creditprep::prep::CsvStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "creditprep",
    about = "Credit delinquency dataset preparation pipeline",
    version
)]
pub struct Cli {
    /// Pipeline stage to run
    #[arg(value_enum)]
    pub mode: Mode,

    /// Path to the raw input CSV. Overrides the config file.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory the partition files are published into. Overrides the config file.
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the stratified shuffles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fraction of rows held out for the test partition
    #[arg(long)]
    pub test_size: Option<f64>,

    /// Fraction of the original rows held out for the validation partition
    #[arg(long)]
    pub val_size: Option<f64>,
}

/// Which part of the preparation workflow to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Stratified split only; publishes the raw train/val/test tables
    Split,
    /// Clean and engineer features over an existing split, re-publishing in
    /// place (runs the split stage first if no split has been published)
    Impute,
    /// Split, clean, and engineer features in one run
    All,
}

/// Resolve the effective settings: defaults, then the config file, then
/// any flags given on the command line.
pub fn resolve_config(cli: &Cli) -> Result<PrepConfig> {
    let mut config = match &cli.config {
        Some(path) => PrepConfig::from_file(path)?,
        None => PrepConfig::default(),
    };

    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    if let Some(out_dir) = &cli.out_dir {
        config.out_dir = out_dir.clone();
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(test_size) = cli.test_size {
        config.test_size = test_size;
    }
    if let Some(val_size) = cli.val_size {
        config.val_size = val_size;
    }

    config.validate()?;
    Ok(config)
}

pub fn run_command(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    let report = match cli.mode {
        Mode::Split => pipeline::run_split(&config, &CsvStore)?,
        Mode::Impute => pipeline::run_impute(&config, &CsvStore)?,
        Mode::All => pipeline::run_full(&config, &CsvStore)?,
    };

    println!("{}", report.summary());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_mode_is_required() {
        assert!(Cli::try_parse_from(["creditprep"]).is_err());
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["creditprep", "shuffle"]).is_err());
    }

    #[test]
    fn test_flags_override_defaults() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "creditprep",
            "all",
            "--input",
            "custom.csv",
            "--seed",
            "7",
            "--test-size",
            "0.2",
        ])?;
        assert_eq!(cli.mode, Mode::All);

        let config = resolve_config(&cli)?;
        assert_eq!(config.input, PathBuf::from("custom.csv"));
        assert_eq!(config.seed, 7);
        assert_eq!(config.test_size, 0.2);
        assert_eq!(config.val_size, PrepConfig::default().val_size);
        Ok(())
    }

    #[test]
    fn test_invalid_fractions_are_rejected_at_resolution() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["creditprep", "split", "--test-size", "0.9", "--val-size", "0.5"])?;
        assert!(resolve_config(&cli).is_err());
        Ok(())
    }
}
