//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::chart::histogram::MAX_BINS;
use crate::error::VizError;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the output directory used when `--output` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "visualizations";

/// patchviz - charts and a markdown summary for patch results
///
/// Loads a JSON file mapping issue identifiers to lists of patch
/// candidates, writes one chart per aggregate and a summary report.
///
/// Examples:
///   patchviz --results results.json
///   patchviz --results results.json --output reports/ --top-n 15
///   patchviz --results runs/ --format both
///   patchviz --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the results JSON file
    ///
    /// A directory is also accepted: every *.json file beneath it is merged.
    #[arg(short, long, value_name = "PATH", required_unless_present = "init_config")]
    pub results: Option<PathBuf>,

    /// Directory to write charts and the report into
    ///
    /// Defaults to a `visualizations` directory next to the results file.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .patchviz.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rows in the top-N tables and bar charts
    #[arg(long, value_name = "N", env = "PATCHVIZ_TOP_N")]
    pub top_n: Option<usize>,

    /// Bins in the relevance score histogram
    #[arg(long, value_name = "N")]
    pub bins: Option<usize>,

    /// Summary format (markdown, json, both)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Skip chart rendering and only write the summary
    #[arg(long)]
    pub no_charts: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .patchviz.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Which summary files to write.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// summary_report.md (default)
    #[default]
    Markdown,
    /// summary.json
    Json,
    /// Both files
    Both,
}

impl OutputFormat {
    pub fn wants_markdown(&self) -> bool {
        matches!(self, OutputFormat::Markdown | OutputFormat::Both)
    }

    pub fn wants_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The results path, empty when not set (validate first).
    pub fn results_path(&self) -> &Path {
        self.results.as_deref().unwrap_or(Path::new(""))
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), VizError> {
        if self.init_config {
            return Ok(());
        }

        let results = self.results_path();
        if results.as_os_str().is_empty() {
            return Err(VizError::invalid("--results is required"));
        }
        if !results.exists() {
            return Err(VizError::invalid(format!(
                "Results path does not exist: {}",
                results.display()
            )));
        }

        if let Some(output) = &self.output {
            if output.exists() && !output.is_dir() {
                return Err(VizError::invalid(format!(
                    "Output path is not a directory: {}",
                    output.display()
                )));
            }
        }

        if self.top_n == Some(0) {
            return Err(VizError::invalid("--top-n must be at least 1"));
        }

        if let Some(bins) = self.bins {
            if !(1..=MAX_BINS).contains(&bins) {
                return Err(VizError::invalid(format!(
                    "--bins must be between 1 and {}",
                    MAX_BINS
                )));
            }
        }

        if self.verbose && self.quiet {
            return Err(VizError::invalid("Cannot use both --verbose and --quiet"));
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// The `visualizations` directory next to a results file, or inside a
/// results directory.
pub fn default_output_dir(results: &Path) -> PathBuf {
    if results.is_dir() {
        return results.join(DEFAULT_OUTPUT_DIR);
    }

    match results.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(DEFAULT_OUTPUT_DIR),
        _ => PathBuf::from(DEFAULT_OUTPUT_DIR),
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use tempfile::TempDir;

    pub fn make_args() -> Args {
        Args {
            results: Some(PathBuf::from("Cargo.toml")),
            output: None,
            config: None,
            top_n: None,
            bins: None,
            format: None,
            no_charts: false,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "patchviz",
            "--results",
            "results.json",
            "--output",
            "out",
            "--format",
            "both",
        ])
        .unwrap();
        assert_eq!(args.results, Some(PathBuf::from("results.json")));
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert_eq!(args.format, Some(OutputFormat::Both));
    }

    #[test]
    fn test_results_required() {
        assert!(Args::try_parse_from(["patchviz"]).is_err());
        assert!(Args::try_parse_from(["patchviz", "--init-config"]).is_ok());
    }

    #[test]
    fn test_validation_missing_results() {
        let mut args = make_args();
        args.results = Some(PathBuf::from("/nonexistent/results.json"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_values() {
        let mut args = make_args();
        args.top_n = Some(0);
        assert!(args.validate().is_err());

        let mut args = make_args();
        args.bins = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_bins_upper_bound() {
        let mut args = make_args();
        args.bins = Some(MAX_BINS);
        assert!(args.validate().is_ok());

        args.bins = Some(MAX_BINS + 1);
        assert!(args.validate().is_err());

        let args = Args::try_parse_from([
            "patchviz",
            "--results",
            "Cargo.toml",
            "--bins",
            "18446744073709551615",
        ])
        .unwrap();
        let err = args.validate().unwrap_err();
        assert!(err.to_string().contains("--bins must be between 1 and 1000"));
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            default_output_dir(Path::new("data/run1/results.json")),
            PathBuf::from("data/run1/visualizations")
        );
        assert_eq!(
            default_output_dir(Path::new("results.json")),
            PathBuf::from("visualizations")
        );

        let dir = TempDir::new().unwrap();
        assert_eq!(
            default_output_dir(dir.path()),
            dir.path().join("visualizations")
        );
    }

    #[test]
    fn test_output_format_selection() {
        assert!(OutputFormat::Markdown.wants_markdown());
        assert!(!OutputFormat::Markdown.wants_json());
        assert!(OutputFormat::Both.wants_markdown() && OutputFormat::Both.wants_json());
        assert!(!OutputFormat::Json.wants_markdown());
    }
}
