//! End-to-end run: load, aggregate, render, report.

use crate::analysis::summarize;
use crate::chart::{self, ChartConfig};
use crate::config::Config;
use crate::error::VizError;
use crate::loader;
use crate::models::{AnalysisSummary, Report, ReportMetadata};
use crate::report;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: AnalysisSummary,
    pub charts: Vec<PathBuf>,
    pub reports: Vec<PathBuf>,
}

/// Run every stage over `results_path`, writing into `out_dir`.
pub fn run(
    results_path: &Path,
    out_dir: &Path,
    config: &Config,
    show_progress: bool,
) -> Result<RunOutcome> {
    config.validate()?;

    let loaded = loader::load_results(results_path, Some(out_dir))
        .with_context(|| format!("Failed to load results from {}", results_path.display()))?;

    if loaded.results.is_empty() {
        return Err(VizError::EmptyResults(results_path.to_path_buf()).into());
    }

    let summary = summarize(&loaded.results, config.report.top_n);
    debug!(
        "Summary: {} issues, {} patches, {} extensions, {} function names",
        summary.issue_count,
        summary.patch_count,
        summary.extensions.len(),
        summary.function_names.len()
    );

    let charts = if config.charts.enabled {
        let chart_config = ChartConfig::from(&config.charts);
        chart::render_all(&summary, out_dir, &chart_config, show_progress)?
    } else {
        info!("Chart rendering disabled");
        Vec::new()
    };

    let report = Report {
        title: config.report.title.clone(),
        metadata: ReportMetadata {
            results_path: results_path.display().to_string(),
            generated_at: Utc::now(),
            source_files: loaded.sources.len(),
        },
        charts: charts
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect(),
        summary,
    };

    let reports = report::write_report(&report, out_dir, config.report.format)?;
    info!("Wrote {} report file(s) to {}", reports.len(), out_dir.display());

    Ok(RunOutcome {
        summary: report.summary,
        charts,
        reports,
    })
}
