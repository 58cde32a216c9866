//! Chart rendering.
//!
//! Each aggregate is drawn as an SVG document and written as one PNG file
//! in the output directory. File names are fixed so reports can link to
//! them.

pub mod bar;
pub mod histogram;
pub mod raster;
pub mod svg;

use crate::error::VizError;
use crate::models::{AnalysisSummary, FunctionKind};
use bar::{Bar, BarChart};
use histogram::Histogram;
use indicatif::{ProgressBar, ProgressStyle};
use raster::Rasterizer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rendering settings.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Number of bins in the relevance score histogram.
    pub bins: usize,
    /// Bar fill colour.
    pub color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            bins: 20,
            color: "#4C72B0".to_string(),
        }
    }
}

impl From<&crate::config::ChartsConfig> for ChartConfig {
    fn from(config: &crate::config::ChartsConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            bins: config.bins,
            color: config.color.clone(),
        }
    }
}

/// The fixed set of charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    FilesPerIssue,
    FunctionsPerIssue,
    RelevanceScores,
    FileExtensions,
    TopFunctions,
    ClassVsStandalone,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::FilesPerIssue,
        ChartKind::FunctionsPerIssue,
        ChartKind::RelevanceScores,
        ChartKind::FileExtensions,
        ChartKind::TopFunctions,
        ChartKind::ClassVsStandalone,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::FilesPerIssue => "files_per_issue_distribution.png",
            ChartKind::FunctionsPerIssue => "functions_per_issue_distribution.png",
            ChartKind::RelevanceScores => "relevance_score_distribution.png",
            ChartKind::FileExtensions => "file_extensions.png",
            ChartKind::TopFunctions => "top_functions.png",
            ChartKind::ClassVsStandalone => "class_vs_standalone.png",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::FilesPerIssue => "Distribution of Files per Issue",
            ChartKind::FunctionsPerIssue => "Distribution of Functions per Issue",
            ChartKind::RelevanceScores => "Distribution of Relevance Scores",
            ChartKind::FileExtensions => "Most Common File Extensions",
            ChartKind::TopFunctions => "Most Common Function Names",
            ChartKind::ClassVsStandalone => "Class Methods vs Standalone Functions",
        }
    }

    /// Build the chart description for this kind.
    pub fn build(&self, summary: &AnalysisSummary, config: &ChartConfig) -> BarChart {
        match self {
            ChartKind::FilesPerIssue => histogram_chart(
                self.title(),
                "Number of files",
                &Histogram::integer(&summary.files_per_issue),
            ),
            ChartKind::FunctionsPerIssue => histogram_chart(
                self.title(),
                "Number of functions",
                &Histogram::integer(&summary.functions_per_issue),
            ),
            ChartKind::RelevanceScores => histogram_chart(
                self.title(),
                "Relevance score",
                &Histogram::continuous(&summary.relevance_scores, config.bins),
            ),
            ChartKind::FileExtensions => BarChart::new(
                self.title(),
                "Extension",
                "Patches",
                frequency_bars(summary.top_extensions()),
            ),
            ChartKind::TopFunctions => BarChart::new(
                self.title(),
                "Function",
                "Patches",
                frequency_bars(summary.top_function_names()),
            ),
            ChartKind::ClassVsStandalone => {
                let kinds = summary.function_kinds;
                let bars = if kinds.total() == 0 {
                    Vec::new()
                } else {
                    vec![
                        Bar::new(FunctionKind::ClassMethod.to_string(), kinds.class_methods),
                        Bar::new(FunctionKind::Standalone.to_string(), kinds.standalone),
                    ]
                };
                BarChart::new(self.title(), "Function type", "Patches", bars)
            }
        }
    }
}

fn histogram_chart(title: &str, x_label: &str, hist: &Histogram) -> BarChart {
    debug!("{}: {} values in {} bins", title, hist.total(), hist.bins.len());

    let bars = hist
        .labels()
        .into_iter()
        .zip(&hist.bins)
        .map(|(label, bin)| Bar::new(label, bin.count))
        .collect();

    BarChart::new(title, x_label, "Issues", bars).contiguous()
}

fn frequency_bars(table: &[(String, usize)]) -> Vec<Bar> {
    table
        .iter()
        .map(|(label, count)| Bar::new(label.as_str(), *count))
        .collect()
}

/// Write every chart into `out_dir`. Returns the written paths in chart order.
pub fn render_all(
    summary: &AnalysisSummary,
    out_dir: &Path,
    config: &ChartConfig,
    show_progress: bool,
) -> Result<Vec<PathBuf>, VizError> {
    fs::create_dir_all(out_dir).map_err(|e| VizError::write(out_dir, e))?;

    let pb = if show_progress {
        let pb = ProgressBar::new(ChartKind::ALL.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let rasterizer = Rasterizer::new();
    let mut written = Vec::with_capacity(ChartKind::ALL.len());

    for kind in ChartKind::ALL {
        if let Some(ref pb) = pb {
            pb.set_message(kind.file_name());
        }

        let path = out_dir.join(kind.file_name());
        let svg = kind.build(summary, config).render(config);
        let png = rasterizer.to_png(&svg, &path)?;
        fs::write(&path, png).map_err(|e| VizError::write(&path, e))?;
        debug!("Wrote {}", path.display());
        written.push(path);

        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    info!("Rendered {} charts into {}", written.len(), out_dir.display());
    Ok(written)
}
