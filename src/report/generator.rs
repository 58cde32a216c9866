//! Markdown report generation.
//!
//! This module formats the aggregate statistics into a markdown summary
//! and writes it, optionally with a JSON copy, to the output directory.

use crate::cli::OutputFormat;
use crate::error::VizError;
use crate::models::{AnalysisSummary, Distribution, FunctionKind, Report, ReportMetadata};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Markdown report file name.
pub const MARKDOWN_REPORT: &str = "summary_report.md";

/// JSON report file name.
pub const JSON_REPORT: &str = "summary.json";

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", report.title));
    output.push_str(&generate_metadata_section(&report.metadata, &report.summary));
    output.push_str(&generate_statistics_section(&report.summary));
    output.push_str(&generate_frequency_section(
        "Top File Extensions",
        "Extension",
        report.summary.top_extensions(),
        report.summary.patch_count,
    ));
    output.push_str(&generate_frequency_section(
        "Top Function Names",
        "Function",
        report.summary.top_function_names(),
        report.summary.patch_count,
    ));
    output.push_str(&generate_function_kind_section(&report.summary));
    output.push_str(&generate_charts_section(&report.charts));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata, summary: &AnalysisSummary) -> String {
    let mut section = String::new();

    section.push_str("## Overview\n\n");
    section.push_str(&format!(
        "- **Results:** {}\n",
        code_span(&metadata.results_path)
    ));
    if metadata.source_files > 1 {
        section.push_str(&format!("- **Result Files:** {}\n", metadata.source_files));
    }
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Total Issues:** {}\n", summary.issue_count));
    section.push_str(&format!("- **Total Patches:** {}\n", summary.patch_count));
    section.push('\n');

    section
}

/// Generate the per-issue and relevance statistics tables.
fn generate_statistics_section(summary: &AnalysisSummary) -> String {
    let mut section = String::new();

    section.push_str("## Statistics\n\n");
    section.push_str("| Metric | Mean | Median | Min | Max |\n");
    section.push_str("|:---|:---:|:---:|:---:|:---:|\n");
    section.push_str(&stats_row("Files per issue", summary.files_stats.as_ref(), 2));
    section.push_str(&stats_row(
        "Functions per issue",
        summary.functions_stats.as_ref(),
        2,
    ));
    section.push_str(&stats_row(
        "Relevance score",
        summary.score_stats.as_ref(),
        3,
    ));
    section.push('\n');

    section
}

fn stats_row(label: &str, stats: Option<&Distribution>, precision: usize) -> String {
    match stats {
        Some(s) => format!(
            "| {label} | {:.p$} | {:.p$} | {:.p$} | {:.p$} |\n",
            s.mean,
            s.median,
            s.min,
            s.max,
            p = precision
        ),
        None => format!("| {label} | n/a | n/a | n/a | n/a |\n"),
    }
}

/// Generate a top-N frequency table.
fn generate_frequency_section(
    heading: &str,
    column: &str,
    rows: &[(String, usize)],
    total: usize,
) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", heading));

    if rows.is_empty() {
        section.push_str("No patches recorded.\n\n");
        return section;
    }

    section.push_str(&format!("| Rank | {} | Count | Share |\n", column));
    section.push_str("|:---:|:---|:---:|:---:|\n");

    for (i, (name, count)) in rows.iter().enumerate() {
        let share = if total > 0 {
            *count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        section.push_str(&format!(
            "| {} | {} | {} | {:.1}% |\n",
            i + 1,
            code_span(&escape_cell(name)),
            count,
            share
        ));
    }
    section.push('\n');

    section
}

/// Generate the class vs standalone table.
fn generate_function_kind_section(summary: &AnalysisSummary) -> String {
    let kinds = &summary.function_kinds;
    let mut section = String::new();

    section.push_str("## Class Methods vs Standalone Functions\n\n");
    section.push_str("| Type | Count | Share |\n");
    section.push_str("|:---|:---:|:---:|\n");

    for (kind, count) in [
        (FunctionKind::ClassMethod, kinds.class_methods),
        (FunctionKind::Standalone, kinds.standalone),
    ] {
        section.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            kind,
            count,
            kinds.percent(kind)
        ));
    }
    section.push('\n');

    section
}

/// Generate the embedded chart list.
fn generate_charts_section(charts: &[String]) -> String {
    if charts.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Charts\n\n");
    for chart in charts {
        let alt = chart
            .trim_end_matches(".png")
            .replace('_', " ");
        section.push_str(&format!("![{}]({})\n\n", alt, chart));
    }

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by patchviz*\n".to_string()
}

/// Pipes would split a markdown table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Inline code span whose delimiter is longer than any backtick run in
/// `text`. Padding keeps a leading or trailing backtick off the delimiter.
fn code_span(text: &str) -> String {
    let longest_run = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    let pad = if text.starts_with('`') || text.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{fence}{pad}{text}{pad}{fence}")
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write the requested report files into `out_dir`.
pub fn write_report(report: &Report, out_dir: &Path, format: OutputFormat) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir).map_err(|e| VizError::write(out_dir, e))?;

    let mut written = Vec::new();

    if format.wants_markdown() {
        let path = out_dir.join(MARKDOWN_REPORT);
        std::fs::write(&path, generate_markdown_report(report))
            .map_err(|e| VizError::write(&path, e))?;
        written.push(path);
    }

    if format.wants_json() {
        let path = out_dir.join(JSON_REPORT);
        std::fs::write(&path, generate_json_report(report)?)
            .map_err(|e| VizError::write(&path, e))?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summarize;
    use crate::loader::parse_results;
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_test_report() -> Report {
        let results = parse_results(
            include_str!("../../fixtures/sample_results.json"),
            Path::new("sample_results.json"),
        )
        .unwrap();

        Report {
            title: "Patch Results Summary".to_string(),
            metadata: ReportMetadata {
                results_path: "sample_results.json".to_string(),
                generated_at: Utc::now(),
                source_files: 1,
            },
            summary: summarize(&results, 10),
            charts: vec![
                "files_per_issue_distribution.png".to_string(),
                "top_functions.png".to_string(),
            ],
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report);

        assert!(markdown.starts_with("# Patch Results Summary"));
        assert!(markdown.contains("## Overview"));
        assert!(markdown.contains("- **Total Issues:** 4"));
        assert!(markdown.contains("- **Total Patches:** 8"));
        assert!(!markdown.contains("Result Files:"));
        assert!(markdown.contains("| Files per issue | 1.25 | 1.50 | 0.00 | 2.00 |"));
        assert!(markdown.contains("| Functions per issue | 2.00 | 2.50 | 0.00 | 3.00 |"));
        assert!(markdown.contains("| Relevance score | 0.625 | 0.685 | 0.120 | 0.950 |"));
        assert!(markdown.contains("| 1 | `py` | 7 | 87.5% |"));
        assert!(markdown.contains("| 1 | `__call__` | 2 | 25.0% |"));
        assert!(markdown.contains("| Class Method | 5 | 62.5% |"));
        assert!(markdown.contains("| Standalone Function | 3 | 37.5% |"));
        assert!(markdown.contains("![top functions](top_functions.png)"));
    }

    #[test]
    fn test_statistics_without_patches() {
        let mut report = create_test_report();
        report.summary.score_stats = None;
        let section = generate_statistics_section(&report.summary);
        assert!(section.contains("| Relevance score | n/a | n/a | n/a | n/a |"));
    }

    #[test]
    fn test_frequency_section_empty() {
        let section = generate_frequency_section("Top", "Name", &[], 0);
        assert!(section.contains("No patches recorded."));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
    }

    #[test]
    fn test_code_span_handles_backticks() {
        assert_eq!(code_span("__call__"), "`__call__`");
        assert_eq!(code_span("a`b"), "``a`b``");
        assert_eq!(code_span("x``y"), "```x``y```");
        assert_eq!(code_span("`tick`"), "`` `tick` ``");
    }

    #[test]
    fn test_backticks_in_names_and_paths() {
        let mut report = create_test_report();
        report.metadata.results_path = "runs/`odd`".to_string();
        report.summary.function_names = vec![("f`g|h".to_string(), 8)];

        let markdown = generate_markdown_report(&report);
        assert!(markdown.contains("- **Results:** `` runs/`odd` ``\n"));
        assert!(markdown.contains("| 1 | ``f`g\\|h`` | 8 | 100.0% |"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"issue_count\": 4"));
        assert!(json.contains("\"class_methods\": 5"));
        assert!(json.contains("\"results_path\""));
    }

    #[test]
    fn test_write_report_formats() {
        let dir = TempDir::new().unwrap();
        let report = create_test_report();

        let written = write_report(&report, dir.path(), OutputFormat::Markdown).unwrap();
        assert_eq!(written, vec![dir.path().join(MARKDOWN_REPORT)]);
        assert!(!dir.path().join(JSON_REPORT).exists());

        let written = write_report(&report, dir.path(), OutputFormat::Both).unwrap();
        assert_eq!(written.len(), 2);
        let json = std::fs::read_to_string(dir.path().join(JSON_REPORT)).unwrap();
        assert!(json.contains("\"top_n\": 10"));
    }
}
