//! Data models for patch results.
//!
//! This module contains the input records loaded from a results file
//! and the summary structures produced by the aggregators.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Label used for files that have no extension.
pub const NO_EXTENSION: &str = "(none)";

/// One function-level change candidate for an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchRecord {
    /// Path of the file containing the function.
    pub file_path: String,
    /// Name of the function.
    pub function_name: String,
    /// Enclosing class, if the function is a method.
    #[serde(default)]
    pub class_name: Option<String>,
    /// How relevant the candidate is to the issue.
    pub relevance_score: f64,
}

impl PatchRecord {
    /// Returns the kind of function this patch touches.
    pub fn kind(&self) -> FunctionKind {
        match self.class_name.as_deref() {
            Some(name) if !name.trim().is_empty() => FunctionKind::ClassMethod,
            _ => FunctionKind::Standalone,
        }
    }

    /// Returns the file extension without the leading dot.
    pub fn extension(&self) -> String {
        Path::new(&self.file_path)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .map(|e| e.to_lowercase())
            .unwrap_or_else(|| NO_EXTENSION.to_string())
    }
}

/// All patches reported for a single issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    #[serde(default)]
    pub patches: Vec<PatchRecord>,
}

/// Loaded results, keyed by issue identifier.
///
/// A `BTreeMap` keeps iteration in key order so every aggregate is deterministic.
pub type ResultSet = BTreeMap<String, IssueRecord>;

/// Whether a function belongs to a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    ClassMethod,
    Standalone,
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionKind::ClassMethod => write!(f, "Class Method"),
            FunctionKind::Standalone => write!(f, "Standalone Function"),
        }
    }
}

/// Counts of class methods versus standalone functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionKindCounts {
    pub class_methods: usize,
    pub standalone: usize,
}

impl FunctionKindCounts {
    pub fn total(&self) -> usize {
        self.class_methods + self.standalone
    }

    /// Percentage of the total for a given kind (0.0 when empty).
    pub fn percent(&self, kind: FunctionKind) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let count = match kind {
            FunctionKind::ClassMethod => self.class_methods,
            FunctionKind::Standalone => self.standalone,
        };
        count as f64 / total as f64 * 100.0
    }
}

/// Descriptive statistics of a numeric series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

/// Every aggregate computed over a result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Number of issues in the input.
    pub issue_count: usize,
    /// Number of patches across all issues.
    pub patch_count: usize,
    /// Distinct files per issue, in issue key order.
    pub files_per_issue: Vec<usize>,
    /// Patches per issue, in issue key order.
    pub functions_per_issue: Vec<usize>,
    /// Every relevance score, flattened.
    pub relevance_scores: Vec<f64>,
    /// Full extension frequency table, most common first.
    pub extensions: Vec<(String, usize)>,
    /// Full function name frequency table, most common first.
    pub function_names: Vec<(String, usize)>,
    pub function_kinds: FunctionKindCounts,
    pub files_stats: Option<Distribution>,
    pub functions_stats: Option<Distribution>,
    pub score_stats: Option<Distribution>,
    /// Number of rows shown in top-N tables and bar charts.
    pub top_n: usize,
}

impl AnalysisSummary {
    /// The most common extensions, limited to `top_n`.
    pub fn top_extensions(&self) -> &[(String, usize)] {
        crate::analysis::top_n(&self.extensions, self.top_n)
    }

    /// The most common function names, limited to `top_n`.
    pub fn top_function_names(&self) -> &[(String, usize)] {
        crate::analysis::top_n(&self.function_names, self.top_n)
    }
}

/// The complete summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report heading.
    pub title: String,
    pub metadata: ReportMetadata,
    pub summary: AnalysisSummary,
    /// Chart file names, relative to the output directory.
    pub charts: Vec<String>,
}

/// Metadata about the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path the results were loaded from.
    pub results_path: String,
    /// When the report was generated.
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// Number of result files merged into the input.
    pub source_files: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(file: &str, class: Option<&str>) -> PatchRecord {
        PatchRecord {
            file_path: file.to_string(),
            function_name: "f".to_string(),
            class_name: class.map(String::from),
            relevance_score: 0.5,
        }
    }

    #[test]
    fn test_patch_kind() {
        assert_eq!(patch("a.py", Some("Foo")).kind(), FunctionKind::ClassMethod);
        assert_eq!(patch("a.py", None).kind(), FunctionKind::Standalone);
        assert_eq!(patch("a.py", Some("  ")).kind(), FunctionKind::Standalone);
    }

    #[test]
    fn test_patch_extension() {
        assert_eq!(patch("django/db/models.py", None).extension(), "py");
        assert_eq!(patch("lib/Widget.JS", None).extension(), "js");
        assert_eq!(patch("Makefile", None).extension(), NO_EXTENSION);
        assert_eq!(patch("archive.tar.gz", None).extension(), "gz");
    }

    #[test]
    fn test_parse_patch_with_null_class() {
        let json = r#"{
            "patches": [
                {"file_path": "a.py", "function_name": "run", "class_name": null, "relevance_score": 0.9},
                {"file_path": "b.py", "function_name": "save", "class_name": "Model", "relevance_score": 0.4, "extra": 1}
            ]
        }"#;
        let record: IssueRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.patches.len(), 2);
        assert_eq!(record.patches[0].class_name, None);
        assert_eq!(record.patches[1].class_name.as_deref(), Some("Model"));
    }

    #[test]
    fn test_missing_patches_is_empty() {
        let record: IssueRecord = serde_json::from_str("{}").unwrap();
        assert!(record.patches.is_empty());
    }

    #[test]
    fn test_function_kind_percent() {
        let counts = FunctionKindCounts {
            class_methods: 3,
            standalone: 1,
        };
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.percent(FunctionKind::ClassMethod), 75.0);
        assert_eq!(counts.percent(FunctionKind::Standalone), 25.0);
        assert_eq!(FunctionKindCounts::default().percent(FunctionKind::Standalone), 0.0);
    }
}
