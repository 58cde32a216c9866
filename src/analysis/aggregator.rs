//! Patch aggregation and frequency tables.
//!
//! This module turns a [`ResultSet`] into the per-issue counts, score
//! series and frequency tables that the charts and report are built from.

use crate::models::{AnalysisSummary, Distribution, FunctionKind, FunctionKindCounts, ResultSet};
use std::collections::{HashMap, HashSet};

/// Number of distinct files touched per issue.
pub fn files_per_issue(results: &ResultSet) -> Vec<usize> {
    results
        .values()
        .map(|record| {
            record
                .patches
                .iter()
                .map(|p| p.file_path.as_str())
                .collect::<HashSet<_>>()
                .len()
        })
        .collect()
}

/// Number of patched functions per issue.
pub fn functions_per_issue(results: &ResultSet) -> Vec<usize> {
    results.values().map(|record| record.patches.len()).collect()
}

/// Every relevance score, flattened across issues.
pub fn relevance_scores(results: &ResultSet) -> Vec<f64> {
    results
        .values()
        .flat_map(|record| record.patches.iter().map(|p| p.relevance_score))
        .collect()
}

/// Frequency of each file extension across all patches.
pub fn extension_frequency(results: &ResultSet) -> Vec<(String, usize)> {
    frequency(
        results
            .values()
            .flat_map(|record| record.patches.iter().map(|p| p.extension())),
    )
}

/// Frequency of each function name across all patches.
pub fn function_name_frequency(results: &ResultSet) -> Vec<(String, usize)> {
    frequency(
        results
            .values()
            .flat_map(|record| record.patches.iter().map(|p| p.function_name.clone())),
    )
}

/// Count class methods versus standalone functions.
pub fn class_vs_standalone(results: &ResultSet) -> FunctionKindCounts {
    let mut counts = FunctionKindCounts::default();

    for patch in results.values().flat_map(|r| &r.patches) {
        match patch.kind() {
            FunctionKind::ClassMethod => counts.class_methods += 1,
            FunctionKind::Standalone => counts.standalone += 1,
        }
    }

    counts
}

/// First `n` rows of a frequency table.
pub fn top_n(table: &[(String, usize)], n: usize) -> &[(String, usize)] {
    &table[..n.min(table.len())]
}

/// Run every aggregator once and bundle the results.
pub fn summarize(results: &ResultSet, top_n: usize) -> AnalysisSummary {
    let files = files_per_issue(results);
    let functions = functions_per_issue(results);
    let scores = relevance_scores(results);

    AnalysisSummary {
        issue_count: results.len(),
        patch_count: functions.iter().sum(),
        files_stats: Distribution::from_counts(&files),
        functions_stats: Distribution::from_counts(&functions),
        score_stats: Distribution::from_scores(&scores),
        files_per_issue: files,
        functions_per_issue: functions,
        relevance_scores: scores,
        extensions: extension_frequency(results),
        function_names: function_name_frequency(results),
        function_kinds: class_vs_standalone(results),
        top_n,
    }
}

/// Count occurrences, most common first and ties broken by name.
fn frequency(items: impl Iterator<Item = String>) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for item in items {
        *counts.entry(item).or_default() += 1;
    }

    let mut table: Vec<_> = counts.into_iter().collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    table
}
