//! Results loader.
//!
//! Reads a single results JSON file, or every `*.json` file beneath a
//! directory, into one [`ResultSet`].

use crate::error::VizError;
use crate::models::{IssueRecord, ResultSet};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Results merged from one or more files.
#[derive(Debug, Clone, Default)]
pub struct LoadedResults {
    /// Issues keyed by identifier.
    pub results: ResultSet,
    /// Files the results were read from, in load order.
    pub sources: Vec<PathBuf>,
}

impl LoadedResults {
    /// Total number of patches across every issue.
    pub fn patch_count(&self) -> usize {
        self.results.values().map(|r| r.patches.len()).sum()
    }
}

/// Load results from a file or a directory of JSON files.
///
/// `exclude` names a directory to skip while walking, normally the output
/// directory so earlier `summary.json` files are not read back as input.
pub fn load_results(path: &Path, exclude: Option<&Path>) -> Result<LoadedResults, VizError> {
    let metadata = fs::metadata(path).map_err(|e| VizError::read(path, e))?;

    let sources = if metadata.is_dir() {
        collect_json_files(path, exclude)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut loaded = LoadedResults::default();
    for source in sources {
        let results = load_file(&source)?;
        debug!("Loaded {} issues from {}", results.len(), source.display());

        for (issue, record) in results {
            if loaded.results.contains_key(&issue) {
                warn!(
                    "Issue {} appears in more than one file; using {}",
                    issue,
                    source.display()
                );
            }
            loaded.results.insert(issue, record);
        }
        loaded.sources.push(source);
    }

    info!(
        "Loaded {} issues ({} patches) from {} file(s)",
        loaded.results.len(),
        loaded.patch_count(),
        loaded.sources.len()
    );

    Ok(loaded)
}

/// Read and parse one results file.
pub fn load_file(path: &Path) -> Result<ResultSet, VizError> {
    let content = fs::read_to_string(path).map_err(|e| VizError::read(path, e))?;
    parse_results(&content, path)
}

/// Parse a results document. `origin` is only used in error messages.
pub fn parse_results(content: &str, origin: &Path) -> Result<ResultSet, VizError> {
    serde_json::from_str::<BTreeMap<String, IssueRecord>>(content).map_err(|source| {
        VizError::Json {
            path: origin.to_path_buf(),
            source,
        }
    })
}

/// Find every `*.json` file below `dir`, sorted by path.
fn collect_json_files(dir: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>, VizError> {
    let mut files = Vec::new();

    // Resolved paths: `sub/../out` and `./out` name the same directory.
    let excluded = exclude.and_then(|x| fs::canonicalize(x).ok());

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !(is_hidden(e) || is_excluded(e, excluded.as_deref()))
        });

    for entry in walker {
        let entry = entry.map_err(|e| VizError::read(dir, e.into()))?;
        let path = entry.path();

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if entry.file_type().is_file() && is_json {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn is_excluded(entry: &walkdir::DirEntry, excluded: Option<&Path>) -> bool {
    match excluded {
        Some(x) if entry.file_type().is_dir() => fs::canonicalize(entry.path())
            .map(|p| p == x)
            .unwrap_or(false),
        _ => false,
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
