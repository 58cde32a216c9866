//! Structured error types for loading and rendering.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed results JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no issues found in {0}")]
    EmptyResults(PathBuf),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to render {path}: {reason}")]
    Render { path: PathBuf, reason: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VizError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn render(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Render {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_path() {
        let err = VizError::read(
            "missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("missing.json"));

        let err = VizError::EmptyResults(PathBuf::from("empty.json"));
        assert_eq!(err.to_string(), "no issues found in empty.json");

        let err = VizError::invalid("top-n must be at least 1");
        assert!(err.to_string().starts_with("invalid argument"));
    }
}
