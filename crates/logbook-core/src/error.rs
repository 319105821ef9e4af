use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogbookError {
    #[error("failed to parse workspace config {}: {reason}", .path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("failed to read features file {}: {message}", .path.display())]
    SourceRead { path: PathBuf, message: String },

    #[error("invalid JSON in features file {}: {message}", .path.display())]
    SourceParse { path: PathBuf, message: String },

    #[error(
        "features file {} must be a JSON array (or {{ \"features\": [...] }}), got {found}",
        .path.display()
    )]
    SourceSchema { path: PathBuf, found: &'static str },

    #[error("invalid status: {0}")]
    InvalidStatus(String),
}

impl LogbookError {
    /// The file the error is about, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            LogbookError::ConfigParse { path, .. }
            | LogbookError::SourceRead { path, .. }
            | LogbookError::SourceParse { path, .. }
            | LogbookError::SourceSchema { path, .. } => Some(path),
            LogbookError::InvalidStatus(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LogbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_path_and_type() {
        let err = LogbookError::SourceSchema {
            path: PathBuf::from("/tmp/proj/features.json"),
            found: "number",
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/proj/features.json"), "{msg}");
        assert!(msg.ends_with("got number"), "{msg}");
        assert!(msg.contains("{ \"features\": [...] }"), "{msg}");
    }

    #[test]
    fn source_errors_expose_path() {
        let err = LogbookError::SourceRead {
            path: PathBuf::from("/a/b.json"),
            message: "permission denied".into(),
        };
        assert_eq!(err.path(), Some(std::path::Path::new("/a/b.json")));
        assert!(LogbookError::InvalidStatus("x".into()).path().is_none());
    }
}
