use crate::error::{LogbookError, Result};
use crate::frontmatter;
use crate::paths;
use crate::types::Mode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SINGLE_SOURCE_NAME: &str = "Project";
pub const WORKSPACE_SOURCE_NAME: &str = "Workspace";

// ---------------------------------------------------------------------------
// ProjectSource
// ---------------------------------------------------------------------------

/// A named feature file. Resolved once at startup and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSource {
    pub name: String,
    pub features_path: PathBuf,
}

impl ProjectSource {
    pub fn new(name: impl Into<String>, features_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            features_path: features_path.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Work out which feature files to read.
///
/// In single mode `start` is the feature file itself. In workspace mode it is
/// the workspace config; a config that cannot be used is logged and yields no
/// sources rather than an error.
pub fn locate(mode: Mode, start: Option<&Path>) -> Vec<ProjectSource> {
    match mode {
        Mode::Single => vec![single_source(start)],
        Mode::Workspace => {
            let config = paths::absolutize(start.unwrap_or(Path::new(paths::LOGBOOK_CONFIG_FILE)));
            match resolve_workspace(&config) {
                Ok(sources) => sources,
                Err(e) => {
                    tracing::warn!("{e}");
                    Vec::new()
                }
            }
        }
    }
}

pub fn single_source(path: Option<&Path>) -> ProjectSource {
    let path = path.unwrap_or(Path::new(paths::DEFAULT_FEATURES_PATH));
    ProjectSource::new(SINGLE_SOURCE_NAME, paths::absolutize(path))
}

/// Resolve every source a workspace config points at.
///
/// The workspace's own feature file comes first and is only included if it
/// exists. Projects follow in declaration order; see
/// [`resolve_project_features`] for how each one is located.
pub fn resolve_workspace(config_path: &Path) -> Result<Vec<ProjectSource>> {
    let content = std::fs::read_to_string(config_path).map_err(|e| LogbookError::ConfigParse {
        path: config_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let fm = frontmatter::parse(&content).ok_or_else(|| LogbookError::ConfigParse {
        path: config_path.to_path_buf(),
        reason: "missing front-matter delimiters (expected a leading `---` block)".to_string(),
    })?;

    let base = paths::workspace_root(config_path);
    let mut sources = Vec::new();

    let workspace_features = paths::features_path(&base, fm.tracking_dir(), fm.features_file());
    if workspace_features.exists() {
        sources.push(ProjectSource::new(WORKSPACE_SOURCE_NAME, workspace_features));
    }

    for entry in fm.projects() {
        let project_root = paths::normalize(&base.join(&entry.path));
        match resolve_project_features(&project_root) {
            Some(features_path) => sources.push(ProjectSource::new(&entry.name, features_path)),
            None => tracing::debug!(
                project = %entry.name,
                root = %project_root.display(),
                "no feature file found, skipping project"
            ),
        }
    }

    Ok(sources)
}

/// Locate a project's feature file from its own logbook config.
///
/// A readable config with front-matter decides the path outright, whether or
/// not that file exists yet. Otherwise the default location is used, but only
/// when something is actually there.
pub fn resolve_project_features(project_root: &Path) -> Option<PathBuf> {
    let config = paths::project_config_path(project_root);
    let parsed = std::fs::read_to_string(&config)
        .ok()
        .and_then(|content| frontmatter::parse(&content));
    if let Some(fm) = parsed {
        return Some(paths::features_path(
            project_root,
            fm.tracking_dir(),
            fm.features_file(),
        ));
    }

    let fallback = paths::features_path(
        project_root,
        paths::DEFAULT_TRACKING_DIR,
        paths::DEFAULT_FEATURES_FILE,
    );
    fallback.exists().then_some(fallback)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
