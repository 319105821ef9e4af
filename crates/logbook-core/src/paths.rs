use std::path::{Component, Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const DEFAULT_TRACKING_DIR: &str = ".claude/system";
pub const DEFAULT_FEATURES_FILE: &str = "features.json";

/// Default single-mode feature file, relative to the working directory.
pub const DEFAULT_FEATURES_PATH: &str = ".claude/system/features.json";

/// Default workspace config, relative to the working directory. Each project
/// keeps its own config at the same location under its root.
pub const LOGBOOK_CONFIG_FILE: &str = ".claude/logbook.local.md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(LOGBOOK_CONFIG_FILE)
}

/// `root/tracking_dir/features_file`, normalized. Absolute components replace
/// whatever precedes them.
pub fn features_path(root: &Path, tracking_dir: &str, features_file: &str) -> PathBuf {
    normalize(&root.join(tracking_dir).join(features_file))
}

/// The directory a workspace config's relative paths resolve against: the
/// parent of the directory holding the config (`<root>/.claude/x.md` -> `<root>`).
pub fn workspace_root(config_path: &Path) -> PathBuf {
    let dir = config_path.parent().unwrap_or(Path::new("."));
    dir.parent().unwrap_or(dir).to_path_buf()
}

/// Make `path` absolute against the current directory and normalize it.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize(path);
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    normalize(&cwd.join(path))
}

/// Collapse `.` and `..` lexically. Does not touch the filesystem, so
/// symlinks are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_dots() {
        assert_eq!(
            normalize(Path::new("/ws/./a/../b/features.json")),
            PathBuf::from("/ws/b/features.json")
        );
        assert_eq!(normalize(Path::new("/ws/../../x")), PathBuf::from("/x"));
        assert_eq!(normalize(Path::new("../a/./b/..")), PathBuf::from("../a"));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn workspace_root_is_grandparent_of_config() {
        assert_eq!(
            workspace_root(Path::new("/ws/.claude/logbook.local.md")),
            PathBuf::from("/ws")
        );
        assert_eq!(
            workspace_root(Path::new("/logbook.local.md")),
            PathBuf::from("/")
        );
    }

    #[test]
    fn features_path_uses_tracking_dir() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            features_path(root, DEFAULT_TRACKING_DIR, DEFAULT_FEATURES_FILE),
            PathBuf::from("/tmp/proj/.claude/system/features.json")
        );
        assert_eq!(
            features_path(root, "../shared/tracking", "roadmap.json"),
            PathBuf::from("/tmp/shared/tracking/roadmap.json")
        );
        assert_eq!(
            features_path(root, "/abs/dir", "f.json"),
            PathBuf::from("/abs/dir/f.json")
        );
    }

    #[test]
    fn absolutize_keeps_absolute_paths() {
        assert_eq!(
            absolutize(Path::new("/a/b/../c.json")),
            PathBuf::from("/a/c.json")
        );
        let rel = absolutize(Path::new(DEFAULT_FEATURES_PATH));
        assert!(rel.is_absolute());
        assert!(rel.ends_with(DEFAULT_FEATURES_PATH));
    }

    #[test]
    fn project_config_lives_under_claude_dir() {
        assert_eq!(
            project_config_path(Path::new("/p")),
            PathBuf::from("/p/.claude/logbook.local.md")
        );
    }
}
