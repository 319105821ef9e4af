//! Front-matter reader for logbook config files.
//!
//! This is not a YAML parser. It walks the block between the leading `---`
//! delimiters line by line and understands exactly two shapes:
//!
//! ```text
//! ---
//! tracking_dir: .claude/system
//! features_file: features.json
//! projects:
//!   api:
//!     path: ../api
//! ---
//! ```
//!
//! Column-0 `key: value` lines are scalars. Under `projects:`, a name at two
//! spaces opens an entry and a deeper `path:` completes it. A ` #` starts a
//! trailing comment outside quotes. Everything else is skipped without
//! complaint.

use crate::paths::{DEFAULT_FEATURES_FILE, DEFAULT_TRACKING_DIR};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const DELIMITER: &str = "---";
const PROJECT_NAME_INDENT: usize = 2;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One `projects:` entry that carried a `path:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub name: String,
    /// Raw path as written, relative to the workspace root unless absolute.
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    scalars: HashMap<String, String>,
    projects: Vec<ProjectEntry>,
}

impl Frontmatter {
    /// First non-empty value written for `key` at column 0.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.scalars.get(key).map(String::as_str)
    }

    pub fn tracking_dir(&self) -> &str {
        self.get("tracking_dir").unwrap_or(DEFAULT_TRACKING_DIR)
    }

    pub fn features_file(&self) -> &str {
        self.get("features_file").unwrap_or(DEFAULT_FEATURES_FILE)
    }

    /// Completed project entries in declaration order.
    pub fn projects(&self) -> &[ProjectEntry] {
        &self.projects
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    SeekingStart,
    Scalars,
    ProjectsBlock,
    /// A `  <name>:` line was seen and its `path:` has not arrived yet.
    ProjectEntry(String),
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

static PROJECT_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn project_name_re() -> &'static Regex {
    PROJECT_NAME_RE.get_or_init(|| Regex::new(r"^[\w-]+$").unwrap())
}

/// Parse the front-matter at the very start of `content`.
///
/// Returns `None` when the first line is not `---` or the block is never
/// closed.
pub fn parse(content: &str) -> Option<Frontmatter> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut fm = Frontmatter::default();
    let mut state = ScanState::SeekingStart;

    for line in content.lines() {
        let is_delimiter = line.trim_end() == DELIMITER;
        state = match state {
            ScanState::SeekingStart if is_delimiter => ScanState::Scalars,
            ScanState::SeekingStart => return None,
            _ if is_delimiter => return Some(fm),
            state => fm.step(state, line),
        };
    }
    None
}

impl Frontmatter {
    fn step(&mut self, state: ScanState, line: &str) -> ScanState {
        let body = line.trim_start();
        if body.is_empty() || body.starts_with('#') {
            return state;
        }
        let indent = line.len() - body.len();

        // A column-0 line always closes the projects block.
        if indent == 0 {
            let Some((key, value)) = split_key(body) else {
                return ScanState::Scalars;
            };
            if key == "projects" && value.is_empty() {
                return ScanState::ProjectsBlock;
            }
            if !value.is_empty() {
                self.scalars
                    .entry(key.to_string())
                    .or_insert_with(|| value.to_string());
            }
            return ScanState::Scalars;
        }

        match state {
            ScanState::ProjectsBlock | ScanState::ProjectEntry(_) => {
                self.project_line(state, body, indent)
            }
            // Indented lines outside `projects:` belong to keys we ignore.
            other => other,
        }
    }

    fn project_line(&mut self, state: ScanState, body: &str, indent: usize) -> ScanState {
        if indent == PROJECT_NAME_INDENT {
            return match split_key(body) {
                Some((key, _)) if project_name_re().is_match(key) => {
                    ScanState::ProjectEntry(key.to_string())
                }
                _ => ScanState::ProjectsBlock,
            };
        }

        let Some((key, value)) = split_key(body) else {
            return state;
        };
        match state {
            ScanState::ProjectEntry(name) if key == "path" && !value.is_empty() => {
                self.projects.push(ProjectEntry {
                    name,
                    path: value.to_string(),
                });
                ScanState::ProjectsBlock
            }
            other => other,
        }
    }
}

/// Split `key: value`, trimming both sides and dropping a trailing comment
/// and matching quotes around the value.
fn split_key(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key, unquote(strip_comment(value.trim()))))
}

/// Cut a `#` that opens the value or follows whitespace. A leading quoted
/// string is skipped so `"a #b"` survives.
fn strip_comment(value: &str) -> &str {
    let start = match value.chars().next() {
        Some(q @ ('"' | '\'')) => value[1..].find(q).map_or(0, |i| i + 2),
        _ => 0,
    };
    for (i, c) in value[start..].char_indices() {
        let at = start + i;
        if c == '#' && (at == 0 || value[..at].ends_with(char::is_whitespace)) {
            return value[..at].trim_end();
        }
    }
    value
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
