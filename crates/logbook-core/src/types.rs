use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FeatureStatus
// ---------------------------------------------------------------------------

/// The four statuses the roadmap counts. Anything else found in a feature
/// file is kept on the record but never lands in a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    New,
    InProgress,
    Complete,
    Blocked,
}

impl FeatureStatus {
    pub fn all() -> &'static [FeatureStatus] {
        &[
            FeatureStatus::New,
            FeatureStatus::InProgress,
            FeatureStatus::Complete,
            FeatureStatus::Blocked,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureStatus::New => "new",
            FeatureStatus::InProgress => "in_progress",
            FeatureStatus::Complete => "complete",
            FeatureStatus::Blocked => "blocked",
        }
    }

    /// Human-facing label used by the dashboard and CLI tables.
    pub fn label(self) -> &'static str {
        match self {
            FeatureStatus::New => "New",
            FeatureStatus::InProgress => "In Progress",
            FeatureStatus::Complete => "Complete",
            FeatureStatus::Blocked => "Blocked",
        }
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FeatureStatus {
    type Err = crate::error::LogbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(FeatureStatus::New),
            "in_progress" => Ok(FeatureStatus::InProgress),
            "complete" => Ok(FeatureStatus::Complete),
            "blocked" => Ok(FeatureStatus::Blocked),
            _ => Err(crate::error::LogbookError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// How the start path handed to the locator is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The path is a single feature file.
    #[default]
    Single,
    /// The path is a workspace config listing several projects.
    Workspace,
}

impl Mode {
    pub fn from_workspace_flag(workspace: bool) -> Self {
        if workspace {
            Mode::Workspace
        } else {
            Mode::Single
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Single => "single",
            Mode::Workspace => "workspace",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for &status in FeatureStatus::all() {
            assert_eq!(status.as_str().parse::<FeatureStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        for s in ["done", "In_Progress", "", "COMPLETE"] {
            assert!(s.parse::<FeatureStatus>().is_err(), "expected invalid: {s}");
        }
    }

    #[test]
    fn mode_from_flag() {
        assert_eq!(Mode::from_workspace_flag(true), Mode::Workspace);
        assert_eq!(Mode::from_workspace_flag(false), Mode::Single);
        assert_eq!(Mode::default().to_string(), "single");
    }
}
