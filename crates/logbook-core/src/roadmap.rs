//! The read-only roadmap: a fixed list of sources that is re-read on demand.

use crate::error::Result;
use crate::feature::FeatureRecord;
use crate::locator::{self, ProjectSource};
use crate::snapshot::{self, Snapshot};
use crate::source;
use crate::types::Mode;
use std::path::Path;

/// The resolved source list. Built once at startup and shared by every
/// request; nothing here is cached between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roadmap {
    sources: Vec<ProjectSource>,
}

impl Roadmap {
    pub fn new(sources: Vec<ProjectSource>) -> Self {
        Self { sources }
    }

    /// Resolve sources from the filesystem. Never fails; see [`locator::locate`].
    pub fn resolve(mode: Mode, start: Option<&Path>) -> Self {
        let roadmap = Self::new(locator::locate(mode, start));
        tracing::debug!(%mode, sources = roadmap.sources.len(), "resolved roadmap sources");
        roadmap
    }

    pub fn sources(&self) -> &[ProjectSource] {
        &self.sources
    }

    /// More than one source: the dashboard shows project columns and filters.
    pub fn is_multi(&self) -> bool {
        self.sources.len() > 1
    }

    /// Read every source and return the tagged records in source order.
    ///
    /// The first source that fails aborts the whole read; there is no
    /// partial result.
    pub fn features(&self) -> Result<Vec<FeatureRecord>> {
        let mut batches = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            batches.push((source, source::read_features(&source.features_path)?));
        }
        Ok(snapshot::combine(batches))
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot::from_features(self.features()?))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
