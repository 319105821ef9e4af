pub mod error;
pub mod feature;
pub mod frontmatter;
pub mod locator;
pub mod paths;
pub mod roadmap;
pub mod snapshot;
pub mod source;
pub mod types;

pub use error::{LogbookError, Result};
pub use feature::FeatureRecord;
pub use locator::ProjectSource;
pub use roadmap::Roadmap;
pub use snapshot::Snapshot;
pub use types::{FeatureStatus, Mode};
