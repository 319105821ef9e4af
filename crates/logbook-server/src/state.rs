use logbook_core::Roadmap;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
///
/// The roadmap's source list is fixed at startup; handlers re-read the
/// feature files on every request.
#[derive(Clone)]
pub struct AppState {
    pub roadmap: Arc<Roadmap>,
}

impl AppState {
    pub fn new(roadmap: Roadmap) -> Self {
        Self {
            roadmap: Arc::new(roadmap),
        }
    }
}
