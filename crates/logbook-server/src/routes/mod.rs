pub mod dashboard;
pub mod features;
pub mod snapshot;
pub mod sources;

use crate::error::AppError;

/// Run a filesystem-bound core call on the blocking pool, logging failures
/// before they reach the client.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> logbook_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?
        .map_err(|e| {
            tracing::error!("{e}");
            AppError::from(e)
        })
}
