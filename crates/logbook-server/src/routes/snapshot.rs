use axum::extract::State;
use axum::Json;
use logbook_core::Snapshot;

use super::run_blocking;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/snapshot: totals, per-project stats and the priority-ordered
/// feature list.
pub async fn get_snapshot(State(app): State<AppState>) -> Result<Json<Snapshot>, AppError> {
    let roadmap = app.roadmap.clone();
    let snapshot = run_blocking(move || roadmap.snapshot()).await?;
    Ok(Json(snapshot))
}
