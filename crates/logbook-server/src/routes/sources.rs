use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// GET /api/sources: the resolved feature files and whether each exists.
pub async fn list_sources(State(app): State<AppState>) -> Json<serde_json::Value> {
    let mut sources = Vec::with_capacity(app.roadmap.sources().len());
    for source in app.roadmap.sources() {
        let exists = tokio::fs::try_exists(&source.features_path)
            .await
            .unwrap_or(false);
        sources.push(serde_json::json!({
            "name": source.name,
            "features_path": source.features_path,
            "exists": exists,
        }));
    }
    let mode = if app.roadmap.is_multi() { "multi" } else { "single" };
    Json(serde_json::json!({ "mode": mode, "sources": sources }))
}
