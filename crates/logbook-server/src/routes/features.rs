use axum::extract::{Query, State};
use axum::Json;
use logbook_core::{FeatureRecord, FeatureStatus};

use super::run_blocking;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, serde::Deserialize)]
pub struct FeatureFilter {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// GET /api/features: every record from every source, tagged with
/// `_project`, in source order.
pub async fn list_features(
    State(app): State<AppState>,
    Query(filter): Query<FeatureFilter>,
) -> Result<Json<Vec<FeatureRecord>>, AppError> {
    let status = filter
        .status
        .as_deref()
        .map(str::parse::<FeatureStatus>)
        .transpose()?;

    let roadmap = app.roadmap.clone();
    let mut features = run_blocking(move || roadmap.features()).await?;

    if let Some(project) = filter.project.as_deref() {
        features.retain(|f| f.project() == Some(project));
    }
    if let Some(status) = status {
        features.retain(|f| f.status() == Some(status));
    }
    Ok(Json(features))
}
