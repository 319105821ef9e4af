use axum::extract::State;
use axum::response::Html;

use super::run_blocking;
use crate::html;
use crate::state::AppState;

/// Fallback for every non-API path. A failed read renders the error page
/// instead, which keeps polling until the feature files are fixed.
pub async fn dashboard(State(app): State<AppState>) -> Html<String> {
    let roadmap = app.roadmap.clone();
    match run_blocking(move || roadmap.snapshot()).await {
        Ok(snapshot) => Html(html::render_dashboard(&snapshot, app.roadmap.sources())),
        Err(e) => Html(html::render_error_page(&e.message())),
    }
}
