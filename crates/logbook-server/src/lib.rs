pub mod error;
pub mod html;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use logbook_core::Roadmap;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(roadmap: Roadmap) -> Router {
    let app_state = state::AppState::new(roadmap);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/features", get(routes::features::list_features))
        .route("/api/snapshot", get(routes::snapshot::get_snapshot))
        .route("/api/sources", get(routes::sources::list_sources))
        .fallback(routes::dashboard::dashboard)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the roadmap server on a pre-bound listener.
///
/// The caller binds (usually `127.0.0.1:0`) so it can read and announce the
/// actual port before serving.
pub async fn serve_on(
    roadmap: Roadmap,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let url = format!("http://127.0.0.1:{}", listener.local_addr()?.port());

    if roadmap.sources().is_empty() {
        tracing::warn!("no feature sources resolved; the dashboard will be empty");
    }
    for source in roadmap.sources() {
        tracing::info!("  {}: {}", source.name, source.features_path.display());
    }

    let app = build_router(roadmap);

    if open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!("could not open browser: {e}");
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}
