pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use blueprint_core::draft::Draft;
use blueprint_core::idea::Idea;
use blueprint_core::production::Production;
use blueprint_core::project::Project;
use blueprint_core::template::TechTemplate;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::records::{fetch, remove, upsert};

/// Build the router for `root` with the configured generation client.
pub fn build_router(root: PathBuf) -> Router {
    router(state::AppState::new(root))
}

/// Build the router around an existing state. Tests use this to inject a
/// scripted generator.
pub fn router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/projects",
            get(fetch::<Project>)
                .post(upsert::<Project>)
                .delete(remove::<Project>),
        )
        .route(
            "/api/drafts",
            get(fetch::<Draft>)
                .post(upsert::<Draft>)
                .delete(remove::<Draft>),
        )
        .route(
            "/api/ideas",
            get(fetch::<Idea>)
                .post(routes::records::upsert_ideas)
                .delete(remove::<Idea>),
        )
        .route(
            "/api/templates",
            get(fetch::<TechTemplate>)
                .post(upsert::<TechTemplate>)
                .delete(remove::<TechTemplate>),
        )
        .route(
            "/api/productions",
            get(fetch::<Production>)
                .post(upsert::<Production>)
                .delete(remove::<Production>),
        )
        .route("/api/generate", post(routes::generate::generate_document))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the API server on `port`.
pub async fn serve(root: PathBuf, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    serve_on(root, listener, open_browser).await
}

/// Start the API server on a pre-bound listener, so callers binding port 0
/// can read the real port first.
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let port = listener.local_addr()?.port();
    let app = build_router(root);

    tracing::info!("blueprint server listening on http://localhost:{port}");

    if open_browser {
        let url = format!("http://localhost:{port}/api/projects");
        if let Err(e) = open::that(&url) {
            tracing::debug!(error = %e, "could not open browser");
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}
