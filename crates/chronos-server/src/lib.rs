pub mod error;
pub mod routes;
pub mod state;
pub mod ticker;

use axum::routing::{get, patch, post};
use axum::Router;
use chronos_core::config::Config;
use std::future::Future;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::{AppState, ServerEvent};
use ticker::Ticker;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health::health))
        // Events (SSE)
        .route("/api/events", get(routes::events::sse_events))
        // Activities
        .route(
            "/api/activities",
            get(routes::activities::list_activities).post(routes::activities::create_activity),
        )
        .route(
            "/api/activities/{id}",
            axum::routing::delete(routes::activities::delete_activity),
        )
        .route(
            "/api/activities/{id}/toggle",
            patch(routes::activities::toggle_activity),
        )
        .route(
            "/api/activities/{id}/template",
            post(routes::activities::save_as_template),
        )
        // Templates
        .route(
            "/api/templates",
            get(routes::templates::list_templates).post(routes::templates::create_template),
        )
        .route(
            "/api/templates/{id}",
            axum::routing::delete(routes::templates::delete_template),
        )
        .route(
            "/api/templates/{id}/draft",
            get(routes::templates::template_draft),
        )
        // Derived views
        .route("/api/schedule", get(routes::schedule::get_schedule))
        .route("/api/config", get(routes::config::get_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Serve the API on a pre-bound listener until `shutdown` resolves.
///
/// The status ticker runs for exactly as long as the server does: it starts
/// before the first request is accepted and is stopped after the last
/// connection drains. Open event streams are closed on shutdown.
pub async fn serve_on<F>(root: PathBuf, listener: tokio::net::TcpListener, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let config = Config::load(&root)?;
    for w in config.validate() {
        tracing::warn!("config: {}", w.message);
    }

    let actual_port = listener.local_addr()?.port();
    let app_state = AppState::new(root);
    let ticker = Ticker::start(config.tick_period(), app_state.event_tx.clone());

    let events = app_state.event_tx.clone();
    let signal = async move {
        shutdown.await;
        tracing::info!("shutting down");
        let _ = events.send(ServerEvent::Shutdown);
    };

    let app = build_router(app_state);
    tracing::info!("chronos API listening on http://localhost:{actual_port}/api");

    let served = axum::serve(listener, app).with_graceful_shutdown(signal).await;
    ticker.stop().await?;
    served?;
    Ok(())
}

/// Bind `bind:port` and serve until ctrl-c.
pub async fn serve(root: PathBuf, bind: &str, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("{bind}:{port}")).await?;
    serve_on(root, listener, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}
