// src/server/mod.rs

//! HTTP surface: the JSON lookup API plus the embedded browser UI.

mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::options::ServerOptions;
use crate::core::net::{DocumentSource, HttpSource};
use crate::error::Error;
use crate::schools::SchoolDirectory;

#[derive(Clone)]
pub struct AppState {
    pub schools: Arc<SchoolDirectory>,
    pub source: Arc<dyn DocumentSource>,
    pub base_url: Arc<str>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/app.js", get(handlers::app_js))
        .route("/style.css", get(handlers::style_css))
        .route("/api/results", get(handlers::results))
        .route("/api/schools", get(handlers::schools))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(opts: ServerOptions) -> Result<(), Error> {
    let schools = SchoolDirectory::load(&opts.csv_path)?;
    tracing::info!(
        schools = schools.len(),
        path = %opts.csv_path.display(),
        "loaded school allow-list"
    );

    let state = AppState {
        schools: Arc::new(schools),
        source: Arc::new(HttpSource::new()?),
        base_url: opts.base_url.into(),
    };

    let listener = tokio::net::TcpListener::bind(&opts.bind).await?;
    tracing::info!("listening on {}", opts.bind);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
