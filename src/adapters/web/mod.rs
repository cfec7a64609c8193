//! Web server adapter.
//!
//! Axum dashboard for the monitored symbol: an HTML page that polls itself
//! with HTMX, a JSON view of the latest snapshot, and an SVG price chart.

mod chart_svg;
mod error;
mod handlers;
mod templates;

pub use chart_svg::price_chart_svg;
pub use error::WebError;
pub use handlers::*;
pub use templates::*;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::Notify;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::adapters::refresh::SharedSnapshot;

pub struct AppState {
    pub snapshot: SharedSnapshot,
    pub refresh_trigger: Arc<Notify>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/api/analysis", get(handlers::analysis_json))
        .route("/chart.svg", get(handlers::chart))
        .route("/refresh", post(handlers::refresh))
        .nest_service("/static", ServeDir::new("static"))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
