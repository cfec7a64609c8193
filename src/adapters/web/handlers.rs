//! HTTP request handlers for web adapter.

use askama::Template;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::domain::monitor::MonitorSnapshot;

use super::templates::{BasePage, PanelTemplate};
use super::{is_htmx_request, price_chart_svg, AppState, WebError};

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let panel = {
        let snapshot = state.snapshot.read().await;
        PanelTemplate::from_snapshot(&snapshot)
    };
    let fragment = panel.render()?;

    if is_htmx_request(&headers) {
        return Ok(Html(fragment).into_response());
    }

    let page = BasePage {
        title: &panel.symbol,
        content: &fragment,
    };
    Ok(Html(page.render()?).into_response())
}

pub async fn analysis_json(State(state): State<Arc<AppState>>) -> Json<MonitorSnapshot> {
    Json(state.snapshot.read().await.clone())
}

pub async fn chart(State(state): State<Arc<AppState>>) -> Response {
    let svg = price_chart_svg(&state.snapshot.read().await.bars);
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
}

pub async fn refresh(State(state): State<Arc<AppState>>) -> StatusCode {
    state.refresh_trigger.notify_one();
    StatusCode::ACCEPTED
}

pub async fn not_found() -> WebError {
    WebError::not_found("Page not found")
}
