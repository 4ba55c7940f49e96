use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::renderer::{RenderOutcome, TimelineRenderer};

#[derive(Debug, Default, Deserialize)]
pub struct TimelineQuery {
    pub category: Option<String>,
}

pub fn build_router(renderer: Arc<TimelineRenderer>) -> Router {
    Router::new()
        .route("/", get(timeline_handler))
        .route("/health", get(health_handler))
        .with_state(renderer)
}

/// GET /
/// Loads the document and renders the page. `?category=<id>` preselects a filter.
async fn timeline_handler(
    State(renderer): State<Arc<TimelineRenderer>>,
    Query(query): Query<TimelineQuery>,
) -> Response {
    match renderer.render(query.category.as_deref()).await {
        RenderOutcome::Rendered { html, .. } => Html(html).into_response(),
        RenderOutcome::Failed { html, .. } => (StatusCode::BAD_GATEWAY, Html(html)).into_response(),
    }
}

/// GET /health
async fn health_handler(State(renderer): State<Arc<TimelineRenderer>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "career-timeline",
        "source": renderer.source().describe(),
    }))
}
