// src/server/handlers.rs

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::query::EventQuery;
use crate::results;

use super::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const APP_JS: &str = include_str!("../../assets/app.js");
const STYLE_CSS: &str = include_str!("../../assets/style.css");

#[derive(Debug, Deserialize)]
pub struct ResultsParams {
    gender: Option<String>,
    event: Option<String>,
    course: Option<String>,
}

/// GET /api/results?gender=&event=&course=
pub async fn results(
    State(state): State<AppState>,
    Query(params): Query<ResultsParams>,
) -> Response {
    let query = match EventQuery::new(
        params.gender.as_deref(),
        params.event.as_deref(),
        params.course.as_deref(),
    ) {
        Ok(q) => q,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    match results::lookup(state.source.as_ref(), &state.base_url, &query, &state.schools).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            tracing::error!(error = %e, event = %query.event, "lookup failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to fetch event results",
            )
        }
    }
}

#[derive(Debug, Serialize)]
struct SchoolEntry<'a> {
    code: &'a str,
    name: &'a str,
}

/// GET /api/schools, the school key shown under the results table.
pub async fn schools(State(state): State<AppState>) -> Response {
    let listing: Vec<SchoolEntry<'_>> = state
        .schools
        .listing()
        .iter()
        .map(|(code, name)| SchoolEntry { code, name })
        .collect();
    Json(listing).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/* ---------------- embedded UI ---------------- */

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn app_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], APP_JS)
}

pub async fn style_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], STYLE_CSS)
}
