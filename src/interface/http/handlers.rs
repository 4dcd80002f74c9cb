use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::{Metric, Point, Sample};
use crate::ports::SeriesStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SeriesStore>,
}

/// Response for /api/series/{metric}
#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub metric: Metric,
    pub column: &'static str,
    pub unit: &'static str,
    pub points: Vec<Point>,
}

/// Response for /api/table
#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub columns: [&'static str; 5],
    pub rows: Vec<Sample>,
}

/// Handler for GET /api/health
pub async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "resmon"
        })),
    )
}

/// Handler for GET /api/series/{metric}
pub async fn series_handler(State(state): State<AppState>, Path(metric): Path<String>) -> Response {
    let metric: Metric = match metric.parse() {
        Ok(m) => m,
        Err(e) => return (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    };

    let series = state.store.snapshot(metric);
    (
        StatusCode::OK,
        Json(SeriesResponse {
            metric,
            column: metric.column(),
            unit: metric.unit(),
            points: series.points,
        }),
    )
        .into_response()
}

/// Handler for GET /api/table
pub async fn table_handler(State(state): State<AppState>) -> Response {
    let table = state.store.table();
    (
        StatusCode::OK,
        Json(TableResponse {
            columns: table.columns(),
            rows: table.rows,
        }),
    )
        .into_response()
}

/// Handler for GET /api/latest
pub async fn latest_handler(State(state): State<AppState>) -> Response {
    match state.store.latest() {
        Some(sample) => (StatusCode::OK, Json(sample)).into_response(),
        None => (StatusCode::NOT_FOUND, "no samples yet").into_response(),
    }
}
