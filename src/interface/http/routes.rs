use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::ports::SeriesStore;

use super::handlers::{health_handler, latest_handler, series_handler, table_handler, AppState};

pub fn create_router(store: Arc<dyn SeriesStore>) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/series/{metric}", get(series_handler))
        .route("/api/table", get(table_handler))
        .route("/api/latest", get(latest_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use tower::ServiceExt;

    use super::*;
    use crate::adapters::MemorySeriesStore;
    use crate::domain::{Metric, Reading, Sample};

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn populated_store() -> Arc<MemorySeriesStore> {
        let store = Arc::new(MemorySeriesStore::new());
        store
            .append(
                Sample::new(Utc::now())
                    .with_reading(Metric::Cpu, Reading::Available(10.0))
                    .with_reading(Metric::Memory, Reading::Available(40.0))
                    .with_reading(Metric::Network, Reading::Available(2.0)),
            )
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_health() {
        let (status, json) = get_json(create_router(populated_store()), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["service"], "resmon");
    }

    #[tokio::test]
    async fn test_series_by_slug_and_unavailable_as_null() {
        let router = create_router(populated_store());

        let (status, json) = get_json(router.clone(), "/api/series/cpu").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["column"], "CPU Usage");
        assert_eq!(json["points"][0]["value"], 10.0);

        let (_, json) = get_json(router, "/api/series/disk").await;
        assert!(json["points"][0]["value"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_metric_is_not_found() {
        let (status, _) = get_json(create_router(populated_store()), "/api/series/gpu").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_table_and_latest() {
        let router = create_router(populated_store());

        let (status, json) = get_json(router.clone(), "/api/table").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["columns"][0], "Time");
        assert_eq!(json["columns"][4], "Network Bandwidth Used");
        assert_eq!(json["rows"].as_array().unwrap().len(), 1);

        let (status, json) = get_json(router, "/api/latest").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["memory_used"], 40.0);

        let (status, _) = get_json(create_router(Arc::new(MemorySeriesStore::new())), "/api/latest").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
