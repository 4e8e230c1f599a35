//! HTTP boundary: an axum router over a shared [`ClimateApi`].
//!
//! Every query runs on the blocking pool since the store's work is synchronous
//! CPU work. Errors map to statuses uniformly across routes: malformed input is
//! `400`, a well-formed query with nothing to answer is `404`, anything else is
//! `500`. Error bodies are `{"error": "<message>"}`.

use crate::error::ClimateError;
use crate::facade::climate_api::ClimateApi;
use crate::facade::query_response::StationRow;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use log::{error, info};
use serde_json::json;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Query(#[from] ClimateError),

    #[error("Query task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// The HTTP status a query error is reported with.
pub fn status_for(err: &ClimateError) -> StatusCode {
    match err {
        ClimateError::InvalidDate { .. }
        | ClimateError::InvalidRange { .. }
        | ClimateError::MissingParameter(_) => StatusCode::BAD_REQUEST,
        ClimateError::UnknownStation(_)
        | ClimateError::NoDataInRange(_)
        | ClimateError::EmptyDataset => StatusCode::NOT_FOUND,
        ClimateError::Load(_) | ClimateError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Query(err) => status_for(err),
            ServerError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

type ApiState = Arc<ClimateApi>;

pub fn build_router(api: ClimateApi) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(|| async { "ok" }))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/:start", get(temperature_from))
        .route("/api/v1.0/:start/:end", get(temperature_range))
        .route("/api/v1.0/temp/:start", get(temperature_from))
        .route("/api/v1.0/temp/:start/:end", get(temperature_range))
        .with_state(Arc::new(api))
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(api: ClimateApi, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, build_router(api))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

async fn run_query<T, F>(api: ApiState, query: F) -> Result<Json<T>, ServerError>
where
    T: Send + 'static,
    F: FnOnce(&ClimateApi) -> Result<T, ClimateError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || query(api.as_ref())).await??;
    Ok(Json(result))
}

async fn index(State(api): State<ApiState>) -> Html<String> {
    Html(api.index())
}

async fn precipitation(
    State(api): State<ApiState>,
) -> Result<Json<BTreeMap<String, f64>>, ServerError> {
    run_query(api, ClimateApi::precipitation).await
}

async fn stations(State(api): State<ApiState>) -> Result<Json<Vec<StationRow>>, ServerError> {
    run_query(api, |api| Ok(api.stations())).await
}

async fn tobs(State(api): State<ApiState>) -> Result<Json<Vec<f64>>, ServerError> {
    run_query(api, ClimateApi::tobs).await
}

async fn temperature_from(
    State(api): State<ApiState>,
    Path(start): Path<String>,
) -> Result<Json<[f64; 3]>, ServerError> {
    run_query(api, move |api| api.temperature_from(&start)).await
}

async fn temperature_range(
    State(api): State<ApiState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<[f64; 3]>, ServerError> {
    run_query(api, move |api| api.temperature_range(&start, &end)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TobsWindow;
    use crate::store::observation_store::ObservationStore;
    use crate::store::test_support::scenario_store;
    use crate::types::dataset::Dataset;
    use axum::body::{self, Body};
    use axum::http::Request;
    use chrono::NaiveDate;
    use serde_json::Value;
    use tower::ServiceExt; // for `oneshot`

    fn app() -> Router {
        let tobs = TobsWindow::builder()
            .station("S1")
            .start(NaiveDate::from_ymd_opt(2017, 8, 1).unwrap())
            .end(NaiveDate::from_ymd_opt(2017, 8, 31).unwrap())
            .build();
        build_router(ClimateApi::new(Arc::new(scenario_store()), tobs))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn precipitation_route() {
        let (status, body) = get_json(app(), "/api/v1.0/precipitation").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"2017-08-01": 0.5, "2017-08-02": 0.2}));
    }

    #[tokio::test]
    async fn stations_and_tobs_routes() {
        let (status, body) = get_json(app(), "/api/v1.0/stations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0][0], "S1");
        assert_eq!(body[1][0], "S2");

        let (status, body) = get_json(app(), "/api/v1.0/tobs").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([78.0, 75.0]));
    }

    #[tokio::test]
    async fn temperature_routes_and_aliases() {
        for uri in ["/api/v1.0/2017-08-01/2017-08-01", "/api/v1.0/temp/2017-08-01/2017-08-01"] {
            let (status, body) = get_json(app(), uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!([78.0, 80.0, 79.0]));
        }
        let (status, body) = get_json(app(), "/api/v1.0/temp/2017-08-02").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([75.0, 75.0, 75.0]));
    }

    #[tokio::test]
    async fn errors_map_to_statuses() {
        let (status, body) = get_json(app(), "/api/v1.0/2017-08-03").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("2017-08-03"));

        let (status, _) = get_json(app(), "/api/v1.0/08012017").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        for uri in ["/api/v1.0/2017-08-%201", "/api/v1.0/+201-08-01/2017-08-01"] {
            let (status, _) = get_json(app(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        }

        let (status, _) = get_json(app(), "/api/v1.0/2017-08-02/2017-08-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_dataset_is_not_found() {
        let store = ObservationStore::new(Dataset::default()).unwrap();
        let app = build_router(ClimateApi::new(Arc::new(store), TobsWindow::default()));
        let (status, _) = get_json(app, "/api/v1.0/precipitation").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn index_is_html() {
        let resp = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/api/v1.0/tobs"));
    }
}
