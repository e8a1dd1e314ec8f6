use crate::infra::{assemble_dashboard, parse_date, AppState};
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use property_pulse::config::SourceMode;
use property_pulse::error::AppError;
use property_pulse::reports::{today_in, DashboardSnapshot};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    /// Reference date, `YYYY-MM-DD`. Defaults to today in the configured zone.
    #[serde(default)]
    pub(crate) today: Option<String>,
    /// `live` or `fixture`; defaults to the configured source.
    #[serde(default)]
    pub(crate) source: Option<String>,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/properties/:property_id/dashboard",
            get(dashboard_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn dashboard_endpoint(
    Extension(state): Extension<AppState>,
    Path(property_id): Path<u64>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let today = match query.today.as_deref() {
        Some(raw) => parse_date(raw).map_err(AppError::BadRequest)?,
        None => today_in(state.reports.timezone),
    };
    let mode = match query.source.as_deref() {
        Some(raw) => {
            SourceMode::parse(raw).map_err(|err| AppError::BadRequest(err.to_string()))?
        }
        None => state.reports.source,
    };

    let snapshot = assemble_dashboard(state.reports.clone(), mode, property_id, today).await?;
    info!(property_id, %today, ?mode, "dashboard served");
    Ok(Json(snapshot))
}
