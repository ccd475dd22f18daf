// HTTP request handlers
use crate::application::dashboard_builder::Selection;
use crate::domain::catalog::{Catalog, CatalogError};
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Comma-separated plugin or group keys
    pub metric: Option<String>,
    /// Duration token, e.g. `6h`
    pub time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogSummary<'a> {
    pub plugins: Vec<&'a str>,
    pub groups: &'a IndexMap<String, Vec<String>>,
}

impl<'a> CatalogSummary<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            plugins: catalog.plugins().map(|(k, _)| k.as_str()).collect(),
            groups: catalog.groups(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/catalog", get(get_catalog))
        .route("/dashboards/:host", get(get_dashboard))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

async fn respond<T: Serialize>(status: StatusCode, data: &T, compress: bool) -> Response {
    match json_response(status, data, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Invalid catalogs are our fault (500); failed fetches are upstream (502).
pub fn error_status(error: &anyhow::Error) -> StatusCode {
    if error.chain().any(|cause| cause.is::<CatalogError>()) {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_GATEWAY
    }
}

async fn respond_error(error: &anyhow::Error, compress: bool) -> Response {
    respond(error_status(error), &json!({ "error": format!("{:#}", error) }), compress).await
}

/// Generate the dashboard for a host
pub async fn get_dashboard(
    Path(host): Path<String>,
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(headers.get(header::ACCEPT_ENCODING));
    let selection = Selection {
        host,
        metric: query.metric,
        time: query.time,
    };

    match state.dashboard_service.get_dashboard(&selection).await {
        Ok(dashboard) => respond(StatusCode::OK, &dashboard, compress).await,
        Err(e) => {
            tracing::error!("Error generating dashboard for {}: {:#}", selection.host, e);
            respond_error(&e, compress).await
        }
    }
}

/// List the plugin and group keys usable in the `metric` selector
pub async fn get_catalog(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(headers.get(header::ACCEPT_ENCODING));

    match state.dashboard_service.get_catalog().await {
        Ok(catalog) => respond(StatusCode::OK, &CatalogSummary::new(&catalog), compress).await,
        Err(e) => {
            tracing::error!("Error loading catalog: {:#}", e);
            respond_error(&e, compress).await
        }
    }
}
